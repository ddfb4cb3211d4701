use serde::{Deserialize, Serialize};

pub type StatusId = i32;
pub type GenreId = i32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDto {
    pub id: StatusId,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreDto {
    pub id: GenreId,
    #[serde(default)]
    pub name: Option<String>,
}

/// Common shape of the id/name lookup rows.
pub trait LookupEntry {
    fn id(&self) -> i32;
    fn name(&self) -> Option<&str>;
}

impl LookupEntry for StatusDto {
    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl LookupEntry for GenreDto {
    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Session-cached id/name table. Lookups are linear and assume names are
/// unique; with duplicates the first row wins.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable<T> {
    entries: Vec<T>,
}

impl<T> Default for LookupTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: LookupEntry> LookupTable<T> {
    pub fn new(entries: Vec<T>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn name_for(&self, id: i32) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.id() == id)
            .and_then(|entry| entry.name())
    }

    pub fn id_for(&self, name: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|entry| entry.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
            .map(|entry| entry.id())
    }

    /// Cycles `None -> first -> ... -> last -> None`.
    pub fn next_id(&self, current: Option<i32>) -> Option<i32> {
        match current {
            None => self.entries.first().map(|e| e.id()),
            Some(id) => {
                let position = self.entries.iter().position(|e| e.id() == id)?;
                self.entries.get(position + 1).map(|e| e.id())
            }
        }
    }

    /// Reverse of [`LookupTable::next_id`].
    pub fn prev_id(&self, current: Option<i32>) -> Option<i32> {
        match current {
            None => self.entries.last().map(|e| e.id()),
            Some(id) => {
                let position = self.entries.iter().position(|e| e.id() == id)?;
                position
                    .checked_sub(1)
                    .and_then(|p| self.entries.get(p))
                    .map(|e| e.id())
            }
        }
    }
}

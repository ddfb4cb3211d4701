use serde::{Deserialize, Serialize};

use super::lookup::{GenreId, StatusId};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    #[default]
    Title,
    Author,
    Rating,
    PublishedYear,
    Genre,
    Status,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Title,
        SortColumn::Author,
        SortColumn::PublishedYear,
        SortColumn::Genre,
        SortColumn::Status,
        SortColumn::Rating,
    ];

    /// Wire value for the `SortBy` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Title => "title",
            SortColumn::Author => "author",
            SortColumn::Rating => "rating",
            SortColumn::PublishedYear => "publishedYear",
            SortColumn::Genre => "genre",
            SortColumn::Status => "status",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Title => "Title",
            SortColumn::Author => "Author",
            SortColumn::Rating => "Rating",
            SortColumn::PublishedYear => "Year",
            SortColumn::Genre => "Genre",
            SortColumn::Status => "Status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BookFilter {
    pub search: String,
    pub status_id: Option<StatusId>,
    pub genre_id: Option<GenreId>,
    pub sort_by: SortColumn,
    pub sort_dir: SortDirection,
}

impl BookFilter {
    pub fn merge(&self, patch: FilterPatch) -> Self {
        Self {
            search: patch.search.unwrap_or_else(|| self.search.clone()),
            status_id: patch.status_id.unwrap_or(self.status_id),
            genre_id: patch.genre_id.unwrap_or(self.genre_id),
            sort_by: patch.sort_by.unwrap_or(self.sort_by),
            sort_dir: patch.sort_dir.unwrap_or(self.sort_dir),
        }
    }

    pub fn is_narrowed(&self) -> bool {
        !self.search.trim().is_empty() || self.status_id.is_some() || self.genre_id.is_some()
    }
}

/// Partial update of a [`BookFilter`]. The id fields are doubly optional so
/// a patch can clear a selection (`Some(None)`) as well as leave it alone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterPatch {
    pub search: Option<String>,
    pub status_id: Option<Option<StatusId>>,
    pub genre_id: Option<Option<GenreId>>,
    pub sort_by: Option<SortColumn>,
    pub sort_dir: Option<SortDirection>,
}

impl From<BookFilter> for FilterPatch {
    fn from(filter: BookFilter) -> Self {
        Self {
            search: Some(filter.search),
            status_id: Some(filter.status_id),
            genre_id: Some(filter.genre_id),
            sort_by: Some(filter.sort_by),
            sort_dir: Some(filter.sort_dir),
        }
    }
}

/// Canonical parameter set for one `GET /Books/paged` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
    pub filter: BookFilter,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            filter: BookFilter::default(),
        }
    }
}

impl PageQuery {
    pub fn new(page: u32, page_size: u32, filter: BookFilter) -> Self {
        Self {
            page,
            page_size,
            filter,
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("Page", self.page.to_string()),
            ("PageSize", self.page_size.to_string()),
        ];

        let search = self.filter.search.trim();
        if !search.is_empty() {
            pairs.push(("SearchText", search.to_string()));
        }
        if let Some(status_id) = self.filter.status_id {
            pairs.push(("StatusId", status_id.to_string()));
        }
        if let Some(genre_id) = self.filter.genre_id {
            pairs.push(("GenreId", genre_id.to_string()));
        }

        pairs.push(("SortBy", self.filter.sort_by.as_str().to_string()));
        pairs.push(("SortDir", self.filter.sort_dir.as_str().to_string()));
        pairs
    }
}

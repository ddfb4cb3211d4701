use serde::{Deserialize, Serialize};

use super::book::Book;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedBooks {
    #[serde(default)]
    pub items: Vec<Book>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl PagedBooks {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

/// Pagination metadata as last reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_bounds_follow_server_totals() {
        let first = Pagination {
            page: 1,
            page_size: 10,
            total_count: 25,
            total_pages: 3,
        };
        assert!(first.has_next());
        assert!(!first.has_prev());

        let last = Pagination { page: 3, ..first };
        assert!(!last.has_next());
        assert!(last.has_prev());

        assert!(!Pagination::default().has_next());
    }
}

//! List parameters and the gesture rules that change them.
//!
//! Every mutating method returns the [`PageQuery`] the caller must fetch
//! next. The controller itself never touches data; the server is the source
//! of truth for what a page contains.

use crate::model::{
    BookFilter, GenreId, PageQuery, Pagination, SortColumn, SortDirection, StatusId,
    filter::DEFAULT_PAGE_SIZE,
};

pub const PAGE_SIZES: [u32; 4] = [5, 10, 20, 50];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListController {
    filter: BookFilter,
    page: u32,
    page_size: u32,
}

impl Default for ListController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListController {
    pub fn new(page_size: u32) -> Self {
        Self {
            filter: BookFilter::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn filter(&self) -> &BookFilter {
        &self.filter
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn query(&self) -> PageQuery {
        PageQuery::new(self.page, self.page_size, self.filter.clone())
    }

    #[must_use]
    pub fn set_search(&mut self, search: impl Into<String>) -> PageQuery {
        self.filter.search = search.into();
        self.reset_page()
    }

    #[must_use]
    pub fn set_status(&mut self, status_id: Option<StatusId>) -> PageQuery {
        self.filter.status_id = status_id;
        self.reset_page()
    }

    #[must_use]
    pub fn set_genre(&mut self, genre_id: Option<GenreId>) -> PageQuery {
        self.filter.genre_id = genre_id;
        self.reset_page()
    }

    /// Same column flips the direction; a new column starts ascending.
    #[must_use]
    pub fn sort_by(&mut self, column: SortColumn) -> PageQuery {
        if self.filter.sort_by == column {
            self.filter.sort_dir = self.filter.sort_dir.toggled();
        } else {
            self.filter.sort_by = column;
            self.filter.sort_dir = SortDirection::Asc;
        }
        self.reset_page()
    }

    #[must_use]
    pub fn set_page_size(&mut self, page_size: u32) -> PageQuery {
        self.page_size = page_size.max(1);
        self.reset_page()
    }

    #[must_use]
    pub fn cycle_page_size(&mut self) -> PageQuery {
        let next = PAGE_SIZES
            .iter()
            .copied()
            .find(|size| *size > self.page_size)
            .unwrap_or(PAGE_SIZES[0]);
        self.set_page_size(next)
    }

    #[must_use]
    pub fn clear_filters(&mut self) -> PageQuery {
        self.filter = BookFilter {
            sort_by: self.filter.sort_by,
            sort_dir: self.filter.sort_dir,
            ..BookFilter::default()
        };
        self.reset_page()
    }

    /// Jumps to `page`; `None` when it lies outside the server's page range.
    #[must_use]
    pub fn go_to_page(&mut self, page: u32, pagination: Option<Pagination>) -> Option<PageQuery> {
        let last = pagination.map_or(1, |p| p.total_pages.max(1));
        if page == 0 || page > last || page == self.page {
            return None;
        }
        self.page = page;
        Some(self.query())
    }

    #[must_use]
    pub fn next_page(&mut self, pagination: Option<Pagination>) -> Option<PageQuery> {
        self.go_to_page(self.page + 1, pagination)
    }

    #[must_use]
    pub fn prev_page(&mut self, pagination: Option<Pagination>) -> Option<PageQuery> {
        let page = self.page.checked_sub(1)?;
        self.go_to_page(page, pagination)
    }

    /// Re-reads the current page, e.g. after a mutation emptied it.
    pub fn refresh(&self) -> PageQuery {
        self.query()
    }

    fn reset_page(&mut self) -> PageQuery {
        self.page = 1;
        self.query()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_pages() -> Option<Pagination> {
        Some(Pagination {
            page: 1,
            page_size: 10,
            total_count: 25,
            total_pages: 3,
        })
    }

    fn on_page_three() -> ListController {
        let mut controller = ListController::default();
        let _ = controller.go_to_page(3, three_pages());
        assert_eq!(controller.page(), 3);
        controller
    }

    #[test]
    fn every_filter_change_resets_to_first_page() {
        let mut controller = on_page_three();
        assert_eq!(controller.set_search("dune").page, 1);

        let mut controller = on_page_three();
        assert_eq!(controller.set_status(Some(2)).page, 1);

        let mut controller = on_page_three();
        assert_eq!(controller.set_genre(Some(4)).page, 1);

        let mut controller = on_page_three();
        assert_eq!(controller.sort_by(SortColumn::Rating).page, 1);

        let mut controller = on_page_three();
        assert_eq!(controller.set_page_size(20).page, 1);

        let mut controller = on_page_three();
        assert_eq!(controller.clear_filters().page, 1);
    }

    #[test]
    fn same_column_toggles_and_new_column_starts_ascending() {
        let mut controller = ListController::default();
        let original = controller.filter().sort_dir;

        let first = controller.sort_by(SortColumn::Title);
        assert_eq!(first.filter.sort_dir, original.toggled());
        let second = controller.sort_by(SortColumn::Title);
        assert_eq!(second.filter.sort_dir, original);

        let _ = controller.sort_by(SortColumn::Title);
        let switched = controller.sort_by(SortColumn::Author);
        assert_eq!(switched.filter.sort_by, SortColumn::Author);
        assert_eq!(switched.filter.sort_dir, SortDirection::Asc);
    }

    #[test]
    fn query_reflects_the_last_set_values() {
        let mut controller = ListController::new(20);
        let _ = controller.set_search("first");
        let _ = controller.set_status(Some(1));
        let _ = controller.set_search("second");
        let _ = controller.set_genre(Some(7));
        let _ = controller.set_status(None);
        let query = controller.sort_by(SortColumn::PublishedYear);

        assert_eq!(
            query,
            PageQuery {
                page: 1,
                page_size: 20,
                filter: BookFilter {
                    search: "second".into(),
                    status_id: None,
                    genre_id: Some(7),
                    sort_by: SortColumn::PublishedYear,
                    sort_dir: SortDirection::Asc,
                },
            }
        );
    }

    #[test]
    fn paging_is_bounded_by_server_totals() {
        let mut controller = ListController::default();
        assert_eq!(controller.prev_page(three_pages()), None);
        assert_eq!(controller.next_page(three_pages()).map(|q| q.page), Some(2));
        assert_eq!(controller.next_page(three_pages()).map(|q| q.page), Some(3));
        assert_eq!(controller.next_page(three_pages()), None);
        assert_eq!(controller.prev_page(three_pages()).map(|q| q.page), Some(2));
    }

    #[test]
    fn paging_without_metadata_stays_on_first_page() {
        let mut controller = ListController::default();
        assert_eq!(controller.next_page(None), None);
    }

    #[test]
    fn page_sizes_cycle_and_wrap() {
        let mut controller = ListController::new(10);
        assert_eq!(controller.cycle_page_size().page_size, 20);
        assert_eq!(controller.cycle_page_size().page_size, 50);
        assert_eq!(controller.cycle_page_size().page_size, 5);
    }

    #[test]
    fn clearing_filters_keeps_sort() {
        let mut controller = ListController::default();
        let _ = controller.sort_by(SortColumn::Rating);
        let _ = controller.set_search("x");
        let query = controller.clear_filters();
        assert_eq!(query.filter.sort_by, SortColumn::Rating);
        assert_eq!(query.filter.search, "");
    }
}

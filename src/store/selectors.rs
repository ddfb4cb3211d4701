//! Read-only projections over [`BookStateModel`].
//!
//! Plain functions are recomputed on every call. [`LocalProjection`] is the
//! one cached projection: the client-side filtered and sorted list, keyed on
//! the books revision and the filter it was computed for.

use im::Vector;

use crate::{
    model::{Book, BookFilter, Pagination, SortColumn, SortDirection},
    util::sort::filter_and_sort,
};

use super::state::BookStateModel;

pub fn books(state: &BookStateModel) -> &Vector<Book> {
    &state.books
}

pub fn is_loading(state: &BookStateModel) -> bool {
    state.loading
}

pub fn error(state: &BookStateModel) -> Option<&str> {
    state.error.as_deref()
}

pub fn pagination(state: &BookStateModel) -> Option<Pagination> {
    state.pagination
}

pub fn status_name(state: &BookStateModel, id: Option<i32>) -> &str {
    id.and_then(|id| state.statuses.name_for(id))
        .unwrap_or("Any status")
}

pub fn genre_name(state: &BookStateModel, id: Option<i32>) -> &str {
    id.and_then(|id| state.genres.name_for(id))
        .unwrap_or("Any genre")
}

pub fn page_summary(state: &BookStateModel) -> String {
    match state.pagination {
        Some(p) if p.total_pages > 0 => format!(
            "Page {} of {} · {} books · {} per page",
            p.page, p.total_pages, p.total_count, p.page_size
        ),
        Some(p) => format!("No books · {} per page", p.page_size),
        None => format!("{} books", state.books.len()),
    }
}

/// Header marker for `column` under the active filter.
pub fn sort_indicator(filter: &BookFilter, column: SortColumn) -> &'static str {
    if filter.sort_by != column {
        return "";
    }
    match filter.sort_dir {
        SortDirection::Asc => " ▲",
        SortDirection::Desc => " ▼",
    }
}

#[derive(Debug, Default)]
pub struct LocalProjection {
    key: Option<(u64, BookFilter)>,
    books: Vec<Book>,
    computations: usize,
}

impl LocalProjection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, state: &BookStateModel) -> &[Book] {
        let fresh = self
            .key
            .as_ref()
            .is_some_and(|(revision, filter)| {
                *revision == state.books_revision && *filter == state.filter
            });

        if !fresh {
            let source: Vec<Book> = state.books.iter().cloned().collect();
            self.books = filter_and_sort(&source, &state.filter, &state.statuses, &state.genres);
            self.key = Some((state.books_revision, state.filter.clone()));
            self.computations += 1;
        }

        &self.books
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }

    pub fn computations(&self) -> usize {
        self.computations
    }
}

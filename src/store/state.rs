use im::Vector;

use crate::model::{Book, BookFilter, GenreDto, LookupTable, Pagination, StatusDto};

use super::RequestToken;

/// Immutable snapshot of the catalog list. A new value is produced for every
/// transition; readers keep whichever `Arc` they loaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookStateModel {
    pub books: Vector<Book>,
    /// Bumped whenever `books` changes, so projections can key on it.
    pub books_revision: u64,
    pub selected_book: Option<Book>,
    /// True while any page, detail or mutation request is outstanding.
    pub loading: bool,
    pub error: Option<String>,
    pub filter: BookFilter,
    pub statuses: LookupTable<StatusDto>,
    pub genres: LookupTable<GenreDto>,
    pub pagination: Option<Pagination>,
    pub page_token: Option<RequestToken>,
    pub detail_token: Option<RequestToken>,
    pub pending_mutations: u32,
}

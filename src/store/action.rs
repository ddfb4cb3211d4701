use crate::model::{
    Book, BookId, CreateBookRequest, FilterPatch, GenreDto, PageQuery, PagedBooks, StatusDto,
    UpdateBookRequest,
};

use super::RequestToken;

/// Every transition the store accepts: a request half, issued before the
/// network call, and a result half carrying the response.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum BookAction {
    // Requests
    FetchPage {
        token: RequestToken,
        query: PageQuery,
    },
    FetchAll { token: RequestToken },
    FetchDetail { token: RequestToken, id: BookId },
    Create { payload: CreateBookRequest },
    Update { payload: UpdateBookRequest },
    Delete { id: BookId },

    // Results
    PageLoaded {
        token: RequestToken,
        page: PagedBooks,
    },
    AllLoaded {
        token: RequestToken,
        books: Vec<Book>,
    },
    PageFailed { token: RequestToken, error: String },
    DetailLoaded { token: RequestToken, book: Book },
    DetailFailed { token: RequestToken, error: String },
    LookupsLoaded {
        statuses: Vec<StatusDto>,
        genres: Vec<GenreDto>,
    },
    LookupsFailed { error: String },
    Created { book: Book },
    Updated { book: Book },
    Deleted { id: BookId },
    MutationFailed { error: String },

    // Local
    ClearSelection,
    SetFilter(FilterPatch),
    ClearFilter,
    ClearError,
}

impl BookAction {
    pub fn name(&self) -> &'static str {
        match self {
            BookAction::FetchPage { .. } => "fetch_page",
            BookAction::FetchAll { .. } => "fetch_all",
            BookAction::FetchDetail { .. } => "fetch_detail",
            BookAction::Create { .. } => "create",
            BookAction::Update { .. } => "update",
            BookAction::Delete { .. } => "delete",
            BookAction::PageLoaded { .. } => "page_loaded",
            BookAction::AllLoaded { .. } => "all_loaded",
            BookAction::PageFailed { .. } => "page_failed",
            BookAction::DetailLoaded { .. } => "detail_loaded",
            BookAction::DetailFailed { .. } => "detail_failed",
            BookAction::LookupsLoaded { .. } => "lookups_loaded",
            BookAction::LookupsFailed { .. } => "lookups_failed",
            BookAction::Created { .. } => "created",
            BookAction::Updated { .. } => "updated",
            BookAction::Deleted { .. } => "deleted",
            BookAction::MutationFailed { .. } => "mutation_failed",
            BookAction::ClearSelection => "clear_selection",
            BookAction::SetFilter(_) => "set_filter",
            BookAction::ClearFilter => "clear_filter",
            BookAction::ClearError => "clear_error",
        }
    }
}

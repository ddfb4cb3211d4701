use im::Vector;

use crate::model::{Book, BookFilter, LookupTable};

use super::{RequestToken, action::BookAction, state::BookStateModel};

/// Computes the state that follows `action`.
///
/// Returns `None` when the action is a result for a request that is no
/// longer the latest of its kind; the caller keeps the current state.
pub fn reduce(state: &BookStateModel, action: BookAction) -> Option<BookStateModel> {
    let mut next = state.clone();

    match action {
        BookAction::FetchPage { token, query } => {
            next.error = None;
            next.page_token = Some(token);
            next.filter = query.filter;
        }
        BookAction::FetchAll { token } => {
            next.error = None;
            next.page_token = Some(token);
        }
        BookAction::FetchDetail { token, .. } => {
            next.error = None;
            next.detail_token = Some(token);
        }
        BookAction::Create { .. } | BookAction::Update { .. } | BookAction::Delete { .. } => {
            next.pending_mutations += 1;
        }

        BookAction::PageLoaded { token, page } => {
            if !is_current(state.page_token, token) {
                return None;
            }
            next.pagination = Some(page.pagination());
            replace_books(&mut next, page.items.into_iter().collect());
            settle(&mut next);
            next.page_token = None;
        }
        BookAction::AllLoaded { token, books } => {
            if !is_current(state.page_token, token) {
                return None;
            }
            next.pagination = None;
            replace_books(&mut next, books.into_iter().collect());
            settle(&mut next);
            next.page_token = None;
        }
        BookAction::PageFailed { token, error } => {
            if !is_current(state.page_token, token) {
                return None;
            }
            fail(&mut next, error);
            next.page_token = None;
        }
        BookAction::DetailLoaded { token, book } => {
            if !is_current(state.detail_token, token) {
                return None;
            }
            next.selected_book = Some(book);
            settle(&mut next);
            next.detail_token = None;
        }
        BookAction::DetailFailed { token, error } => {
            if !is_current(state.detail_token, token) {
                return None;
            }
            fail(&mut next, error);
            next.detail_token = None;
        }
        BookAction::LookupsLoaded { statuses, genres } => {
            next.statuses = LookupTable::new(statuses);
            next.genres = LookupTable::new(genres);
            next.error = None;
        }
        BookAction::LookupsFailed { error } => {
            next.error = Some(error);
        }
        BookAction::Created { book } => {
            let mut books = next.books.clone();
            books.push_back(book);
            replace_books(&mut next, books);
            settle_mutation(&mut next);
        }
        BookAction::Updated { book } => {
            if let Some(index) = next.books.iter().position(|b| b.id == book.id) {
                let books = next.books.update(index, book.clone());
                replace_books(&mut next, books);
            }
            if next.selected_book.as_ref().is_some_and(|b| b.id == book.id) {
                next.selected_book = Some(book);
            }
            settle_mutation(&mut next);
        }
        BookAction::Deleted { id } => {
            if let Some(index) = next.books.iter().position(|b| b.id == id) {
                let mut books = next.books.clone();
                books.remove(index);
                replace_books(&mut next, books);
            }
            if next.selected_book.as_ref().is_some_and(|b| b.id == id) {
                next.selected_book = None;
            }
            settle_mutation(&mut next);
        }
        BookAction::MutationFailed { error } => {
            next.pending_mutations = next.pending_mutations.saturating_sub(1);
            fail(&mut next, error);
        }

        BookAction::ClearSelection => {
            next.selected_book = None;
            next.detail_token = None;
        }
        BookAction::SetFilter(patch) => {
            next.filter = state.filter.merge(patch);
        }
        BookAction::ClearFilter => {
            next.filter = BookFilter::default();
        }
        BookAction::ClearError => {
            next.error = None;
        }
    }

    next.loading = is_outstanding(&next);
    Some(next)
}

fn is_current(latest: Option<RequestToken>, token: RequestToken) -> bool {
    latest == Some(token)
}

fn replace_books(state: &mut BookStateModel, books: Vector<Book>) {
    state.books = books;
    state.books_revision += 1;
}

fn is_outstanding(state: &BookStateModel) -> bool {
    state.page_token.is_some() || state.detail_token.is_some() || state.pending_mutations > 0
}

fn settle(state: &mut BookStateModel) {
    state.error = None;
}

fn settle_mutation(state: &mut BookStateModel) {
    state.pending_mutations = state.pending_mutations.saturating_sub(1);
    settle(state);
}

fn fail(state: &mut BookStateModel, error: String) {
    state.error = Some(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BookId, CreateBookRequest, FilterPatch, PageQuery, PagedBooks, Pagination, SortColumn,
    };

    fn book(id: BookId, title: &str) -> Book {
        Book {
            id,
            title: Some(title.to_string()),
            author: Some("Author".into()),
            isbn: None,
            published_year: None,
            genre: None,
            status: None,
            rating: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn page(items: Vec<Book>, total_count: u64, page: u32, page_size: u32) -> PagedBooks {
        let total_pages = total_count.div_ceil(page_size as u64) as u32;
        PagedBooks {
            items,
            total_count,
            page,
            page_size,
            total_pages,
        }
    }

    fn apply(state: &BookStateModel, action: BookAction) -> BookStateModel {
        reduce(state, action).expect("action should apply")
    }

    fn loaded(books: Vec<Book>) -> BookStateModel {
        let state = apply(
            &BookStateModel::default(),
            BookAction::FetchPage {
                token: RequestToken(1),
                query: PageQuery::default(),
            },
        );
        let total = books.len() as u64;
        apply(
            &state,
            BookAction::PageLoaded {
                token: RequestToken(1),
                page: page(books, total, 1, 10),
            },
        )
    }

    #[test]
    fn fetch_page_marks_loading_and_clears_error() {
        let state = BookStateModel {
            error: Some("boom".into()),
            ..BookStateModel::default()
        };
        let next = apply(
            &state,
            BookAction::FetchPage {
                token: RequestToken(4),
                query: PageQuery::default(),
            },
        );
        assert!(next.loading);
        assert_eq!(next.error, None);
        assert_eq!(next.page_token, Some(RequestToken(4)));
    }

    #[test]
    fn page_result_replaces_books_and_pagination() {
        let state = loaded(vec![book(1, "A"), book(2, "B"), book(3, "C")]);
        assert_eq!(state.books.len(), 3);
        assert_eq!(
            state.pagination,
            Some(Pagination {
                page: 1,
                page_size: 10,
                total_count: 3,
                total_pages: 1,
            })
        );
        assert!(!state.loading);
        assert_eq!(state.page_token, None);
    }

    #[test]
    fn page_failure_keeps_previous_books() {
        let state = loaded(vec![book(1, "A"), book(2, "B")]);
        let fetching = apply(
            &state,
            BookAction::FetchPage {
                token: RequestToken(2),
                query: PageQuery::default(),
            },
        );
        let failed = apply(
            &fetching,
            BookAction::PageFailed {
                token: RequestToken(2),
                error: "Unable to reach the book service".into(),
            },
        );

        assert_eq!(failed.books, state.books);
        assert_eq!(failed.pagination, state.pagination);
        assert!(!failed.loading);
        assert!(failed.error.as_deref().is_some_and(|e| !e.is_empty()));
    }

    #[test]
    fn superseded_page_result_is_discarded() {
        let state = BookStateModel::default();
        let first = apply(
            &state,
            BookAction::FetchPage {
                token: RequestToken(1),
                query: PageQuery::default(),
            },
        );
        let second = apply(
            &first,
            BookAction::FetchPage {
                token: RequestToken(2),
                query: PageQuery::default(),
            },
        );

        let stale = reduce(
            &second,
            BookAction::PageLoaded {
                token: RequestToken(1),
                page: page(vec![book(9, "Old")], 1, 1, 10),
            },
        );
        assert_eq!(stale, None);

        let fresh = apply(
            &second,
            BookAction::PageLoaded {
                token: RequestToken(2),
                page: page(vec![book(1, "New")], 1, 1, 10),
            },
        );
        assert_eq!(fresh.books[0].id, 1);

        let late = reduce(
            &fresh,
            BookAction::PageFailed {
                token: RequestToken(1),
                error: "late".into(),
            },
        );
        assert_eq!(late, None);
    }

    #[test]
    fn delete_removes_exactly_one_matching_record() {
        let mut state = loaded(vec![book(1, "A"), book(2, "B"), book(3, "C")]);
        state.selected_book = Some(book(2, "B"));

        let next = apply(&state, BookAction::Deleted { id: 2 });

        let ids: Vec<_> = next.books.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(next.selected_book, None);
        assert_eq!(next.books_revision, state.books_revision + 1);
    }

    #[test]
    fn delete_keeps_unrelated_selection() {
        let mut state = loaded(vec![book(1, "A"), book(2, "B")]);
        state.selected_book = Some(book(1, "A"));

        let next = apply(&state, BookAction::Deleted { id: 2 });
        assert_eq!(next.selected_book.map(|b| b.id), Some(1));
    }

    #[test]
    fn created_book_is_appended_once() {
        let state = loaded(vec![book(1, "A")]);
        let pending = apply(
            &state,
            BookAction::Create {
                payload: CreateBookRequest {
                    title: "B".into(),
                    author: "Author".into(),
                    isbn: None,
                    published_year: None,
                    genre_id: None,
                    status_id: 1,
                    rating: None,
                },
            },
        );
        assert!(pending.loading);

        let next = apply(
            &pending,
            BookAction::Created {
                book: book(42, "B"),
            },
        );
        assert_eq!(next.books.len(), 2);
        assert_eq!(next.books.last().map(|b| b.id), Some(42));
        assert!(!next.loading);
        assert_eq!(next.pagination, state.pagination);
    }

    #[test]
    fn failed_mutation_leaves_collection_alone() {
        let state = loaded(vec![book(1, "A")]);
        let next = apply(
            &state,
            BookAction::MutationFailed {
                error: "Server responded with 500: oops".into(),
            },
        );
        assert_eq!(next.books, state.books);
        assert_eq!(next.books_revision, state.books_revision);
        assert_eq!(next.error.as_deref(), Some("Server responded with 500: oops"));
    }

    #[test]
    fn update_replaces_by_id_and_refreshes_selection() {
        let mut state = loaded(vec![book(1, "A"), book(2, "B")]);
        state.selected_book = Some(book(2, "B"));

        let next = apply(
            &state,
            BookAction::Updated {
                book: book(2, "B, revised"),
            },
        );

        assert_eq!(next.books[1].title.as_deref(), Some("B, revised"));
        assert_eq!(next.books[0], state.books[0]);
        assert_eq!(
            next.selected_book.and_then(|b| b.title),
            Some("B, revised".to_string())
        );
    }

    #[test]
    fn clearing_selection_fences_inflight_detail() {
        let state = apply(
            &BookStateModel::default(),
            BookAction::FetchDetail {
                token: RequestToken(3),
                id: 5,
            },
        );
        let cleared = apply(&state, BookAction::ClearSelection);
        assert!(!cleared.loading);

        let late = reduce(
            &cleared,
            BookAction::DetailLoaded {
                token: RequestToken(3),
                book: book(5, "E"),
            },
        );
        assert_eq!(late, None);
    }

    #[test]
    fn filter_patches_merge_and_reset() {
        let state = apply(
            &BookStateModel::default(),
            BookAction::SetFilter(FilterPatch {
                search: Some("dune".into()),
                sort_by: Some(SortColumn::Rating),
                ..FilterPatch::default()
            }),
        );
        let state = apply(
            &state,
            BookAction::SetFilter(FilterPatch {
                status_id: Some(Some(2)),
                ..FilterPatch::default()
            }),
        );
        assert_eq!(state.filter.search, "dune");
        assert_eq!(state.filter.sort_by, SortColumn::Rating);
        assert_eq!(state.filter.status_id, Some(2));
        assert!(!state.loading);

        let reset = apply(&state, BookAction::ClearFilter);
        assert_eq!(reset.filter, BookFilter::default());
    }

    #[test]
    fn unpaged_result_drops_pagination() {
        let state = loaded(vec![book(1, "A")]);
        let state = apply(
            &state,
            BookAction::FetchAll {
                token: RequestToken(2),
            },
        );
        let before = state.books_revision;
        let next = apply(
            &state,
            BookAction::AllLoaded {
                token: RequestToken(2),
                books: vec![book(1, "A"), book(2, "B")],
            },
        );
        assert_eq!(next.pagination, None);
        assert_eq!(next.books.len(), 2);
        assert_eq!(next.books_revision, before + 1);
        assert!(!next.loading);
    }

    #[test]
    fn detail_result_sets_selection_and_failure_keeps_it() {
        let state = apply(
            &BookStateModel::default(),
            BookAction::FetchDetail {
                token: RequestToken(1),
                id: 7,
            },
        );
        let state = apply(
            &state,
            BookAction::DetailLoaded {
                token: RequestToken(1),
                book: book(7, "G"),
            },
        );
        assert_eq!(state.selected_book.as_ref().map(|b| b.id), Some(7));
        assert_eq!(state.detail_token, None);

        let state = apply(
            &state,
            BookAction::FetchDetail {
                token: RequestToken(2),
                id: 8,
            },
        );
        let failed = apply(
            &state,
            BookAction::DetailFailed {
                token: RequestToken(2),
                error: "Server responded with 404: Not Found".into(),
            },
        );
        assert_eq!(failed.selected_book.as_ref().map(|b| b.id), Some(7));
        assert!(!failed.loading);
        assert!(failed.error.is_some());
    }

    #[test]
    fn clear_error_touches_nothing_else() {
        let state = apply(
            &loaded(vec![book(1, "A")]),
            BookAction::MutationFailed {
                error: "oops".into(),
            },
        );
        let cleared = apply(&state, BookAction::ClearError);
        assert_eq!(cleared.error, None);
        assert_eq!(cleared.books, state.books);
        assert_eq!(cleared.books_revision, state.books_revision);
    }

    #[test]
    fn page_failure_keeps_loading_while_detail_is_outstanding() {
        let state = apply(
            &BookStateModel::default(),
            BookAction::FetchDetail {
                token: RequestToken(1),
                id: 1,
            },
        );
        let state = apply(
            &state,
            BookAction::FetchPage {
                token: RequestToken(2),
                query: PageQuery::default(),
            },
        );
        let failed = apply(
            &state,
            BookAction::PageFailed {
                token: RequestToken(2),
                error: "Request failed: error decoding response body".into(),
            },
        );
        assert!(failed.loading);
        assert_eq!(failed.detail_token, Some(RequestToken(1)));

        let done = apply(
            &failed,
            BookAction::DetailLoaded {
                token: RequestToken(1),
                book: book(1, "A"),
            },
        );
        assert!(!done.loading);
    }

    #[test]
    fn mutation_result_keeps_loading_while_page_is_outstanding() {
        let state = apply(
            &loaded(vec![book(1, "A")]),
            BookAction::Delete { id: 1 },
        );
        let state = apply(
            &state,
            BookAction::FetchPage {
                token: RequestToken(2),
                query: PageQuery::default(),
            },
        );

        let deleted = apply(&state, BookAction::Deleted { id: 1 });
        assert_eq!(deleted.pending_mutations, 0);
        assert!(deleted.loading);

        let cleared = apply(&deleted, BookAction::ClearSelection);
        assert!(cleared.loading);
    }

    #[test]
    fn rejected_mutation_without_request_does_not_underflow() {
        let state = apply(
            &BookStateModel::default(),
            BookAction::MutationFailed {
                error: "Title is required".into(),
            },
        );
        assert_eq!(state.pending_mutations, 0);
        assert!(!state.loading);
    }

    #[test]
    fn loaded_lookups_clear_previous_error() {
        let state = apply(
            &BookStateModel::default(),
            BookAction::LookupsFailed {
                error: "Unable to reach the book service: refused".into(),
            },
        );
        let next = apply(
            &state,
            BookAction::LookupsLoaded {
                statuses: Vec::new(),
                genres: Vec::new(),
            },
        );
        assert_eq!(next.error, None);
    }
}

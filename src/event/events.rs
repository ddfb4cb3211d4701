use std::fmt;

use crate::model::{Book, BookId, CreateBookRequest, UpdateBookRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchPage,
    FetchAll,
    FetchDetail,
    FetchLookups,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::FetchPage | Operation::FetchAll => "Loading books",
            Operation::FetchDetail => "Loading book",
            Operation::FetchLookups => "Loading lookups",
            Operation::Create => "Creating book",
            Operation::Update => "Updating book",
            Operation::Delete => "Deleting book",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum Event {
    // Events
    PageLoaded,
    DetailLoaded(BookId),
    LookupsLoaded,
    BookCreated(Book),
    BookUpdated(Book),
    BookDeleted(BookId),
    OperationFailed {
        operation: Operation,
        message: String,
    },

    // Commands
    OpenDetail(BookId),
    OpenCreate,
    OpenEdit(Book),
    ConfirmDelete(Book),
    CreateBook(CreateBookRequest),
    UpdateBook(UpdateBookRequest),
    DeleteBook(BookId),
}

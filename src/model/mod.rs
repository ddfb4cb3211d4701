pub mod book;
pub mod filter;
pub mod lookup;
pub mod page;

pub use book::{Book, BookId, CreateBookRequest, UpdateBookRequest, ValidationError};
pub use filter::{BookFilter, FilterPatch, PageQuery, SortColumn, SortDirection};
pub use lookup::{GenreDto, GenreId, LookupTable, StatusDto, StatusId};
pub use page::{PagedBooks, Pagination};

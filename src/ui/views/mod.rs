pub mod book_detail;
pub mod book_form;
pub mod book_list;
pub mod confirm_delete;

pub use book_detail::BookDetail;
pub use book_form::BookForm;
pub use book_list::BookList;
pub use confirm_delete::ConfirmDelete;

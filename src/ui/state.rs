#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    BookList,
    BookDetail,
    BookForm,
    ConfirmDelete,
}

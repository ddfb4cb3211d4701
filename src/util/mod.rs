pub mod colors;
pub mod hook;
pub mod log;
pub mod sort;
pub mod task;

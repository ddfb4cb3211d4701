pub mod notification;
pub mod spinner;

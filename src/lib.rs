pub mod catalog;
pub mod config;
pub mod controller;
pub mod event;
pub mod http;
pub mod model;
pub mod store;
pub mod ui;
pub mod util;

pub mod app;
pub mod config;
pub mod globals;
pub mod nav;
pub mod page;
pub mod ui;
pub mod view;

pub mod error;

pub use error::PageError;

pub mod error_panel;
pub mod loading;

pub use error_panel::{ERROR_HEADING, render_error_panel};
pub use loading::Spinner;

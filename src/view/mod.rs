pub mod layout;

pub use layout::{HEADER_HEIGHT, PageLayout, layout_page};

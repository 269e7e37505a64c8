pub mod loader;
pub mod schema;
pub mod source;

pub use loader::ConfigLoader;
pub use schema::{DIRECT_KEYS, SiteConfig, keys, value_text};
pub use source::{ConfigSource, FileSource, HttpSource, source_for_base};

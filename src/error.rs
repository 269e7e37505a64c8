use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Config fetch failed: HTTP status {status} for {location}")]
    ConfigFetch { status: u16, location: String },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, PageError>;

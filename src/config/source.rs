use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::{PageError, Result};
use crate::globals;

/// Name of the configuration resource, resolved relative to the base path.
pub const CONFIG_FILE: &str = "config.json";

/// A place the configuration document can be fetched from.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Fetch the raw configuration body.
    async fn fetch(&self) -> Result<String>;

    /// The resolved resource location, for diagnostics and the error panel.
    fn location(&self) -> String;
}

/// Fetches the config over HTTP from the deployed site's base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(base: &str) -> Self {
        Self {
            url: format!("{}/{}", base.trim_end_matches('/'), CONFIG_FILE),
        }
    }
}

#[async_trait]
impl ConfigSource for HttpSource {
    async fn fetch(&self) -> Result<String> {
        let response = globals::http_client().get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::ConfigFetch {
                status: status.as_u16(),
                location: self.url.clone(),
            });
        }

        Ok(response.text().await?)
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Reads the config from a local base directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(base: &Path) -> Self {
        Self {
            path: base.join(CONFIG_FILE),
        }
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    async fn fetch(&self) -> Result<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Resolve a base path into the matching source: `http(s)://` bases fetch
/// over the network, anything else reads from a local directory.
pub fn source_for_base(base: &str) -> Box<dyn ConfigSource> {
    if base.starts_with("http://") || base.starts_with("https://") {
        Box::new(HttpSource::new(base))
    } else {
        Box::new(FileSource::new(Path::new(base)))
    }
}

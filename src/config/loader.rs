use crate::error::Result;

use super::schema::SiteConfig;
use super::source::ConfigSource;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Fetch and parse the configuration: one linear pipeline of fallible
    /// steps. The first failure propagates to the caller, which owns the
    /// full-page fallback. Called exactly once per page lifecycle.
    pub async fn load(source: &dyn ConfigSource) -> Result<SiteConfig> {
        let body = source.fetch().await?;
        Self::parse(&body)
    }

    pub fn parse(body: &str) -> Result<SiteConfig> {
        Ok(serde_json::from_str(body)?)
    }
}

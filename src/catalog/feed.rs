//! Source of candidate release lines for the support matrix

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::catalog::error::CatalogError;

/// Provides the live list of supported release lines and a static fallback
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VersionFeed: Send + Sync {
    /// Non-EOL release lines, in feed order
    async fn supported_versions(&self) -> Result<Vec<String>, CatalogError>;

    /// Used when [`VersionFeed::supported_versions`] fails
    fn fallback_versions(&self) -> Vec<String>;
}

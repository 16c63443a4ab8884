//! HTTP source for the end-of-life feed

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use tracing::{debug, warn};

use crate::catalog::error::CatalogError;
use crate::catalog::types::{Catalog, CatalogEntry};

/// A single, non-retried fetch of the catalog
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch and validate one catalog snapshot
    async fn fetch_catalog(&self) -> Result<Catalog, CatalogError>;
}

/// Fetches the catalog from an endoflife.date-style JSON endpoint
pub struct HttpCatalogSource {
    client: Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .user_agent(concat!("support-matrix/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_catalog(&self) -> Result<Catalog, CatalogError> {
        debug!("Fetching catalog: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!("Catalog feed returned status {}: {}", status, self.url);
            return Err(CatalogError::UnexpectedStatus(status.as_u16()));
        }

        let catalog: Catalog = response.json().await.map_err(|e| {
            warn!("Failed to parse catalog response: {}", e);
            CatalogError::InvalidResponse(e.to_string())
        })?;

        validate_catalog(&catalog)?;

        debug!("Fetched {} cycle(s) from {}", catalog.len(), self.url);
        Ok(catalog)
    }
}

/// Reject empty catalogs, blank cycles and duplicate cycles.
pub fn validate_catalog(catalog: &[CatalogEntry]) -> Result<(), CatalogError> {
    if catalog.is_empty() {
        return Err(CatalogError::InvalidResponse(
            "catalog is empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for (index, entry) in catalog.iter().enumerate() {
        let cycle = entry.cycle.trim();
        if cycle.is_empty() {
            return Err(CatalogError::InvalidResponse(format!(
                "entry {index} has an empty cycle"
            )));
        }
        if !seen.insert(cycle) {
            return Err(CatalogError::InvalidResponse(format!(
                "duplicate cycle {cycle:?}"
            )));
        }
    }

    Ok(())
}

//! End-of-life catalog client with an in-memory cache

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info};

use crate::catalog::error::CatalogError;
use crate::catalog::fallback::fallback_versions;
use crate::catalog::feed::VersionFeed;
use crate::catalog::retry::{Clock, RetryPolicy, Sleeper, SystemClock, TokioSleeper, with_retry};
use crate::catalog::source::{CatalogSource, HttpCatalogSource};
use crate::catalog::types::{Catalog, CatalogEntry, EolStatus};
use crate::config::{ClientConfig, DEFAULT_CACHE_TTL_MS, DEFAULT_MINIMUM_VERSION};
use crate::constraint::MajorMinor;

struct CachedCatalog {
    catalog: Arc<Catalog>,
    fetched_at: DateTime<Utc>,
}

/// Fetches, caches and evaluates the end-of-life catalog.
///
/// The cache belongs to this instance. Concurrent callers may both refetch an
/// expired catalog; the snapshot itself is swapped atomically.
pub struct EolCatalogClient<S: CatalogSource = HttpCatalogSource> {
    source: S,
    clock: Arc<dyn Clock>,
    sleeper: Arc<dyn Sleeper>,
    retry: RetryPolicy,
    cache_ttl: TimeDelta,
    minimum_version: MajorMinor,
    cache: Mutex<Option<CachedCatalog>>,
}

impl EolCatalogClient<HttpCatalogSource> {
    /// Build an HTTP-backed client from configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self, CatalogError> {
        let source = HttpCatalogSource::new(
            &config.feed_url,
            Duration::from_millis(config.timeout_ms),
        )?;

        Ok(Self::new(source)
            .with_retry_policy(RetryPolicy {
                max_retries: config.max_retries,
                ..RetryPolicy::default()
            })
            .with_cache_ttl(TimeDelta::milliseconds(config.cache_ttl_ms))
            .with_minimum_version(config.minimum_version))
    }
}

impl<S: CatalogSource> EolCatalogClient<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            clock: Arc::new(SystemClock),
            sleeper: Arc::new(TokioSleeper),
            retry: RetryPolicy::default(),
            cache_ttl: TimeDelta::milliseconds(DEFAULT_CACHE_TTL_MS),
            minimum_version: DEFAULT_MINIMUM_VERSION,
            cache: Mutex::new(None),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_cache_ttl(mut self, cache_ttl: TimeDelta) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    /// Cycles below this line are never reported as supported
    pub fn with_minimum_version(mut self, minimum_version: MajorMinor) -> Self {
        self.minimum_version = minimum_version;
        self
    }

    fn lock_cache(&self) -> MutexGuard<'_, Option<CachedCatalog>> {
        // The snapshot is only ever replaced whole.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cached(&self, now: DateTime<Utc>) -> Option<Arc<Catalog>> {
        let cache = self.lock_cache();
        let cached = cache.as_ref()?;
        let age = now - cached.fetched_at;
        if age < self.cache_ttl {
            debug!("Serving cached catalog ({}s old)", age.num_seconds());
            Some(Arc::clone(&cached.catalog))
        } else {
            debug!("Cached catalog expired ({}s old)", age.num_seconds());
            None
        }
    }

    /// Return the cached catalog while fresh, otherwise refetch with retries.
    pub async fn fetch(&self) -> Result<Arc<Catalog>, CatalogError> {
        if let Some(catalog) = self.cached(self.clock.now()) {
            return Ok(catalog);
        }

        let catalog = with_retry(&self.retry, self.sleeper.as_ref(), |attempt| {
            debug!("Catalog fetch attempt {}/{}", attempt + 1, self.retry.attempts());
            self.source.fetch_catalog()
        })
        .await?;

        let catalog = Arc::new(catalog);
        *self.lock_cache() = Some(CachedCatalog {
            catalog: Arc::clone(&catalog),
            fetched_at: self.clock.now(),
        });

        info!("Cached catalog with {} cycle(s)", catalog.len());
        Ok(catalog)
    }

    /// End-of-life status of `cycle` in `catalog`.
    ///
    /// Cycles missing from the catalog are reported as supported.
    pub fn is_eol(&self, cycle: &str, catalog: &[CatalogEntry]) -> EolStatus {
        let today = self.clock.now().date_naive();
        match catalog.iter().find(|entry| entry.cycle == cycle) {
            Some(entry) => entry.eol_status(today),
            None => {
                debug!("Cycle {:?} not in catalog, treating as supported", cycle);
                EolStatus::Supported
            }
        }
    }

    /// Whether active support for `cycle` has ended; `None` when the cycle is
    /// not in `catalog`.
    pub fn active_support_ended(&self, cycle: &str, catalog: &[CatalogEntry]) -> Option<bool> {
        let today = self.clock.now().date_naive();
        catalog
            .iter()
            .find(|entry| entry.cycle == cycle)
            .map(|entry| entry.active_support_ended(today))
    }

    /// Non-EOL cycles at or above the minimum version, in feed order.
    pub async fn supported_versions(&self) -> Result<Vec<String>, CatalogError> {
        let catalog = self.fetch().await?;

        let supported: Vec<String> = catalog
            .iter()
            .filter(|entry| {
                entry
                    .cycle
                    .parse::<MajorMinor>()
                    .is_ok_and(|version| version >= self.minimum_version)
            })
            .filter(|entry| {
                let status = self.is_eol(&entry.cycle, &catalog);
                if status.is_eol() {
                    debug!("Excluding {} (EOL since {})", entry.cycle, status.since());
                }
                !status.is_eol()
            })
            .map(|entry| entry.cycle.clone())
            .collect();

        debug!("Supported cycles: {:?}", supported);
        Ok(supported)
    }

    pub fn fallback_versions(&self) -> Vec<String> {
        fallback_versions()
    }
}

#[async_trait]
impl<S: CatalogSource> VersionFeed for EolCatalogClient<S> {
    async fn supported_versions(&self) -> Result<Vec<String>, CatalogError> {
        EolCatalogClient::<S>::supported_versions(self).await
    }

    fn fallback_versions(&self) -> Vec<String> {
        EolCatalogClient::<S>::fallback_versions(self)
    }
}

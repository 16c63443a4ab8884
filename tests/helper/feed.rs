//! Feed fixtures and a client wired to a mock server

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use support_matrix::catalog::EolCatalogClient;
use support_matrix::catalog::retry::{Clock, Sleeper};
use support_matrix::config::ClientConfig;

/// CPython lines 3.7–3.13 with their published EOL dates
pub const PYTHON_FEED: &str = r#"[
    {"cycle": "3.13", "releaseDate": "2024-10-07", "eol": "2029-10-31", "latest": "3.13.0", "latestReleaseDate": "2024-10-07", "lts": false, "support": "2026-10-01"},
    {"cycle": "3.12", "releaseDate": "2023-10-02", "eol": "2028-10-31", "latest": "3.12.7", "latestReleaseDate": "2024-10-01", "lts": false, "support": "2025-04-02"},
    {"cycle": "3.11", "releaseDate": "2022-10-24", "eol": "2027-10-31", "latest": "3.11.10", "latestReleaseDate": "2024-09-07", "lts": false, "support": "2024-04-01"},
    {"cycle": "3.10", "releaseDate": "2021-10-04", "eol": "2026-10-31", "latest": "3.10.15", "latestReleaseDate": "2024-09-07", "lts": false, "support": "2023-04-05"},
    {"cycle": "3.9", "releaseDate": "2020-10-05", "eol": "2025-10-31", "latest": "3.9.20", "latestReleaseDate": "2024-09-06", "lts": false, "support": "2022-05-17"},
    {"cycle": "3.8", "releaseDate": "2019-10-14", "eol": "2024-10-07", "latest": "3.8.20", "latestReleaseDate": "2024-09-06", "lts": false, "support": "2021-05-03"},
    {"cycle": "3.7", "releaseDate": "2018-06-27", "eol": true, "latest": "3.7.17", "latestReleaseDate": "2023-06-06", "lts": false, "support": true}
]"#;

pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32) -> Arc<Self> {
        Arc::new(Self(
            Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap(),
        ))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Skips backoff delays
pub struct NoopSleeper;

#[async_trait]
impl Sleeper for NoopSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

/// Create an HTTP client for `feed_url` with a fixed clock and no backoff delays
pub fn create_test_client(feed_url: &str, clock: Arc<FixedClock>) -> EolCatalogClient {
    let config = ClientConfig {
        feed_url: feed_url.to_string(),
        timeout_ms: 2_000,
        ..ClientConfig::default()
    };

    EolCatalogClient::from_config(&config)
        .unwrap()
        .with_clock(clock)
        .with_sleeper(Arc::new(NoopSleeper))
}

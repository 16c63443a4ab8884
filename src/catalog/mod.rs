//! End-of-life catalog for runtime release lines
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│   Client    │────▶│  supported  │
//! │ (HTTP feed) │     │(retry/cache)│     │  versions   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │ feed unreachable
//!                            ▼
//!                     ┌─────────────┐
//!                     │  Fallback   │
//!                     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`client`]: [`EolCatalogClient`], cache and EOL evaluation
//! - [`source`]: single-attempt HTTP fetch and schema validation
//! - [`retry`]: backoff policy plus clock/sleeper seams
//! - [`types`]: feed model, including the date-or-flag fields
//! - [`fallback`]: static release lines for when the feed is down
//! - [`feed`]: [`VersionFeed`] trait consumed by the support matrix
//! - [`error`]: [`CatalogError`]

pub mod client;
pub mod error;
pub mod fallback;
pub mod feed;
pub mod retry;
pub mod source;
pub mod types;

pub use client::EolCatalogClient;
pub use error::CatalogError;
pub use feed::VersionFeed;
pub use types::{Catalog, CatalogEntry, DateOrFlag, EolStatus};

//! Static release lines used when the feed is unreachable
//!
//! Maintained by hand and never derived at runtime, so it goes stale. Update
//! it when a line reaches end of life or a new line ships (each October).

/// Non-EOL release lines as of 2026-10, ascending. 3.10 reaches end of life
/// on 2026-10-31.
pub const FALLBACK_VERSIONS: &[&str] = &["3.10", "3.11", "3.12", "3.13", "3.14"];

pub fn fallback_versions() -> Vec<String> {
    FALLBACK_VERSIONS.iter().map(|v| v.to_string()).collect()
}

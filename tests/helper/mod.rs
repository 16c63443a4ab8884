//! Shared test utilities for end-to-end tests

pub mod feed;

pub use feed::{FixedClock, PYTHON_FEED, create_test_client};

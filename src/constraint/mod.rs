//! Constraint expressions over runtime release lines
//!
//! ```text
//! "^3.10, !=3.11.2" ──▶ normalizer ──▶ ">=3.10,<4.0,!=3.11" ──▶ grammar ──▶ [Constraint]
//!                                                                            │
//!                          candidates ["3.9", "3.10", ...] ──▶ resolver ◀────┘
//! ```
//!
//! # Modules
//!
//! - [`normalizer`]: rewrites caret, tilde, wildcard and patch-qualified bounds
//! - [`grammar`]: parses the normalized expression into [`Constraint`]s
//! - [`comparator`]: numeric, patch-insensitive ordering of `major.minor`
//! - [`resolver`]: intersects constraints with a candidate list
//! - [`error`]: [`ConstraintError`]

pub mod comparator;
pub mod error;
pub mod grammar;
pub mod normalizer;
pub mod resolver;

pub use comparator::{MajorMinor, compare_versions};
pub use error::ConstraintError;
pub use grammar::{Constraint, Operator, parse_constraints};
pub use normalizer::normalize;
pub use resolver::{parse_expression, resolve_versions};

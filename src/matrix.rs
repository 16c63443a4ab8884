//! Support matrix: constraint expression × non-EOL release lines

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::VersionFeed;
use crate::catalog::fallback::fallback_versions;
use crate::constraint::{Constraint, MajorMinor};
use crate::constraint::error::ConstraintError;
use crate::constraint::resolver::{parse_expression, resolve_parsed};

/// Where the candidate release lines came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    Feed,
    Fallback,
}

/// Ascending, duplicate-free `major.minor` lines a project should test against
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportMatrix {
    pub versions: Vec<String>,
    pub source: CandidateSource,
}

/// Sort release lines ascending and drop duplicates and unparsable entries.
fn ascending_unique(versions: &[String]) -> Vec<String> {
    let mut parsed: Vec<MajorMinor> = versions
        .iter()
        .filter_map(|v| {
            v.parse::<MajorMinor>()
                .inspect_err(|e| debug!("Dropping candidate: {}", e))
                .ok()
        })
        .collect();
    parsed.sort();
    parsed.dedup();
    parsed.iter().map(MajorMinor::to_string).collect()
}

fn resolve_matrix(
    expr: &str,
    constraints: &[Constraint],
    candidates: &[String],
    source: CandidateSource,
) -> Result<SupportMatrix, ConstraintError> {
    let candidates = ascending_unique(candidates);
    let versions = resolve_parsed(expr, constraints, &candidates)?;

    info!("Support matrix for {:?}: {:?} ({:?})", expr, versions, source);
    Ok(SupportMatrix { versions, source })
}

/// Resolve `expr` against the feed's supported lines.
///
/// Constraint errors are returned as-is. Any feed failure is logged and the
/// feed's fallback list is used instead.
pub async fn compute_support_matrix<F>(expr: &str, feed: &F) -> Result<SupportMatrix, ConstraintError>
where
    F: VersionFeed + ?Sized,
{
    // Reject a bad expression before touching the network.
    let constraints = parse_expression(expr)?;

    let (candidates, source) = match feed.supported_versions().await {
        Ok(versions) => (versions, CandidateSource::Feed),
        Err(e) => {
            warn!("Catalog feed unavailable, using fallback versions: {}", e);
            (feed.fallback_versions(), CandidateSource::Fallback)
        }
    };

    resolve_matrix(expr, &constraints, &candidates, source)
}

/// Resolve `expr` against the static fallback list without any network access.
pub fn compute_offline_support_matrix(expr: &str) -> Result<SupportMatrix, ConstraintError> {
    let constraints = parse_expression(expr)?;
    resolve_matrix(expr, &constraints, &fallback_versions(), CandidateSource::Fallback)
}

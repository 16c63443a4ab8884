//! Filters candidate versions against a constraint expression

use tracing::debug;

use crate::constraint::comparator::MajorMinor;
use crate::constraint::error::ConstraintError;
use crate::constraint::grammar::{Constraint, Operator, parse_constraints};
use crate::constraint::normalizer::normalize;

/// Check whether a single version satisfies a single constraint
pub fn satisfies(constraint: &Constraint, candidate: MajorMinor) -> bool {
    let bound = constraint.version;
    match constraint.operator {
        Operator::GreaterEqual => candidate >= bound,
        Operator::Greater => candidate > bound,
        Operator::LessEqual => candidate <= bound,
        Operator::Less => candidate < bound,
        Operator::Equal => candidate == bound,
        Operator::NotEqual => candidate != bound,
        Operator::Compatible => candidate >= bound && candidate.same_major_minor(bound),
        Operator::Caret => candidate >= bound && candidate.same_major(bound),
    }
}

/// Keep the candidates that satisfy every constraint, in input order.
///
/// Candidates that are not `X.Y` / `X.Y.Z` can never satisfy a constraint
/// and are dropped.
pub fn filter_versions(candidates: &[String], constraints: &[Constraint]) -> Vec<String> {
    candidates
        .iter()
        .filter(|candidate| {
            let Ok(version) = candidate.parse::<MajorMinor>() else {
                debug!("Skipping unparsable candidate {:?}", candidate);
                return false;
            };
            constraints.iter().all(|c| satisfies(c, version))
        })
        .cloned()
        .collect()
}

/// Normalize and parse a constraint expression
pub fn parse_expression(expr: &str) -> Result<Vec<Constraint>, ConstraintError> {
    if expr.is_empty() {
        return Err(ConstraintError::EmptyConstraint);
    }
    parse_constraints(&normalize(expr))
}

/// Filter `candidates` with already-parsed constraints.
///
/// `expr` is only used to describe a [`ConstraintError::NoMatch`].
pub fn resolve_parsed(
    expr: &str,
    constraints: &[Constraint],
    candidates: &[String],
) -> Result<Vec<String>, ConstraintError> {
    if candidates.is_empty() {
        return Err(ConstraintError::NoCandidates);
    }

    let matched = filter_versions(candidates, constraints);
    if matched.is_empty() {
        return Err(ConstraintError::NoMatch {
            constraint: expr.to_string(),
        });
    }

    debug!(
        "{:?} matched {} of {} candidate(s)",
        expr,
        matched.len(),
        candidates.len()
    );
    Ok(matched)
}

/// Resolve a constraint expression against a candidate list
pub fn resolve_versions(expr: &str, candidates: &[String]) -> Result<Vec<String>, ConstraintError> {
    if expr.is_empty() {
        return Err(ConstraintError::EmptyConstraint);
    }
    if candidates.is_empty() {
        return Err(ConstraintError::NoCandidates);
    }

    let constraints = parse_expression(expr)?;
    resolve_parsed(expr, &constraints, candidates)
}

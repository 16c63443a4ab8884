//! Rewrites ecosystem shorthand into primitive comparisons
//!
//! | input          | output                 |
//! |----------------|------------------------|
//! | `!=X.Y[.Z]`    | `!=X.Y`                |
//! | `^X.Y[.Z]`     | `>=X.Y,<(X+1).0`       |
//! | `~=X.Y[.Z]`    | `>=X.Y,<X.(Y+1)`       |
//! | `==X.Y.*`      | `>=X.Y,<X.(Y+1)`       |
//! | `<op>X.Y.Z`    | `<op>X.Y`              |
//!
//! Segments that match none of these, or whose upper bound would overflow,
//! are passed through unchanged (trimmed).

use crate::constraint::comparator::MajorMinor;
use crate::constraint::grammar::{Operator, split_operator};

/// Version part of a segment after the operator.
enum Bound {
    Exact(MajorMinor),
    /// `X.Y.*`
    Wildcard(MajorMinor),
}

fn parse_bound(rest: &str) -> Option<Bound> {
    if let Some(prefix) = rest.strip_suffix(".*") {
        if prefix.matches('.').count() != 1 {
            return None;
        }
        return prefix.parse().ok().map(Bound::Wildcard);
    }
    rest.parse().ok().map(Bound::Exact)
}

/// `None` when the upper bound is not representable.
fn range(lower: MajorMinor, upper: Option<MajorMinor>) -> Option<String> {
    upper.map(|upper| format!(">={lower},<{upper}"))
}

fn normalize_segment(segment: &str) -> String {
    let Some((operator, rest)) = split_operator(segment) else {
        return segment.to_string();
    };
    let Some(bound) = parse_bound(rest) else {
        return segment.to_string();
    };

    let rewritten = match (operator, bound) {
        (Operator::NotEqual, Bound::Exact(v) | Bound::Wildcard(v)) => Some(format!("!={v}")),
        (Operator::Caret, Bound::Exact(v)) => range(v, v.next_major()),
        (Operator::Compatible, Bound::Exact(v)) => range(v, v.next_minor()),
        (Operator::Equal, Bound::Wildcard(v)) => range(v, v.next_minor()),
        (op, Bound::Exact(v)) if op.is_primitive() => Some(format!("{op}{v}")),
        _ => None,
    };
    rewritten.unwrap_or_else(|| segment.to_string())
}

/// Normalize a constraint expression. Never fails.
pub fn normalize(expr: &str) -> String {
    expr.trim()
        .split(',')
        .map(|segment| normalize_segment(segment.trim()))
        .collect::<Vec<_>>()
        .join(",")
}

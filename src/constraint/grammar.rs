//! Constraint expression grammar
//!
//! ```text
//! expression := segment ("," segment)*
//! segment    := ws* operator ws* version ws*
//! operator   := ">=" | ">" | "<=" | "<" | "==" | "!=" | "~=" | "^"
//! version    := digits "." digits ("." digits)?
//! ```
//!
//! Patch digits are accepted but discarded: a parsed [`Constraint`] only ever
//! carries `major.minor`.

use std::fmt;

use tracing::debug;

use crate::constraint::comparator::MajorMinor;
use crate::constraint::error::ConstraintError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    GreaterEqual,
    Greater,
    LessEqual,
    Less,
    Equal,
    NotEqual,
    /// `~=`, same `major.minor` and not below the bound
    Compatible,
    /// `^`, same major and not below the bound
    Caret,
}

impl Operator {
    /// Longest tokens first so that `>=` is never read as `>`.
    const TOKENS: [(&'static str, Operator); 8] = [
        (">=", Operator::GreaterEqual),
        ("<=", Operator::LessEqual),
        ("==", Operator::Equal),
        ("!=", Operator::NotEqual),
        ("~=", Operator::Compatible),
        (">", Operator::Greater),
        ("<", Operator::Less),
        ("^", Operator::Caret),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::GreaterEqual => ">=",
            Operator::Greater => ">",
            Operator::LessEqual => "<=",
            Operator::Less => "<",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::Compatible => "~=",
            Operator::Caret => "^",
        }
    }

    /// Whether the operator is one of the six plain comparisons.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Operator::Compatible | Operator::Caret)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An atomic `(operator, major.minor)` requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub operator: Operator,
    pub version: MajorMinor,
}

impl Constraint {
    pub fn new(operator: Operator, version: MajorMinor) -> Self {
        Self { operator, version }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

/// Split a trimmed segment into its operator and the (trimmed) remainder.
pub(crate) fn split_operator(segment: &str) -> Option<(Operator, &str)> {
    Operator::TOKENS
        .iter()
        .find_map(|(token, op)| segment.strip_prefix(token).map(|rest| (*op, rest.trim())))
}

fn parse_segment(segment: &str) -> Result<Constraint, ConstraintError> {
    let malformed = || ConstraintError::MalformedConstraint {
        segment: segment.to_string(),
    };

    let (operator, rest) = split_operator(segment).ok_or_else(malformed)?;
    let version: MajorMinor = rest.parse().map_err(|_| malformed())?;

    Ok(Constraint::new(operator, version))
}

/// Parse a comma-separated expression into its constraints, in input order.
pub fn parse_constraints(input: &str) -> Result<Vec<Constraint>, ConstraintError> {
    if input.is_empty() {
        return Err(ConstraintError::EmptyConstraint);
    }

    let constraints = input
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_segment)
        .collect::<Result<Vec<_>, _>>()?;

    if constraints.is_empty() {
        return Err(ConstraintError::NoConstraintsFound);
    }

    debug!("Parsed {} constraint(s) from {:?}", constraints.len(), input);
    Ok(constraints)
}

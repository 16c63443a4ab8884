use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("Constraint expression is empty")]
    EmptyConstraint,

    #[error("Malformed constraint segment: {segment:?}")]
    MalformedConstraint { segment: String },

    #[error("No constraints found in expression")]
    NoConstraintsFound,

    #[error("No candidate versions to resolve against")]
    NoCandidates,

    #[error("No candidate version satisfies {constraint:?}")]
    NoMatch { constraint: String },
}

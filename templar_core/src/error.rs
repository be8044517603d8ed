//! Error types and result definitions.
//!
//! The failure modes that surface as errors: rejecting an ill-formed
//! template at compile time, exhausting an explicit walk budget, and the
//! two definition-helper rejections. Match failure is deliberately *not*
//! here: a pattern that does not match reports `None`, never an error.

use thiserror::Error;

/// The unified result type used throughout the engine.
pub type TemplarResult<T> = Result<T, TemplarError>;

/// Error type covering every engine failure condition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplarError {
    /// A template violates pattern well-formedness (today: more than one
    /// slurp marker among a single node's children).
    #[error("malformed pattern: {detail}")]
    MalformedPattern {
        /// Description including the offending template node.
        detail: String,
    },

    /// A bounded walk ran out of its visit budget.
    #[error("walk budget exhausted after {limit} visits")]
    WalkBudget {
        /// The configured maximum number of visitor invocations.
        limit: usize,
    },

    /// A definition helper was handed a tree that is not a function
    /// definition of any supported form.
    #[error("not a function definition: {detail}")]
    NotADefinition {
        /// Description of the rejected tree.
        detail: String,
    },

    /// An argument destructurer met a signature argument it cannot split.
    #[error("unsupported function argument: {detail}")]
    UnsupportedArgument {
        /// Description of the rejected argument.
        detail: String,
    },
}

impl TemplarError {
    /// Create a malformed-pattern error.
    #[must_use]
    pub fn malformed_pattern(detail: impl Into<String>) -> Self {
        Self::MalformedPattern {
            detail: detail.into(),
        }
    }

    /// Create a walk-budget error.
    #[must_use]
    pub const fn walk_budget(limit: usize) -> Self {
        Self::WalkBudget { limit }
    }

    /// Create a not-a-definition error.
    #[must_use]
    pub fn not_a_definition(detail: impl Into<String>) -> Self {
        Self::NotADefinition {
            detail: detail.into(),
        }
    }

    /// Create an unsupported-argument error.
    #[must_use]
    pub fn unsupported_argument(detail: impl Into<String>) -> Self {
        Self::UnsupportedArgument {
            detail: detail.into(),
        }
    }

    /// Short classification name, for logs and assertions.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MalformedPattern { .. } => "MalformedPattern",
            Self::WalkBudget { .. } => "WalkBudget",
            Self::NotADefinition { .. } => "NotADefinition",
            Self::UnsupportedArgument { .. } => "UnsupportedArgument",
        }
    }
}

//! Error types for assertion dispatch.
//!
//! Two channels are kept apart:
//! - [`RoutineError`] is what a validation routine reports: either the
//!   subject did not satisfy the check, or the check itself broke.
//! - [`DispatchError`] is what a caller of the dispatcher sees, one variant
//!   per failure category.

use crate::value::{describe_args, Value};
use std::fmt;
use thiserror::Error;

/// Boxed error used for the implementation-error channel.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Structured "not satisfied" report produced by a validation routine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Failure {
    pub message: String,
    pub actual: Option<Value>,
    pub expected: Option<Value>,
    pub diff: Option<String>,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_actual(mut self, actual: Value) -> Self {
        self.actual = Some(actual);
        self
    }

    pub fn with_expected(mut self, expected: Value) -> Self {
        self.expected = Some(expected);
        self
    }

    pub fn with_diff(mut self, diff: impl Into<String>) -> Self {
        self.diff = Some(diff.into());
        self
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Error returned by a validation routine.
#[derive(Debug, Error)]
pub enum RoutineError {
    /// The subject did not satisfy the check.
    #[error("{0}")]
    Unsatisfied(Failure),

    /// The check itself is broken.
    #[error("{0}")]
    Internal(#[source] BoxError),
}

impl RoutineError {
    pub fn internal(error: impl Into<BoxError>) -> Self {
        RoutineError::Internal(error.into())
    }
}

impl From<Failure> for RoutineError {
    fn from(failure: Failure) -> Self {
        RoutineError::Unsatisfied(failure)
    }
}

/// A matched, non-negated assertion did not hold.
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionFailure {
    /// Id of the definition that was selected.
    pub definition_id: String,
    /// The call as written, e.g. `5 to be greater than 7`.
    pub call: String,
    pub failure: Failure,
}

impl AssertionFailure {
    pub fn message(&self) -> &str {
        &self.failure.message
    }

    pub fn actual(&self) -> Option<&Value> {
        self.failure.actual.as_ref()
    }

    pub fn expected(&self) -> Option<&Value> {
        self.failure.expected.as_ref()
    }

    pub fn diff(&self) -> Option<&str> {
        self.failure.diff.as_deref()
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}", self.call)?;
        if !self.failure.message.is_empty() {
            write!(f, "\n  {}", self.failure.message)?;
        }
        if let Some(diff) = &self.failure.diff {
            write!(f, "\n{}", diff)?;
        }
        Ok(())
    }
}

/// Errors surfaced by the dispatcher.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The subject did not satisfy the matched assertion.
    #[error("{0}")]
    Assertion(AssertionFailure),

    /// A negated assertion's subject did satisfy the check.
    #[error("expected {call}\n  the negated assertion passed")]
    NegatedPassed { definition_id: String, call: String },

    /// No pattern matched the call, including all split and rejoin attempts.
    #[error("unknown assertion: expect({})", describe_args(.args))]
    UnknownAssertion { args: Vec<Value> },

    /// A validation routine failed with something other than a [`Failure`].
    #[error("assertion `{definition_id}` broke while checking {call}: {source}")]
    Implementation {
        definition_id: String,
        call: String,
        #[source]
        source: BoxError,
    },

    /// Unconditional failure requested by calling code.
    #[error("explicit failure: {message}")]
    ExplicitFail { message: String },
}

impl DispatchError {
    pub fn explicit(message: impl Into<String>) -> Self {
        DispatchError::ExplicitFail {
            message: message.into(),
        }
    }

    /// Id of the definition the failure is attributed to, if one was selected.
    pub fn definition_id(&self) -> Option<&str> {
        match self {
            DispatchError::Assertion(failure) => Some(&failure.definition_id),
            DispatchError::NegatedPassed { definition_id, .. }
            | DispatchError::Implementation { definition_id, .. } => Some(definition_id),
            DispatchError::UnknownAssertion { .. } | DispatchError::ExplicitFail { .. } => None,
        }
    }

    pub fn is_unknown_assertion(&self) -> bool {
        matches!(self, DispatchError::UnknownAssertion { .. })
    }

    pub fn is_implementation_error(&self) -> bool {
        matches!(self, DispatchError::Implementation { .. })
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Fail unconditionally.
pub fn fail<T>(message: impl Into<String>) -> DispatchResult<T> {
    Err(DispatchError::explicit(message))
}

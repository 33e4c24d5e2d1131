//! Assertion definitions: a stable id, a pattern and a validation routine.

use crate::errors::{Failure, RoutineError};
use crate::pattern::{Pattern, PatternError, Slot};
use crate::value::{Validation, Value, ValueValidator};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by asynchronous routines.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub type SyncRoutine = Arc<dyn Fn(&[Value]) -> Result<(), RoutineError> + Send + Sync>;

pub type AsyncRoutine =
    Arc<dyn Fn(Vec<Value>) -> BoxFuture<'static, Result<(), RoutineError>> + Send + Sync>;

/// The validation logic of an assertion. It receives the slot-typed values of
/// the matched call (subject and phrase included).
#[derive(Clone)]
pub enum Routine {
    Sync(SyncRoutine),
    Async(AsyncRoutine),
}

impl fmt::Debug for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Routine::Sync(_) => f.write_str("Routine::Sync"),
            Routine::Async(_) => f.write_str("Routine::Async"),
        }
    }
}

/// One registered assertion. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct AssertionDefinition {
    id: String,
    pattern: Pattern,
    routine: Routine,
    phrases: Vec<String>,
}

impl AssertionDefinition {
    pub fn new<F>(id: impl Into<String>, pattern: Pattern, routine: F) -> Self
    where
        F: Fn(&[Value]) -> Result<(), RoutineError> + Send + Sync + 'static,
    {
        Self::with_routine(id, pattern, Routine::Sync(Arc::new(routine)))
    }

    pub fn new_async<F, Fut>(id: impl Into<String>, pattern: Pattern, routine: F) -> Self
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), RoutineError>> + Send + 'static,
    {
        let routine: AsyncRoutine = Arc::new(
            move |values: Vec<Value>| -> BoxFuture<'static, Result<(), RoutineError>> {
                Box::pin(routine(values))
            },
        );
        Self::with_routine(id, pattern, Routine::Async(routine))
    }

    /// Build from a pattern description (see [`Pattern::parse`]).
    pub fn parse<F>(id: impl Into<String>, pattern: &str, routine: F) -> Result<Self, PatternError>
    where
        F: Fn(&[Value]) -> Result<(), RoutineError> + Send + Sync + 'static,
    {
        Ok(Self::new(id, Pattern::parse(pattern)?, routine))
    }

    /// A leaf whose check is a bare schema: the value at the first value slot
    /// passes when `validator` accepts it.
    pub fn from_validator(
        id: impl Into<String>,
        pattern: Pattern,
        validator: Arc<dyn ValueValidator>,
    ) -> Self {
        let subject = pattern
            .slots()
            .iter()
            .position(|slot| matches!(slot, Slot::Value(_)))
            .unwrap_or(0);
        Self::new(id, pattern, move |values: &[Value]| {
            let value = values
                .get(subject)
                .ok_or_else(|| RoutineError::internal("no value to validate"))?;
            match validator.validate(value) {
                Validation::Accept | Validation::Coerce(_) => Ok(()),
                Validation::Reject => Err(Failure::new(format!(
                    "{} does not satisfy <{}>",
                    value,
                    validator.name()
                ))
                .with_actual(value.clone())
                .into()),
            }
        })
    }

    pub fn with_routine(id: impl Into<String>, pattern: Pattern, routine: Routine) -> Self {
        let phrases = pattern.phrases().into_iter().map(str::to_string).collect();
        Self {
            id: id.into(),
            pattern,
            routine,
            phrases,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn routine(&self) -> &Routine {
        &self.routine
    }

    /// Every literal phrase of every phrase slot.
    pub fn indexable_phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn is_async(&self) -> bool {
        matches!(self.routine, Routine::Async(_))
    }

    /// Whether slot 0 or slot 1 is a phrase slot, i.e. whether every matching
    /// call presents one of this definition's phrases at a conventional
    /// phrase position.
    pub fn is_anchored(&self) -> bool {
        self.pattern.phrase_at(0).is_some() || self.pattern.phrase_at(1).is_some()
    }
}

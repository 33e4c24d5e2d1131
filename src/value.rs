//! Argument values and the validators that guard value slots.
//!
//! Call arguments are dynamically typed, so they are carried as
//! [`serde_json::Value`]. A [`ValueValidator`] is the opaque predicate a
//! value slot delegates to: it accepts a value as-is, accepts it with a
//! coerced replacement, or rejects it.

use std::fmt;
use std::sync::Arc;

pub use serde_json::Value;

/// Outcome of running a validator against one argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    /// The value is accepted unchanged.
    Accept,
    /// The value is accepted and replaced by the given one.
    Coerce(Value),
    /// The value does not fit the slot.
    Reject,
}

/// Predicate behind a value slot.
pub trait ValueValidator: Send + Sync {
    fn validate(&self, value: &Value) -> Validation;

    /// Short name used in pattern descriptions and diagnostics (e.g. "number").
    fn name(&self) -> &str;
}

impl fmt::Debug for dyn ValueValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name())
    }
}

/// The JSON kinds a [`KindValidator`] can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// Accepts every value.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyValidator;

impl ValueValidator for AnyValidator {
    fn validate(&self, _value: &Value) -> Validation {
        Validation::Accept
    }

    fn name(&self) -> &str {
        "any"
    }
}

/// Accepts values of one JSON kind.
#[derive(Debug, Clone, Copy)]
pub struct KindValidator(pub ValueKind);

impl ValueValidator for KindValidator {
    fn validate(&self, value: &Value) -> Validation {
        if ValueKind::of(value) == self.0 {
            Validation::Accept
        } else {
            Validation::Reject
        }
    }

    fn name(&self) -> &str {
        self.0.name()
    }
}

/// Accepts strings, arrays and objects: anything with a length.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionValidator;

impl ValueValidator for CollectionValidator {
    fn validate(&self, value: &Value) -> Validation {
        match value {
            Value::String(_) | Value::Array(_) | Value::Object(_) => Validation::Accept,
            _ => Validation::Reject,
        }
    }

    fn name(&self) -> &str {
        "collection"
    }
}

/// Validator built from a closure.
pub struct FnValidator<F> {
    name: String,
    func: F,
}

impl<F> FnValidator<F>
where
    F: Fn(&Value) -> Validation + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> ValueValidator for FnValidator<F>
where
    F: Fn(&Value) -> Validation + Send + Sync,
{
    fn validate(&self, value: &Value) -> Validation {
        (self.func)(value)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Names understood by [`validator_by_name`].
pub const VALIDATOR_NAMES: &[&str] = &[
    "any",
    "number",
    "string",
    "boolean",
    "array",
    "object",
    "null",
    "collection",
];

/// Look up a built-in validator by the name used in pattern descriptions.
pub fn validator_by_name(name: &str) -> Option<Arc<dyn ValueValidator>> {
    let validator: Arc<dyn ValueValidator> = match name {
        "any" => Arc::new(AnyValidator),
        "number" => Arc::new(KindValidator(ValueKind::Number)),
        "string" => Arc::new(KindValidator(ValueKind::String)),
        "boolean" => Arc::new(KindValidator(ValueKind::Boolean)),
        "array" => Arc::new(KindValidator(ValueKind::Array)),
        "object" => Arc::new(KindValidator(ValueKind::Object)),
        "null" => Arc::new(KindValidator(ValueKind::Null)),
        "collection" => Arc::new(CollectionValidator),
        _ => return None,
    };
    Some(validator)
}

pub fn any() -> Arc<dyn ValueValidator> {
    Arc::new(AnyValidator)
}

pub fn number() -> Arc<dyn ValueValidator> {
    Arc::new(KindValidator(ValueKind::Number))
}

pub fn string() -> Arc<dyn ValueValidator> {
    Arc::new(KindValidator(ValueKind::String))
}

pub fn collection() -> Arc<dyn ValueValidator> {
    Arc::new(CollectionValidator)
}

/// Render an argument list the way a failure message shows it: `5, "to be", 3`.
pub fn describe_args(args: &[Value]) -> String {
    args.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Length of a string (in chars), array or object.
pub fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}

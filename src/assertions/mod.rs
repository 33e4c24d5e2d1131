//! Standard leaf assertions.
//!
//! The dispatcher does not depend on these; they are a ready-made set of
//! definitions callers can start from and extend.

mod collection;
mod comparison;
mod equality;
mod kind;

pub use collection::collection_definitions;
pub use comparison::comparison_definitions;
pub use equality::equality_definitions;
pub use kind::kind_definitions;

use crate::definition::AssertionDefinition;
use crate::errors::RoutineError;
use crate::pattern::Pattern;
use crate::value::Value;

/// Every standard definition, comparisons first.
pub fn standard_definitions() -> Vec<AssertionDefinition> {
    let mut definitions = comparison_definitions();
    definitions.extend(kind_definitions());
    definitions.extend(collection_definitions());
    definitions.extend(equality_definitions());
    definitions
}

/// Definition from a hard-coded pattern description.
fn define<F>(id: &str, pattern: &str, routine: F) -> AssertionDefinition
where
    F: Fn(&[Value]) -> Result<(), RoutineError> + Send + Sync + 'static,
{
    let pattern = Pattern::parse(pattern).expect("built-in pattern is valid");
    AssertionDefinition::new(id, pattern, routine)
}

/// Numeric argument at `index`. The number validator guarantees its kind, so
/// anything else means the definition itself is wrong.
fn number_at(values: &[Value], index: usize) -> Result<f64, RoutineError> {
    values
        .get(index)
        .and_then(Value::as_f64)
        .ok_or_else(|| RoutineError::internal(format!("argument {} is not a number", index)))
}

fn arg_at(values: &[Value], index: usize) -> Result<&Value, RoutineError> {
    values
        .get(index)
        .ok_or_else(|| RoutineError::internal(format!("missing argument {}", index)))
}

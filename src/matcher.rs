//! Slot matching: one pattern against one argument list.

use crate::pattern::{Pattern, Slot};
use crate::value::{Validation, Value};

/// Result of matching a single pattern against a single argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResult {
    /// Every slot matched.
    pub success: bool,
    /// Every slot matched and no argument was left over.
    pub exact_match: bool,
    /// The values consumed by the slots, after validator coercion.
    pub parsed_values: Vec<Value>,
}

impl ParsedResult {
    pub fn failed() -> Self {
        Self {
            success: false,
            exact_match: false,
            parsed_values: Vec::new(),
        }
    }

    pub fn is_partial(&self) -> bool {
        self.success && !self.exact_match
    }
}

/// Walk the slots left to right, stopping at the first slot that does not match.
///
/// Arguments beyond the pattern's length do not invalidate a match, they only
/// rule out `exact_match`.
pub fn match_pattern(pattern: &Pattern, args: &[Value]) -> ParsedResult {
    if args.len() < pattern.len() {
        return ParsedResult::failed();
    }

    let mut parsed_values = Vec::with_capacity(pattern.len());
    for (slot, arg) in pattern.slots().iter().zip(args) {
        match slot {
            Slot::Phrase(phrase_slot) => match arg {
                Value::String(s) if phrase_slot.accepts(s) => parsed_values.push(arg.clone()),
                _ => return ParsedResult::failed(),
            },
            Slot::Value(validator) => match validator.validate(arg) {
                Validation::Accept => parsed_values.push(arg.clone()),
                Validation::Coerce(coerced) => parsed_values.push(coerced),
                Validation::Reject => return ParsedResult::failed(),
            },
        }
    }

    ParsedResult {
        success: true,
        exact_match: args.len() == pattern.len(),
        parsed_values,
    }
}

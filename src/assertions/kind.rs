//! Type checks on the subject.

use super::{arg_at, define};
use crate::definition::AssertionDefinition;
use crate::errors::Failure;
use crate::value::{Value, ValueKind};
use serde_json::json;

const KINDS: &[(&str, &str, ValueKind)] = &[
    ("is-string", "a string", ValueKind::String),
    ("is-number", "a number", ValueKind::Number),
    ("is-boolean", "a boolean", ValueKind::Boolean),
    ("is-array", "an array", ValueKind::Array),
    ("is-object", "an object", ValueKind::Object),
    ("is-null", "null", ValueKind::Null),
];

/// `<any> to be a string`, `<any> to be a number`, ...
pub fn kind_definitions() -> Vec<AssertionDefinition> {
    KINDS
        .iter()
        .map(|&(id, noun, kind)| {
            define(id, &format!("<any> to be {}", noun), move |values: &[Value]| {
                let subject = arg_at(values, 0)?;
                let actual = ValueKind::of(subject);
                if actual == kind {
                    Ok(())
                } else {
                    let message =
                        format!("{} is {}, not {}", subject, actual.name(), kind.name());
                    Err(Failure::new(message)
                        .with_actual(json!(actual.name()))
                        .with_expected(json!(kind.name()))
                        .into())
                }
            })
        })
        .collect()
}

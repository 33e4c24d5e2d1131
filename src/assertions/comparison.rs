//! Numeric comparisons.

use super::{define, number_at};
use crate::definition::AssertionDefinition;
use crate::errors::{Failure, RoutineError};
use crate::value::Value;
use serde_json::json;

fn compare<F>(id: &str, pattern: &str, relation: &'static str, holds: F) -> AssertionDefinition
where
    F: Fn(f64, f64) -> bool + Send + Sync + 'static,
{
    define(id, pattern, move |values: &[Value]| {
        let subject = number_at(values, 0)?;
        let other = number_at(values, 2)?;
        if holds(subject, other) {
            Ok(())
        } else {
            Err(Failure::new(format!("{} is not {} {}", values[0], relation, values[2]))
                .with_actual(values[0].clone())
                .with_expected(values[2].clone())
                .into())
        }
    })
}

/// Comparison definitions: greater/less than (strict and inclusive) and between.
pub fn comparison_definitions() -> Vec<AssertionDefinition> {
    vec![
        compare(
            "greater-than",
            "<number> to be greater than|to be above <number>",
            "greater than",
            |a, b| a > b,
        ),
        compare(
            "less-than",
            "<number> to be less than|to be below <number>",
            "less than",
            |a, b| a < b,
        ),
        compare(
            "greater-than-or-equal",
            "<number> to be greater than or equal to <number>",
            "greater than or equal to",
            |a, b| a >= b,
        ),
        compare(
            "less-than-or-equal",
            "<number> to be less than or equal to <number>",
            "less than or equal to",
            |a, b| a <= b,
        ),
        define(
            "between",
            "<number> to be between <number> and <number>",
            |values: &[Value]| -> Result<(), RoutineError> {
                let subject = number_at(values, 0)?;
                let start = number_at(values, 2)?;
                let end = number_at(values, 4)?;
                if start <= subject && subject <= end {
                    Ok(())
                } else {
                    Err(Failure::new(format!(
                        "{} is not between {} and {}",
                        values[0], values[2], values[4]
                    ))
                    .with_actual(values[0].clone())
                    .with_expected(json!([values[2].clone(), values[4].clone()]))
                    .into())
                }
            },
        ),
    ]
}

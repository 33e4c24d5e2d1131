//! Structural equality.

use super::{arg_at, define};
use crate::definition::AssertionDefinition;
use crate::errors::Failure;
use crate::value::Value;

/// `<any> to equal <any>`: values are compared structurally.
pub fn equality_definitions() -> Vec<AssertionDefinition> {
    vec![define("equal", "<any> to equal <any>", |values: &[Value]| {
        let subject = arg_at(values, 0)?;
        let expected = arg_at(values, 2)?;
        if subject == expected {
            return Ok(());
        }
        let diff = format!("-{}\n+{}", subject, expected);
        Err(Failure::new(format!("{} does not equal {}", subject, expected))
            .with_actual(subject.clone())
            .with_expected(expected.clone())
            .with_diff(diff)
            .into())
    })]
}

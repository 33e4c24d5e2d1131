//! Assertions on strings, arrays and objects.

use super::{arg_at, define, number_at};
use crate::definition::AssertionDefinition;
use crate::errors::{Failure, RoutineError};
use crate::value::{length_of, Value};
use serde_json::json;

fn length(values: &[Value]) -> Result<usize, RoutineError> {
    let subject = arg_at(values, 0)?;
    length_of(subject)
        .ok_or_else(|| RoutineError::internal(format!("{} has no length", subject)))
}

fn contains(haystack: &Value, needle: &Value) -> bool {
    match (haystack, needle) {
        (Value::String(s), Value::String(part)) => s.contains(part.as_str()),
        (Value::Array(items), _) => items.contains(needle),
        (Value::Object(map), Value::String(key)) => map.contains_key(key),
        _ => false,
    }
}

/// Emptiness, membership and length.
pub fn collection_definitions() -> Vec<AssertionDefinition> {
    vec![
        define("empty", "<collection> to be empty", |values: &[Value]| {
            let len = length(values)?;
            if len == 0 {
                Ok(())
            } else {
                Err(Failure::new(format!("{} has length {}", values[0], len))
                    .with_actual(json!(len))
                    .with_expected(json!(0))
                    .into())
            }
        }),
        define("non-empty", "<collection> to be non-empty", |values: &[Value]| {
            if length(values)? > 0 {
                Ok(())
            } else {
                Err(Failure::new(format!("{} is empty", values[0])).into())
            }
        }),
        define("contain", "<collection> to contain <any>", |values: &[Value]| {
            let haystack = arg_at(values, 0)?;
            let needle = arg_at(values, 2)?;
            if contains(haystack, needle) {
                Ok(())
            } else {
                Err(Failure::new(format!("{} does not contain {}", haystack, needle))
                    .with_actual(haystack.clone())
                    .with_expected(needle.clone())
                    .into())
            }
        }),
        define(
            "have-length",
            "<collection> to have length <number>",
            |values: &[Value]| {
                let len = length(values)?;
                let expected = number_at(values, 2)?;
                if len as f64 == expected {
                    Ok(())
                } else {
                    Err(Failure::new(format!("{} has length {}", values[0], len))
                        .with_actual(json!(len))
                        .with_expected(values[2].clone())
                        .into())
                }
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dispatcher;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(collection_definitions())
    }

    #[test]
    fn test_empty() {
        let d = dispatcher();
        assert!(d.dispatch(&[json!(""), json!("to be empty")]).is_ok());
        assert!(d.dispatch(&[json!([]), json!("to be empty")]).is_ok());
        assert!(d.dispatch(&[json!({"a": 1}), json!("to be empty")]).is_err());
        assert!(d.dispatch(&[json!("hi"), json!("to be non-empty")]).is_ok());
        assert!(d.dispatch(&[json!([]), json!("not to be non-empty")]).is_ok());
    }

    #[test]
    fn test_non_collection_subject_is_unknown() {
        let err = dispatcher().dispatch(&[json!(3), json!("to be empty")]).unwrap_err();
        assert!(err.is_unknown_assertion());
    }

    #[test]
    fn test_contain() {
        let d = dispatcher();
        assert!(d.dispatch(&[json!("hello"), json!("to contain"), json!("ell")]).is_ok());
        assert!(d.dispatch(&[json!([1, 2, 3]), json!("to contain"), json!(2)]).is_ok());
        assert!(d.dispatch(&[json!({"a": 1}), json!("to contain"), json!("a")]).is_ok());
        assert!(d.dispatch(&[json!("hello"), json!("to contain"), json!(1)]).is_err());
        assert!(d.dispatch(&[json!([1, 2]), json!("not to contain"), json!(3)]).is_ok());
    }

    #[test]
    fn test_have_length() {
        let d = dispatcher();
        assert!(d.dispatch(&[json!("héllo"), json!("to have length"), json!(5)]).is_ok());
        let err = d
            .dispatch(&[json!([1]), json!("to have length"), json!(2)])
            .unwrap_err();
        assert_eq!(err.to_string(), "expected [1] to have length 2\n  [1] has length 1");
    }
}

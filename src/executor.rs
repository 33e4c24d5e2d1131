//! Runs the selected definition's routine and applies negation.

use crate::definition::{AssertionDefinition, Routine, SyncRoutine};
use crate::dispatcher::Resolution;
use crate::errors::{AssertionFailure, DispatchError, DispatchResult, RoutineError};
use crate::pattern::{Pattern, Slot};
use crate::value::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, trace};

/// Render a call for failure messages: phrases verbatim, values as JSON.
///
/// Only the arguments consumed by the pattern are shown.
pub fn render_call(pattern: &Pattern, args: &[Value]) -> String {
    pattern
        .slots()
        .iter()
        .zip(args)
        .map(|(slot, arg)| match (slot, arg) {
            (Slot::Phrase(_), Value::String(s)) => s.clone(),
            _ => arg.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Execute a resolved segment synchronously.
///
/// An asynchronous routine cannot be driven here and is reported as an
/// implementation error.
pub fn execute(definition: &AssertionDefinition, resolution: &Resolution) -> DispatchResult<()> {
    let outcome = match definition.routine() {
        Routine::Sync(routine) => run_guarded(routine, &resolution.values),
        Routine::Async(_) => Err(RoutineError::internal(
            "asynchronous assertion requires dispatch_async",
        )),
    };
    interpret(definition, resolution, outcome)
}

/// Execute a resolved segment, awaiting asynchronous routines.
pub async fn execute_async(
    definition: &AssertionDefinition,
    resolution: &Resolution,
) -> DispatchResult<()> {
    let outcome = match definition.routine() {
        Routine::Sync(routine) => run_guarded(routine, &resolution.values),
        Routine::Async(routine) => routine(resolution.values.clone()).await,
    };
    interpret(definition, resolution, outcome)
}

/// Run a synchronous routine, turning a panic into an internal error.
///
/// The process panic hook still runs first, so a caught panic is printed to
/// stderr before it is reported as an implementation error.
fn run_guarded(routine: &SyncRoutine, values: &[Value]) -> Result<(), RoutineError> {
    panic::catch_unwind(AssertUnwindSafe(|| routine(values)))
        .unwrap_or_else(|payload| Err(RoutineError::internal(panic_message(payload))))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("routine panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("routine panicked: {}", message)
    } else {
        "routine panicked".to_string()
    }
}

fn interpret(
    definition: &AssertionDefinition,
    resolution: &Resolution,
    outcome: Result<(), RoutineError>,
) -> DispatchResult<()> {
    let call = || render_call(definition.pattern(), &resolution.args);

    match (outcome, resolution.negated) {
        (Ok(()), false) | (Err(RoutineError::Unsatisfied(_)), true) => {
            trace!(
                definition = definition.id(),
                negated = resolution.negated,
                "assertion held"
            );
            Ok(())
        }
        (Ok(()), true) => Err(DispatchError::NegatedPassed {
            definition_id: definition.id().to_string(),
            call: call(),
        }),
        (Err(RoutineError::Unsatisfied(failure)), false) => {
            Err(DispatchError::Assertion(AssertionFailure {
                definition_id: definition.id().to_string(),
                call: call(),
                failure,
            }))
        }
        (Err(RoutineError::Internal(source)), _) => {
            debug!(
                definition = definition.id(),
                error = %source,
                "assertion routine broke"
            );
            Err(DispatchError::Implementation {
                definition_id: definition.id().to_string(),
                call: call(),
                source,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Failure;
    use serde_json::json;

    fn resolution(args: Vec<Value>, values: Vec<Value>, negated: bool) -> Resolution {
        Resolution {
            definition_index: 0,
            definition_id: "test".to_string(),
            negated,
            exact: true,
            args,
            values,
        }
    }

    fn positive() -> AssertionDefinition {
        AssertionDefinition::parse("positive", "<number> to be positive", |values: &[Value]| {
            match values[0].as_f64() {
                Some(n) if n > 0.0 => Ok(()),
                _ => Err(Failure::new(format!("{} is not positive", values[0]))
                    .with_actual(values[0].clone())
                    .into()),
            }
        })
        .unwrap()
    }

    #[test]
    fn test_render_call() {
        let pattern = Pattern::parse("<number> to be between <number> and <number>").unwrap();
        let args = [json!(5), json!("to be between"), json!(1), json!("and"), json!(9)];
        assert_eq!(render_call(&pattern, &args), "5 to be between 1 and 9");

        let pattern = Pattern::parse("<any> to equal <any>").unwrap();
        let args = [json!("a"), json!("to equal"), json!("b"), json!("extra")];
        assert_eq!(render_call(&pattern, &args), r#""a" to equal "b""#);
    }

    #[test]
    fn test_pass() {
        let r = resolution(
            vec![json!(1), json!("to be positive")],
            vec![json!(1), json!("to be positive")],
            false,
        );
        assert!(execute(&positive(), &r).is_ok());
    }

    #[test]
    fn test_fail_carries_details() {
        let r = resolution(
            vec![json!(-1), json!("to be positive")],
            vec![json!(-1), json!("to be positive")],
            false,
        );
        match execute(&positive(), &r).unwrap_err() {
            DispatchError::Assertion(failure) => {
                assert_eq!(failure.definition_id, "positive");
                assert_eq!(failure.call, "-1 to be positive");
                assert_eq!(failure.message(), "-1 is not positive");
                assert_eq!(failure.actual(), Some(&json!(-1)));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_negated_fail_is_success() {
        let r = resolution(
            vec![json!(-1), json!("not to be positive")],
            vec![json!(-1), json!("to be positive")],
            true,
        );
        assert!(execute(&positive(), &r).is_ok());
    }

    #[test]
    fn test_negated_pass_is_failure() {
        let r = resolution(
            vec![json!(1), json!("not to be positive")],
            vec![json!(1), json!("to be positive")],
            true,
        );
        let err = execute(&positive(), &r).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @r###"
        expected 1 not to be positive
          the negated assertion passed
        "###);
    }

    #[test]
    fn test_internal_error_is_escalated_even_when_negated() {
        let broken = AssertionDefinition::parse("broken", "<any> to be broken", |_: &[Value]| {
            Err(RoutineError::internal("lookup table missing"))
        })
        .unwrap();
        for negated in [false, true] {
            let r = resolution(
                vec![json!(1), json!("to be broken")],
                vec![json!(1), json!("to be broken")],
                negated,
            );
            let err = execute(&broken, &r).unwrap_err();
            assert!(err.is_implementation_error());
            assert_eq!(err.definition_id(), Some("broken"));
        }
    }

    #[test]
    fn test_panic_is_escalated() {
        let panicking = AssertionDefinition::parse("panicking", "<any> to panic", |_: &[Value]| {
            panic!("index out of range")
        })
        .unwrap();
        let r = resolution(
            vec![json!(1), json!("to panic")],
            vec![json!(1), json!("to panic")],
            true,
        );
        let err = execute(&panicking, &r).unwrap_err();
        assert!(err.is_implementation_error());
        assert!(err.to_string().contains("routine panicked: index out of range"));
    }

    #[test]
    fn test_async_routine_needs_async_dispatch() {
        let later = AssertionDefinition::new_async(
            "later",
            Pattern::parse("<any> to resolve").unwrap(),
            |_: Vec<Value>| async { Ok::<(), RoutineError>(()) },
        );
        let r = resolution(
            vec![json!(1), json!("to resolve")],
            vec![json!(1), json!("to resolve")],
            false,
        );
        assert!(execute(&later, &r).unwrap_err().is_implementation_error());
    }

    #[tokio::test]
    async fn test_execute_async() {
        let later = AssertionDefinition::new_async(
            "later",
            Pattern::parse("<any> to resolve").unwrap(),
            |values: Vec<Value>| async move {
                if values[0] == json!(0) {
                    Err(RoutineError::from(Failure::new("rejected")))
                } else {
                    Ok(())
                }
            },
        );
        let ok = resolution(
            vec![json!(1), json!("to resolve")],
            vec![json!(1), json!("to resolve")],
            false,
        );
        assert!(execute_async(&later, &ok).await.is_ok());

        let negated = resolution(
            vec![json!(0), json!("not to resolve")],
            vec![json!(0), json!("to resolve")],
            true,
        );
        assert!(execute_async(&later, &negated).await.is_ok());

        // Synchronous routines run inline.
        assert!(execute_async(&positive(), &ok).await.is_ok());
    }
}

#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Natural-language assertion dispatch.
//!
//! A call such as `expect(5, "to be greater than", 3)` is matched against a
//! fixed, ordered set of assertion definitions. Each definition declares its
//! accepted call shape as a [`Pattern`]; the dispatcher picks the winning
//! definition, applies negation (`"not to be ..."`) and conjunctions
//! (`..., "and", "to be ..."`), and runs its validation routine.
//!
//! ## Modules
//!
//! - [`pattern`] - Slots, patterns and the pattern description syntax
//! - [`value`] - Argument values and value validators
//! - [`matcher`] - Matching one pattern against one argument list
//! - [`index`] - Phrase index for candidate narrowing
//! - [`negation`] - Negation keyword handling
//! - [`conjunction`] - Conjunction splitting and rejoin permutations
//! - [`dispatcher`] - Resolution and dispatch
//! - [`executor`] - Running routines and interpreting their outcome
//! - [`errors`] - Failure categories
//! - [`config`] - Dispatcher configuration
//! - [`assertions`] - Standard leaf assertions

pub mod assertions;
pub mod config;
pub mod conjunction;
pub mod definition;
pub mod dispatcher;
pub mod errors;
pub mod executor;
pub mod index;
pub mod matcher;
pub mod negation;
pub mod pattern;
pub mod value;

pub use config::{ConfigError, DispatcherConfig};
pub use definition::{AssertionDefinition, BoxFuture, Routine};
pub use dispatcher::{Dispatcher, Resolution};
pub use errors::{
    fail, AssertionFailure, BoxError, DispatchError, DispatchResult, Failure, RoutineError,
};
pub use matcher::{match_pattern, ParsedResult};
pub use pattern::{ParseError, Pattern, PatternError, PhraseSlot, Slot};
pub use value::{Validation, Value, ValueValidator};

#[doc(hidden)]
pub use serde_json::json as __json;

/// Dispatch a call, converting each argument with `serde_json::json!`.
///
/// ```
/// use layered_assert::{assertions, expect, Dispatcher};
///
/// let dispatcher = Dispatcher::new(assertions::standard_definitions());
/// let word = "hi";
/// assert!(expect!(dispatcher, word, "to be a string", "and", "to be non-empty").is_ok());
/// ```
#[macro_export]
macro_rules! expect {
    ($dispatcher:expr, $($arg:expr),+ $(,)?) => {
        $dispatcher.dispatch(&[$($crate::__json!($arg)),+])
    };
}

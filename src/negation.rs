//! Negation: a leading keyword on the phrase inverts the outcome.

use crate::index::phrase_position;
use crate::value::Value;

/// An argument list with any leading negation keyword stripped from its phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct Negation {
    pub is_negated: bool,
    pub args: Vec<Value>,
}

/// Strip `keyword` plus one space from the start of the phrase argument.
///
/// Only the phrase position is inspected, and only one keyword is removed.
pub fn strip_negation(args: &[Value], keyword: &str) -> Negation {
    strip_negation_known(args, keyword, |_| false)
}

/// Like [`strip_negation`], but picks the phrase position by asking
/// `is_phrase` which strings are registered phrases.
///
/// Position 1 wins when its stripped text is a phrase, or when it already is
/// one unstripped. Otherwise position 0 is negated if its stripped text is a
/// phrase. When nothing is known the usual phrase position is used.
pub fn strip_negation_known<F>(args: &[Value], keyword: &str, is_phrase: F) -> Negation
where
    F: Fn(&str) -> bool,
{
    let strip_at = |position: usize| -> Option<String> {
        let phrase = args.get(position)?.as_str()?;
        let rest = phrase.strip_prefix(keyword)?.strip_prefix(' ')?;
        Some(rest.to_string())
    };

    if let Some(rest) = strip_at(1).filter(|rest| is_phrase(rest)) {
        return negated(args, 1, rest);
    }
    let plain_at_one = args
        .get(1)
        .and_then(Value::as_str)
        .is_some_and(|phrase| is_phrase(phrase));
    if !plain_at_one {
        if let Some(rest) = strip_at(0).filter(|rest| is_phrase(rest)) {
            return negated(args, 0, rest);
        }
    }

    match phrase_position(args).and_then(|position| Some((position, strip_at(position)?))) {
        Some((position, rest)) => negated(args, position, rest),
        None => Negation {
            is_negated: false,
            args: args.to_vec(),
        },
    }
}

fn negated(args: &[Value], position: usize, rest: String) -> Negation {
    let mut cleaned = args.to_vec();
    cleaned[position] = Value::String(rest);
    Negation {
        is_negated: true,
        args: cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strips_leading_keyword() {
        let args = [json!(5), json!("not to be greater than"), json!(3)];
        let negation = strip_negation(&args, "not");
        assert!(negation.is_negated);
        assert_eq!(
            negation.args,
            vec![json!(5), json!("to be greater than"), json!(3)]
        );
    }

    #[test]
    fn test_plain_phrase_is_untouched() {
        let args = vec![json!(5), json!("to be greater than"), json!(3)];
        let negation = strip_negation(&args, "not");
        assert!(!negation.is_negated);
        assert_eq!(negation.args, args);
    }

    #[test]
    fn test_requires_word_boundary() {
        let negation = strip_negation(&[json!(1), json!("nothing to see")], "not");
        assert!(!negation.is_negated);
    }

    #[test]
    fn test_strips_only_once() {
        let negation = strip_negation(&[json!(1), json!("not not to be")], "not");
        assert!(negation.is_negated);
        assert_eq!(negation.args[1], json!("not to be"));
    }

    #[test]
    fn test_subject_is_never_inspected() {
        let negation = strip_negation(&[json!("not yet"), json!("to be a string")], "not");
        assert!(!negation.is_negated);
    }

    #[test]
    fn test_phrase_first_call() {
        let negation = strip_negation(&[json!("not to throw")], "not");
        assert!(negation.is_negated);
        assert_eq!(negation.args, vec![json!("to throw")]);
    }

    #[test]
    fn test_known_phrase_first_call_with_string_parameter() {
        let known = |phrase: &str| phrase == "to throw" || phrase == "to be a string";

        let args = [json!("not to throw"), json!("bang")];
        let negation = strip_negation_known(&args, "not", known);
        assert!(negation.is_negated);
        assert_eq!(negation.args, vec![json!("to throw"), json!("bang")]);

        // Without phrase knowledge position 1 is taken and nothing is stripped.
        let negation = strip_negation(&args, "not");
        assert!(!negation.is_negated);
    }

    #[test]
    fn test_known_phrase_at_one_shields_subject() {
        let known = |phrase: &str| phrase == "to throw" || phrase == "to be a string";

        let args = [json!("not to throw"), json!("to be a string")];
        let negation = strip_negation_known(&args, "not", known);
        assert!(!negation.is_negated);

        let args = [json!("not yet"), json!("to be a string")];
        let negation = strip_negation_known(&args, "not", known);
        assert!(!negation.is_negated);

        let args = [json!("not yet"), json!("not to be a string")];
        let negation = strip_negation_known(&args, "not", known);
        assert!(negation.is_negated);
        assert_eq!(negation.args, vec![json!("not yet"), json!("to be a string")]);
    }

    #[test]
    fn test_unknown_phrase_uses_phrase_position() {
        let args = [json!(1), json!("not to be odd")];
        let negation = strip_negation_known(&args, "not", |_| false);
        assert!(negation.is_negated);
        assert_eq!(negation.args, vec![json!(1), json!("to be odd")]);
    }

    #[test]
    fn test_empty_args() {
        let negation = strip_negation(&[], "not");
        assert!(!negation.is_negated);
        assert!(negation.args.is_empty());
    }
}

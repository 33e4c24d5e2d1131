//! Phrase index: narrows the definitions worth trying for a call.
//!
//! The index is an optimization only. For any call, the candidates it returns
//! are a superset of the definitions that could match, in registration order.

use crate::definition::AssertionDefinition;
use crate::value::Value;
use std::collections::HashMap;

/// Position of the phrase in a call: 1 for the usual `(subject, phrase, ...)`
/// shape, 0 for phrase-first calls.
pub fn phrase_position(args: &[Value]) -> Option<usize> {
    if matches!(args.get(1), Some(Value::String(_))) {
        Some(1)
    } else if matches!(args.first(), Some(Value::String(_))) {
        Some(0)
    } else {
        None
    }
}

/// Map from literal phrase to the definitions that contain it.
#[derive(Debug, Clone, Default)]
pub struct PhraseIndex {
    buckets: HashMap<String, Vec<usize>>,
    /// Definitions with no phrase slot at position 0 or 1. They are
    /// candidates for every call.
    unanchored: Vec<usize>,
    len: usize,
}

impl PhraseIndex {
    pub fn build(definitions: &[AssertionDefinition]) -> Self {
        let mut buckets: HashMap<String, Vec<usize>> = HashMap::new();
        let mut unanchored = Vec::new();

        for (i, definition) in definitions.iter().enumerate() {
            if !definition.is_anchored() {
                unanchored.push(i);
                continue;
            }
            for phrase in definition.indexable_phrases() {
                buckets.entry(phrase.clone()).or_default().push(i);
            }
        }

        Self {
            buckets,
            unanchored,
            len: definitions.len(),
        }
    }

    /// Indices of the definitions to attempt, in registration order.
    ///
    /// The string at position 1 is looked up first, then the one at position 0.
    /// When neither is indexed every definition is returned.
    pub fn candidates(&self, args: &[Value]) -> Vec<usize> {
        let found: Vec<&Vec<usize>> = [args.get(1), args.first()]
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .filter_map(|phrase| self.buckets.get(phrase))
            .collect();

        if found.is_empty() {
            return (0..self.len).collect();
        }

        let mut candidates: Vec<usize> = found
            .into_iter()
            .flatten()
            .chain(self.unanchored.iter())
            .copied()
            .collect();
        candidates.sort_unstable();
        candidates.dedup();
        candidates
    }

    /// Number of distinct indexed phrases.
    pub fn phrase_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.buckets.contains_key(phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RoutineError;
    use serde_json::json;

    fn def(id: &str, pattern: &str) -> AssertionDefinition {
        AssertionDefinition::parse(id, pattern, |_: &[Value]| -> Result<(), RoutineError> {
            Ok(())
        })
        .unwrap()
    }

    fn definitions() -> Vec<AssertionDefinition> {
        vec![
            def("gt", "<number> to be greater than|to be above <number>"),
            def("string", "<any> to be a string"),
            def("between", "<number> to be between <number> and <number>"),
            def("throw", "to throw <string>"),
            def("swapped", "<any> <any> to be swapped"),
            def("gt-again", "<number> to be above <number>"),
        ]
    }

    #[test]
    fn test_phrase_position() {
        assert_eq!(phrase_position(&[json!(1), json!("to be")]), Some(1));
        assert_eq!(phrase_position(&[json!("to throw"), json!(1)]), Some(0));
        assert_eq!(phrase_position(&[json!(1), json!(2)]), None);
        assert_eq!(phrase_position(&[]), None);
    }

    #[test]
    fn test_bucket_lookup_keeps_registration_order() {
        let index = PhraseIndex::build(&definitions());
        assert_eq!(
            index.candidates(&[json!(5), json!("to be above"), json!(3)]),
            vec![0, 4, 5]
        );
        assert_eq!(index.candidates(&[json!(5), json!("to be a string")]), vec![1, 4]);
    }

    #[test]
    fn test_phrase_first_lookup() {
        let index = PhraseIndex::build(&definitions());
        assert_eq!(
            index.candidates(&[json!("to throw"), json!("boom")]),
            vec![3, 4]
        );
    }

    #[test]
    fn test_unindexed_phrase_falls_back_to_full_scan() {
        let index = PhraseIndex::build(&definitions());
        assert_eq!(
            index.candidates(&[json!(1), json!("to do something impossible")]),
            vec![0, 1, 2, 3, 4, 5]
        );
        assert_eq!(index.candidates(&[json!(1), json!(2)]).len(), 6);
        assert_eq!(index.candidates(&[]).len(), 6);
    }

    #[test]
    fn test_unanchored_phrases_are_not_indexed() {
        let index = PhraseIndex::build(&definitions());
        assert!(!index.contains("to be swapped"));
        assert!(index.contains("and"));
        assert_eq!(index.phrase_count(), 6);
    }
}

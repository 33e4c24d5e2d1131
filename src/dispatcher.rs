//! The dispatcher: finds the assertion a call refers to and runs it.
//!
//! Per call:
//!
//! 1. Split the arguments on the conjunction keyword.
//! 2. For each segment: strip negation, narrow candidates through the phrase
//!    index, then match candidates in registration order. An exact match is
//!    taken immediately; otherwise the first partial match wins.
//! 3. If any segment of a split call does not resolve, try the rejoin
//!    permutations (see [`crate::conjunction`]).
//! 4. Execute the resolved segments in order.
//!
//! ```
//! use layered_assert::{assertions, expect, Dispatcher};
//!
//! let dispatcher = Dispatcher::new(assertions::standard_definitions());
//! assert!(expect!(dispatcher, 5, "to be greater than", 3).is_ok());
//! assert!(expect!(dispatcher, 5, "not to be greater than", 3).is_err());
//! ```

use crate::config::DispatcherConfig;
use crate::conjunction::{rejoin_permutations, split_conjunctions};
use crate::definition::AssertionDefinition;
use crate::errors::{DispatchError, DispatchResult};
use crate::executor::{execute, execute_async};
use crate::index::PhraseIndex;
use crate::matcher::{match_pattern, ParsedResult};
use crate::negation::strip_negation_known;
use crate::value::{describe_args, Value};
use tracing::{debug, trace};

/// One segment of a call, resolved to the definition that will check it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Position of the definition in [`Dispatcher::definitions`].
    pub definition_index: usize,
    pub definition_id: String,
    pub negated: bool,
    /// The pattern consumed the whole segment.
    pub exact: bool,
    /// The segment as written, negation keyword included.
    pub args: Vec<Value>,
    /// Slot-typed values handed to the routine.
    pub values: Vec<Value>,
}

/// Immutable set of assertion definitions plus their phrase index.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    definitions: Vec<AssertionDefinition>,
    index: PhraseIndex,
    config: DispatcherConfig,
}

impl Dispatcher {
    pub fn new(definitions: Vec<AssertionDefinition>) -> Self {
        Self::with_config(definitions, DispatcherConfig::default())
    }

    pub fn with_config(definitions: Vec<AssertionDefinition>, config: DispatcherConfig) -> Self {
        let index = PhraseIndex::build(&definitions);
        debug!(
            definitions = definitions.len(),
            phrases = index.phrase_count(),
            "built assertion dispatcher"
        );
        Self {
            definitions,
            index,
            config,
        }
    }

    /// A new dispatcher with this one's definitions followed by `definitions`.
    ///
    /// Earlier definitions keep priority on ties.
    pub fn extend<I>(&self, definitions: I) -> Self
    where
        I: IntoIterator<Item = AssertionDefinition>,
    {
        let combined = self
            .definitions
            .iter()
            .cloned()
            .chain(definitions)
            .collect();
        Self::with_config(combined, self.config.clone())
    }

    pub fn definitions(&self) -> &[AssertionDefinition] {
        &self.definitions
    }

    pub fn definition(&self, id: &str) -> Option<&AssertionDefinition> {
        self.definitions.iter().find(|d| d.id() == id)
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn index(&self) -> &PhraseIndex {
        &self.index
    }

    /// All indexable phrases, in registration order, without duplicates.
    pub fn phrases(&self) -> Vec<&str> {
        let mut phrases: Vec<&str> = Vec::new();
        for phrase in self.definitions.iter().flat_map(|d| d.indexable_phrases()) {
            if !phrases.contains(&phrase.as_str()) {
                phrases.push(phrase);
            }
        }
        phrases
    }

    /// Resolve a call without executing it.
    pub fn resolve(&self, args: &[Value]) -> DispatchResult<Vec<Resolution>> {
        let keyword = self.config.conjunction_keyword.as_str();
        let segments = split_conjunctions(args, keyword);
        trace!(segments = segments.len(), "split call");

        if let Some(resolutions) = self.resolve_segments(&segments, true) {
            return Ok(resolutions);
        }

        if segments.len() > 1 {
            for (attempt, permutation) in rejoin_permutations(&segments, args, keyword)
                .iter()
                .enumerate()
            {
                trace!(
                    attempt,
                    segments = permutation.len(),
                    "trying rejoin permutation"
                );
                // A partial match here would swallow the conjunction and
                // everything after it, so only exact matches count.
                if let Some(resolutions) = self.resolve_segments(permutation, false) {
                    return Ok(resolutions);
                }
            }
        }

        debug!(args = %describe_args(args), "unknown assertion");
        Err(DispatchError::UnknownAssertion {
            args: args.to_vec(),
        })
    }

    /// Resolve and execute a call.
    pub fn dispatch(&self, args: &[Value]) -> DispatchResult<()> {
        for resolution in self.resolve(args)? {
            execute(&self.definitions[resolution.definition_index], &resolution)?;
        }
        Ok(())
    }

    /// Resolve and execute a call, awaiting asynchronous routines one at a time.
    pub async fn dispatch_async(&self, args: &[Value]) -> DispatchResult<()> {
        for resolution in self.resolve(args)? {
            execute_async(&self.definitions[resolution.definition_index], &resolution).await?;
        }
        Ok(())
    }

    fn resolve_segments(
        &self,
        segments: &[Vec<Value>],
        allow_partial: bool,
    ) -> Option<Vec<Resolution>> {
        segments
            .iter()
            .map(|segment| self.resolve_segment(segment, allow_partial))
            .collect()
    }

    fn resolve_segment(&self, segment: &[Value], allow_partial: bool) -> Option<Resolution> {
        let negation = strip_negation_known(segment, &self.config.negation_keyword, |phrase| {
            self.index.contains(phrase)
        });
        let candidates = if self.config.use_phrase_index {
            self.index.candidates(&negation.args)
        } else {
            (0..self.definitions.len()).collect()
        };
        trace!(
            candidates = candidates.len(),
            negated = negation.is_negated,
            "matching segment"
        );

        let mut first_partial: Option<(usize, ParsedResult)> = None;
        for i in candidates {
            let parsed = match_pattern(self.definitions[i].pattern(), &negation.args);
            if parsed.exact_match {
                return Some(self.resolution(i, segment, negation.is_negated, parsed));
            }
            if parsed.success && first_partial.is_none() {
                first_partial = Some((i, parsed));
            }
        }

        if !allow_partial {
            return None;
        }
        first_partial.map(|(i, parsed)| self.resolution(i, segment, negation.is_negated, parsed))
    }

    fn resolution(
        &self,
        index: usize,
        segment: &[Value],
        negated: bool,
        parsed: ParsedResult,
    ) -> Resolution {
        let definition = &self.definitions[index];
        trace!(
            definition = definition.id(),
            exact = parsed.exact_match,
            "selected definition"
        );
        Resolution {
            definition_index: index,
            definition_id: definition.id().to_string(),
            negated,
            exact: parsed.exact_match,
            args: segment.to_vec(),
            values: parsed.parsed_values,
        }
    }
}

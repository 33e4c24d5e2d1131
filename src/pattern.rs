//! Pattern model: the call shape an assertion accepts.
//!
//! A [`Pattern`] is an ordered sequence of [`Slot`]s. Phrase slots accept a
//! string equal to one of a fixed set of literals; value slots delegate to a
//! [`ValueValidator`]. Every pattern has at least one phrase slot.
//!
//! Patterns can be built slot by slot or parsed from a description:
//!
//! ```
//! use layered_assert::Pattern;
//!
//! let pattern = Pattern::parse("<number> to be greater than|to be above <number>").unwrap();
//! assert_eq!(pattern.len(), 3);
//! assert_eq!(pattern.to_string(), "<number> to be greater than|to be above <number>");
//! ```

use crate::value::{validator_by_name, ValueValidator, VALIDATOR_NAMES};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// One position in a [`Pattern`].
#[derive(Debug, Clone)]
pub enum Slot {
    /// A fixed choice of literal phrases.
    Phrase(PhraseSlot),
    /// A value checked by a validator.
    Value(Arc<dyn ValueValidator>),
}

impl Slot {
    pub fn phrase<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Slot::Phrase(PhraseSlot::new(phrases))
    }

    pub fn value(validator: Arc<dyn ValueValidator>) -> Self {
        Slot::Value(validator)
    }

    pub fn as_phrase(&self) -> Option<&PhraseSlot> {
        match self {
            Slot::Phrase(slot) => Some(slot),
            Slot::Value(_) => None,
        }
    }
}

/// Ordered set of accepted literal phrases for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseSlot {
    phrases: Vec<String>,
}

impl PhraseSlot {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collected: Vec<String> = Vec::new();
        for phrase in phrases {
            let phrase = phrase.into();
            if !collected.contains(&phrase) {
                collected.push(phrase);
            }
        }
        Self { phrases: collected }
    }

    /// Case-sensitive, exact comparison.
    pub fn accepts(&self, candidate: &str) -> bool {
        self.phrases.iter().any(|p| p == candidate)
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

/// Error parsing a pattern description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Parse error at position {position}: {message}")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
    /// Valid alternatives, when the error is about an unknown name.
    pub suggestions: Vec<String>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: 0,
            suggestions: Vec::new(),
        }
    }

    pub fn at(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }
}

/// A pattern could not be constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("pattern has no phrase slot")]
    NoPhraseSlot,

    #[error("phrase slot {index} accepts no phrases")]
    EmptyPhraseSlot { index: usize },

    #[error("phrase slot {index} contains an empty phrase")]
    EmptyPhrase { index: usize },
}

/// Ordered sequence of slots describing one assertion's accepted call.
#[derive(Debug, Clone)]
pub struct Pattern {
    slots: Vec<Slot>,
}

impl Pattern {
    pub fn new(slots: Vec<Slot>) -> Result<Self, PatternError> {
        let mut has_phrase = false;
        for (index, slot) in slots.iter().enumerate() {
            if let Slot::Phrase(phrase_slot) = slot {
                has_phrase = true;
                if phrase_slot.phrases.is_empty() {
                    return Err(PatternError::EmptyPhraseSlot { index });
                }
                if phrase_slot.phrases.iter().any(|p| p.is_empty()) {
                    return Err(PatternError::EmptyPhrase { index });
                }
            }
        }
        if !has_phrase {
            return Err(PatternError::NoPhraseSlot);
        }
        Ok(Self { slots })
    }

    pub fn builder() -> PatternBuilder {
        PatternBuilder::default()
    }

    /// Parse a description such as `<any> to be between <number> and <number>`.
    ///
    /// `<name>` is a value slot (see [`crate::value::VALIDATOR_NAMES`]); each text
    /// run between value slots is one phrase slot, with `|` separating alternatives.
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        let mut slots = Vec::new();
        let mut text_start = 0;
        let mut cursor = 0;

        while let Some(offset) = source[cursor..].find(|c: char| c == '<' || c == '>') {
            let at = cursor + offset;
            if source[at..].starts_with('>') {
                return Err(ParseError::new("unexpected '>'").at(at).into());
            }
            push_phrase_slot(&mut slots, &source[text_start..at], text_start)?;

            let rest = &source[at + 1..];
            let close = rest
                .find('>')
                .ok_or_else(|| ParseError::new("unterminated '<'").at(at))?;
            let name = rest[..close].trim();
            let validator = validator_by_name(name).ok_or_else(|| {
                ParseError::new(format!("unknown value type: {}", name))
                    .at(at + 1)
                    .with_suggestions(VALIDATOR_NAMES.iter().map(|n| n.to_string()).collect())
            })?;
            slots.push(Slot::Value(validator));

            cursor = at + 1 + close + 1;
            text_start = cursor;
        }
        push_phrase_slot(&mut slots, &source[text_start..], text_start)?;

        Pattern::new(slots)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The phrase slot at `position`, if that slot is one.
    pub fn phrase_at(&self, position: usize) -> Option<&PhraseSlot> {
        self.slots.get(position).and_then(Slot::as_phrase)
    }

    /// Every literal of every phrase slot, in slot order, without duplicates.
    pub fn phrases(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for slot in &self.slots {
            if let Slot::Phrase(phrase_slot) = slot {
                for phrase in &phrase_slot.phrases {
                    if !out.contains(&phrase.as_str()) {
                        out.push(phrase);
                    }
                }
            }
        }
        out
    }
}

fn push_phrase_slot(slots: &mut Vec<Slot>, text: &str, offset: usize) -> Result<(), ParseError> {
    if text.trim().is_empty() {
        return Ok(());
    }
    let mut phrases = Vec::new();
    for alternative in text.split('|') {
        let alternative = alternative.trim();
        if alternative.is_empty() {
            return Err(ParseError::new("empty phrase alternative").at(offset));
        }
        phrases.push(alternative.to_string());
    }
    slots.push(Slot::Phrase(PhraseSlot::new(phrases)));
    Ok(())
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match slot {
                Slot::Phrase(phrase_slot) => f.write_str(&phrase_slot.phrases.join("|"))?,
                Slot::Value(validator) => write!(f, "<{}>", validator.name())?,
            }
        }
        Ok(())
    }
}

/// Slot-by-slot construction of a [`Pattern`].
#[derive(Debug, Default)]
pub struct PatternBuilder {
    slots: Vec<Slot>,
}

impl PatternBuilder {
    pub fn value(mut self, validator: Arc<dyn ValueValidator>) -> Self {
        self.slots.push(Slot::Value(validator));
        self
    }

    pub fn phrase<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slots.push(Slot::phrase(phrases));
        self
    }

    pub fn build(self) -> Result<Pattern, PatternError> {
        Pattern::new(self.slots)
    }
}

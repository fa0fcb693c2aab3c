//! Lenient, line-oriented parsing of user input and model output.
//!
//! Model output is not guaranteed to follow the requested format, so every
//! line is parsed on its own and reported as [`LineOutcome::Parsed`] or
//! [`LineOutcome::Skipped`]; a bad line never fails the whole response.

use std::collections::HashMap;

use crate::{FlashcardRecord, TermDefinitionPair};

/// Emoji used for a term the model did not return an emoji for.
pub const FALLBACK_EMOJI: &str = "📝";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// The user pasted `term: definition` lines; only emojis are generated.
    KeyValue,
    /// The user typed a topic; the model generates whole cards.
    FreeForm,
}

impl InputMode {
    /// Colon plus newline means the user already has content.
    pub fn detect(topic: &str) -> Self {
        if topic.contains(':') && topic.contains('\n') {
            InputMode::KeyValue
        } else {
            InputMode::FreeForm
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome<T> {
    Parsed(T),
    Skipped,
}

impl<T> LineOutcome<T> {
    pub fn parsed(self) -> Option<T> {
        match self {
            LineOutcome::Parsed(value) => Some(value),
            LineOutcome::Skipped => None,
        }
    }
}

/// One outcome per non-blank line. A line is split on its first colon only,
/// so the right-hand side may itself contain colons.
pub fn parse_term_lines(text: &str) -> Vec<LineOutcome<TermDefinitionPair>> {
    non_blank_lines(text)
        .map(|line| match line.split_once(':') {
            Some((term, definition)) => LineOutcome::Parsed(TermDefinitionPair {
                term: term.trim().to_string(),
                definition: definition.trim().to_string(),
            }),
            None => LineOutcome::Skipped,
        })
        .collect()
}

pub fn parse_term_definitions(text: &str) -> Vec<TermDefinitionPair> {
    parse_term_lines(text)
        .into_iter()
        .filter_map(LineOutcome::parsed)
        .collect()
}

/// Parses `emoji: term: definition` lines. Everything after the second colon
/// belongs to the definition.
pub fn parse_flashcard_lines(text: &str) -> Vec<LineOutcome<FlashcardRecord>> {
    non_blank_lines(text)
        .map(|line| {
            let mut segments = line.splitn(3, ':');
            match (segments.next(), segments.next(), segments.next()) {
                (Some(emoji), Some(term), Some(definition)) => {
                    LineOutcome::Parsed(FlashcardRecord {
                        emoji: emoji.trim().to_string(),
                        term: term.trim().to_string(),
                        definition: definition.trim().to_string(),
                    })
                }
                _ => LineOutcome::Skipped,
            }
        })
        .collect()
}

pub fn parse_flashcards(text: &str) -> Vec<FlashcardRecord> {
    parse_flashcard_lines(text)
        .into_iter()
        .filter_map(LineOutcome::parsed)
        .collect()
}

/// Emojis for the user's original terms, keyed by the term as the user wrote it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiAssignment {
    by_term: HashMap<String, String>,
}

impl EmojiAssignment {
    /// Matches `Term: Emoji` lines from `response` back to `terms`, ignoring
    /// case. Lines naming an unknown term are ignored; when the model repeats a
    /// term, the first usable line wins.
    pub fn resolve<'a, I>(terms: I, response: &str) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut by_lowercase: HashMap<String, &str> = HashMap::new();
        for term in terms {
            by_lowercase.entry(term.to_lowercase()).or_insert(term);
        }

        let mut by_term = HashMap::new();
        for line in parse_term_definitions(response) {
            if line.definition.is_empty() {
                continue;
            }
            if let Some(original) = by_lowercase.get(&line.term.to_lowercase()) {
                by_term
                    .entry((*original).to_string())
                    .or_insert(line.definition);
            }
        }

        Self { by_term }
    }

    /// Never empty: unmatched terms get [`FALLBACK_EMOJI`].
    pub fn emoji_for(&self, term: &str) -> &str {
        self.by_term
            .get(term)
            .or_else(|| {
                self.by_term
                    .iter()
                    .find(|(known, _)| known.to_lowercase() == term.to_lowercase())
                    .map(|(_, emoji)| emoji)
            })
            .map(String::as_str)
            .unwrap_or(FALLBACK_EMOJI)
    }

    pub fn len(&self) -> usize {
        self.by_term.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_term.is_empty()
    }
}

/// Pairs each input line with its resolved emoji, keeping input order.
pub fn build_records(
    pairs: Vec<TermDefinitionPair>,
    emojis: &EmojiAssignment,
) -> Vec<FlashcardRecord> {
    pairs
        .into_iter()
        .map(|pair| FlashcardRecord {
            emoji: emojis.emoji_for(&pair.term).to_string(),
            term: pair.term,
            definition: pair.definition,
        })
        .collect()
}

fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| !line.trim().is_empty())
}

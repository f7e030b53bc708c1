use rand::Rng;
use tracing::debug;

use crate::models::{AnnotatedDoc, AnnotatedSentence};
use crate::rules::{noun_chunks, verb_phrases};

/// Configuration for sentence selection
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Sentences with more words than this are rejected
    pub max_words: usize,
    /// Punctuation allowed in a selected sentence
    pub allowed_punctuation: Vec<char>,
    /// Noun-phrase to verb-phrase ratio above which a sentence is downsampled
    pub max_np_vp_ratio: f64,
    /// Probability of keeping a sentence above the ratio
    pub nominal_accept_prob: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_words: 15,
            allowed_punctuation: vec![',', '.'],
            max_np_vp_ratio: 2.0,
            nominal_accept_prob: 0.20,
        }
    }
}

/// Outcome of evaluating one sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Accepted,
    TooLong,
    HasSymbols,
    NoVerbPhrase,
    Downsampled,
}

/// Result of selecting sentences from a document
#[derive(Debug, Default)]
pub struct SelectionResult {
    /// Sentences worth corrupting, in document order
    pub selected: Vec<AnnotatedSentence>,
    /// Number of sentences rejected per reason
    pub too_long: usize,
    pub has_symbols: usize,
    pub no_verb_phrase: usize,
    pub downsampled: usize,
}

impl SelectionResult {
    /// Fold another document's result into this one
    pub fn merge(&mut self, other: SelectionResult) {
        self.selected.extend(other.selected);
        self.too_long += other.too_long;
        self.has_symbols += other.has_symbols;
        self.no_verb_phrase += other.no_verb_phrase;
        self.downsampled += other.downsampled;
    }

    pub fn rejected(&self) -> usize {
        self.too_long + self.has_symbols + self.no_verb_phrase + self.downsampled
    }
}

/// Whether the text contains ASCII punctuation other than the allowed marks
fn has_symbols(text: &str, allowed: &[char]) -> bool {
    text.chars()
        .any(|c| c.is_ascii_punctuation() && !allowed.contains(&c))
}

/// Decide whether a single sentence should be corrupted
///
/// Verb-poor, noun-heavy sentences are kept only with `nominal_accept_prob`; that is
/// the only case that consumes randomness.
pub fn evaluate_sentence<R: Rng + ?Sized>(
    sentence: &AnnotatedSentence,
    config: &SelectorConfig,
    rng: &mut R,
) -> Selection {
    if sentence.word_count() > config.max_words {
        return Selection::TooLong;
    }
    if has_symbols(&sentence.text, &config.allowed_punctuation) {
        return Selection::HasSymbols;
    }

    let nb_vp = verb_phrases(sentence).len();
    if nb_vp == 0 {
        return Selection::NoVerbPhrase;
    }
    let nb_np = noun_chunks(sentence).len();

    if nb_np as f64 / nb_vp as f64 > config.max_np_vp_ratio {
        if rng.gen_range(0.0..1.0) < config.nominal_accept_prob {
            Selection::Accepted
        } else {
            Selection::Downsampled
        }
    } else {
        Selection::Accepted
    }
}

/// Perform Stage 2: sentence selection over one annotated document
pub fn select_sentences<R: Rng + ?Sized>(
    doc: &AnnotatedDoc,
    config: &SelectorConfig,
    rng: &mut R,
) -> SelectionResult {
    let mut result = SelectionResult::default();

    for sentence in &doc.sentences {
        match evaluate_sentence(sentence, config, rng) {
            Selection::Accepted => result.selected.push(sentence.clone()),
            Selection::TooLong => result.too_long += 1,
            Selection::HasSymbols => result.has_symbols += 1,
            Selection::NoVerbPhrase => result.no_verb_phrase += 1,
            Selection::Downsampled => result.downsampled += 1,
        }
    }

    debug!(
        "Selected {} of {} sentences",
        result.selected.len(),
        doc.sentences.len()
    );

    result
}

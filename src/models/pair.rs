use serde::{Deserialize, Serialize};

/// A well-formed sentence and its synthetic agrammatic counterpart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencePair {
    /// Normalized source sentence
    pub preprocessed_text: String,
    /// Corrupted sentence
    pub synthetic: String,
}

impl SentencePair {
    pub fn new(source: impl Into<String>, synthetic: impl Into<String>) -> Self {
        Self {
            preprocessed_text: source.into(),
            synthetic: synthetic.into(),
        }
    }
}

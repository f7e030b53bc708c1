use serde::{Deserialize, Serialize};

/// One line of an annotation file, tabs and line endings already removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// Position of the line in the source file (0-based)
    pub index: usize,
    /// Line text
    pub text: String,
}

impl RawLine {
    /// Build raw lines from file content, replacing tabs with spaces
    pub fn from_content(content: &str) -> Vec<Self> {
        content
            .lines()
            .enumerate()
            .map(|(index, line)| Self {
                index,
                text: line.replace('\t', " "),
            })
            .collect()
    }
}

/// A logical speaker turn reconstructed from contiguous annotation lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    /// Grouping counter, bumped whenever a new line-type run starts
    pub line_number: usize,
    /// Most recent scenario marker seen before the turn ("N/A" if none)
    pub scenario: String,
    /// Fixed-width prefix of the turn (the speaker or tier tag)
    pub line_information: String,
    /// Concatenated text with the prefix stripped
    pub text: String,
    /// Ordinal of the participant utterance this record belongs to
    pub utterance_count: usize,
    /// Whether the record was spoken by a recognized participant
    pub participant: bool,
    /// File the record was read from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

/// Utterance text after the normalization rule chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedSentence {
    pub scenario: String,
    pub line_information: String,
    pub utterance_count: usize,
    /// Raw utterance text before normalization
    pub original_text: String,
    /// Normalized text
    pub preprocessed_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

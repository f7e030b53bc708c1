use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::{NormalizedSentence, Utterance};
use crate::rules::{RuleTables, expand_contractions, remove_all_repetitions};

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("valid normalization pattern")
}

/// Actions and gestures such as `&=points:picture`
static ACTION: LazyLock<Regex> = LazyLock::new(|| pattern(r"\W\W\w+\W\w+"));
/// Encoding artifacts such as `\u0015123_456\u0015`
static ENCODING: LazyLock<Regex> = LazyLock::new(|| pattern(r"\W\d+\w\d+\W"));
/// Words prefixed with two special characters
static SPECIAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| pattern(r"\W\W\w+"));
static SQUARE_SPAN: LazyLock<Regex> = LazyLock::new(|| pattern(r"\[.*?\]"));
static ANGLE_SPAN: LazyLock<Regex> = LazyLock::new(|| pattern(r"<.*?>"));
static MARKERS: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"&+[a-zA-Z]+|\*[A-Za-z]+|ʔ[A-Za-z]+"));
static REDACTION: LazyLock<Regex> = LazyLock::new(|| pattern(r"X+"));
static RESERVED: LazyLock<Regex> = LazyLock::new(|| pattern(r"U.*"));
static GLYPH_LETTER: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"[A-Za-z\[\\\]^_`][-⌈⌉⌊⌋] "));
static GLYPH_DIGITS: LazyLock<Regex> = LazyLock::new(|| pattern(r"[⌈⌉⌊⌋][0-9]+"));
static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| pattern(r" +"));

/// Flags controlling the optional steps of the rule chain
#[derive(Debug, Clone, Default)]
pub struct NormalizerConfig {
    /// Turn pause placeholders into the mask token
    pub mask_pauses: bool,
    /// Collapse stuttered words and bigrams
    pub remove_repetitions: bool,
    /// Delete mask tokens (healthy speech)
    pub remove_masks: bool,
    /// Strip leading punctuation until none is left, instead of a single ordered pass
    pub strip_leading_to_fixed_point: bool,
}

/// Deterministic rule chain turning raw utterance text into clean text
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    tables: RuleTables,
    config: NormalizerConfig,
}

impl TextNormalizer {
    pub fn new(tables: RuleTables, config: NormalizerConfig) -> Self {
        Self { tables, config }
    }

    pub fn with_config(config: NormalizerConfig) -> Self {
        Self::new(RuleTables::default(), config)
    }

    /// Apply the full rule chain to one utterance
    pub fn normalize(&self, utterance: &str) -> String {
        let mut text = expand_contractions(utterance);

        for pause in self.tables.unfilled_pauses.iter().chain(&self.tables.filler_pauses) {
            text = text.replace(pause.as_str(), "");
        }

        text = remove_unspaced_matches(&text, &ACTION);
        text = remove_unspaced_matches(&text, &ENCODING);
        text = remove_unspaced_matches(&text, &SPECIAL_PREFIX);

        text = SQUARE_SPAN.replace_all(&text, "").into_owned();
        text = ANGLE_SPAN.replace_all(&text, "").into_owned();
        text = MARKERS.replace_all(&text, "").into_owned();
        text = REDACTION.replace_all(&text, "").into_owned();
        text = RESERVED.replace_all(&text, "").into_owned();
        text = GLYPH_LETTER.replace_all(&text, "").into_owned();
        text = GLYPH_DIGITS.replace_all(&text, "").into_owned();

        for special in &self.tables.special_characters {
            text = text.replace(special.as_str(), "");
        }

        text = MULTI_SPACE.replace_all(&text, " ").into_owned();
        text = self.strip_leading(text);

        // Pause markers are already gone at this point; only literal placeholders remain
        if self.config.mask_pauses {
            for placeholder in &self.tables.pause_placeholders {
                text = text.replace(placeholder.as_str(), &self.tables.mask_token);
            }
        }

        if self.config.remove_masks {
            text = text.replace(self.tables.mask_token.as_str(), "");
        }

        if self.config.remove_repetitions {
            text = remove_all_repetitions(&text);
        }

        MULTI_SPACE.replace_all(&text, " ").into_owned()
    }

    fn strip_leading(&self, mut text: String) -> String {
        loop {
            let before = text.len();
            for &c in &self.tables.leading_strip {
                if text.starts_with(c) {
                    text.remove(0);
                }
            }
            if !self.config.strip_leading_to_fixed_point || text.len() == before {
                return text;
            }
        }
    }
}

/// Remove every match of `re` that contains no space, wherever the matched text occurs
fn remove_unspaced_matches(text: &str, re: &Regex) -> String {
    let matches: Vec<String> = re
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|m| !m.contains(' '))
        .collect();

    matches
        .iter()
        .fold(text.to_string(), |acc, m| acc.replace(m.as_str(), ""))
}

/// Normalize the participant utterances of a parsed transcript.
///
/// Non-participant records and utterances that normalize to nothing are dropped.
pub fn normalize_utterances(
    utterances: &[Utterance],
    normalizer: &TextNormalizer,
) -> Vec<NormalizedSentence> {
    let sentences: Vec<NormalizedSentence> = utterances
        .iter()
        .filter(|u| u.participant)
        .filter_map(|u| {
            let preprocessed_text = normalizer.normalize(&u.text);
            if preprocessed_text.trim().is_empty() {
                return None;
            }
            Some(NormalizedSentence {
                scenario: u.scenario.clone(),
                line_information: u.line_information.clone(),
                utterance_count: u.utterance_count,
                original_text: u.text.clone(),
                preprocessed_text,
                source_file: u.source_file.clone(),
            })
        })
        .collect();

    debug!(
        "Normalized {} of {} records",
        sentences.len(),
        utterances.len()
    );

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> String {
        TextNormalizer::default().normalize(text)
    }

    #[test]
    fn test_removes_pauses_and_fillers() {
        assert_eq!(normalize("the girl &-um went (..) home ."), "the girl went home .");
        assert_eq!(normalize("and then +..."), "and then ");
    }

    #[test]
    fn test_removes_actions() {
        assert_eq!(
            normalize("&=points:picture the boy +... ran away ."),
            "the boy ran away ."
        );
    }

    #[test]
    fn test_removes_bracketed_and_angled_spans() {
        assert_eq!(normalize("the <boy> [//] girl ran [* p] ."), "the girl ran .");

        let inputs = [
            "<I want> [/] I want the [: thing] ball [+ gram] .",
            "she <was going> [//] went [*] there .",
            "[+ exc] <no> no no .",
        ];
        for input in inputs {
            let output = normalize(input);
            for glyph in ['[', ']', '<', '>'] {
                assert!(!output.contains(glyph), "{:?} -> {:?}", input, output);
            }
            assert!(!output.contains("gram"));
            assert!(!output.contains("exc"));
        }
    }

    #[test]
    fn test_expands_contractions() {
        assert_eq!(normalize("he's gonna fall ."), "he is going to fall .");
    }

    #[test]
    fn test_removes_markers_and_redactions() {
        assert_eq!(normalize("my name is XXX and *PAR said hi"), "my name is and said hi");
        assert_eq!(normalize("&+fr frog jumped"), "frog jumped");
    }

    #[test]
    fn test_reserved_letter_truncates() {
        assert_eq!(normalize("we went to UCLA yesterday"), "we went to ");
    }

    #[test]
    fn test_single_pass_leading_strip() {
        assert_eq!(normalize(", , okay"), " , okay");

        let fixed_point = TextNormalizer::with_config(NormalizerConfig {
            strip_leading_to_fixed_point: true,
            ..Default::default()
        });
        assert_eq!(fixed_point.normalize(", , okay"), "okay");
    }

    #[test]
    fn test_mask_pauses_does_not_restore_removed_pauses() {
        let masked = TextNormalizer::with_config(NormalizerConfig {
            mask_pauses: true,
            ..Default::default()
        });
        assert_eq!(masked.normalize("the (..) boy &-uh ran"), normalize("the (..) boy &-uh ran"));
        assert!(!masked.normalize("the (..) boy").contains("<mask>"));
    }

    #[test]
    fn test_removes_repetitions_when_enabled() {
        let normalizer = TextNormalizer::with_config(NormalizerConfig {
            remove_repetitions: true,
            ..Default::default()
        });
        assert_eq!(
            normalizer.normalize("I I I went I went to the to the doctor ."),
            "I went to the doctor ."
        );
        assert_eq!(normalize("I I went"), "I I went");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_utterances_skips_non_participants() {
        let utterance = |tag: &str, text: &str, participant: bool| Utterance {
            line_number: 1,
            scenario: "Cinderella".to_string(),
            line_information: tag.to_string(),
            text: text.to_string(),
            utterance_count: 1,
            participant,
            source_file: Some("a.cha".to_string()),
        };
        let records = vec![
            utterance("*PAR", "the girl &-um went .", true),
            utterance("%mor", "det|the n|girl", false),
            utterance("*PAR", "&-um", true),
        ];

        let sentences = normalize_utterances(&records, &TextNormalizer::default());

        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].preprocessed_text, "the girl went .");
        assert_eq!(sentences[0].original_text, "the girl &-um went .");
        assert_eq!(sentences[0].source_file.as_deref(), Some("a.cha"));
    }
}

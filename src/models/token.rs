use serde::{Deserialize, Serialize};

/// Universal Dependencies coarse part-of-speech tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl Pos {
    /// Parse a UPOS column value; unknown tags map to `X`
    pub fn from_upos(tag: &str) -> Self {
        match tag {
            "ADJ" => Pos::Adj,
            "ADP" => Pos::Adp,
            "ADV" => Pos::Adv,
            "AUX" => Pos::Aux,
            "CCONJ" | "CONJ" => Pos::Cconj,
            "DET" => Pos::Det,
            "INTJ" => Pos::Intj,
            "NOUN" => Pos::Noun,
            "NUM" => Pos::Num,
            "PART" => Pos::Part,
            "PRON" => Pos::Pron,
            "PROPN" => Pos::Propn,
            "PUNCT" => Pos::Punct,
            "SCONJ" => Pos::Sconj,
            "SYM" => Pos::Sym,
            "VERB" => Pos::Verb,
            _ => Pos::X,
        }
    }
}

/// Grammatical number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Number {
    Singular,
    Plural,
}

/// Pronoun type, reduced to what the synthesizer distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PronType {
    Demonstrative,
    Other,
}

/// Morphological features of a token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Morphology {
    pub number: Option<Number>,
    pub pron_type: Option<PronType>,
    pub possessive: bool,
}

impl Morphology {
    /// Parse a CoNLL-U FEATS column (`Number=Sing|PronType=Dem`, or `_`)
    pub fn parse(feats: &str) -> Self {
        let mut morph = Self::default();
        for feature in feats.split('|') {
            let Some((key, value)) = feature.split_once('=') else {
                continue;
            };
            match key {
                "Number" => {
                    morph.number = match value {
                        "Sing" => Some(Number::Singular),
                        "Plur" => Some(Number::Plural),
                        _ => None,
                    }
                }
                "PronType" => {
                    morph.pron_type = Some(match value {
                        "Dem" => PronType::Demonstrative,
                        _ => PronType::Other,
                    })
                }
                "Poss" => morph.possessive = value == "Yes",
                _ => {}
            }
        }
        morph
    }

    pub fn is_demonstrative(&self) -> bool {
        self.pron_type == Some(PronType::Demonstrative)
    }
}

/// A token produced by the external annotator. Never mutated by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Position within the sentence (0-based)
    pub index: usize,
    /// Surface form
    pub text: String,
    pub lemma: String,
    pub pos: Pos,
    pub morph: Morphology,
    /// Index of the syntactic head, `None` for the root
    pub head: Option<usize>,
    /// Dependency relation to the head
    pub dep: String,
}

/// A segmented, annotated sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    /// Sentence text as segmented by the annotator
    pub text: String,
    pub tokens: Vec<Token>,
}

impl AnnotatedSentence {
    /// Number of whitespace-delimited words in the sentence text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// The annotation of one input text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedDoc {
    pub sentences: Vec<AnnotatedSentence>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_morphology() {
        let morph = Morphology::parse("Number=Plur|Person=3|Poss=Yes|PronType=Prs");
        assert_eq!(morph.number, Some(Number::Plural));
        assert_eq!(morph.pron_type, Some(PronType::Other));
        assert!(morph.possessive);

        let morph = Morphology::parse("Number=Sing|PronType=Dem");
        assert!(morph.is_demonstrative());
        assert!(!morph.possessive);

        assert_eq!(Morphology::parse("_"), Morphology::default());
    }

    #[test]
    fn test_pos_from_upos() {
        assert_eq!(Pos::from_upos("NOUN"), Pos::Noun);
        assert_eq!(Pos::from_upos("AUX"), Pos::Aux);
        assert_eq!(Pos::from_upos("???"), Pos::X);
    }
}

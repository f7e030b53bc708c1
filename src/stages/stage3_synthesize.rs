use std::collections::HashSet;

use anyhow::Result;
use rand::Rng;
use tracing::{info, warn};

use crate::models::{AnnotatedSentence, Pos, SentencePair, Token};
use crate::nlp::Annotator;
use crate::rules::{DeterminerTable, EnglishInflector, Inflector};

use super::{SelectionResult, SelectorConfig, select_sentences};

/// Configuration for aphasic synthesis
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Keep probability for determiners, adpositions, particles and `prep` dependents
    pub function_word_keep: f64,
    /// Keep probability for adjectives and adverbs
    pub modifier_keep: f64,
    /// Keep probability for auxiliaries and verbs
    pub verb_keep: f64,
    /// Probability of flipping a noun's number
    pub noun_flip: f64,
    /// Probability of substituting a demonstrative or possessive pronoun
    pub pronoun_substitute: f64,
    /// Lower bound of synthetic/original length
    pub min_length_ratio: f64,
    /// Upper bound of synthetic/original length
    pub max_length_ratio: f64,
    /// Accepted synthetic sentences shorter than this are dropped in post-processing
    pub min_synthetic_words: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            function_word_keep: 0.30,
            modifier_keep: 0.50,
            verb_keep: 0.50,
            noun_flip: 0.30,
            pronoun_substitute: 0.40,
            min_length_ratio: 0.25,
            max_length_ratio: 0.75,
            min_synthetic_words: 3,
        }
    }
}

/// Produces agrammatic counterparts of well-formed sentences
#[derive(Debug, Clone, Default)]
pub struct AphasicSynthesizer<I = EnglishInflector> {
    config: SynthesisConfig,
    determiners: DeterminerTable,
    inflector: I,
}

impl AphasicSynthesizer<EnglishInflector> {
    pub fn new(config: SynthesisConfig) -> Self {
        Self::with_parts(config, DeterminerTable::default(), EnglishInflector)
    }
}

impl<I: Inflector> AphasicSynthesizer<I> {
    pub fn with_parts(config: SynthesisConfig, determiners: DeterminerTable, inflector: I) -> Self {
        Self {
            config,
            determiners,
            inflector,
        }
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Surface form of a token in the synthetic sentence, or `None` to drop it
    fn transform<R: Rng + ?Sized>(&self, token: &Token, rng: &mut R) -> Option<String> {
        let c = &self.config;
        match token.pos {
            Pos::Det | Pos::Adp | Pos::Part => keep(token, c.function_word_keep, rng),
            _ if token.dep == "prep" => keep(token, c.function_word_keep, rng),
            Pos::Adj | Pos::Adv => keep(token, c.modifier_keep, rng),
            Pos::Aux | Pos::Verb => keep(token, c.verb_keep, rng),
            Pos::Noun => {
                if rng.gen_range(0.0..1.0) < c.noun_flip {
                    Some(
                        self.inflector
                            .flip_number(token)
                            .unwrap_or_else(|| token.text.clone()),
                    )
                } else {
                    Some(token.text.clone())
                }
            }
            Pos::Pron => {
                let substitutable = token.morph.is_demonstrative() || token.morph.possessive;
                if rng.gen_range(0.0..1.0) < c.pronoun_substitute && substitutable {
                    let sub = self.determiners.det_sub(&token.text, rng);
                    (!sub.is_empty()).then_some(sub)
                } else {
                    Some(token.text.clone())
                }
            }
            _ => Some(token.text.clone()),
        }
    }

    /// Corrupt one sentence.
    ///
    /// `original_len` is the word count of the normalized source. Returns `None` when
    /// the synthetic sentence falls outside the accepted length ratio.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        sentence: &AnnotatedSentence,
        original_len: usize,
        rng: &mut R,
    ) -> Option<String> {
        let mut synthetic = String::new();

        for token in &sentence.tokens {
            let Some(form) = self.transform(token, rng) else {
                continue;
            };
            if token.pos != Pos::Punct {
                synthetic.push(' ');
            }
            synthetic.push_str(&form);
        }

        let synthetic = synthetic.strip_prefix(' ').unwrap_or(&synthetic).to_string();
        let syn_len = synthetic.split_whitespace().count() as f64;
        let org_len = original_len as f64;

        if self.config.min_length_ratio * org_len <= syn_len
            && syn_len <= self.config.max_length_ratio * org_len
        {
            Some(synthetic)
        } else {
            None
        }
    }
}

fn keep<R: Rng + ?Sized>(token: &Token, probability: f64, rng: &mut R) -> Option<String> {
    (rng.gen_range(0.0..1.0) < probability).then(|| token.text.clone())
}

/// Uppercase the first character and lowercase the rest
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Final clean-up of accepted pairs.
///
/// Drops synthetic sentences shorter than `min_words`, capitalizes both sides and
/// ends the source with exactly one full stop.
pub fn postprocess_pairs(pairs: Vec<SentencePair>, min_words: usize) -> Vec<SentencePair> {
    pairs
        .into_iter()
        .filter(|p| p.synthetic.split_whitespace().count() >= min_words)
        .map(|p| {
            let source = capitalize(&p.preprocessed_text);
            let source = format!("{}.", source.trim_end_matches([' ', '.']));
            SentencePair::new(source, capitalize(&p.synthetic))
        })
        .collect()
}

/// Result of the synthesis stage
#[derive(Debug, Default)]
pub struct SynthesisResult {
    /// Final sentence pairs
    pub pairs: Vec<SentencePair>,
    /// Selection statistics across all inputs
    pub selection: SelectionResult,
    /// Inputs the annotator failed on
    pub annotation_failures: usize,
    /// Selected sentences dropped as duplicates
    pub duplicates: usize,
    /// Synthetic sentences rejected by the length ratio
    pub length_rejections: usize,
    /// Accepted synthetic sentences dropped as too short
    pub too_short: usize,
}

/// Execute Stage 3: annotate, select and corrupt a corpus of normalized texts
///
/// 1. Annotate every input and select candidate sentences
/// 2. Drop duplicate selected sentences, keeping the first
/// 3. Synthesize a corrupted counterpart per selected sentence, measured against and
///    paired with the whole input text it came from
/// 4. Post-process the accepted pairs
pub async fn execute_synthesis<A, I, R>(
    annotator: &A,
    texts: &[String],
    selector: &SelectorConfig,
    synthesizer: &AphasicSynthesizer<I>,
    rng: &mut R,
) -> Result<SynthesisResult>
where
    A: Annotator,
    I: Inflector,
    R: Rng + ?Sized,
{
    let mut result = SynthesisResult::default();
    // Input index of each selected sentence
    let mut sources = Vec::new();

    for (i, text) in texts.iter().enumerate() {
        if text.trim().is_empty() {
            continue;
        }
        match annotator.annotate(text).await {
            Ok(doc) => {
                let selection = select_sentences(&doc, selector, rng);
                sources.extend(std::iter::repeat_n(i, selection.selected.len()));
                result.selection.merge(selection);
            }
            Err(e) => {
                warn!("Annotation failed for input {}: {:#}", i, e);
                result.annotation_failures += 1;
            }
        }
    }

    info!(
        "Selected {} sentences ({} rejected, {} annotation failures)",
        result.selection.selected.len(),
        result.selection.rejected(),
        result.annotation_failures
    );

    let mut seen = HashSet::new();
    let mut accepted = Vec::new();
    for (sentence, &source) in result.selection.selected.iter().zip(&sources) {
        if !seen.insert(sentence.text.as_str()) {
            result.duplicates += 1;
            continue;
        }
        let text = &texts[source];
        match synthesizer.synthesize(sentence, text.split_whitespace().count(), rng) {
            Some(synthetic) => accepted.push(SentencePair::new(text.as_str(), synthetic)),
            None => result.length_rejections += 1,
        }
    }

    let accepted_count = accepted.len();
    result.pairs = postprocess_pairs(accepted, synthesizer.config().min_synthetic_words);
    result.too_short = accepted_count - result.pairs.len();

    info!(
        "Synthesized {} pairs ({} outside length ratio, {} too short, {} duplicates)",
        result.pairs.len(),
        result.length_rejections,
        result.too_short,
        result.duplicates
    );

    Ok(result)
}

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{AnnotatedSentence, Pos, Token};

/// Optional verb, any adverbs, any auxiliaries, one or more verbs. Each token is
/// encoded as one letter: V verb, D adverb, A auxiliary, O anything else.
static VERB_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^V?D*A*V+$").expect("valid verb phrase pattern"));

/// Dependency relations that head a noun phrase
const NP_DEPS: &[&str] = &[
    "nsubj", "obj", "iobj", "obl", "nmod", "appos", "attr", "root", "expl", "dobj", "pobj",
    "dative", "oprd", "pcomp",
];

fn base_dep(dep: &str) -> &str {
    dep.split(':').next().unwrap_or(dep)
}

fn is_np_dep(dep: &str) -> bool {
    let dep = dep.to_lowercase();
    dep != "nmod:poss" && NP_DEPS.contains(&base_dep(&dep))
}

/// Leftmost token index in the subtree rooted at `index`
fn left_edge(tokens: &[Token], index: usize) -> usize {
    (0..=index)
        .find(|&candidate| is_descendant(tokens, candidate, index))
        .unwrap_or(index)
}

fn is_descendant(tokens: &[Token], mut node: usize, ancestor: usize) -> bool {
    // Bounded walk so a malformed head column cannot loop forever
    for _ in 0..=tokens.len() {
        if node == ancestor {
            return true;
        }
        match tokens.get(node).and_then(|t| t.head) {
            Some(head) => node = head,
            None => return false,
        }
    }
    false
}

/// Base noun-phrase spans, heads from left to right.
///
/// A nominal token (noun, proper noun, pronoun) heads a chunk when its relation is a
/// core nominal relation, or when it is conjoined to such a head. Chunks overlapping
/// the previous chunk are skipped.
pub fn noun_chunks(sentence: &AnnotatedSentence) -> Vec<Range<usize>> {
    let tokens = &sentence.tokens;
    let mut chunks = Vec::new();
    let mut prev_end: Option<usize> = None;

    for (i, token) in tokens.iter().enumerate() {
        if !matches!(token.pos, Pos::Noun | Pos::Propn | Pos::Pron) {
            continue;
        }
        let start = left_edge(tokens, i);
        if prev_end.is_some_and(|end| start <= end) {
            continue;
        }

        let heads_chunk = if is_np_dep(&token.dep) {
            true
        } else if base_dep(&token.dep) == "conj" {
            conjunct_head(tokens, i).is_some_and(|head| is_np_dep(&tokens[head].dep))
        } else {
            false
        };

        if heads_chunk {
            chunks.push(start..i + 1);
            prev_end = Some(i);
        }
    }

    chunks
}

/// Follow a chain of `conj` relations up to the first conjunct
fn conjunct_head(tokens: &[Token], index: usize) -> Option<usize> {
    let mut head = tokens[index].head?;
    for _ in 0..tokens.len() {
        if base_dep(&tokens[head].dep) != "conj" {
            return Some(head);
        }
        head = tokens[head].head?;
    }
    None
}

fn pos_code(pos: Pos) -> char {
    match pos {
        Pos::Verb => 'V',
        Pos::Adv => 'D',
        Pos::Aux => 'A',
        _ => 'O',
    }
}

/// Every token span matching the verb-phrase pattern, overlapping matches included
pub fn verb_phrase_matches(sentence: &AnnotatedSentence) -> Vec<Range<usize>> {
    let codes: String = sentence.tokens.iter().map(|t| pos_code(t.pos)).collect();
    let mut matches = Vec::new();

    for start in 0..codes.len() {
        for end in start + 1..=codes.len() {
            if VERB_PHRASE.is_match(&codes[start..end]) {
                matches.push(start..end);
            }
        }
    }

    matches
}

/// Keep the longest non-overlapping spans; ties go to the earlier span
pub fn filter_spans(spans: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut sorted: Vec<Range<usize>> = spans.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then(a.start.cmp(&b.start)));

    let mut kept: Vec<Range<usize>> = Vec::new();
    for span in sorted {
        if kept.iter().all(|k| span.end <= k.start || span.start >= k.end) {
            kept.push(span);
        }
    }

    kept.sort_by_key(|span| span.start);
    kept
}

/// Verb phrases after longest-span filtering
pub fn verb_phrases(sentence: &AnnotatedSentence) -> Vec<Range<usize>> {
    filter_spans(&verb_phrase_matches(sentence))
}

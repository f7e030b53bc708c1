/// Collapse runs of identical consecutive words.
///
/// `"I I I I wanted to go"` becomes `"I wanted to go"`. Each word is compared with the
/// word preceding it in the input, so a run of any length collapses to one word.
pub fn remove_single_repetitions(text: &str) -> String {
    let words: Vec<&str> = text.split(' ').collect();

    let mut kept = Vec::with_capacity(words.len());
    kept.push(words[0]);
    for pair in words.windows(2) {
        if pair[0] != pair[1] {
            kept.push(pair[1]);
        }
    }

    kept.join(" ")
}

/// Collapse consecutive repeated bigrams.
///
/// `"I went I went to the to the doctor"` becomes `"I went to the doctor"`. The text is
/// read as non-overlapping word pairs, identical consecutive pairs are merged, and the
/// final word is re-appended when the pairing dropped it. Returns `None` when the text
/// has fewer than two words and therefore no bigrams.
pub fn remove_bigram_repetitions(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 2 {
        return None;
    }

    let mut pairs: Vec<(&str, &str)> = Vec::new();
    for chunk in words.chunks_exact(2) {
        let pair = (chunk[0], chunk[1]);
        if pairs.last() != Some(&pair) {
            pairs.push(pair);
        }
    }

    let mut output: Vec<&str> = pairs.iter().flat_map(|&(a, b)| [a, b]).collect();

    // Odd-length input or a collapsed tail leaves the final word behind
    let last_word = words[words.len() - 1];
    if output.last() != Some(&last_word) {
        output.push(last_word);
    }

    Some(output.join(" "))
}

/// Remove single-word and then bigram repetitions.
///
/// Best effort: text too short to hold a bigram after the single-word pass is returned
/// exactly as given.
pub fn remove_all_repetitions(text: &str) -> String {
    let single = remove_single_repetitions(text);
    match remove_bigram_repetitions(&single) {
        Some(output) => output,
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_repetitions() {
        assert_eq!(remove_single_repetitions("I I I I wanted to go"), "I wanted to go");
        assert_eq!(remove_single_repetitions("go go home home"), "go home");
        assert_eq!(remove_single_repetitions(""), "");
    }

    #[test]
    fn test_single_repetitions_keeps_non_adjacent_words() {
        assert_eq!(remove_single_repetitions("the boy and the girl"), "the boy and the girl");
    }

    #[test]
    fn test_bigram_repetitions() {
        assert_eq!(
            remove_bigram_repetitions("I went I went to the to the doctor").as_deref(),
            Some("I went to the doctor")
        );
        assert_eq!(remove_bigram_repetitions("a b c d").as_deref(), Some("a b c d"));
        assert_eq!(remove_bigram_repetitions("a b c").as_deref(), Some("a b c"));
    }

    #[test]
    fn test_bigram_repetitions_short_input() {
        assert_eq!(remove_bigram_repetitions("hello"), None);
        assert_eq!(remove_bigram_repetitions(""), None);
    }

    #[test]
    fn test_all_repetitions() {
        assert_eq!(
            remove_all_repetitions("I I I went I went to the to the doctor"),
            "I went to the doctor"
        );
    }

    #[test]
    fn test_all_repetitions_returns_input_when_too_short() {
        assert_eq!(remove_all_repetitions("yes yes"), "yes yes");
        assert_eq!(remove_all_repetitions(""), "");
    }

    #[test]
    fn test_all_repetitions_idempotent() {
        let inputs = [
            "I I I went I went to the to the doctor",
            "b a b a b",
            "a b a b a b c",
            "the the cat sat on on the mat mat",
            "yes yes",
            "one",
            "",
            "we we went went went to to the shop and and and then we went home",
        ];

        for input in inputs {
            let once = remove_all_repetitions(input);
            let twice = remove_all_repetitions(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }
}

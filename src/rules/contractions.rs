/// Known contractions and colloquial reductions, keyed by lowercase form
const CONTRACTIONS: &[(&str, &str)] = &[
    ("'cause", "because"),
    ("'em", "them"),
    ("ain't", "are not"),
    ("aren't", "are not"),
    ("can't", "cannot"),
    ("can't've", "cannot have"),
    ("could've", "could have"),
    ("couldn't", "could not"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("dunno", "do not know"),
    ("gimme", "give me"),
    ("gonna", "going to"),
    ("gotta", "got to"),
    ("hadn't", "had not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("he'd", "he would"),
    ("he'll", "he will"),
    ("he's", "he is"),
    ("here's", "here is"),
    ("how'd", "how did"),
    ("how'll", "how will"),
    ("how's", "how is"),
    ("i'd", "I would"),
    ("i'll", "I will"),
    ("i'm", "I am"),
    ("i've", "I have"),
    ("isn't", "is not"),
    ("it'd", "it would"),
    ("it'll", "it will"),
    ("it's", "it is"),
    ("kinda", "kind of"),
    ("lemme", "let me"),
    ("let's", "let us"),
    ("ma'am", "madam"),
    ("might've", "might have"),
    ("mightn't", "might not"),
    ("must've", "must have"),
    ("mustn't", "must not"),
    ("needn't", "need not"),
    ("shan't", "shall not"),
    ("she'd", "she would"),
    ("she'll", "she will"),
    ("she's", "she is"),
    ("should've", "should have"),
    ("shouldn't", "should not"),
    ("sorta", "sort of"),
    ("that'd", "that would"),
    ("that's", "that is"),
    ("there'd", "there would"),
    ("there's", "there is"),
    ("they'd", "they would"),
    ("they'll", "they will"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("wanna", "want to"),
    ("wasn't", "was not"),
    ("we'd", "we would"),
    ("we'll", "we will"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("weren't", "were not"),
    ("what'll", "what will"),
    ("what're", "what are"),
    ("what's", "what is"),
    ("what've", "what have"),
    ("when's", "when is"),
    ("where'd", "where did"),
    ("where's", "where is"),
    ("who'll", "who will"),
    ("who's", "who is"),
    ("who've", "who have"),
    ("why's", "why is"),
    ("won't", "will not"),
    ("would've", "would have"),
    ("wouldn't", "would not"),
    ("y'all", "you all"),
    ("you'd", "you would"),
    ("you'll", "you will"),
    ("you're", "you are"),
    ("you've", "you have"),
];

/// Suffix rules for contractions missing from the table. `'s` is left alone since it
/// is usually possessive.
const SUFFIXES: &[(&str, &str)] = &[
    ("n't", " not"),
    ("'re", " are"),
    ("'ve", " have"),
    ("'ll", " will"),
    ("'m", " am"),
    ("'d", " would"),
];

/// Expand every whitespace-delimited word of `text` and rejoin with single spaces
pub fn expand_contractions(text: &str) -> String {
    text.split_whitespace()
        .map(expand_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Expand a single word, keeping surrounding punctuation and the word's casing
pub fn expand_word(word: &str) -> String {
    let is_word_char = |c: char| c.is_alphanumeric() || c == '\'' || c == '\u{2019}';
    let Some(start) = word.find(is_word_char) else {
        return word.to_string();
    };
    let end = word
        .char_indices()
        .rev()
        .find(|&(_, c)| is_word_char(c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(word.len());

    let core = &word[start..end];
    let lower = core.to_lowercase().replace('\u{2019}', "'");

    let expanded = match CONTRACTIONS.iter().find(|(short, _)| *short == lower) {
        Some((_, long)) => (*long).to_string(),
        None => match SUFFIXES.iter().find(|(suffix, _)| lower.ends_with(suffix)) {
            Some((suffix, long)) if lower.len() > suffix.len() => {
                format!("{}{}", &lower[..lower.len() - suffix.len()], long)
            }
            _ => return word.to_string(),
        },
    };

    format!("{}{}{}", &word[..start], match_case(core, &expanded), &word[end..])
}

/// Apply the casing of `original` to `expansion`
fn match_case(original: &str, expansion: &str) -> String {
    let letters: Vec<char> = original.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        return expansion.to_uppercase();
    }
    if letters.first().is_some_and(|c| c.is_uppercase()) {
        let mut chars = expansion.chars();
        if let Some(first) = chars.next() {
            return first.to_uppercase().chain(chars).collect();
        }
    }
    expansion.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_known_contractions() {
        assert_eq!(expand_word("he's"), "he is");
        assert_eq!(expand_word("can't"), "cannot");
        assert_eq!(expand_word("i'm"), "I am");
        assert_eq!(expand_word("gonna"), "going to");
    }

    #[test]
    fn test_expand_keeps_case_and_punctuation() {
        assert_eq!(expand_word("He's"), "He is");
        assert_eq!(expand_word("DON'T"), "DO NOT");
        assert_eq!(expand_word("(don't)."), "(do not).");
        assert_eq!(expand_word("it\u{2019}s"), "it is");
    }

    #[test]
    fn test_expand_suffix_fallback() {
        assert_eq!(expand_word("mary'll"), "mary will");
        assert_eq!(expand_word("Bob's"), "Bob's");
    }

    #[test]
    fn test_expand_leaves_plain_words() {
        assert_eq!(expand_word("cinderella"), "cinderella");
        assert_eq!(expand_word("&-um"), "&-um");
        assert_eq!(expand_word("..."), "...");
    }

    #[test]
    fn test_expand_contractions_collapses_whitespace() {
        assert_eq!(
            expand_contractions("  she's   going and they're  not "),
            "she is going and they are not"
        );
    }
}

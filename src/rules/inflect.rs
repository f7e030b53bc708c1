use crate::models::{Number, Token};

/// Flips English nouns between singular and plural
pub trait Inflector {
    fn singularize(&self, word: &str) -> String;
    fn pluralize(&self, word: &str) -> String;

    /// Inflect a noun token to the opposite of its annotated number.
    ///
    /// Plural nouns use the annotated lemma when it differs from the surface form.
    /// Returns `None` when the morphology does not expose number.
    fn flip_number(&self, token: &Token) -> Option<String> {
        match token.morph.number? {
            Number::Plural => {
                let lemma = token.lemma.as_str();
                if !lemma.is_empty() && lemma != "_" && !lemma.eq_ignore_ascii_case(&token.text) {
                    Some(lemma.to_string())
                } else {
                    Some(self.singularize(&token.text))
                }
            }
            Number::Singular => Some(self.pluralize(&token.text)),
        }
    }
}

const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

const UNINFLECTED: &[&str] = &[
    "deer", "fish", "news", "series", "sheep", "species", "police", "information", "rice",
];

const F_TO_VES: &[(&str, &str)] = &[
    ("calf", "calves"),
    ("half", "halves"),
    ("knife", "knives"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("loaf", "loaves"),
    ("scarf", "scarves"),
    ("shelf", "shelves"),
    ("thief", "thieves"),
    ("wife", "wives"),
    ("wolf", "wolves"),
];

const O_TO_OES: &[&str] = &["echo", "hero", "potato", "tomato", "volcano"];

/// Rule-based English inflector with a small irregular table
#[derive(Debug, Clone, Default)]
pub struct EnglishInflector;

impl EnglishInflector {
    fn inflect(word: &str, to_plural: bool) -> String {
        let lower = word.to_lowercase();
        if lower.is_empty() || UNINFLECTED.contains(&lower.as_str()) {
            return word.to_string();
        }

        let lookup = |table: &[(&str, &str)]| {
            table.iter().find_map(|&(sing, plur)| {
                if to_plural && lower == sing {
                    Some(plur.to_string())
                } else if !to_plural && lower == plur {
                    Some(sing.to_string())
                } else {
                    None
                }
            })
        };

        let inflected = lookup(IRREGULAR)
            .or_else(|| lookup(F_TO_VES))
            .unwrap_or_else(|| {
                if to_plural {
                    pluralize_regular(&lower)
                } else {
                    singularize_regular(&lower)
                }
            });

        restore_case(word, &inflected)
    }
}

impl Inflector for EnglishInflector {
    fn singularize(&self, word: &str) -> String {
        Self::inflect(word, false)
    }

    fn pluralize(&self, word: &str) -> String {
        Self::inflect(word, true)
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn pluralize_regular(word: &str) -> String {
    if ["s", "x", "z", "ch", "sh"].iter().any(|s| word.ends_with(s))
        || O_TO_OES.contains(&word)
    {
        return format!("{}es", word);
    }
    if let Some(stem) = word.strip_suffix('y') {
        if stem.chars().last().is_some_and(|c| !is_vowel(c)) {
            return format!("{}ies", stem);
        }
    }
    format!("{}s", word)
}

fn singularize_regular(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }
    if let Some(stem) = word.strip_suffix("oes") {
        let singular = format!("{}o", stem);
        if O_TO_OES.contains(&singular.as_str()) {
            return singular;
        }
    }
    if let Some(stem) = word.strip_suffix("es") {
        if ["s", "x", "z", "ch", "sh"].iter().any(|s| stem.ends_with(s)) {
            return stem.to_string();
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    word.strip_suffix('s').unwrap_or(word).to_string()
}

fn restore_case(original: &str, inflected: &str) -> String {
    if original.chars().next().is_some_and(|c| c.is_uppercase()) {
        let mut chars = inflected.chars();
        if let Some(first) = chars.next() {
            return first.to_uppercase().chain(chars).collect();
        }
    }
    inflected.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Morphology, Pos};

    fn noun(text: &str, feats: &str) -> Token {
        Token {
            index: 0,
            text: text.to_string(),
            lemma: text.to_string(),
            pos: Pos::Noun,
            morph: Morphology::parse(feats),
            head: None,
            dep: "root".to_string(),
        }
    }

    #[test]
    fn test_pluralize() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.pluralize("dog"), "dogs");
        assert_eq!(inflector.pluralize("box"), "boxes");
        assert_eq!(inflector.pluralize("church"), "churches");
        assert_eq!(inflector.pluralize("baby"), "babies");
        assert_eq!(inflector.pluralize("boy"), "boys");
        assert_eq!(inflector.pluralize("knife"), "knives");
        assert_eq!(inflector.pluralize("child"), "children");
        assert_eq!(inflector.pluralize("sheep"), "sheep");
        assert_eq!(inflector.pluralize("Prince"), "Princes");
    }

    #[test]
    fn test_singularize() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.singularize("dogs"), "dog");
        assert_eq!(inflector.singularize("boxes"), "box");
        assert_eq!(inflector.singularize("babies"), "baby");
        assert_eq!(inflector.singularize("leaves"), "leaf");
        assert_eq!(inflector.singularize("women"), "woman");
        assert_eq!(inflector.singularize("potatoes"), "potato");
        assert_eq!(inflector.singularize("glass"), "glass");
        assert_eq!(inflector.singularize("shoes"), "shoe");
    }

    #[test]
    fn test_flip_number() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.flip_number(&noun("slippers", "Number=Plur")).as_deref(), Some("slipper"));
        assert_eq!(inflector.flip_number(&noun("ball", "Number=Sing")).as_deref(), Some("balls"));
        assert_eq!(inflector.flip_number(&noun("ball", "_")), None);

        let mut mice = noun("mice", "Number=Plur");
        mice.lemma = "mouse".to_string();
        assert_eq!(inflector.flip_number(&mice).as_deref(), Some("mouse"));
    }
}

pub mod contractions;
pub mod determiners;
pub mod inflect;
pub mod phrases;
pub mod repetitions;

pub use contractions::*;
pub use determiners::*;
pub use inflect::*;
pub use phrases::*;
pub use repetitions::*;

/// Literal tables used by the normalization rule chain
#[derive(Debug, Clone)]
pub struct RuleTables {
    /// Unfilled pause markers, including the trailing-off marker `+...`
    pub unfilled_pauses: Vec<String>,
    /// Filled pause markers
    pub filler_pauses: Vec<String>,
    /// Residual annotation glyphs removed after the pattern rules, in order
    pub special_characters: Vec<String>,
    /// Leading characters stripped from the cleaned text, checked in order
    pub leading_strip: Vec<char>,
    /// Placeholders that pause masking turns into the mask token
    pub pause_placeholders: Vec<String>,
    /// Token standing in for a masked pause
    pub mask_token: String,
}

impl Default for RuleTables {
    fn default() -> Self {
        Self {
            unfilled_pauses: to_strings(&["(..)", "(...)", "+..."]),
            filler_pauses: to_strings(&[
                "&-um", "&-uh", "&-er", "&-mm", "&-eh", "&-like", "&-youknow", "&-hm",
                "&-sighs",
            ]),
            special_characters: to_strings(&[
                "(.)", "[/]", "[//]", "‡", "xxx", "+< ", "„", "+", "\"\" /..\"\"", "+\"/.",
                "+\"", "+/?", "+//.", "+//?", "[]", "<>", "_", "-", "^", ")", "(", ":",
                "www .", "*PAR", "+/", "@o", "<", ">", "//..", "//", "/..", "/", "\"", "ʌ",
                "..?", "0.", "0 .", "\"\" /.", "⌈", "⌉", "&{l=@", "&}l=@", "⌊", "⌋", "Ϋ",
                "=@",
            ]),
            leading_strip: vec![' ', ',', '!', '.', '?', '.'],
            pause_placeholders: to_strings(&["UNFILLEDPAUSE", "FILLERPAUSE"]),
            mask_token: "<mask>".to_string(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

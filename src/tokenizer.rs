//! # Tokenizer
//! Sentence segmentation and word normalization shared by the scorer and the
//! profile registry (lexicon keys go through the same `normalize`).

use once_cell::sync::Lazy;
use regex::Regex;

/// One boundary per run of terminators: ASCII `.`, `!`, `?` and the Devanagari danda `।`.
static TERMINATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?।]+").expect("sentence terminator regex"));

/// Split raw text into sentences. Whitespace-only fragments are dropped.
pub fn segment(text: &str) -> Vec<&str> {
    TERMINATORS
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split a sentence on whitespace and normalize each piece; empty tokens are dropped.
pub fn tokenize(sentence: &str) -> Vec<String> {
    sentence
        .split_whitespace()
        .map(normalize)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Strip everything outside the Unicode Letter and Number categories, then
/// lowercase. Combining marks (Mn/Mc: vowel signs, virama, anusvara) are not
/// letters and are removed too.
pub fn normalize(word: &str) -> String {
    static NON_WORD: once_cell::sync::OnceCell<Regex> = once_cell::sync::OnceCell::new();
    let re = NON_WORD.get_or_init(|| Regex::new(r"[^\p{L}\p{N}]+").expect("non-word regex"));
    re.replace_all(word, "").to_lowercase()
}

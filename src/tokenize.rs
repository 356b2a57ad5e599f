//! Sentence tokenizer producing index lookup keys.
//!
//! Deliberately naive: punctuation runs become spaces, a small fixed list of
//! English function words is removed case-sensitively, and the remaining
//! fields are lowercased. Stopword matches consume their surrounding spaces,
//! so in a run of adjacent stopwords every other one survives.

use std::sync::LazyLock;

use regex::Regex;

/// Function words dropped from sentences before lookup. Matched case-sensitively.
pub const STOPWORDS: &[&str] = &[
    "I", "a", "an", "as", "at", "by", "he", "she", "his", "hers", "it", "its", "me", "or", "thou",
    "us", "who",
];

// `_` is a word character: collocations such as `hot_dog` stay one token.
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_]+").unwrap());

static STOPWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\s+(?:{})\s", STOPWORDS.join("|"))).unwrap()
});

/// Split `sentence` into lowercase lookup keys, in sentence order.
///
/// Repeated words are kept. Input with no word characters yields an empty list.
pub fn tokenize(sentence: &str) -> Vec<String> {
    let words_only = NON_WORD.replace_all(sentence, " ");
    let padded = format!(" {words_only} ");
    let without_stopwords = STOPWORD.replace_all(&padded, " ");
    without_stopwords
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

use std::collections::HashSet;
use std::sync::LazyLock;

/// English stop words loaded from data/stop_words_en.txt (one word per line).
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    include_str!("../../data/stop_words_en.txt")
        .lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .collect()
});

/// `word` must already be lowercased.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

//! English word lookup used by the dictionary based query segmentation.

use std::collections::HashSet;

/// The single capability the segmentation heuristic needs. A trait so that
/// tests can supply tiny fixed word lists instead of the embedded one.
pub trait WordDict {
    /// Lookups are case sensitive and expect lowercase input.
    fn is_word(&self, s: &str) -> bool;
}

static WORD_LIST: &str = include_str!("english_words.txt");

/// An embedded word list geared towards vocabulary that actually shows up in
/// mod names. Intentionally contains no single letter words, which would make
/// greedy prefix matching chop unrecognized tokens into confetti.
#[derive(Debug)]
pub struct EnglishDictionary {
    words: HashSet<&'static str>,
}

impl Default for EnglishDictionary {
    fn default() -> Self {
        Self {
            words: WORD_LIST.lines().filter(|l| !l.is_empty()).collect(),
        }
    }
}

impl WordDict for EnglishDictionary {
    fn is_word(&self, s: &str) -> bool {
        self.words.contains(s)
    }
}

#[cfg(test)]
mod tests {
    use super::{EnglishDictionary, WordDict};

    #[test]
    fn embedded_list_knows_common_mod_name_vocabulary() {
        let dict = EnglishDictionary::default();

        for word in ["apple", "skin", "fake", "player", "journey", "map"] {
            assert!(dict.is_word(word), "expected \"{word}\" to be a known word");
        }
    }

    #[test]
    fn embedded_list_rejects_non_words_and_uppercase() {
        let dict = EnglishDictionary::default();

        assert!(!dict.is_word("qzxv"));
        assert!(!dict.is_word("Apple"));
        assert!(!dict.is_word(""));
    }
}

//! Per-language n-gram frequency profile.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ngram::{self, N_GRAM};

const MINIMUM_FREQ: u64 = 2;
const LESS_FREQ_RATIO: u64 = 100_000;

/// N-gram counts for one language, as stored in a profile directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangProfile {
    pub name: String,
    pub freq: BTreeMap<String, u64>,
    /// Total number of 1-, 2- and 3-grams counted.
    pub n_words: [u64; N_GRAM],
}

impl LangProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add(&mut self, gram: &str) {
        let len = gram.chars().count();
        if len == 0 || len > N_GRAM {
            return;
        }
        self.n_words[len - 1] += 1;
        *self.freq.entry(gram.to_string()).or_insert(0) += 1;
    }

    pub fn add_text(&mut self, text: &str) {
        for gram in ngram::extract(text) {
            self.add(&gram);
        }
    }

    /// Drop rare n-grams, and Latin-script n-grams when the language is
    /// mostly written in another script.
    pub fn omit_less_freq(&mut self) {
        let threshold = (self.n_words[0] / LESS_FREQ_RATIO).max(MINIMUM_FREQ);

        let n_words = &mut self.n_words;
        let mut roman = 0;
        self.freq.retain(|gram, count| {
            if *count <= threshold {
                n_words[gram.chars().count() - 1] -= *count;
                false
            } else {
                if is_single_latin_letter(gram) {
                    roman += *count;
                }
                true
            }
        });

        if roman < n_words[0] / 3 {
            self.freq.retain(|gram, count| {
                if gram.chars().any(|c| c.is_ascii_alphabetic()) {
                    n_words[gram.chars().count() - 1] -= *count;
                    false
                } else {
                    true
                }
            });
        }
    }
}

fn is_single_latin_letter(gram: &str) -> bool {
    let mut chars = gram.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_counts_by_gram_length() {
        let mut profile = LangProfile::new("en");
        profile.add("a");
        profile.add("ab");
        profile.add("ab");
        profile.add("abcd");
        profile.add("");
        assert_eq!(profile.n_words, [1, 2, 0]);
        assert_eq!(profile.freq.get("ab"), Some(&2));
        assert!(!profile.freq.contains_key("abcd"));
    }

    #[test]
    fn omit_less_freq_drops_rare_grams_and_keeps_totals_consistent() {
        let mut profile = LangProfile::new("en");
        for _ in 0..5 {
            profile.add("a");
        }
        profile.add("b");
        profile.add("b");
        profile.add("xy");
        profile.omit_less_freq();

        assert_eq!(profile.freq.len(), 1);
        assert_eq!(profile.freq.get("a"), Some(&5));
        assert_eq!(profile.n_words, [5, 0, 0]);
    }

    #[test]
    fn omit_less_freq_strips_latin_from_non_latin_profiles() {
        let mut profile = LangProfile::new("ru");
        for _ in 0..10 {
            profile.add("д");
            profile.add("д a");
        }
        for _ in 0..3 {
            profile.add("a");
        }
        profile.omit_less_freq();

        assert_eq!(profile.freq.keys().collect::<Vec<_>>(), ["д"]);
        assert_eq!(profile.n_words, [10, 0, 0]);
    }
}

use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::Stemmer;
use unicode_normalization::UnicodeNormalization;
use std::borrow::Cow;
use std::collections::HashSet;

use crate::config::TokenizerConfig;

lazy_static! {
    // ASCII punctuation/symbols and digits: !"#$%&'()*+,-./:;<=>?@[\]^_`{|}~0123456789
    static ref STRIP: Regex = Regex::new(r"[[:punct:][:digit:]]").expect("valid regex");
}

/// Turns raw text into index terms.
///
/// Built once from a [`TokenizerConfig`] and shared read-only; it carries no
/// mutable state, so one instance can normalize from many threads.
pub struct Tokenizer {
    stemmer: Stemmer,
    stopwords: HashSet<String>,
    unicode_nfkc: bool,
}

impl Tokenizer {
    pub fn new(config: &TokenizerConfig) -> Self {
        Self {
            stemmer: Stemmer::create(config.stemmer.algorithm()),
            stopwords: config.stopwords.iter().cloned().collect(),
            unicode_nfkc: config.unicode_nfkc,
        }
    }

    pub fn is_stopword(&self, token: &str) -> bool { self.stopwords.contains(token) }

    /// Lowercase, strip punctuation and digits, split on whitespace, drop stopwords, stem.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        self.analyze(text).into_iter().map(|(term, _)| term).collect()
    }

    /// Like [`normalize`](Self::normalize), paired with the 0-based position of each
    /// term's source token in the whitespace-split input.
    pub fn analyze(&self, text: &str) -> Vec<(String, u32)> {
        let text: Cow<'_, str> = if self.unicode_nfkc { Cow::Owned(text.nfkc().collect()) } else { Cow::Borrowed(text) };
        let lowered = text.to_lowercase();
        let mut terms = Vec::new();
        for (pos, raw) in lowered.split_whitespace().enumerate() {
            let token = STRIP.replace_all(raw, "");
            if token.is_empty() || self.is_stopword(&token) { continue; }
            let stem = self.stemmer.stem(&token).into_owned();
            terms.push((stem, pos as u32));
        }
        terms
    }
}

impl Default for Tokenizer {
    fn default() -> Self { Self::new(&TokenizerConfig::default()) }
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("stopwords", &self.stopwords.len())
            .field("unicode_nfkc", &self.unicode_nfkc)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_normalize() {
        let t = Tokenizer::default();
        let terms = t.normalize("Running, runner's run!");
        assert!(terms.iter().any(|w| w == "run"));
    }

    #[test]
    fn strips_digits_inside_tokens() {
        let t = Tokenizer::default();
        assert_eq!(t.normalize("COVID-19 #covid19"), vec!["covid", "covid"]);
    }

    #[test]
    fn positions_skip_dropped_tokens() {
        let t = Tokenizer::default();
        let analyzed = t.analyze("the risk 2022 of outbreak");
        assert_eq!(analyzed, vec![("risk".to_string(), 1), ("outbreak".to_string(), 4)]);
    }

    #[test]
    fn stopwords_are_matched_after_stripping() {
        // "don't" loses its apostrophe before the stopword check
        let t = Tokenizer::default();
        assert!(t.normalize("The, (a) of!").is_empty());
        assert_eq!(t.normalize("don't"), vec!["dont"]);
    }
}

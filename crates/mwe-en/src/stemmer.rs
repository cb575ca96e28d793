// Stemmer capability

use std::borrow::Cow;

use rust_stemmers::Algorithm;

/// Reduces a word to the lemma used for lexicalized features.
///
/// Stemming is case-sensitive; callers pass surface forms unchanged.
pub trait Stemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str>;
}

/// English Snowball (Porter2) stemmer.
pub struct SnowballStemmer {
    inner: rust_stemmers::Stemmer,
}

impl SnowballStemmer {
    pub fn english() -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::english()
    }
}

impl std::fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SnowballStemmer(English)")
    }
}

impl Stemmer for SnowballStemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        self.inner.stem(word)
    }
}

/// Returns every word unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl Stemmer for IdentityStemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowball_reduces_inflections() {
        let stemmer = SnowballStemmer::english();
        assert_eq!(stemmer.stem("looking"), "look");
        assert_eq!(stemmer.stem("looked"), "look");
        assert_eq!(stemmer.stem("looks"), "look");
    }

    #[test]
    fn identity_borrows() {
        assert!(matches!(IdentityStemmer.stem("running"), Cow::Borrowed("running")));
    }
}

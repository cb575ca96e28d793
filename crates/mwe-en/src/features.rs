// Candidate feature windows and sparse vectorization
//
// Each window position owns a contiguous block of `FEATURES_PER_TOKEN`
// indices: a one-hot over the tag alphabet (dimension 0 = UNK) followed by a
// one-hot over the orthographic classes (dimension 0 reserved). Lexicalized
// features live in a separate block after `FEATURES_PER_TOKEN * max_window`.

use hashbrown::{HashMap, HashSet};
use mwe_core::ortho::OrthographicClass;
use mwe_core::tags::{SENTENCE_TERMINATOR, TAG_ALPHABET};
use mwe_core::token::TaggedSentence;

use crate::sparse::SparseVector;
use crate::stemmer::Stemmer;

/// Tokens of padding on each side of a candidate span.
pub const WINDOW_PADDING: usize = 2;

/// Tag block width: the alphabet plus the UNK dimension.
pub const TAG_DIMS: usize = TAG_ALPHABET.len() + 1;

/// Orthographic block width: the eight classes plus a reserved dimension.
pub const ORTHO_DIMS: usize = OrthographicClass::ALL.len() + 1;

pub const FEATURES_PER_TOKEN: usize = TAG_DIMS + ORTHO_DIMS;

/// Default maximum number of window positions.
pub const DEFAULT_MAX_WINDOW: usize = 20;

// ---------------------------------------------------------------------------
// Windows
// ---------------------------------------------------------------------------

/// A candidate span extended by [`WINDOW_PADDING`] tokens on each side.
///
/// Positions outside the sentence hold the terminator tag and the `Punct`
/// class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureWindow {
    pub tags: Vec<String>,
    pub orthographics: Vec<OrthographicClass>,
    /// `(tag, token)` of each token inside the span itself.
    pub lexical: Vec<(String, String)>,
}

impl FeatureWindow {
    /// Build the window for `count` tokens starting at `start`.
    pub fn around(sentence: &TaggedSentence, start: usize, count: usize) -> Self {
        let indices: Vec<usize> = (start..start + count).collect();
        Self::build(sentence, start, &indices, start + count)
    }

    /// Build the window for the tokens at `indices` (ascending, possibly
    /// with gaps). Padding is taken around the first and last of them;
    /// skipped tokens in between are left out.
    pub fn over(sentence: &TaggedSentence, indices: &[usize]) -> Self {
        let first = indices.first().copied().unwrap_or(0);
        let end = indices.last().map_or(first, |&last| last + 1);
        Self::build(sentence, first, indices, end)
    }

    fn build(sentence: &TaggedSentence, first: usize, indices: &[usize], end: usize) -> Self {
        let before = (first as isize - WINDOW_PADDING as isize)..first as isize;
        let after = end as isize..(end + WINDOW_PADDING) as isize;
        let positions = before
            .chain(indices.iter().map(|&i| i as isize))
            .chain(after);

        let capacity = indices.len() + 2 * WINDOW_PADDING;
        let mut tags = Vec::with_capacity(capacity);
        let mut orthographics = Vec::with_capacity(capacity);
        for position in positions {
            let word = usize::try_from(position)
                .ok()
                .and_then(|p| sentence.word(p));
            match word {
                Some(token) => {
                    tags.push(token.tag.clone());
                    orthographics.push(OrthographicClass::of(&token.text));
                }
                None => {
                    tags.push(SENTENCE_TERMINATOR.to_string());
                    orthographics.push(OrthographicClass::Punct);
                }
            }
        }
        let lexical = indices
            .iter()
            .map(|&i| match sentence.word(i) {
                Some(token) => (token.tag.clone(), token.text.clone()),
                None => (SENTENCE_TERMINATOR.to_string(), SENTENCE_TERMINATOR.to_string()),
            })
            .collect();
        Self {
            tags,
            orthographics,
            lexical,
        }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Lexicon
// ---------------------------------------------------------------------------

/// Growable lemma-to-id table. Ids start at 1 and are never reused.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    ids: HashMap<String, u32>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `lemma`, assigning the next id on first sight.
    pub fn id_for(&mut self, lemma: &str) -> u32 {
        if let Some(&id) = self.ids.get(lemma) {
            return id;
        }
        let id = self.ids.len() as u32 + 1;
        self.ids.insert(lemma.to_string(), id);
        id
    }

    pub fn get(&self, lemma: &str) -> Option<u32> {
        self.ids.get(lemma).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Forget every lemma. Only call between independent sessions.
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

// ---------------------------------------------------------------------------
// Vectorizer
// ---------------------------------------------------------------------------

/// Builds sparse feature vectors from candidate windows.
pub struct FeatureVectorizer {
    tag_dims: HashMap<&'static str, u32>,
    content_tags: HashSet<String>,
    max_window: usize,
    stemmer: Box<dyn Stemmer>,
}

impl FeatureVectorizer {
    pub fn new(
        content_tags: impl IntoIterator<Item = impl Into<String>>,
        max_window: usize,
        stemmer: Box<dyn Stemmer>,
    ) -> Self {
        let tag_dims = TAG_ALPHABET
            .iter()
            .enumerate()
            .map(|(i, tag)| (*tag, i as u32 + 1))
            .collect();
        Self {
            tag_dims,
            content_tags: content_tags.into_iter().map(Into::into).collect(),
            max_window,
            stemmer,
        }
    }

    pub fn max_window(&self) -> usize {
        self.max_window
    }

    pub fn set_stemmer(&mut self, stemmer: Box<dyn Stemmer>) {
        self.stemmer = stemmer;
    }

    pub fn set_content_tags(&mut self, tags: impl IntoIterator<Item = impl Into<String>>) {
        self.content_tags = tags.into_iter().map(Into::into).collect();
    }

    pub fn set_max_window(&mut self, max_window: usize) {
        self.max_window = max_window;
    }

    /// First index of the lexicalized block.
    pub fn lexical_offset(&self) -> u32 {
        (FEATURES_PER_TOKEN * self.max_window) as u32
    }

    fn tag_dim(&self, tag: &str) -> u32 {
        match self.tag_dims.get(tag) {
            Some(&dim) => dim,
            None => {
                tracing::warn!(tag, "tag outside the alphabet; using UNK");
                0
            }
        }
    }

    /// Feature vector for `window`, registering new lemmas in `lexicon`.
    pub fn vectorize(&self, window: &FeatureWindow, lexicon: &mut Lexicon) -> SparseVector {
        if window.len() > self.max_window {
            tracing::warn!(
                positions = window.len(),
                max = self.max_window,
                "window exceeds maximum size; trailing positions dropped"
            );
        }
        let mut indices = Vec::with_capacity(2 * window.len() + window.lexical.len());
        for (position, (tag, ortho)) in window
            .tags
            .iter()
            .zip(&window.orthographics)
            .enumerate()
            .take(self.max_window)
        {
            let base = (position * FEATURES_PER_TOKEN + 1) as u32;
            indices.push(base + self.tag_dim(tag));
            indices.push(base + TAG_DIMS as u32 + 1 + ortho.bits() as u32);
        }

        let offset = self.lexical_offset();
        for (tag, token) in &window.lexical {
            if self.content_tags.contains(tag.as_str()) {
                let lemma = self.stemmer.stem(token);
                indices.push(offset + lexicon.id_for(&lemma));
            }
        }
        SparseVector::from_indices(indices)
    }
}

impl std::fmt::Debug for FeatureVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureVectorizer")
            .field("content_tags", &self.content_tags)
            .field("max_window", &self.max_window)
            .finish_non_exhaustive()
    }
}

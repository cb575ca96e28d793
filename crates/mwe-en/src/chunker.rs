// EnglishChunker: orchestrates both automata over a tagged sentence.
//
// Per call:
// 1. The nominal-compound machine runs over the whole sentence; every
//    emission of two or more tokens, and any embedded tail it carries, becomes
//    a noun-compound candidate.
// 2. The verbal automaton runs over the sentence; typed emissions are LVCs,
//    untyped ones VPCs. Personal pronouns are collected on the same pass.
// 3. Defeat vetoes drop LVC/VPC candidates before they reach the classifier.
// 4. Each remaining candidate gets a feature vector and goes through the gate.
//
// Automaton run state is created per call. The lemma lexicon is the only
// state that outlives a call.

use std::cell::{RefCell, RefMut};

use mwe_core::candidate::{Candidate, MweType, ResultSet};
use mwe_core::tags::is_pronoun;
use mwe_core::token::{TaggedSentence, TaggedToken};
use mwe_fsm::machine::StateMachine;
use mwe_fsm::run::Extract;
use mwe_fsm::PhraseAutomaton;
use mwe_fsm::table::TransitionTable;

use crate::defeat::{defeats_lvc, defeats_vpc};
use crate::error::ChunkerError;
use crate::features::{FeatureVectorizer, FeatureWindow, Lexicon};
use crate::gate::{CandidateGate, Classifier, ModelRegistry};
use crate::nominal::nominal_machine;
use crate::options::ChunkerOptions;
use crate::stemmer::{SnowballStemmer, Stemmer};
use crate::verbal::VerbalAutomaton;

/// Extracts noun compounds, LVCs and VPCs from tagged sentences.
///
/// Not safe for concurrent use from several threads: the lemma lexicon is
/// shared by all calls on one instance. Use one chunker per thread.
pub struct EnglishChunker {
    nominal: StateMachine,
    verbal: VerbalAutomaton,
    vectorizer: FeatureVectorizer,
    classifier: Box<dyn Classifier>,
    options: ChunkerOptions,
    /// Wrapped in `RefCell` so that `&self` extraction calls can register new
    /// lemmas.
    lexicon: RefCell<Lexicon>,
}

impl EnglishChunker {
    /// Chunker with the default nominal table, the Snowball stemmer and an
    /// empty model registry.
    pub fn new() -> Result<Self, ChunkerError> {
        Self::with_options(ChunkerOptions::default())
    }

    pub fn with_options(options: ChunkerOptions) -> Result<Self, ChunkerError> {
        let vectorizer = FeatureVectorizer::new(
            options.content_tags.iter().cloned(),
            options.max_window,
            Box::new(SnowballStemmer::english()),
        );
        Ok(Self {
            nominal: nominal_machine()?,
            verbal: VerbalAutomaton::new(),
            vectorizer,
            classifier: Box::new(ModelRegistry::new()),
            options,
            lexicon: RefCell::new(Lexicon::new()),
        })
    }

    /// Replace the nominal-compound table.
    pub fn with_noun_table(mut self, table: &TransitionTable) -> Result<Self, ChunkerError> {
        self.nominal = StateMachine::from_table(table)?;
        Ok(self)
    }

    pub fn with_classifier(mut self, classifier: Box<dyn Classifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_stemmer(mut self, stemmer: Box<dyn Stemmer>) -> Self {
        self.vectorizer.set_stemmer(stemmer);
        self
    }

    // =========================================================================
    // Options
    // =========================================================================

    pub fn options(&self) -> &ChunkerOptions {
        &self.options
    }

    pub fn set_learning_mode(&mut self, value: bool) {
        self.options.learning = value;
    }

    pub fn in_learning_mode(&self) -> bool {
        self.options.learning
    }

    pub fn set_threshold(&mut self, mwe_type: MweType, value: f64) {
        self.options.thresholds.set(mwe_type, value);
    }

    pub fn set_copula_vetoes_vpc(&mut self, value: bool) {
        self.options.copula_vetoes_vpc = value;
    }

    pub fn set_content_tags(&mut self, tags: Vec<String>) {
        self.vectorizer.set_content_tags(tags.iter().cloned());
        self.options.content_tags = tags;
    }

    pub fn set_max_window(&mut self, value: usize) {
        self.vectorizer.set_max_window(value);
        self.options.max_window = value;
    }

    /// Forget all lemma ids. Call only between independent sessions; ids
    /// assigned afterwards are not comparable with earlier vectors.
    pub fn reset_lexicon(&self) {
        self.lexicon.borrow_mut().clear();
    }

    pub fn lexicon_size(&self) -> usize {
        self.lexicon.borrow().len()
    }

    // =========================================================================
    // Extraction
    // =========================================================================

    /// Chunk whitespace-delimited tags and tokens. Offsets are located in the
    /// token string.
    pub fn chunk(&self, tags: &str, tokens: &str) -> Result<ResultSet, ChunkerError> {
        let sentence = TaggedSentence::from_strings(tags, tokens)?;
        Ok(self.chunk_sentence(&sentence))
    }

    /// Chunk with offsets located in the original source `text`.
    pub fn chunk_in_text(
        &self,
        text: &str,
        tags: &str,
        tokens: &str,
    ) -> Result<ResultSet, ChunkerError> {
        let sentence = TaggedSentence::from_strings_in_text(text, tags, tokens)?;
        Ok(self.chunk_sentence(&sentence))
    }

    /// Chunk with caller-supplied character offsets, one per token.
    pub fn chunk_with_offsets(
        &self,
        tags: &str,
        tokens: &str,
        offsets: &[usize],
    ) -> Result<ResultSet, ChunkerError> {
        let sentence = TaggedSentence::from_strings_with_offsets(tags, tokens, offsets)?;
        Ok(self.chunk_sentence(&sentence))
    }

    /// Chunk an already built sentence.
    pub fn chunk_sentence(&self, sentence: &TaggedSentence) -> ResultSet {
        let mut pass = Pass {
            chunker: self,
            sentence,
            gate: CandidateGate::new(self.options.learning, self.options.thresholds),
            lexicon: self.lexicon.borrow_mut(),
            result: ResultSet::new(),
        };
        pass.nominal();
        pass.verbal();
        pass.result
    }
}

impl std::fmt::Debug for EnglishChunker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnglishChunker")
            .field("options", &self.options)
            .field("lexicon_size", &self.lexicon_size())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// One extraction call
// ---------------------------------------------------------------------------

struct Pass<'a> {
    chunker: &'a EnglishChunker,
    sentence: &'a TaggedSentence,
    gate: CandidateGate,
    lexicon: RefMut<'a, Lexicon>,
    result: ResultSet,
}

impl Pass<'_> {
    fn nominal(&mut self) {
        let chunker = self.chunker;
        let machine = &chunker.nominal;
        let sentence = self.sentence;
        let mut run = machine.new_run();
        for token in sentence.tokens() {
            if let Some(extract) = machine.feed(&mut run, token.into()) {
                self.noun_extract(&extract);
            }
        }
    }

    fn noun_extract(&mut self, extract: &Extract) {
        self.noun_span(&extract.indices);
        if let Some(indices) = extract.embed_indices() {
            self.noun_span(indices);
        }
    }

    fn noun_span(&mut self, indices: &[usize]) {
        if indices.len() < 2 {
            tracing::debug!(?indices, "single-token noun emission dropped");
            return;
        }
        self.admit(MweType::NounCompound, indices);
    }

    fn verbal(&mut self) {
        let chunker = self.chunker;
        let automaton = &chunker.verbal;
        let sentence = self.sentence;
        let mut run = automaton.new_run();
        for token in sentence.tokens() {
            if let Some(extract) = automaton.feed(&mut run, token.into()) {
                self.verbal_extract(&extract);
            }
            if is_pronoun(&token.tag) {
                self.result.pronouns.push(token.text.clone());
            }
        }
    }

    fn verbal_extract(&mut self, extract: &Extract) {
        let text = &extract.text;
        let mwe_type = if extract.typed {
            if defeats_lvc(text) {
                tracing::debug!(%text, "LVC vetoed by copula");
                return;
            }
            MweType::Lvc
        } else {
            if defeats_vpc(text) {
                tracing::debug!(%text, "VPC vetoed by demonstrative");
                return;
            }
            if self.chunker.options.copula_vetoes_vpc && defeats_lvc(text) {
                tracing::debug!(%text, "VPC vetoed by copula");
                return;
            }
            MweType::Vpc
        };
        self.admit(mwe_type, &extract.indices);
    }

    /// Vectorize and gate the tokens at `indices`; accepted spans are added
    /// to the result.
    fn admit(&mut self, mwe_type: MweType, indices: &[usize]) {
        let sentence = self.sentence;
        let tokens: Vec<&TaggedToken> = indices
            .iter()
            .filter_map(|&i| sentence.tokens().get(i))
            .collect();
        let Some(first) = tokens.first() else {
            return;
        };
        let text = tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let tags: Vec<String> = tokens.iter().map(|t| t.tag.clone()).collect();

        let window = FeatureWindow::over(sentence, indices);
        let vector = self
            .chunker
            .vectorizer
            .vectorize(&window, &mut self.lexicon)
            .to_string();

        let decision = self
            .gate
            .decide(self.chunker.classifier.as_ref(), mwe_type, &vector);
        if !decision.accepted {
            tracing::debug!(%mwe_type, %text, score = decision.score, "candidate rejected");
            return;
        }

        let mut candidate = Candidate::new(mwe_type, text, first.offset, first.index, 0, tags)
            .with_token_indices(tokens.iter().map(|t| t.index).collect());
        candidate.feature_vector = Some(vector);
        candidate.score = decision.score;
        self.result.push(candidate);
    }
}

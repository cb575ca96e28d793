//! English multi-word expression extraction.
//!
//! [`EnglishChunker`] runs two automata over a POS-tagged sentence: the
//! table-driven nominal-compound machine and the hand-specified verbal
//! automaton for light-verb and verb-particle constructions. Candidates pass
//! lexical defeat vetoes, get a sparse feature vector, and are finally gated by
//! an optional classifier.
//!
//! # Architecture
//!
//! - [`nominal`] -- Default noun-compound transition table
//! - [`verbal`] -- 13-state LVC/VPC automaton
//! - [`defeat`] -- Lexical vetoes applied before gating
//! - [`features`] -- Candidate windows, lemma lexicon and vectorizer
//! - [`sparse`] -- libSVM sparse vector wire format
//! - [`gate`] -- Classifier capability, model registry and acceptance gate
//! - [`stemmer`] -- Stemmer capability (Snowball English by default)
//! - [`options`] -- Serializable chunker options
//! - [`chunker`] -- The orchestrating [`EnglishChunker`]
//!
//! # Example
//!
//! ```
//! use mwe_en::EnglishChunker;
//!
//! let chunker = EnglishChunker::new().unwrap();
//! let result = chunker.chunk("VB DT NN", "make a decision").unwrap();
//! assert_eq!(result.lvcs[0].text, "make a decision");
//! ```

pub mod chunker;
pub mod defeat;
pub mod error;
pub mod features;
pub mod gate;
pub mod nominal;
pub mod options;
pub mod sparse;
pub mod stemmer;
pub mod verbal;

pub use chunker::EnglishChunker;
pub use error::ChunkerError;
pub use options::{ChunkerOptions, Thresholds};

pub use mwe_core::candidate::{Candidate, MweType, ResultSet};

//! Shared data model for multi-word expression (MWE) extraction.
//!
//! - [`tags`] -- Tag alphabet and tag normalization
//! - [`ortho`] -- Orthographic (character class) labels for tokens
//! - [`token`] -- Tagged tokens and sentences
//! - [`candidate`] -- Candidate spans and per-call result sets

pub mod candidate;
pub mod ortho;
pub mod tags;
pub mod token;

/// Error type for malformed extraction input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("tag/token count mismatch: {tags} tags for {tokens} tokens")]
    LengthMismatch { tags: usize, tokens: usize },
    #[error("offset count mismatch: {offsets} offsets for {tokens} tokens")]
    OffsetMismatch { offsets: usize, tokens: usize },
}

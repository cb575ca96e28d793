// Chunker error type

use mwe_core::InputError;
use mwe_fsm::ConfigError;

/// Error type for chunker construction and extraction calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChunkerError {
    /// A transition table could not be loaded.
    #[error("invalid transition table: {0}")]
    Config(#[from] ConfigError),

    /// Tags, tokens or offsets do not line up.
    #[error("invalid input: {0}")]
    Input(#[from] InputError),
}

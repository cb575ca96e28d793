//! Finite-state chunking engine.
//!
//! A chunking automaton walks a tag/token sequence one token at a time,
//! accumulating tokens into a buffer and copying the buffer out as an
//! [`Extract`] when its transition table says a phrase is complete.
//!
//! # Architecture
//!
//! - [`action`] -- The closed set of per-step buffer actions
//! - [`table`] -- Flat `(state, tag, action, next)` transition tables
//! - [`run`] -- Per-traversal buffer state and emitted extracts
//! - [`machine`] -- The table-driven [`StateMachine`](machine::StateMachine)
//!
//! Automata hold only immutable tables; all mutable traversal state lives in
//! a separate run value created per sentence, so one automaton can serve any
//! number of independent traversals.

pub mod action;
pub mod machine;
pub mod run;
pub mod table;

pub use mwe_core::tags::WILDCARD;

/// Error type for transition table parsing and machine construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("transition table length {len} is not a multiple of 4")]
    TableLength { len: usize },
    #[error("transition table is empty")]
    EmptyTable,
    #[error("unknown action name: {name}")]
    UnknownAction { name: String },
    #[error("state {state} has no wildcard (\"**\") transition")]
    MissingWildcard { state: String },
}

/// One input position fed to an automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInput<'a> {
    /// Normalized tag of the token.
    pub tag: &'a str,
    /// Surface form of the token.
    pub token: &'a str,
    /// Character offset of the token in the source text.
    pub offset: usize,
    /// Index of the token in the sentence.
    pub index: usize,
}

impl<'a> StepInput<'a> {
    pub fn new(tag: &'a str, token: &'a str, offset: usize, index: usize) -> Self {
        Self {
            tag,
            token,
            offset,
            index,
        }
    }
}

impl<'a> From<&'a mwe_core::token::TaggedToken> for StepInput<'a> {
    fn from(token: &'a mwe_core::token::TaggedToken) -> Self {
        Self::new(&token.tag, &token.text, token.offset, token.index)
    }
}

/// Trait for chunking automata, abstracting over table-driven and
/// hand-specified variants.
///
/// `new_run` creates the mutable traversal state for one sentence; `step`
/// advances it by one token; `take_extract` hands out the most recent
/// emission exactly once.
pub trait PhraseAutomaton {
    type Run;

    /// Create a fresh traversal positioned at the initial state.
    fn new_run(&self) -> Self::Run;

    /// Carry out the action for `input` in the current state and move on.
    fn step(&self, run: &mut Self::Run, input: StepInput<'_>);

    /// Return and clear the most recent emission.
    ///
    /// A second call without an intervening `step` returns `None`.
    fn take_extract(&self, run: &mut Self::Run) -> Option<run::Extract>;

    /// Step and collect the emission of that step, if any.
    fn feed(&self, run: &mut Self::Run, input: StepInput<'_>) -> Option<run::Extract> {
        self.step(run, input);
        self.take_extract(run)
    }
}

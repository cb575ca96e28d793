// Per-traversal run state and emitted extracts

use crate::machine::StateId;

/// Nested span sharing the tail of an enclosing extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedSpan {
    /// Number of leading tokens of the outer extract that precede the embed.
    pub token_offset: usize,
    /// Byte offset into the outer extract's text where the embed starts.
    pub text_offset: usize,
}

/// A phrase copied out of the chunk buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extract {
    /// Tokens joined by single spaces.
    pub text: String,
    /// Character offset of the first token.
    pub start_offset: usize,
    /// Sentence index of the first token.
    pub start_index: usize,
    pub token_count: usize,
    /// Sentence index of every token in the extract, ascending. Contiguous
    /// unless the table skipped tokens inside the chunk.
    pub indices: Vec<usize>,
    /// Set when the emitting action was a `SUBTYPE` variant.
    pub typed: bool,
    /// Nested candidate carried by this extract, if an embed boundary was
    /// pending when it closed.
    pub embed: Option<EmbedSpan>,
}

impl Extract {
    /// Text of the embedded span, if any.
    pub fn embed_text(&self) -> Option<&str> {
        self.embed.map(|e| &self.text[e.text_offset..])
    }

    /// Token count of the embedded span, if any.
    pub fn embed_token_count(&self) -> Option<usize> {
        self.embed.map(|e| self.token_count - e.token_offset)
    }

    /// Sentence indices of the embedded span, if any.
    pub fn embed_indices(&self) -> Option<&[usize]> {
        self.embed.map(|e| &self.indices[e.token_offset..])
    }
}

/// Mutable state of one table-driven traversal.
///
/// Created by [`StateMachine`](crate::machine::StateMachine) per sentence and
/// never shared between sentences.
#[derive(Debug, Clone)]
pub struct RunBuffer {
    pub(crate) state: StateId,
    chunk: String,
    /// Sentence index of each chunk token.
    indices: Vec<usize>,
    start_offset: usize,
    start_index: usize,
    extract: Option<Extract>,
    pending_embed: Option<EmbedSpan>,
    /// Tag observed on the previous step.
    pub(crate) last_tag: Option<String>,
    /// Tag observed just before the current chunk started.
    pub(crate) prior_tag: Option<String>,
}

impl RunBuffer {
    pub(crate) fn new(initial: StateId) -> Self {
        Self {
            state: initial,
            chunk: String::new(),
            indices: Vec::new(),
            start_offset: 0,
            start_index: 0,
            extract: None,
            pending_embed: None,
            last_tag: None,
            prior_tag: None,
        }
    }

    /// Return to the initial state with an empty buffer.
    pub fn reset(&mut self, initial: StateId) {
        *self = Self::new(initial);
    }

    /// Current chunk text.
    pub fn chunk(&self) -> &str {
        &self.chunk
    }

    /// Number of tokens in the current chunk.
    pub fn chunk_tokens(&self) -> usize {
        self.indices.len()
    }

    /// Sentence indices of the current chunk's tokens.
    pub fn chunk_indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn has_pending_embed(&self) -> bool {
        self.pending_embed.is_some()
    }

    /// Return and clear the most recent extract.
    pub fn take_extract(&mut self) -> Option<Extract> {
        self.extract.take()
    }

    pub(crate) fn add(&mut self, token: &str, offset: usize, index: usize) {
        if self.indices.is_empty() {
            self.chunk.clear();
            self.start_offset = offset;
            self.start_index = index;
            self.prior_tag = self.last_tag.clone();
        } else {
            self.chunk.push(' ');
        }
        self.chunk.push_str(token);
        self.indices.push(index);
    }

    /// Append only when a chunk is open.
    pub(crate) fn extend(&mut self, token: &str, index: usize) {
        if !self.indices.is_empty() {
            self.chunk.push(' ');
            self.chunk.push_str(token);
            self.indices.push(index);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.chunk.clear();
        self.indices.clear();
        self.pending_embed = None;
    }

    /// Copy the chunk out. An empty chunk emits nothing. A pending embed
    /// boundary is attached to the extract and consumed.
    pub(crate) fn emit(&mut self, typed: bool) {
        if self.indices.is_empty() {
            return;
        }
        self.extract = Some(Extract {
            text: self.chunk.clone(),
            start_offset: self.start_offset,
            start_index: self.start_index,
            token_count: self.indices.len(),
            indices: self.indices.clone(),
            typed,
            embed: self.pending_embed.take(),
        });
    }

    /// Mark the end of the current chunk as an embed boundary.
    pub(crate) fn mark_embed(&mut self) {
        if self.indices.is_empty() {
            return;
        }
        self.pending_embed = Some(EmbedSpan {
            token_offset: self.indices.len(),
            text_offset: self.chunk.len() + 1,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run() -> RunBuffer {
        RunBuffer::new(StateId(0))
    }

    #[test]
    fn add_records_start_of_chunk() {
        let mut r = run();
        r.add("dog", 4, 1);
        r.add("house", 8, 2);
        assert_eq!(r.chunk(), "dog house");
        assert_eq!(r.chunk_tokens(), 2);
        r.emit(false);
        let e = r.take_extract().unwrap();
        assert_eq!(e.start_offset, 4);
        assert_eq!(e.start_index, 1);
        assert_eq!(e.token_count, 2);
    }

    #[test]
    fn extract_is_consumed_once() {
        let mut r = run();
        r.add("dog", 0, 0);
        r.emit(false);
        assert!(r.take_extract().is_some());
        assert!(r.take_extract().is_none());
    }

    #[test]
    fn empty_chunk_emits_nothing() {
        let mut r = run();
        r.emit(true);
        assert!(r.take_extract().is_none());
    }

    #[test]
    fn extend_requires_open_chunk() {
        let mut r = run();
        r.extend("up", 1);
        assert_eq!(r.chunk_tokens(), 0);
        r.add("give", 0, 0);
        r.extend("up", 1);
        assert_eq!(r.chunk(), "give up");
        assert_eq!(r.chunk_indices(), &[0, 1]);
    }

    #[test]
    fn embed_attaches_to_next_emission() {
        let mut r = run();
        r.add("big", 4, 1);
        r.emit(false);
        r.mark_embed();
        r.add("dog", 8, 2);
        r.add("house", 12, 3);
        assert!(r.has_pending_embed());
        r.emit(false);
        let e = r.take_extract().unwrap();
        assert_eq!(e.text, "big dog house");
        assert_eq!(e.embed_text(), Some("dog house"));
        assert_eq!(e.embed_token_count(), Some(2));
        assert_eq!(e.embed_indices(), Some(&[2, 3][..]));
        assert!(!r.has_pending_embed());
    }

    #[test]
    fn extract_records_indices_across_gaps() {
        let mut r = run();
        r.add("dog", 0, 0);
        r.add("house", 8, 2);
        r.emit(false);
        let e = r.take_extract().unwrap();
        assert_eq!(e.text, "dog house");
        assert_eq!(e.start_index, 0);
        assert_eq!(e.token_count, 2);
        assert_eq!(e.indices, vec![0, 2]);
    }

    #[test]
    fn clear_drops_pending_embed() {
        let mut r = run();
        r.add("big", 0, 0);
        r.mark_embed();
        r.clear();
        assert!(!r.has_pending_embed());
        assert_eq!(r.chunk(), "");
    }

    #[test]
    fn prior_tag_is_tag_before_chunk() {
        let mut r = run();
        r.last_tag = Some("DT".to_string());
        r.add("big", 0, 1);
        r.last_tag = Some("JJ".to_string());
        r.add("dog", 4, 2);
        assert_eq!(r.prior_tag.as_deref(), Some("DT"));
    }
}

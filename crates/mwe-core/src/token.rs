// Tagged token and sentence types

use serde::Serialize;

use crate::InputError;
use crate::tags::{SENTENCE_TERMINATOR, normalize_tag};

/// A token with its normalized part-of-speech tag and position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedToken {
    /// Surface form of the token.
    pub text: String,
    /// Normalized POS tag.
    pub tag: String,
    /// Character offset of the token in the source text.
    pub offset: usize,
    /// Position of the token in the sentence.
    pub index: usize,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, tag: impl Into<String>, offset: usize, index: usize) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
            offset,
            index,
        }
    }
}

/// An ordered, immutable sequence of tagged tokens.
///
/// A sentence terminator token (tag and text `"."`) is always appended after
/// the input tokens so that every open candidate closes before the end of the
/// sequence. [`len`](Self::len) counts input tokens only; [`tokens`](Self::tokens)
/// includes the terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedSentence {
    tokens: Vec<TaggedToken>,
}

impl TaggedSentence {
    /// Build a sentence from whitespace-delimited tag and token strings.
    ///
    /// Offsets are derived by locating each token in `tokens` itself.
    pub fn from_strings(tags: &str, tokens: &str) -> Result<Self, InputError> {
        Self::from_strings_in_text(tokens, tags, tokens)
    }

    /// Build a sentence whose offsets are located in the original `text`.
    ///
    /// Each token is searched for from the end of the previous match; a token
    /// that does not occur is placed at the current search position.
    pub fn from_strings_in_text(text: &str, tags: &str, tokens: &str) -> Result<Self, InputError> {
        let tag_list: Vec<&str> = tags.split_whitespace().collect();
        let token_list: Vec<&str> = tokens.split_whitespace().collect();
        check_aligned(&tag_list, &token_list)?;
        let offsets = locate_offsets(text, &token_list);
        let end = text.chars().count();
        Ok(Self::build(&tag_list, &token_list, &offsets, end))
    }

    /// Build a sentence with caller-supplied character offsets.
    pub fn from_strings_with_offsets(
        tags: &str,
        tokens: &str,
        offsets: &[usize],
    ) -> Result<Self, InputError> {
        let tag_list: Vec<&str> = tags.split_whitespace().collect();
        let token_list: Vec<&str> = tokens.split_whitespace().collect();
        check_aligned(&tag_list, &token_list)?;
        if offsets.len() != token_list.len() {
            return Err(InputError::OffsetMismatch {
                offsets: offsets.len(),
                tokens: token_list.len(),
            });
        }
        let end = match (offsets.last(), token_list.last()) {
            (Some(&offset), Some(token)) => offset + token.chars().count(),
            _ => 0,
        };
        Ok(Self::build(&tag_list, &token_list, offsets, end))
    }

    fn build(tags: &[&str], tokens: &[&str], offsets: &[usize], end: usize) -> Self {
        let mut out: Vec<TaggedToken> = tags
            .iter()
            .zip(tokens)
            .zip(offsets)
            .enumerate()
            .map(|(index, ((tag, token), &offset))| {
                TaggedToken::new(*token, normalize_tag(tag), offset, index)
            })
            .collect();
        let index = out.len();
        out.push(TaggedToken::new(
            SENTENCE_TERMINATOR,
            SENTENCE_TERMINATOR,
            end,
            index,
        ));
        Self { tokens: out }
    }

    /// Number of input tokens, excluding the appended terminator.
    pub fn len(&self) -> usize {
        self.tokens.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All tokens including the appended terminator.
    pub fn tokens(&self) -> &[TaggedToken] {
        &self.tokens
    }

    /// Input tokens only.
    pub fn words(&self) -> &[TaggedToken] {
        &self.tokens[..self.len()]
    }

    /// Input token at `index`, or `None` for the terminator and beyond.
    pub fn word(&self, index: usize) -> Option<&TaggedToken> {
        self.words().get(index)
    }
}

fn check_aligned(tags: &[&str], tokens: &[&str]) -> Result<(), InputError> {
    if tags.len() != tokens.len() {
        return Err(InputError::LengthMismatch {
            tags: tags.len(),
            tokens: tokens.len(),
        });
    }
    Ok(())
}

/// Locate each token's next occurrence in `text`, returning character offsets.
pub fn locate_offsets(text: &str, tokens: &[&str]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(tokens.len());
    let mut byte_pos = 0;
    let mut char_pos = 0;
    for token in tokens {
        match text[byte_pos..].find(token) {
            Some(rel) => {
                let start_chars = char_pos + text[byte_pos..byte_pos + rel].chars().count();
                offsets.push(start_chars);
                byte_pos += rel + token.len();
                char_pos = start_chars + token.chars().count();
            }
            None => offsets.push(char_pos),
        }
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_terminator() {
        let s = TaggedSentence::from_strings("VB RP", "give up").unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.tokens().len(), 3);
        let last = s.tokens().last().unwrap();
        assert_eq!(last.tag, ".");
        assert_eq!(last.text, ".");
        assert_eq!(last.index, 2);
        assert_eq!(last.offset, 7);
    }

    #[test]
    fn derives_offsets_from_token_string() {
        let s = TaggedSentence::from_strings("VB DT NN", "make a decision").unwrap();
        let offsets: Vec<usize> = s.words().iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 5, 7]);
    }

    #[test]
    fn offsets_in_source_text() {
        let text = "They  make a  decision.";
        let s = TaggedSentence::from_strings_in_text(text, "PRP VB DT NN", "They make a decision")
            .unwrap();
        let offsets: Vec<usize> = s.words().iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 6, 11, 14]);
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        let offsets = locate_offsets("\u{00E4}iti ja is\u{00E4}", &["\u{00E4}iti", "ja", "is\u{00E4}"]);
        assert_eq!(offsets, vec![0, 5, 8]);
    }

    #[test]
    fn missing_token_keeps_position() {
        let offsets = locate_offsets("a b", &["a", "zz", "b"]);
        assert_eq!(offsets, vec![0, 1, 2]);
    }

    #[test]
    fn explicit_offsets() {
        let s = TaggedSentence::from_strings_with_offsets("VB RP", "give up", &[10, 15]).unwrap();
        assert_eq!(s.word(0).unwrap().offset, 10);
        assert_eq!(s.word(1).unwrap().offset, 15);
        assert_eq!(s.tokens()[2].offset, 17);
    }

    #[test]
    fn tags_are_normalized() {
        let s = TaggedSentence::from_strings("USR HT :", "@bob #rust :").unwrap();
        let tags: Vec<&str> = s.words().iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["NNP", "NN", "."]);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let err = TaggedSentence::from_strings("VB", "give up").unwrap_err();
        assert_eq!(err, InputError::LengthMismatch { tags: 1, tokens: 2 });
    }

    #[test]
    fn offset_mismatch_is_an_error() {
        let err = TaggedSentence::from_strings_with_offsets("VB RP", "give up", &[0]).unwrap_err();
        assert_eq!(err, InputError::OffsetMismatch { offsets: 1, tokens: 2 });
    }

    #[test]
    fn empty_input_has_only_terminator() {
        let s = TaggedSentence::from_strings("", "").unwrap();
        assert!(s.is_empty());
        assert_eq!(s.tokens().len(), 1);
        assert!(s.word(0).is_none());
    }
}

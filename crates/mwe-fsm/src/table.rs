// Transition tables: flat (state, tag, action, next) quadruples

use crate::ConfigError;
use crate::action::Action;

/// One row of a transition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRow {
    pub state: String,
    /// Observed tag, or `"**"` for the wildcard fallback.
    pub tag: String,
    pub action: Action,
    pub next: String,
}

/// An ordered list of transition rows defining one state machine.
///
/// The state of the first row is the initial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    rows: Vec<TransitionRow>,
}

impl TransitionTable {
    /// Build a table from a flat list of strings, four per row:
    /// `STATE, TAG, ACTION, NEXT`.
    pub fn from_flat<S: AsRef<str>>(fields: &[S]) -> Result<Self, ConfigError> {
        if fields.len() % 4 != 0 {
            return Err(ConfigError::TableLength { len: fields.len() });
        }
        if fields.is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        let rows = fields
            .chunks_exact(4)
            .map(|quad| {
                Ok(TransitionRow {
                    state: quad[0].as_ref().to_string(),
                    tag: quad[1].as_ref().to_string(),
                    action: quad[2].as_ref().parse()?,
                    next: quad[3].as_ref().to_string(),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self { rows })
    }

    /// Parse a table from text.
    ///
    /// Fields are separated by any whitespace; `#` at the start of a field
    /// begins a comment that runs to the end of the line. A lone `#` after
    /// three fields of a row is read as the `#` tag.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut fields: Vec<&str> = Vec::new();
        for line in text.lines() {
            for field in line.split_whitespace() {
                if field.starts_with('#') && !(field == "#" && fields.len() % 4 == 1) {
                    break;
                }
                fields.push(field);
            }
        }
        Self::from_flat(&fields)
    }

    pub fn rows(&self) -> &[TransitionRow] {
        &self.rows
    }

    /// Name of the initial state.
    pub fn initial_state(&self) -> &str {
        &self.rows[0].state
    }

    /// Distinct state names in order of first appearance (source or target).
    pub fn state_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for row in &self.rows {
            for name in [row.state.as_str(), row.next.as_str()] {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// Renders one row per line in the text form accepted by [`TransitionTable::parse`].
impl std::fmt::Display for TransitionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}\t{}\t{}\t{}", row.state, row.tag, row.action, row.next)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_table() {
        let table = TransitionTable::from_flat(&[
            "start", "NN", "ADD_TOKEN", "noun", //
            "start", "**", "CLEAR_CHUNK", "start", //
            "noun", "**", "SET_MWE_CLEAR", "start",
        ])
        .unwrap();
        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.initial_state(), "start");
        assert_eq!(table.rows()[2].action, Action::SetMweClear);
        assert_eq!(table.state_names(), vec!["start", "noun"]);
    }

    #[test]
    fn reject_ragged_table() {
        let err = TransitionTable::from_flat(&["start", "NN", "ADD_TOKEN"]).unwrap_err();
        assert_eq!(err, ConfigError::TableLength { len: 3 });
    }

    #[test]
    fn reject_empty_table() {
        let empty: [&str; 0] = [];
        let err = TransitionTable::from_flat(&empty).unwrap_err();
        assert_eq!(err, ConfigError::EmptyTable);
    }

    #[test]
    fn reject_unknown_action() {
        let err = TransitionTable::from_flat(&["start", "**", "JUMP", "start"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownAction { .. }));
    }

    #[test]
    fn parse_text_with_comments() {
        let text = "\
# nominal compounds
start  NN  ADD_TOKEN    noun   # open a chunk
start  **  CLEAR_CHUNK  start
noun   NN  ADD_TOKEN    noun
noun   **  SET_MWE_CLEAR start
";
        let table = TransitionTable::parse(text).unwrap();
        assert_eq!(table.rows().len(), 4);
        assert_eq!(table.rows()[0].tag, "NN");
        assert_eq!(table.rows()[3].next, "start");
    }

    #[test]
    fn parse_hash_tag_field() {
        let table = TransitionTable::parse("start # SKIP start\nstart ** SKIP start\n").unwrap();
        assert_eq!(table.rows()[0].tag, "#");
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn display_round_trips_through_parse() {
        let table = TransitionTable::from_flat(&[
            "a", "JJ", "ADD_TOKEN", "b", //
            "a", "**", "SKIP", "a", //
            "b", "**", "SET_MWE_CLEAR", "a",
        ])
        .unwrap();
        let reparsed = TransitionTable::parse(&table.to_string()).unwrap();
        assert_eq!(reparsed, table);
    }
}

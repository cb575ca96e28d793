// Default English nominal-compound table
//
// Recognizes (JJ)? (NN|NNS|NNP|NNPS)+. An adjective-led compound is emitted
// whole and its noun-only tail is carried as an embedded span.

use mwe_fsm::ConfigError;
use mwe_fsm::machine::StateMachine;
use mwe_fsm::table::TransitionTable;

/// Transition table in text form.
pub const NOMINAL_COMPOUNDS: &str = "\
# state   tag    action            next
idle      JJ     ADD_TOKEN         adj
idle      JJR    ADD_TOKEN         adj
idle      JJS    ADD_TOKEN         adj
idle      NN     ADD_TOKEN         noun
idle      NNS    ADD_TOKEN         noun
idle      NNP    ADD_TOKEN         noun
idle      NNPS   ADD_TOKEN         noun
idle      **     CLEAR_CHUNK       idle

adj       JJ     CLEAR_ADD         adj
adj       JJR    CLEAR_ADD         adj
adj       JJS    CLEAR_ADD         adj
adj       NN     SET_MWE_ADDEMBED  noun
adj       NNS    SET_MWE_ADDEMBED  noun
adj       NNP    SET_MWE_ADDEMBED  noun
adj       NNPS   SET_MWE_ADDEMBED  noun
adj       **     CLEAR_CHUNK       idle

noun      NN     ADD_TOKEN         noun
noun      NNS    ADD_TOKEN         noun
noun      NNP    ADD_TOKEN         noun
noun      NNPS   ADD_TOKEN         noun
noun      **     SET_MWE_CLEAR     idle
";

pub fn nominal_table() -> Result<TransitionTable, ConfigError> {
    TransitionTable::parse(NOMINAL_COMPOUNDS)
}

pub fn nominal_machine() -> Result<StateMachine, ConfigError> {
    StateMachine::from_table(&nominal_table()?)
}

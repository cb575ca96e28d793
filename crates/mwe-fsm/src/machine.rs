// Table-driven state machine
//
// States are stored densely and addressed by `StateId`; every state carries a
// wildcard fallback, so a lookup can never miss once construction succeeded.

use hashbrown::HashMap;

use crate::action::Action;
use crate::run::{Extract, RunBuffer};
use crate::table::TransitionTable;
use crate::{ConfigError, PhraseAutomaton, StepInput, WILDCARD};

/// Dense index of a state within one [`StateMachine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Transition {
    action: Action,
    next: StateId,
}

#[derive(Debug, Clone)]
struct State {
    name: String,
    transitions: HashMap<String, Transition>,
    fallback: Transition,
}

impl State {
    fn lookup(&self, tag: &str) -> Transition {
        self.transitions.get(tag).copied().unwrap_or(self.fallback)
    }
}

/// A chunking automaton built from a [`TransitionTable`].
///
/// The machine itself is immutable; traversal state lives in a [`RunBuffer`]
/// obtained from [`PhraseAutomaton::new_run`].
#[derive(Debug, Clone)]
pub struct StateMachine {
    states: Vec<State>,
    initial: StateId,
}

impl StateMachine {
    /// Build a machine from a table.
    ///
    /// Fails with [`ConfigError::MissingWildcard`] if any state named in the
    /// table, as source or as target, has no `"**"` row.
    pub fn from_table(table: &TransitionTable) -> Result<Self, ConfigError> {
        let names = table.state_names();
        let ids: HashMap<&str, StateId> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (*name, StateId(i)))
            .collect();

        let mut transitions: Vec<HashMap<String, Transition>> = vec![HashMap::new(); names.len()];
        let mut fallbacks: Vec<Option<Transition>> = vec![None; names.len()];
        for row in table.rows() {
            let from = ids[row.state.as_str()];
            let transition = Transition {
                action: row.action,
                next: ids[row.next.as_str()],
            };
            if row.tag == WILDCARD {
                fallbacks[from.0] = Some(transition);
            } else {
                transitions[from.0].insert(row.tag.clone(), transition);
            }
        }

        let states = names
            .iter()
            .zip(transitions)
            .zip(fallbacks)
            .map(|((name, transitions), fallback)| {
                let fallback = fallback.ok_or_else(|| ConfigError::MissingWildcard {
                    state: name.to_string(),
                })?;
                Ok(State {
                    name: name.to_string(),
                    transitions,
                    fallback,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self {
            states,
            initial: ids[table.initial_state()],
        })
    }

    /// Parse a text table and build a machine from it.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Self::from_table(&TransitionTable::parse(text)?)
    }

    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn state_name(&self, id: StateId) -> &str {
        &self.states[id.0].name
    }

    /// Current state of a run.
    pub fn current_state(&self, run: &RunBuffer) -> StateId {
        run.state
    }

    /// Resolve the action and successor for `tag` in the run's current state.
    ///
    /// A `Substate` action is resolved again in the successor state, keyed by
    /// the tag seen just before the current chunk began. A second `Substate`
    /// at that level does nothing.
    fn resolve(&self, run: &RunBuffer, tag: &str) -> (Action, StateId) {
        let transition = self.states[run.state.0].lookup(tag);
        if transition.action != Action::Substate {
            return (transition.action, transition.next);
        }
        let key = run.prior_tag.as_deref().unwrap_or(WILDCARD);
        let action = match self.states[transition.next.0].lookup(key).action {
            Action::Substate => Action::Skip,
            action => action,
        };
        (action, transition.next)
    }
}

impl PhraseAutomaton for StateMachine {
    type Run = RunBuffer;

    fn new_run(&self) -> RunBuffer {
        RunBuffer::new(self.initial)
    }

    fn step(&self, run: &mut RunBuffer, input: StepInput<'_>) {
        let (action, next) = self.resolve(run, input.tag);
        tracing::trace!(
            state = self.state_name(run.state),
            tag = input.tag,
            token = input.token,
            %action,
            next = self.state_name(next),
            "step"
        );

        match action {
            Action::Skip | Action::Substate => {}
            Action::Continue => run.extend(input.token, input.index),
            _ => {
                let effects = action.effects();
                if effects.add_first {
                    run.add(input.token, input.offset, input.index);
                }
                if effects.emit {
                    run.emit(effects.typed);
                }
                if effects.embed {
                    run.mark_embed();
                }
                if effects.clear {
                    run.clear();
                }
                if effects.add_after {
                    run.add(input.token, input.offset, input.index);
                }
            }
        }

        run.last_tag = Some(input.tag.to_string());
        run.state = next;
    }

    fn take_extract(&self, run: &mut RunBuffer) -> Option<Extract> {
        run.take_extract()
    }
}

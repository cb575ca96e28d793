// Light-verb and verb-particle construction automaton
//
// Hand-specified counterpart of the table-driven engine. The buffer holds the
// tokens of the current verbal chunk; the state says which tail is being
// built. LVC emissions are typed, VPC emissions are not.
//
// VPC: V (RP|IN|TO|RB)+ [DT|PRP ...], closed at the first token that does not
// continue it. A determiner or pronoun after the particle is held
// tentatively: if a noun phrase follows, only the part before it (`temp`) is
// emitted ("look at the house" -> "look at").
//
// LVC: V [DT] [JJ]* NN+ or V and/or V.

use mwe_core::tags::{is_adjective, is_adverb, is_determiner, is_noun, is_verb};
use mwe_fsm::run::Extract;
use mwe_fsm::{PhraseAutomaton, StepInput};

/// States of the verbal automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerbalState {
    Idle,
    Verb,
    Particle,
    Preposition,
    ToInfinitive,
    Adverb,
    VerbPronoun,
    VerbDeterminer,
    Determiner,
    Pronoun,
    Adjective,
    Noun,
    Conjunction,
}

impl VerbalState {
    pub const ALL: [VerbalState; 13] = [
        Self::Idle,
        Self::Verb,
        Self::Particle,
        Self::Preposition,
        Self::ToInfinitive,
        Self::Adverb,
        Self::VerbPronoun,
        Self::VerbDeterminer,
        Self::Determiner,
        Self::Pronoun,
        Self::Adjective,
        Self::Noun,
        Self::Conjunction,
    ];
}

/// Traversal state of one [`VerbalAutomaton`] run.
#[derive(Debug, Clone)]
pub struct VerbalRun {
    state: VerbalState,
    words: Vec<String>,
    start_offset: usize,
    start_index: usize,
    /// Length of the span to emit if the tentative determiner/pronoun tail
    /// turns out to open a noun phrase.
    temp: Option<usize>,
    extract: Option<Extract>,
}

impl VerbalRun {
    fn new() -> Self {
        Self {
            state: VerbalState::Idle,
            words: Vec::new(),
            start_offset: 0,
            start_index: 0,
            temp: None,
            extract: None,
        }
    }

    pub fn state(&self) -> VerbalState {
        self.state
    }

    /// Current chunk text.
    pub fn chunk(&self) -> String {
        self.words.join(" ")
    }

    fn start(&mut self, input: &StepInput<'_>) -> VerbalState {
        self.clear();
        self.words.push(input.token.to_string());
        self.start_offset = input.offset;
        self.start_index = input.index;
        VerbalState::Verb
    }

    fn extend(&mut self, input: &StepInput<'_>, next: VerbalState) -> VerbalState {
        self.words.push(input.token.to_string());
        next
    }

    /// Extend while remembering the span before this token.
    fn hold(&mut self, input: &StepInput<'_>, next: VerbalState) -> VerbalState {
        self.temp = Some(self.words.len());
        self.extend(input, next)
    }

    fn clear(&mut self) -> VerbalState {
        self.words.clear();
        self.temp = None;
        VerbalState::Idle
    }

    /// Copy out the first `count` tokens of the buffer.
    fn emit(&mut self, count: usize, typed: bool) {
        let count = count.min(self.words.len());
        if count == 0 {
            return;
        }
        self.extract = Some(Extract {
            text: self.words[..count].join(" "),
            start_offset: self.start_offset,
            start_index: self.start_index,
            token_count: count,
            indices: (self.start_index..self.start_index + count).collect(),
            typed,
            embed: None,
        });
    }

    fn emit_vpc(&mut self) {
        self.emit(self.words.len(), false);
    }

    fn emit_lvc(&mut self) {
        self.emit(self.words.len(), true);
    }

    fn emit_held(&mut self) {
        let count = self.temp.unwrap_or(self.words.len());
        self.emit(count, false);
    }
}

fn is_conjunction(input: &StepInput<'_>) -> bool {
    input.tag == "CC" && matches!(input.token.to_lowercase().as_str(), "and" | "or")
}

/// Tokens that may follow a tentative determiner/pronoun as part of a noun
/// phrase.
fn opens_noun_phrase(tag: &str) -> bool {
    is_noun(tag) || is_adjective(tag) || is_determiner(tag) || tag == "CD"
}

/// The LVC/VPC automaton. Stateless; all traversal state is in [`VerbalRun`].
#[derive(Debug, Clone, Copy, Default)]
pub struct VerbalAutomaton;

impl VerbalAutomaton {
    pub fn new() -> Self {
        Self
    }

    fn transition(run: &mut VerbalRun, input: &StepInput<'_>) -> VerbalState {
        use VerbalState as S;

        let tag = input.tag;
        match run.state {
            S::Idle => {
                if is_verb(tag) {
                    run.start(input)
                } else {
                    S::Idle
                }
            }

            S::Verb => match tag {
                "RP" => run.extend(input, S::Particle),
                "IN" => run.extend(input, S::Preposition),
                "TO" => run.extend(input, S::ToInfinitive),
                "PRP" => run.extend(input, S::VerbPronoun),
                _ if is_adverb(tag) => run.extend(input, S::Adverb),
                _ if is_determiner(tag) => run.extend(input, S::VerbDeterminer),
                _ if is_noun(tag) => run.extend(input, S::Noun),
                _ if is_adjective(tag) => run.extend(input, S::Adjective),
                _ if is_conjunction(input) => run.extend(input, S::Conjunction),
                _ if is_verb(tag) => run.start(input),
                _ => run.clear(),
            },

            S::Particle | S::Preposition => match tag {
                "RP" => run.extend(input, S::Particle),
                "IN" => run.extend(input, S::Preposition),
                "PRP" => run.hold(input, S::Pronoun),
                _ if is_determiner(tag) => run.hold(input, S::Determiner),
                _ if is_verb(tag) => {
                    run.emit_vpc();
                    run.start(input)
                }
                _ => {
                    run.emit_vpc();
                    run.clear()
                }
            },

            S::ToInfinitive => match tag {
                "PRP" => run.hold(input, S::Pronoun),
                _ if is_determiner(tag) => run.hold(input, S::Determiner),
                _ if is_verb(tag) => {
                    run.emit_vpc();
                    run.start(input)
                }
                _ => {
                    run.emit_vpc();
                    run.clear()
                }
            },

            S::Adverb => match tag {
                "RP" => run.extend(input, S::Particle),
                "IN" => run.extend(input, S::Preposition),
                _ if is_adverb(tag) => run.extend(input, S::Adverb),
                _ if is_verb(tag) => {
                    run.emit_vpc();
                    run.start(input)
                }
                _ => {
                    run.emit_vpc();
                    run.clear()
                }
            },

            S::Determiner | S::Pronoun => {
                if run.state == S::Pronoun && tag == "RP" {
                    run.temp = None;
                    run.extend(input, S::Particle)
                } else if opens_noun_phrase(tag) {
                    run.emit_held();
                    run.clear()
                } else if is_verb(tag) {
                    run.emit_vpc();
                    run.start(input)
                } else {
                    run.emit_vpc();
                    run.clear()
                }
            }

            S::VerbPronoun => match tag {
                "RP" => run.extend(input, S::Particle),
                "IN" => run.extend(input, S::Preposition),
                _ if is_adverb(tag) => run.extend(input, S::Adverb),
                _ if is_verb(tag) => run.start(input),
                _ => run.clear(),
            },

            S::VerbDeterminer => match tag {
                _ if is_noun(tag) => run.extend(input, S::Noun),
                _ if is_adjective(tag) => run.extend(input, S::Adjective),
                _ if is_determiner(tag) => run.extend(input, S::VerbDeterminer),
                _ if is_verb(tag) => run.start(input),
                _ => run.clear(),
            },

            S::Adjective => match tag {
                _ if is_adjective(tag) => run.extend(input, S::Adjective),
                _ if is_noun(tag) => run.extend(input, S::Noun),
                _ if is_verb(tag) => run.start(input),
                _ => run.clear(),
            },

            S::Noun => {
                if is_noun(tag) {
                    run.extend(input, S::Noun)
                } else if is_verb(tag) {
                    run.emit_lvc();
                    run.start(input)
                } else {
                    run.emit_lvc();
                    run.clear()
                }
            }

            S::Conjunction => {
                if is_verb(tag) {
                    run.words.push(input.token.to_string());
                    run.emit_lvc();
                    run.start(input)
                } else {
                    run.clear()
                }
            }
        }
    }
}

impl PhraseAutomaton for VerbalAutomaton {
    type Run = VerbalRun;

    fn new_run(&self) -> VerbalRun {
        VerbalRun::new()
    }

    fn step(&self, run: &mut VerbalRun, input: StepInput<'_>) {
        let from = run.state;
        let next = Self::transition(run, &input);
        tracing::trace!(?from, tag = input.tag, token = input.token, ?next, "verbal step");
        run.state = next;
    }

    fn take_extract(&self, run: &mut VerbalRun) -> Option<Extract> {
        run.extract.take()
    }
}

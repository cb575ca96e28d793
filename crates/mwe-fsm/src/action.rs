// Per-step buffer actions

use std::str::FromStr;

use crate::ConfigError;

/// Action carried out on the chunk buffer when a transition fires.
///
/// Action names in transition tables are the SCREAMING_SNAKE_CASE forms
/// returned by [`Action::name`]. They are resolved once, when the table is
/// loaded; an unknown name is a [`ConfigError::UnknownAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Append the token; a chunk started by this token records its start.
    AddToken,
    /// Discard the chunk and any pending embed boundary.
    ClearChunk,
    /// Discard the chunk, then start a new one with the token.
    ClearAdd,
    /// Copy the chunk out as an extract, keeping it.
    SetMwe,
    /// Copy the chunk out, then discard it.
    SetMweClear,
    /// Copy the chunk out, then append the token.
    SetMweAdd,
    /// Copy the chunk out, mark an embed boundary after it, append the token.
    SetMweAddEmbed,
    /// As [`SetMwe`](Self::SetMwe), flagging the extract as the typed sub-variant.
    SetMweSubtype,
    /// As [`SetMweClear`](Self::SetMweClear), flagging the extract as typed.
    SetMweSubtypeClear,
    /// Append the token, then copy the chunk out.
    AddSetMwe,
    /// Append the token, copy the chunk out, discard it.
    AddSetMweClear,
    /// Append the token, copy the chunk out as typed.
    AddSetMweSubtype,
    /// Append the token, copy the chunk out as typed, discard it.
    AddSetMweSubtypeClear,
    /// Append the token, copy out as typed, discard, start again with the token.
    AddSetMweSubtypeClearAdd,
    /// Append the token only when a chunk is already open.
    Continue,
    /// Look the action up again in the next state, keyed by the tag that
    /// preceded the current chunk.
    Substate,
    /// Do nothing.
    Skip,
}

/// Buffer effects of an action, applied in field order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Effects {
    pub add_first: bool,
    pub emit: bool,
    pub typed: bool,
    pub embed: bool,
    pub clear: bool,
    pub add_after: bool,
}

impl Action {
    pub const ALL: [Action; 17] = [
        Self::AddToken,
        Self::ClearChunk,
        Self::ClearAdd,
        Self::SetMwe,
        Self::SetMweClear,
        Self::SetMweAdd,
        Self::SetMweAddEmbed,
        Self::SetMweSubtype,
        Self::SetMweSubtypeClear,
        Self::AddSetMwe,
        Self::AddSetMweClear,
        Self::AddSetMweSubtype,
        Self::AddSetMweSubtypeClear,
        Self::AddSetMweSubtypeClearAdd,
        Self::Continue,
        Self::Substate,
        Self::Skip,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::AddToken => "ADD_TOKEN",
            Self::ClearChunk => "CLEAR_CHUNK",
            Self::ClearAdd => "CLEAR_ADD",
            Self::SetMwe => "SET_MWE",
            Self::SetMweClear => "SET_MWE_CLEAR",
            Self::SetMweAdd => "SET_MWE_ADD",
            Self::SetMweAddEmbed => "SET_MWE_ADDEMBED",
            Self::SetMweSubtype => "SET_MWE_SUBTYPE",
            Self::SetMweSubtypeClear => "SET_MWE_SUBTYPE_CLEAR",
            Self::AddSetMwe => "ADD_SET_MWE",
            Self::AddSetMweClear => "ADD_SET_MWE_CLEAR",
            Self::AddSetMweSubtype => "ADD_SET_MWE_SUBTYPE",
            Self::AddSetMweSubtypeClear => "ADD_SET_MWE_SUBTYPE_CLEAR",
            Self::AddSetMweSubtypeClearAdd => "ADD_SET_MWE_SUBTYPE_CLEAR_ADD",
            Self::Continue => "CONTINUE",
            Self::Substate => "SUBSTATE",
            Self::Skip => "SKIP",
        }
    }

    /// Whether this action copies the chunk out as an extract.
    pub fn emits(self) -> bool {
        self.effects().emit
    }

    /// Decompose a plain buffer action into its effects.
    ///
    /// `Continue`, `Substate` and `Skip` depend on run state or on another
    /// lookup and have no fixed effects.
    pub(crate) fn effects(self) -> Effects {
        let none = Effects::default();
        match self {
            Self::AddToken => Effects { add_after: true, ..none },
            Self::ClearChunk => Effects { clear: true, ..none },
            Self::ClearAdd => Effects { clear: true, add_after: true, ..none },
            Self::SetMwe => Effects { emit: true, ..none },
            Self::SetMweClear => Effects { emit: true, clear: true, ..none },
            Self::SetMweAdd => Effects { emit: true, add_after: true, ..none },
            Self::SetMweAddEmbed => Effects {
                emit: true,
                embed: true,
                add_after: true,
                ..none
            },
            Self::SetMweSubtype => Effects { emit: true, typed: true, ..none },
            Self::SetMweSubtypeClear => Effects {
                emit: true,
                typed: true,
                clear: true,
                ..none
            },
            Self::AddSetMwe => Effects { add_first: true, emit: true, ..none },
            Self::AddSetMweClear => Effects {
                add_first: true,
                emit: true,
                clear: true,
                ..none
            },
            Self::AddSetMweSubtype => Effects {
                add_first: true,
                emit: true,
                typed: true,
                ..none
            },
            Self::AddSetMweSubtypeClear => Effects {
                add_first: true,
                emit: true,
                typed: true,
                clear: true,
                ..none
            },
            Self::AddSetMweSubtypeClearAdd => Effects {
                add_first: true,
                emit: true,
                typed: true,
                clear: true,
                add_after: true,
                ..none
            },
            Self::Continue | Self::Substate | Self::Skip => none,
        }
    }
}

impl FromStr for Action {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| ConfigError::UnknownAction {
                name: s.to_string(),
            })
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

//! Effects emitted by the reducer
//!
//! An effect is an instruction for the outside world. The reducer only
//! describes them; `runtime::EffectRunner` carries them out.

use crate::types::{Alias, Settings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the stored alias collection
    SaveAliases(Vec<Alias>),

    DeleteAlias(String),

    DeleteAllAliases,

    SaveNote { id: String, text: String },

    DeleteNote(String),

    SaveSettings(Settings),

    CopyToClipboard(String),

    /// Read the clock, then dispatch `Action::AliasCreated` for this id
    RequestTimestamp { alias_id: String },
}

impl Effect {
    /// Whether this effect writes to the store
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Effect::SaveAliases(_)
                | Effect::DeleteAlias(_)
                | Effect::DeleteAllAliases
                | Effect::SaveNote { .. }
                | Effect::DeleteNote(_)
                | Effect::SaveSettings(_)
        )
    }
}

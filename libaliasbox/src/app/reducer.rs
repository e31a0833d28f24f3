//! Reducer for state transitions
//!
//! `(AppState, Action) -> (AppState, Vec<Effect>)`
//!
//! The reducer computes the next state and describes the side effects that
//! should follow. It performs no I/O, never reads the clock and never fails;
//! persistence, clipboard and timestamps are the runtime's job.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::actions::Action;
use super::effects::Effect;
use super::state::AppState;
use crate::generator;
use crate::types::{Alias, Settings};

/// Apply an action to the state
///
/// Same inputs always give the same outputs: the random source used for
/// bare-host inputs is seeded from `state.seed`, which is advanced here.
pub fn reduce(state: AppState, action: Action) -> (AppState, Vec<Effect>) {
    let kind = action.kind();
    let (state, effects) = apply(state, action);
    tracing::trace!(action = kind, effects = effects.len(), "reduced");
    (state, effects)
}

fn apply(state: AppState, action: Action) -> (AppState, Vec<Effect>) {
    match action {
        Action::InputChanged(input_value) => (
            AppState {
                input_value,
                ..state
            },
            Vec::new(),
        ),

        Action::GenerateRequested => {
            let mut rng = StdRng::seed_from_u64(state.seed);
            let candidate = generator::generate(
                &state.input_value,
                state.taken_ids(),
                &state.settings.base_domain,
                &mut rng,
            );

            match candidate {
                Some(alias_id) => request_timestamp(state, alias_id, rng.gen()),
                None => (state, Vec::new()),
            }
        }

        Action::GenerateAdditionalRequested(base_id) => {
            if !state.contains(&base_id) {
                tracing::debug!(alias = %base_id, "generate additional for unknown alias ignored");
                return (state, Vec::new());
            }

            let alias_id = generator::generate_additional(&base_id, state.taken_ids());
            let seed = state.seed;
            request_timestamp(state, alias_id, seed)
        }

        Action::AliasCreated {
            alias_id,
            created_at,
        } => commit_alias(state, alias_id, created_at),

        Action::ClearAll => {
            let mut notes = state.notes;
            let mut effects = vec![Effect::DeleteAllAliases];
            for alias in &state.aliases {
                if notes.remove(&alias.id).is_some() {
                    effects.push(Effect::DeleteNote(alias.id.clone()));
                }
            }

            (
                AppState {
                    aliases: Vec::new(),
                    notes,
                    ..state
                },
                effects,
            )
        }

        Action::RemoveAlias(id) => {
            let mut aliases = state.aliases;
            aliases.retain(|alias| alias.id != id);

            let mut notes = state.notes;
            let mut effects = vec![Effect::DeleteAlias(id.clone())];
            if notes.remove(&id).is_some() {
                effects.push(Effect::DeleteNote(id));
            }

            (
                AppState {
                    aliases,
                    notes,
                    ..state
                },
                effects,
            )
        }

        Action::AliasesLoaded(loaded) => {
            // Duplicates from storage are kept as they are
            let mut aliases = state.aliases;
            aliases.extend(loaded);
            (AppState { aliases, ..state }, Vec::new())
        }

        Action::CopyRequested(text) => (state, vec![Effect::CopyToClipboard(text)]),

        Action::NoteChanged { id, text } => {
            let mut notes = state.notes;
            notes.insert(id.clone(), text.clone());
            (AppState { notes, ..state }, vec![Effect::SaveNote { id, text }])
        }

        Action::NoteCleared(id) => {
            let mut notes = state.notes;
            notes.remove(&id);
            (AppState { notes, ..state }, vec![Effect::DeleteNote(id)])
        }

        Action::NotesLoaded(entries) => {
            let notes: HashMap<String, String> = entries.into_iter().map(Into::into).collect();
            (AppState { notes, ..state }, Vec::new())
        }

        Action::AutoClipboardToggled(auto_clipboard_enabled) => {
            let settings = Settings {
                auto_clipboard_enabled,
                ..state.settings
            };
            save_settings(AppState { settings, ..state })
        }

        Action::BaseDomainSet(domain) => {
            if !generator::is_valid_domain(&domain) {
                tracing::debug!(domain = %domain, "invalid base domain ignored");
                return (state, Vec::new());
            }

            let settings = Settings {
                base_domain: generator::normalize_domain(&domain),
                ..state.settings
            };
            save_settings(AppState { settings, ..state })
        }

        Action::SettingsLoaded(Some(settings)) => {
            let settings = Settings {
                base_domain: generator::normalize_domain(&settings.base_domain),
                ..settings
            };
            (AppState { settings, ..state }, Vec::new())
        }

        Action::SettingsLoaded(None) => (state, Vec::new()),
    }
}

fn request_timestamp(state: AppState, alias_id: String, seed: u64) -> (AppState, Vec<Effect>) {
    let mut pending = state.pending;
    pending.push(alias_id.clone());

    (
        AppState {
            pending,
            seed,
            ..state
        },
        vec![Effect::RequestTimestamp { alias_id }],
    )
}

fn commit_alias(
    state: AppState,
    alias_id: String,
    created_at: chrono::DateTime<chrono::Utc>,
) -> (AppState, Vec<Effect>) {
    let mut pending = state.pending;
    if let Some(pos) = pending.iter().position(|id| id == &alias_id) {
        pending.remove(pos);
    }

    let mut aliases = state.aliases;
    let id = if aliases.iter().any(|alias| alias.id == alias_id) {
        let taken = aliases
            .iter()
            .map(|alias| alias.id.as_str())
            .chain(pending.iter().map(String::as_str));
        let fresh = generator::generate_additional(&alias_id, taken);
        tracing::warn!(alias = %alias_id, replacement = %fresh, "alias taken before commit");
        fresh
    } else {
        alias_id
    };

    aliases.push(Alias::new(id.clone(), created_at));

    let mut effects = vec![Effect::SaveAliases(aliases.clone())];
    if state.settings.auto_clipboard_enabled {
        effects.push(Effect::CopyToClipboard(id));
    }

    (
        AppState {
            aliases,
            pending,
            ..state
        },
        effects,
    )
}

fn save_settings(state: AppState) -> (AppState, Vec<Effect>) {
    let effect = Effect::SaveSettings(state.settings.clone());
    (state, vec![effect])
}

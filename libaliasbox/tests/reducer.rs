//! Reducer transitions
//!
//! Every action kind, plus the end-to-end scenarios for generation,
//! removal and clearing.

use chrono::{TimeZone, Utc};
use libaliasbox::app::{reduce, Action, AppState, Effect};
use libaliasbox::types::{Alias, NoteEntry, Settings};

fn at(minute: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, minute, 0).unwrap()
}

fn state_with(ids: &[&str]) -> AppState {
    let mut state = AppState::new();
    for (i, id) in ids.iter().enumerate() {
        state.aliases.push(Alias::new(*id, at(i as u32)));
    }
    state
}

/// Generate from `input` and commit immediately
fn generate(state: AppState, input: &str, minute: u32) -> (AppState, Vec<Effect>) {
    let (state, _) = reduce(state, Action::InputChanged(input.to_string()));
    let (state, effects) = reduce(state, Action::GenerateRequested);
    let alias_id = match effects.as_slice() {
        [Effect::RequestTimestamp { alias_id }] => alias_id.clone(),
        other => panic!("expected a timestamp request, got {:?}", other),
    };
    reduce(
        state,
        Action::AliasCreated {
            alias_id,
            created_at: at(minute),
        },
    )
}

#[test]
fn test_input_changed_only_touches_input() {
    let state = state_with(&["a@disposable.io"]);
    let (new_state, effects) = reduce(state.clone(), Action::InputChanged("shop".to_string()));

    assert_eq!(new_state.input_value, "shop");
    assert_eq!(new_state.aliases, state.aliases);
    assert!(effects.is_empty());
}

#[test]
fn test_explicit_host_scenario() {
    let (state, _) = generate(AppState::new(), "a@b.com", 0);
    assert_eq!(state.aliases[0].id, "a@b.com");
}

#[test]
fn test_base_domain_scenario() {
    let (state, _) = generate(AppState::new(), "a", 0);
    assert_eq!(state.aliases[0].id, "a@disposable.io");
}

#[test]
fn test_generate_twice_yields_distinct_ids() {
    let (state, _) = generate(AppState::new(), "a", 0);
    let (state, _) = generate(state, "a", 1);

    assert_eq!(state.aliases.len(), 2);
    assert_eq!(state.aliases[0].id, "a@disposable.io");
    assert_eq!(state.aliases[1].id, "a-2@disposable.io");
}

#[test]
fn test_generate_twice_before_commit_yields_distinct_ids() {
    let (state, _) = reduce(AppState::new(), Action::InputChanged("a".to_string()));
    let (state, first) = reduce(state, Action::GenerateRequested);
    let (state, second) = reduce(state, Action::GenerateRequested);

    assert_ne!(first, second);
    assert_eq!(state.pending, vec!["a@disposable.io", "a-2@disposable.io"]);
}

#[test]
fn test_generation_does_not_clear_input() {
    let (state, _) = generate(AppState::new(), "shop", 0);
    assert_eq!(state.input_value, "shop");
}

#[test]
fn test_commit_survives_unrelated_changes() {
    let (state, _) = reduce(AppState::new(), Action::InputChanged("a".to_string()));
    let (state, _) = reduce(state, Action::GenerateRequested);

    // User keeps working while the timestamp is outstanding
    let (state, _) = reduce(state, Action::InputChanged("something else".to_string()));
    let (state, _) = reduce(state, Action::AutoClipboardToggled(false));
    let (state, _) = reduce(state, Action::BaseDomainSet("other.org".to_string()));

    let (state, effects) = reduce(
        state,
        Action::AliasCreated {
            alias_id: "a@disposable.io".to_string(),
            created_at: at(5),
        },
    );

    assert_eq!(state.aliases, vec![Alias::new("a@disposable.io", at(5))]);
    assert!(state.pending.is_empty());
    assert_eq!(effects, vec![Effect::SaveAliases(state.aliases.clone())]);
}

#[test]
fn test_commit_of_taken_id_is_disambiguated() {
    let (state, _) = reduce(AppState::new(), Action::InputChanged("a".to_string()));
    let (state, _) = reduce(state, Action::GenerateRequested);

    // Same id shows up from storage before the commit lands
    let (state, _) = reduce(
        state,
        Action::AliasesLoaded(vec![Alias::new("a@disposable.io", at(0))]),
    );
    let (state, _) = reduce(
        state,
        Action::AliasCreated {
            alias_id: "a@disposable.io".to_string(),
            created_at: at(1),
        },
    );

    let ids: Vec<&str> = state.aliases.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a@disposable.io", "a-2@disposable.io"]);
}

#[test]
fn test_commit_persists_and_copies_when_enabled() {
    let (state, effects) = generate(AppState::new(), "shop", 0);

    assert_eq!(
        effects,
        vec![
            Effect::SaveAliases(state.aliases.clone()),
            Effect::CopyToClipboard("shop@disposable.io".to_string()),
        ]
    );
}

#[test]
fn test_commit_skips_copy_when_disabled() {
    let (state, _) = reduce(AppState::new(), Action::AutoClipboardToggled(false));
    let (_, effects) = generate(state, "shop", 0);

    assert_eq!(effects.len(), 1);
    assert!(matches!(effects[0], Effect::SaveAliases(_)));
}

#[test]
fn test_generate_additional() {
    let state = state_with(&["shop@disposable.io"]);
    let (state, effects) = reduce(
        state,
        Action::GenerateAdditionalRequested("shop@disposable.io".to_string()),
    );

    assert_eq!(
        effects,
        vec![Effect::RequestTimestamp {
            alias_id: "shop-2@disposable.io".to_string()
        }]
    );
    assert_eq!(state.pending, vec!["shop-2@disposable.io"]);
}

#[test]
fn test_generate_additional_for_unknown_alias_is_noop() {
    let state = state_with(&["shop@disposable.io"]);
    let (new_state, effects) = reduce(
        state.clone(),
        Action::GenerateAdditionalRequested("nope@disposable.io".to_string()),
    );

    assert_eq!(new_state, state);
    assert!(effects.is_empty());
}

#[test]
fn test_clear_all_empties_aliases_and_deletes_storage() {
    let mut state = state_with(&["a@x.io", "b@x.io", "c@x.io"]);
    state.notes.insert("b@x.io".to_string(), "newsletter".to_string());
    state.notes.insert("gone@x.io".to_string(), "orphan".to_string());

    let (state, effects) = reduce(state, Action::ClearAll);

    assert!(state.aliases.is_empty());
    assert_eq!(
        effects,
        vec![
            Effect::DeleteAllAliases,
            Effect::DeleteNote("b@x.io".to_string()),
        ]
    );
    // Pre-existing orphans are tolerated
    assert_eq!(state.note("gone@x.io"), Some("orphan"));
    assert_eq!(state.note("b@x.io"), None);
}

#[test]
fn test_remove_alias() {
    let mut state = state_with(&["a@x.io", "b@x.io"]);
    state.notes.insert("a@x.io".to_string(), "bank".to_string());

    let (state, effects) = reduce(state, Action::RemoveAlias("a@x.io".to_string()));

    assert_eq!(state.aliases.len(), 1);
    assert_eq!(state.aliases[0].id, "b@x.io");
    assert!(state.notes.is_empty());
    assert_eq!(
        effects,
        vec![
            Effect::DeleteAlias("a@x.io".to_string()),
            Effect::DeleteNote("a@x.io".to_string()),
        ]
    );
}

#[test]
fn test_remove_alias_without_note() {
    let state = state_with(&["a@x.io"]);
    let (state, effects) = reduce(state, Action::RemoveAlias("a@x.io".to_string()));

    assert!(state.aliases.is_empty());
    assert_eq!(effects, vec![Effect::DeleteAlias("a@x.io".to_string())]);
}

#[test]
fn test_aliases_loaded_appends_without_dedup() {
    let state = state_with(&["a@x.io"]);
    let loaded = vec![Alias::new("a@x.io", at(9)), Alias::new("b@x.io", at(9))];

    let (state, effects) = reduce(state, Action::AliasesLoaded(loaded));

    let ids: Vec<&str> = state.aliases.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a@x.io", "a@x.io", "b@x.io"]);
    assert!(effects.is_empty());
}

#[test]
fn test_copy_requested() {
    let (state, effects) = reduce(AppState::new(), Action::CopyRequested("a@x.io".to_string()));

    assert_eq!(state, AppState::new());
    assert_eq!(effects, vec![Effect::CopyToClipboard("a@x.io".to_string())]);
}

#[test]
fn test_auto_clipboard_toggled_persists_settings() {
    let (state, effects) = reduce(AppState::new(), Action::AutoClipboardToggled(false));

    assert!(!state.settings.auto_clipboard_enabled);
    assert_eq!(effects, vec![Effect::SaveSettings(state.settings.clone())]);
}

#[test]
fn test_note_changed_and_cleared() {
    let state = state_with(&["a@x.io"]);
    let (state, effects) = reduce(
        state,
        Action::NoteChanged {
            id: "a@x.io".to_string(),
            text: "used for the gym".to_string(),
        },
    );

    assert_eq!(state.note("a@x.io"), Some("used for the gym"));
    assert_eq!(
        effects,
        vec![Effect::SaveNote {
            id: "a@x.io".to_string(),
            text: "used for the gym".to_string(),
        }]
    );

    let (state, effects) = reduce(state, Action::NoteCleared("a@x.io".to_string()));
    assert_eq!(state.note("a@x.io"), None);
    assert_eq!(effects, vec![Effect::DeleteNote("a@x.io".to_string())]);
}

#[test]
fn test_notes_loaded_replaces_map() {
    let mut state = AppState::new();
    state.notes.insert("old@x.io".to_string(), "stale".to_string());

    let (state, effects) = reduce(
        state,
        Action::NotesLoaded(vec![
            NoteEntry::new("a@x.io", "one"),
            NoteEntry::new("b@x.io", "two"),
        ]),
    );

    assert_eq!(state.notes.len(), 2);
    assert_eq!(state.note("old@x.io"), None);
    assert_eq!(state.note("b@x.io"), Some("two"));
    assert!(effects.is_empty());
}

#[test]
fn test_settings_loaded() {
    let stored = Settings {
        auto_clipboard_enabled: false,
        base_domain: "example.org".to_string(),
    };

    let (state, effects) = reduce(AppState::new(), Action::SettingsLoaded(Some(stored.clone())));
    assert_eq!(state.settings, stored);
    assert!(effects.is_empty());

    let (state, _) = reduce(state, Action::SettingsLoaded(None));
    assert_eq!(state.settings, stored);
}

#[test]
fn test_base_domain_set() {
    let (state, effects) = reduce(AppState::new(), Action::BaseDomainSet(" example.org ".to_string()));

    assert_eq!(state.settings.base_domain, "example.org");
    assert_eq!(effects, vec![Effect::SaveSettings(state.settings.clone())]);

    let (state, _) = generate(state, "a", 0);
    assert_eq!(state.aliases[0].id, "a@example.org");
}

#[test]
fn test_invalid_base_domain_ignored() {
    let state = AppState::new();
    for domain in ["", "  ", "a@b.com", "two words"] {
        let (new_state, effects) = reduce(state.clone(), Action::BaseDomainSet(domain.to_string()));
        assert_eq!(new_state, state);
        assert!(effects.is_empty());
    }
}

//! UI reducer
//!
//! Pure like the core reducer: keys become UI actions, UI actions become
//! core actions, and the core effects are handed back to the caller to
//! run. Nothing here touches the terminal, storage or clipboard.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use libaliasbox::generator::is_valid_domain;
use libaliasbox::{Action, Effect};

use super::actions::UiAction;
use super::state::{Focus, UiState};

pub fn reduce(state: UiState, action: UiAction) -> (UiState, Vec<Effect>) {
    match action {
        UiAction::Key(key) => handle_key(state, key),
        UiAction::Tick | UiAction::Resize(_, _) => (state, Vec::new()),

        UiAction::TextChanged(text) => match state.focus {
            Focus::Input => reduce_core(state, Action::InputChanged(text)),
            Focus::Note | Focus::Domain => (UiState { draft: text, ..state }, Vec::new()),
            Focus::List => (state, Vec::new()),
        },

        UiAction::Core(action) => reduce_core(state, action),

        UiAction::FocusNext => {
            let focus = match state.focus {
                Focus::Input => Focus::List,
                Focus::List => Focus::Input,
                editing => editing,
            };
            (UiState { focus, ..state }, Vec::new())
        }

        UiAction::SelectPrevious => {
            let selected = state.selected.saturating_sub(1);
            (UiState { selected, ..state }, Vec::new())
        }

        UiAction::SelectNext => {
            let selected = clamp_selection(state.selected + 1, state.core.aliases.len());
            (UiState { selected, ..state }, Vec::new())
        }

        UiAction::BeginNoteEdit => match state.selected_alias().map(|alias| alias.id.clone()) {
            Some(id) => {
                let draft = state.core.note(&id).unwrap_or_default().to_string();
                (
                    UiState {
                        focus: Focus::Note,
                        draft,
                        note_target: Some(id),
                        ..state
                    },
                    Vec::new(),
                )
            }
            None => (state, Vec::new()),
        },

        UiAction::BeginDomainEdit => {
            let draft = state.core.settings.base_domain.clone();
            (
                UiState {
                    focus: Focus::Domain,
                    draft,
                    ..state
                },
                Vec::new(),
            )
        }

        UiAction::CommitEdit => commit_edit(state),

        UiAction::CancelEdit if state.focus.is_editing() => (leave_editor(state), Vec::new()),
        UiAction::CancelEdit => (state, Vec::new()),

        UiAction::ToggleHelp => (
            UiState {
                help_visible: !state.help_visible,
                ..state
            },
            Vec::new(),
        ),

        UiAction::Quit => (
            UiState {
                should_quit: true,
                ..state
            },
            Vec::new(),
        ),
    }
}

/// Run a core action and update selection and status around it
fn reduce_core(state: UiState, action: Action) -> (UiState, Vec<Effect>) {
    let created = matches!(action, Action::AliasCreated { .. });
    let message = status_before(&state.core, &action);

    let (core, effects) = libaliasbox::reduce(state.core, action);

    let selected = if created {
        core.aliases.len().saturating_sub(1)
    } else {
        clamp_selection(state.selected, core.aliases.len())
    };

    let status = if created {
        core.aliases.last().map(|alias| {
            let copied = effects
                .iter()
                .any(|effect| matches!(effect, Effect::CopyToClipboard(_)));
            if copied {
                format!("Created {} (copied)", alias.id)
            } else {
                format!("Created {}", alias.id)
            }
        })
    } else {
        message
    };

    (
        UiState {
            core,
            selected,
            status: status.or(state.status),
            ..state
        },
        effects,
    )
}

/// Feedback for an action, judged against the state it applies to
fn status_before(core: &libaliasbox::AppState, action: &Action) -> Option<String> {
    match action {
        Action::GenerateRequested if core.input_value.trim().is_empty() => {
            Some("Type a name or address first".to_string())
        }
        Action::CopyRequested(text) => Some(format!("Copied {}", text)),
        Action::RemoveAlias(id) if core.contains(id) => Some(format!("Removed {}", id)),
        Action::ClearAll if !core.aliases.is_empty() => {
            Some(format!("Cleared {} aliases", core.aliases.len()))
        }
        Action::NoteChanged { .. } => Some("Note saved".to_string()),
        Action::NoteCleared(_) => Some("Note cleared".to_string()),
        Action::AutoClipboardToggled(true) => Some("Auto-copy on".to_string()),
        Action::AutoClipboardToggled(false) => Some("Auto-copy off".to_string()),
        Action::BaseDomainSet(domain) if is_valid_domain(domain) => {
            Some(format!("Base domain set to {}", domain.trim()))
        }
        Action::BaseDomainSet(domain) => Some(format!("'{}' is not a valid domain", domain)),
        _ => None,
    }
}

fn commit_edit(state: UiState) -> (UiState, Vec<Effect>) {
    let focus = state.focus;
    let draft = state.draft.clone();
    let target = state.note_target.clone();
    let state = leave_editor(state);

    match (focus, target) {
        (Focus::Note, Some(id)) => {
            let text = draft.trim();
            if text.is_empty() {
                if state.core.note(&id).is_none() {
                    return (state, Vec::new());
                }
                reduce_core(state, Action::NoteCleared(id))
            } else {
                let text = text.to_string();
                reduce_core(state, Action::NoteChanged { id, text })
            }
        }
        (Focus::Domain, _) => reduce_core(state, Action::BaseDomainSet(draft)),
        _ => (state, Vec::new()),
    }
}

fn leave_editor(state: UiState) -> UiState {
    UiState {
        focus: Focus::List,
        draft: String::new(),
        note_target: None,
        ..state
    }
}

fn clamp_selection(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

/// Handle keyboard input
fn handle_key(state: UiState, key: KeyEvent) -> (UiState, Vec<Effect>) {
    // Some terminals report releases too
    if key.kind != KeyEventKind::Press {
        return (state, Vec::new());
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return reduce(state, UiAction::Quit),
        (KeyCode::F(1), _) => return reduce(state, UiAction::ToggleHelp),
        _ => {}
    }

    if state.help_visible {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('q') => reduce(state, UiAction::ToggleHelp),
            _ => (state, Vec::new()),
        };
    }

    match state.focus {
        Focus::Input => match key.code {
            KeyCode::Enter => reduce(state, UiAction::Core(Action::GenerateRequested)),
            KeyCode::Tab | KeyCode::Esc | KeyCode::Down => reduce(state, UiAction::FocusNext),
            _ => (state, Vec::new()),
        },
        Focus::List => handle_list_key(state, key),
        Focus::Note | Focus::Domain => match key.code {
            KeyCode::Enter => reduce(state, UiAction::CommitEdit),
            KeyCode::Esc => reduce(state, UiAction::CancelEdit),
            _ => (state, Vec::new()),
        },
    }
}

fn handle_list_key(state: UiState, key: KeyEvent) -> (UiState, Vec<Effect>) {
    let selected_id = state.selected_alias().map(|alias| alias.id.clone());

    let action = match (key.code, selected_id) {
        (KeyCode::Up | KeyCode::Char('k'), _) => UiAction::SelectPrevious,
        (KeyCode::Down | KeyCode::Char('j'), _) => UiAction::SelectNext,
        (KeyCode::Tab | KeyCode::Char('i'), _) => UiAction::FocusNext,
        (KeyCode::Char('q'), _) => UiAction::Quit,
        (KeyCode::Char('b'), _) => UiAction::BeginDomainEdit,
        (KeyCode::Char('t'), _) => UiAction::Core(Action::AutoClipboardToggled(
            !state.core.settings.auto_clipboard_enabled,
        )),
        (KeyCode::Char('D'), _) => UiAction::Core(Action::ClearAll),
        (KeyCode::Enter | KeyCode::Char('c'), Some(id)) => UiAction::Core(Action::CopyRequested(id)),
        (KeyCode::Char('a'), Some(id)) => UiAction::Core(Action::GenerateAdditionalRequested(id)),
        (KeyCode::Char('d') | KeyCode::Delete, Some(id)) => UiAction::Core(Action::RemoveAlias(id)),
        (KeyCode::Char('n'), Some(_)) => UiAction::BeginNoteEdit,
        _ => return (state, Vec::new()),
    };

    reduce(state, action)
}

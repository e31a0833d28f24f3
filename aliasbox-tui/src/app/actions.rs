//! Actions for the UI reducer

use crossterm::event::KeyEvent;
use libaliasbox::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    // === UI Events ===
    /// Key press not consumed by the text editor
    Key(KeyEvent),

    /// Periodic tick
    Tick,

    /// Terminal resize
    Resize(u16, u16),

    /// Text of the focused editor changed
    TextChanged(String),

    // === Core ===
    /// Forward an action to the core reducer
    Core(Action),

    // === Navigation ===
    /// Switch between the input field and the alias list
    FocusNext,

    SelectPrevious,

    SelectNext,

    // === Editing ===
    /// Start editing the note of the selected alias
    BeginNoteEdit,

    BeginDomainEdit,

    /// Apply the edit buffer and return to the list
    CommitEdit,

    /// Drop the edit buffer and return to the list
    CancelEdit,

    // === App ===
    ToggleHelp,

    Quit,
}

//! Text editor widget state
//!
//! A single `TextArea` is reused for the input field, the note editor and
//! the base domain editor. It is rebuilt whenever focus moves so it always
//! starts from the text the reducer holds.

use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders};
use tui_textarea::{CursorMove, TextArea};

use crate::app::{Focus, UiState};

pub struct Editor {
    textarea: TextArea<'static>,
    focus: Focus,
}

impl Editor {
    pub fn new(state: &UiState) -> Self {
        Self {
            textarea: build(state),
            focus: state.focus,
        }
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    /// Feed a key to the textarea and return the resulting text
    pub fn input(&mut self, key: crossterm::event::KeyEvent) -> String {
        self.textarea.input(key);
        self.text()
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join("")
    }

    /// Rebuild after focus changes or when the reducer rewrote the text
    pub fn sync(&mut self, state: &UiState) {
        if self.focus != state.focus || self.text() != state.editor_text() {
            self.textarea = build(state);
            self.focus = state.focus;
        }
    }
}

fn build(state: &UiState) -> TextArea<'static> {
    let mut textarea = TextArea::new(vec![state.editor_text().to_string()]);
    textarea.move_cursor(CursorMove::End);
    textarea.set_cursor_line_style(Style::default());

    let (title, placeholder) = match state.focus {
        Focus::Input | Focus::List => (" New alias ", "name, or name@host (Enter to generate)"),
        Focus::Note => (" Note ", "what is this alias for? (Enter to save, empty clears)"),
        Focus::Domain => (" Base domain ", "example.org (Enter to save)"),
    };
    textarea.set_placeholder_text(placeholder);

    let border = if state.focus.accepts_text() {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    textarea.set_block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );

    textarea
}

//! UI rendering
//!
//! Renders `UiState` with ratatui. Rendering reads state only; the editor
//! is passed in because `TextArea` keeps its own cursor.

pub mod aliases;
pub mod editor;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tui_textarea::TextArea;

use crate::app::{Focus, UiState};

pub use editor::Editor;

/// Render the whole screen
pub fn render(frame: &mut Frame, state: &UiState, editor: &TextArea) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Input
            Constraint::Min(5),    // Aliases
            Constraint::Length(3), // Status
        ])
        .split(frame.area());

    render_header(frame, chunks[0], state);

    if state.focus == Focus::Input {
        frame.render_widget(editor, chunks[1]);
    } else {
        render_input(frame, chunks[1], state);
    }

    aliases::render(frame, chunks[2], state, editor);
    render_status_bar(frame, chunks[3], state);

    if state.focus == Focus::Domain {
        let popup_area = centered_rect(50, 3, frame.area());
        frame.render_widget(Clear, popup_area);
        frame.render_widget(editor, popup_area);
    }

    if state.help_visible {
        render_help_overlay(frame, frame.area());
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &UiState) {
    let settings = &state.core.settings;
    let mut spans = vec![
        Span::styled("aliasbox", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  base: "),
        Span::styled(settings.base_domain.as_str(), Style::default().fg(Color::Cyan)),
        Span::raw("  auto-copy: "),
        if settings.auto_clipboard_enabled {
            Span::styled("on", Style::default().fg(Color::Green))
        } else {
            Span::styled("off", Style::default().fg(Color::DarkGray))
        },
    ];
    if state.core.is_generating() {
        spans.push(Span::styled("  generating...", Style::default().fg(Color::Yellow)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(frame: &mut Frame, area: Rect, state: &UiState) {
    let text = if state.core.input_value.is_empty() {
        Span::styled("Tab to type a new alias", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(state.core.input_value.as_str())
    };

    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .title(" New alias ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(input, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &UiState) {
    let hints = match state.focus {
        Focus::Input => "Enter: generate | Tab: list | F1: help | Ctrl+C: quit",
        Focus::List => "c: copy | a: another | n: note | d: remove | D: clear all | b: domain | t: auto-copy | q: quit",
        Focus::Note | Focus::Domain => "Enter: save | Esc: cancel",
    };

    let message = match &state.status {
        Some(message) => Span::styled(message.as_str(), Style::default().fg(Color::Green)),
        None => Span::raw(""),
    };

    let status = Paragraph::new(vec![
        Line::from(message),
        Line::from(Span::styled(hints, Style::default().fg(Color::Gray))),
    ])
    .block(Block::default().borders(Borders::TOP));

    frame.render_widget(status, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 20, area);

    let help_text = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("Input:"),
        Line::from("  Enter    - Generate alias"),
        Line::from("  Tab      - Go to list"),
        Line::from(""),
        Line::from("List:"),
        Line::from("  Up/Down  - Select"),
        Line::from("  Enter, c - Copy"),
        Line::from("  a        - Generate another for this alias"),
        Line::from("  n        - Edit note"),
        Line::from("  d        - Remove"),
        Line::from("  D        - Clear all"),
        Line::from("  b        - Set base domain"),
        Line::from("  t        - Toggle auto-copy"),
        Line::from("  q        - Quit"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

/// Rectangle of `percent_x` width and `height` rows centered in `r`
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

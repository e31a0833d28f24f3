//! Alias list and detail pane

use chrono::Local;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tui_textarea::TextArea;

use crate::app::{Focus, UiState};

pub fn render(frame: &mut Frame, area: Rect, state: &UiState, editor: &TextArea) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_list(frame, chunks[0], state);

    if state.focus == Focus::Note {
        frame.render_widget(editor, chunks[1]);
    } else {
        render_detail(frame, chunks[1], state);
    }
}

fn render_list(frame: &mut Frame, area: Rect, state: &UiState) {
    let items: Vec<ListItem> = state
        .core
        .aliases
        .iter()
        .map(|alias| {
            let mut spans = vec![Span::raw(alias.id.as_str())];
            if state.core.note(&alias.id).is_some() {
                spans.push(Span::styled(" *", Style::default().fg(Color::Cyan)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let border = if state.focus == Focus::List {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" Aliases ({}) ", state.core.aliases.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !state.core.aliases.is_empty() {
        list_state.select(Some(state.selected));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_detail(frame: &mut Frame, area: Rect, state: &UiState) {
    let block = Block::default().title(" Details ").borders(Borders::ALL);

    let lines = match state.selected_alias() {
        Some(alias) => {
            let created = alias
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string();
            let note = match state.core.note(&alias.id) {
                Some(note) => Span::raw(note),
                None => Span::styled("no note (n to add)", Style::default().fg(Color::DarkGray)),
            };

            vec![
                Line::from(Span::styled(alias.id.as_str(), Style::default().add_modifier(Modifier::BOLD))),
                Line::from(format!("created {}", created)),
                Line::from(""),
                Line::from(note),
            ]
        }
        None => vec![Line::from(Span::styled(
            "No aliases yet",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let detail = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(detail, area);
}

//! Output formatting for `aliasbox list`

use std::fmt::Write as _;

use chrono::{DateTime, Local, Utc};
use clap::ValueEnum;
use libaliasbox::AppState;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, one alias per line
    Text,
    /// JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

/// An alias with its note, as printed by `list`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

pub fn entries(state: &AppState) -> Vec<ListEntry> {
    state
        .aliases
        .iter()
        .map(|alias| ListEntry {
            id: alias.id.clone(),
            created_at: alias.created_at,
            note: state.note(&alias.id).map(str::to_string),
        })
        .collect()
}

pub fn render(entries: &[ListEntry], format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(entries)),
        OutputFormat::Json => serde_json::to_string_pretty(entries).map(|s| s + "\n"),
        OutputFormat::Jsonl => {
            let mut out = String::new();
            for entry in entries {
                out.push_str(&serde_json::to_string(entry)?);
                out.push('\n');
            }
            Ok(out)
        }
    }
}

fn render_text(entries: &[ListEntry]) -> String {
    let width = entries.iter().map(|e| e.id.len()).max().unwrap_or(0);

    let mut out = String::new();
    for entry in entries {
        let created = entry.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        let line = match &entry.note {
            Some(note) => format!("{:width$}  {}  {}", entry.id, created, note),
            None => format!("{:width$}  {}", entry.id, created),
        };
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use libaliasbox::Alias;

    fn state() -> AppState {
        let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let mut state = AppState::new();
        state.aliases.push(Alias::new("shop@disposable.io", created_at));
        state.aliases.push(Alias::new("a@b.com", created_at));
        state
            .notes
            .insert("a@b.com".to_string(), "bank".to_string());
        state
    }

    #[test]
    fn test_entries_attach_notes() {
        let entries = entries(&state());

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].note, None);
        assert_eq!(entries[1].note.as_deref(), Some("bank"));
    }

    #[test]
    fn test_text_lines_align() {
        let out = render(&entries(&state()), OutputFormat::Text).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("shop@disposable.io  "));
        assert!(lines[1].starts_with("a@b.com             "));
        assert!(lines[1].ends_with("  bank"));
    }

    #[test]
    fn test_json_shape() {
        let out = render(&entries(&state()), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value[0]["id"], "shop@disposable.io");
        assert_eq!(value[0]["createdAt"], "2025-03-01T12:00:00Z");
        assert!(value[0].get("note").is_none());
        assert_eq!(value[1]["note"], "bank");
    }

    #[test]
    fn test_jsonl_one_object_per_line() {
        let out = render(&entries(&state()), OutputFormat::Jsonl).unwrap();

        for line in out.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["id"].is_string());
        }
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_empty_renders_nothing() {
        assert_eq!(render(&[], OutputFormat::Text).unwrap(), "");
        assert_eq!(render(&[], OutputFormat::Jsonl).unwrap(), "");
    }
}

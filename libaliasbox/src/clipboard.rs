//! Clipboard collaborator
//!
//! Copies are fire-and-forget: there is no confirmation and failures are
//! only logged.

use std::fmt;
use std::io;
use std::sync::Mutex;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use crossterm::{execute, Command};

pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str);
}

/// Copies through the terminal with an OSC 52 escape sequence
///
/// Works over SSH and inside multiplexers that pass OSC 52 through. The
/// escape is written to stdout, so only use this when stdout is a terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn copy(&self, text: &str) {
        let result = execute!(io::stdout(), SetClipboard::new(text));

        match result {
            Ok(()) => tracing::debug!(chars = text.chars().count(), "copied to clipboard"),
            Err(e) => tracing::warn!(error = %e, "clipboard copy failed"),
        }
    }
}

/// OSC 52 "set clipboard" escape: `ESC ] 52 ; c ; <base64> BEL`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetClipboard {
    payload: String,
}

impl SetClipboard {
    pub fn new(text: &str) -> Self {
        Self {
            payload: BASE64.encode(text),
        }
    }
}

impl Command for SetClipboard {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b]52;c;{}\x07", self.payload)
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "OSC 52 needs an ANSI terminal",
        ))
    }
}

/// Drops every copy
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopClipboard;

impl Clipboard for NoopClipboard {
    fn copy(&self, text: &str) {
        tracing::debug!(text, "clipboard unavailable, copy dropped");
    }
}

/// Records copies in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    copies: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything copied so far, oldest first
    pub fn copies(&self) -> Vec<String> {
        match self.copies.lock() {
            Ok(copies) => copies.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last(&self) -> Option<String> {
        self.copies().pop()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&self, text: &str) {
        match self.copies.lock() {
            Ok(mut copies) => copies.push(text.to_string()),
            Err(poisoned) => poisoned.into_inner().push(text.to_string()),
        }
    }
}

//! aliasbox - disposable email aliases on your own base domain
//!
//! This library holds everything the front ends share: alias generation,
//! the reducer that owns application state, the effect runtime, storage,
//! clipboard access, configuration and logging.

pub mod app;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod runtime;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use app::{reduce, Action, AppState, Effect};
pub use config::Config;
pub use error::{AliasboxError, Result};
pub use runtime::EffectRunner;
pub use store::Store;
pub use types::{Alias, NoteEntry, Settings};

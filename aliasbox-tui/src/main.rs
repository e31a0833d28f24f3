//! aliasbox-tui - terminal UI for aliasbox
//!
//! Generate, copy and annotate disposable email aliases. Works over SSH:
//! copies go through the terminal with OSC 52.

use std::process;
use std::sync::Arc;

use aliasbox_tui::app::event::{route_key, EventHandler, KeyRoute, TuiEvent};
use aliasbox_tui::session::{apply, drain, finish};
use aliasbox_tui::terminal::{install_panic_hook, TerminalGuard, Tui};
use aliasbox_tui::ui::{self, Editor};
use aliasbox_tui::{Result, UiAction, UiState};
use libaliasbox::clipboard::Osc52Clipboard;
use libaliasbox::config::resolve_data_path;
use libaliasbox::logging::config_from_env;
use libaliasbox::{AppState, Config, EffectRunner};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    // Log to a file so output never lands on the screen
    let log_path = resolve_data_path()?.join("aliasbox-tui.log");
    config_from_env("info").with_file(log_path).init()?;

    let config = Config::load_or_default()?;
    let runner = EffectRunner::from_config(&config, false, Arc::new(Osc52Clipboard))?;
    runner.load_initial();

    let core = AppState::with_settings(config.initial_settings()).with_seed(rand::random());
    let state = UiState::new(core, config.ui.tick_rate_ms);

    install_panic_hook();
    let mut guard = TerminalGuard::enter()?;
    let result = run_app(guard.terminal(), &runner, state);
    drop(guard);

    match result {
        Ok(state) => {
            finish(runner, state);
            Ok(())
        }
        Err(e) => {
            runner.shutdown();
            Err(e)
        }
    }
}

fn run_app(terminal: &mut Tui, runner: &EffectRunner, mut state: UiState) -> Result<UiState> {
    let events = EventHandler::new(state.tick_rate_ms);
    let mut editor = Editor::new(&state);

    loop {
        terminal.draw(|frame| ui::render(frame, &state, editor.textarea()))?;

        let action = match events.next()? {
            TuiEvent::Key(key) if route_key(&state, &key) == KeyRoute::Editor => {
                UiAction::TextChanged(editor.input(key))
            }
            other => other.into(),
        };
        state = apply(runner, state, action);

        // Loaded collections and commits from the effect runtime
        state = drain(runner, state);

        editor.sync(&state);

        if state.should_quit {
            return Ok(state);
        }
    }
}

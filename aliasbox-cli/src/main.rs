//! aliasbox - disposable email aliases from the command line
//!
//! Each invocation loads the stored aliases, applies one command through
//! the same reducer the TUI uses, and waits for the writes to land.

mod output;

use std::io::{self, IsTerminal, Read};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use libaliasbox::clipboard::{Clipboard, NoopClipboard, Osc52Clipboard};
use libaliasbox::config::resolve_config_path;
use libaliasbox::generator::is_valid_domain;
use libaliasbox::logging::{LogFormat, LoggingConfig};
use libaliasbox::{Action, AliasboxError, AppState, Config, EffectRunner};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "aliasbox")]
#[command(version)]
#[command(about = "Generate and manage disposable email aliases")]
#[command(long_about = "\
aliasbox - Generate and manage disposable email aliases

DESCRIPTION:
    aliasbox turns a name into a unique address on your base domain, or
    keeps the host you give it. Aliases are stored locally together with
    optional notes, and new aliases are copied to the clipboard (OSC 52)
    when auto-copy is on and stdout is a terminal.

USAGE EXAMPLES:
    # New alias on the base domain
    aliasbox new shop

    # Keep an explicit host
    aliasbox new newsletter@example.org

    # Another alias next to an existing one
    aliasbox more shop@disposable.io

    # Remember what an alias is for
    aliasbox note shop@disposable.io \"online groceries\"

    # Scripting
    aliasbox list --format json | jq -r '.[].id'

CONFIGURATION:
    Configuration file: ~/.config/aliasbox/config.toml
    Database location:  ~/.local/share/aliasbox/aliases.db

    Override with environment variables:
        ALIASBOX_CONFIG     - Path to config file
        ALIASBOX_LOG_FORMAT - Log format (text, json, pretty)
        ALIASBOX_LOG_LEVEL  - Log level (error, warn, info, debug, trace)

EXIT CODES:
    0 - Success
    1 - Configuration, database or runtime error
    2 - Invalid command line
    3 - Invalid input (blank input, unknown alias, bad domain)
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Keep everything in memory; nothing is read from or written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format: text, json or pretty
    #[arg(long, global = true, env = "ALIASBOX_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a new alias and print it
    New {
        /// Name or address (reads the first line of stdin if not provided)
        input: Option<String>,
    },

    /// Generate another alias next to an existing one
    More {
        /// Existing alias
        id: String,
    },

    /// List aliases
    List {
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Remove an alias and its note
    Rm {
        id: String,
    },

    /// Remove every alias
    Clear,

    /// Set or clear the note of an alias
    Note {
        id: String,

        /// Note text; omit to clear the note
        text: Option<String>,
    },

    /// Copy an alias to the clipboard
    Copy {
        id: String,
    },

    /// Show or set the base domain
    Domain {
        domain: Option<String>,
    },

    /// Show or set automatic copying of new aliases
    AutoClipboard {
        #[arg(value_enum)]
        state: Option<Toggle>,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Toggle {
    On,
    Off,
}

fn main() {
    let cli = Cli::parse();

    let level = std::env::var("ALIASBOX_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
    let logging = LoggingConfig::new(cli.log_format, level, cli.verbose);
    if let Err(e) = logging.init() {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<AliasboxError>()
            .map(AliasboxError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    tracing::debug!(command = ?cli.command, "aliasbox started");

    if let Commands::Init { force } = cli.command {
        return cmd_init(force);
    }

    let config = Config::load_or_default().context("Failed to load configuration")?;

    // OSC 52 escapes only make sense on a terminal
    let clipboard: Arc<dyn Clipboard> = if io::stdout().is_terminal() {
        Arc::new(Osc52Clipboard)
    } else {
        Arc::new(NoopClipboard)
    };
    let interactive = io::stdout().is_terminal();

    let runner = EffectRunner::from_config(&config, cli.ephemeral, clipboard)
        .context("Failed to open alias store")?;
    runner.load_initial();

    let initial = AppState::with_settings(config.initial_settings()).with_seed(rand::random());
    let state = runner.settle(initial);

    let result = execute(&runner, state, cli.command, interactive);
    runner.shutdown();
    result
}

fn execute(runner: &EffectRunner, state: AppState, command: Commands, interactive: bool) -> Result<()> {
    match command {
        Commands::New { input } => {
            let input = match input {
                Some(input) => input,
                None => read_stdin_line()?,
            };

            let state = runner.dispatch(state, Action::InputChanged(input));
            let state = runner.dispatch(state, Action::GenerateRequested);
            if !state.is_generating() {
                return Err(invalid("input is blank"));
            }

            let state = runner.settle(state);
            if let Some(alias) = state.aliases.last() {
                println!("{}", alias.id);
            }
        }

        Commands::More { id } => {
            require_alias(&state, &id)?;

            let state = runner.dispatch(state, Action::GenerateAdditionalRequested(id));
            let state = runner.settle(state);
            if let Some(alias) = state.aliases.last() {
                println!("{}", alias.id);
            }
        }

        Commands::List { format } => {
            let entries = output::entries(&state);
            let rendered = output::render(&entries, format).context("Failed to format aliases")?;
            print!("{}", rendered);
        }

        Commands::Rm { id } => {
            require_alias(&state, &id)?;
            runner.dispatch(state, Action::RemoveAlias(id.clone()));
            eprintln!("Removed {}", id);
        }

        Commands::Clear => {
            let count = state.aliases.len();
            runner.dispatch(state, Action::ClearAll);
            eprintln!("Removed {} aliases", count);
        }

        Commands::Note { id, text } => {
            require_alias(&state, &id)?;

            let text = text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
            let action = match text {
                Some(text) => Action::NoteChanged { id, text },
                None => Action::NoteCleared(id),
            };
            runner.dispatch(state, action);
        }

        Commands::Copy { id } => {
            require_alias(&state, &id)?;
            // Piped output gets the address instead
            if !interactive {
                println!("{}", id);
            }
            runner.dispatch(state, Action::CopyRequested(id));
        }

        Commands::Domain { domain: None } => {
            println!("{}", state.settings.base_domain);
        }

        Commands::Domain {
            domain: Some(domain),
        } => {
            if !is_valid_domain(&domain) {
                return Err(invalid(format!("'{}' is not a valid domain", domain)));
            }
            runner.dispatch(state, Action::BaseDomainSet(domain));
        }

        Commands::AutoClipboard { state: None } => {
            let current = if state.settings.auto_clipboard_enabled {
                "on"
            } else {
                "off"
            };
            println!("{}", current);
        }

        Commands::AutoClipboard {
            state: Some(toggle),
        } => {
            runner.dispatch(state, Action::AutoClipboardToggled(toggle == Toggle::On));
        }

        Commands::Init { force } => return cmd_init(force),
    }

    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let path = resolve_config_path()?;
    if path.exists() && !force {
        return Err(invalid(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default_config()
        .save_to_path(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{}", path.display());
    Ok(())
}

fn require_alias(state: &AppState, id: &str) -> Result<()> {
    if state.contains(id) {
        Ok(())
    } else {
        Err(invalid(format!("no alias '{}'", id)))
    }
}

fn read_stdin_line() -> Result<String> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(invalid("no input given"));
    }

    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer.lines().next().unwrap_or_default().to_string())
}

fn invalid(message: impl Into<String>) -> anyhow::Error {
    AliasboxError::InvalidInput(message.into()).into()
}

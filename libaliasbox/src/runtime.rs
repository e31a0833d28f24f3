//! Effect runtime
//!
//! Bridges the pure reducer and the outside world. Front ends keep their
//! own synchronous loop and hand effects to [`EffectRunner::run`]; results
//! that must come back into the reducer (loaded collections, resolved
//! timestamps) arrive as [`Action`]s on a crossbeam channel that the loop
//! drains between input events.
//!
//! # Ordering
//!
//! Loads, timestamp requests and persistence effects go through a single
//! queue drained by one worker task, so:
//!
//! - writes hit the store in the order the reducer emitted them
//! - the initial loads are delivered before any `AliasCreated`
//! - nothing is awaited by the caller (fire-and-forget)
//!
//! Clipboard copies bypass the queue and happen immediately.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use libaliasbox::app::{Action, AppState};
//! use libaliasbox::clipboard::NoopClipboard;
//! use libaliasbox::runtime::{EffectRunner, SystemClock};
//! use libaliasbox::store::Store;
//!
//! # fn example() -> libaliasbox::Result<()> {
//! let runner = EffectRunner::with_store(Store::memory(), Arc::new(NoopClipboard), Arc::new(SystemClock))?;
//! runner.load_initial();
//!
//! let state = runner.settle(AppState::new());
//! let state = runner.dispatch(state, Action::InputChanged("shop".to_string()));
//! let state = runner.dispatch(state, Action::GenerateRequested);
//! let state = runner.settle(state);
//! assert_eq!(state.aliases[0].id, "shop@disposable.io");
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossbeam_channel::{unbounded, Receiver, Sender};
use tokio::sync::{mpsc, oneshot};

use crate::app::{reduce, Action, AppState, Effect};
use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::error::{AliasboxError, Result};
use crate::store::Store;

/// Source of creation timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

enum Job {
    Load,
    Effect(Effect),
    Flush(oneshot::Sender<()>),
}

/// Executes reducer effects and feeds results back as actions
pub struct EffectRunner {
    runtime: tokio::runtime::Runtime,
    store: Store,
    clipboard: Arc<dyn Clipboard>,
    jobs: mpsc::UnboundedSender<Job>,
    action_rx: Receiver<Action>,
}

impl EffectRunner {
    /// Create a runner on an existing runtime and store
    pub fn new(
        runtime: tokio::runtime::Runtime,
        store: Store,
        clipboard: Arc<dyn Clipboard>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (jobs, job_rx) = mpsc::unbounded_channel();
        let (action_tx, action_rx) = unbounded();

        runtime.spawn(worker(job_rx, store.clone(), clock, action_tx));

        Self {
            runtime,
            store,
            clipboard,
            jobs,
            action_rx,
        }
    }

    /// Create a runner with its own runtime around `store`
    pub fn with_store(
        store: Store,
        clipboard: Arc<dyn Clipboard>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        Ok(Self::new(build_runtime()?, store, clipboard, clock))
    }

    /// Create a runner for the configured store
    ///
    /// With `ephemeral` set, an in-memory store is used and nothing is
    /// written to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be created or the database
    /// cannot be opened.
    pub fn from_config(
        config: &Config,
        ephemeral: bool,
        clipboard: Arc<dyn Clipboard>,
    ) -> Result<Self> {
        let runtime = build_runtime()?;
        let store = if ephemeral {
            Store::memory()
        } else {
            runtime.block_on(Store::sqlite(&config.storage.path))?
        };

        Ok(Self::new(runtime, store, clipboard, Arc::new(SystemClock)))
    }

    /// Channel of actions produced by the runtime
    pub fn actions(&self) -> &Receiver<Action> {
        &self.action_rx
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Run a future to completion on the runner's runtime
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Queue the initial loads
    ///
    /// Delivers `SettingsLoaded`, `AliasesLoaded` and `NotesLoaded`, in
    /// that order.
    pub fn load_initial(&self) {
        self.enqueue(Job::Load);
    }

    /// Carry out effects without waiting for them
    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CopyToClipboard(text) => self.clipboard.copy(&text),
                other => self.enqueue(Job::Effect(other)),
            }
        }
    }

    /// Reduce one action and run its effects
    pub fn dispatch(&self, state: AppState, action: Action) -> AppState {
        let (state, effects) = reduce(state, action);
        self.run(effects);
        state
    }

    /// Block until everything queued so far has been applied
    pub fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        self.enqueue(Job::Flush(done_tx));
        if self.runtime.block_on(done_rx).is_err() {
            tracing::warn!("effect worker stopped before flush completed");
        }
    }

    /// Dispatch runtime actions until nothing is left in flight
    ///
    /// Used by one-shot front ends (and tests) that want the state after
    /// all loads and pending generations have completed.
    pub fn settle(&self, mut state: AppState) -> AppState {
        loop {
            self.flush();

            let mut progressed = false;
            while let Ok(action) = self.action_rx.try_recv() {
                progressed = true;
                state = self.dispatch(state, action);
            }

            if !progressed {
                return state;
            }
        }
    }

    /// Flush outstanding writes and stop the runtime
    pub fn shutdown(self) {
        self.flush();
        let Self { runtime, .. } = self;
        runtime.shutdown_timeout(Duration::from_secs(1));
    }

    fn enqueue(&self, job: Job) {
        if self.jobs.send(job).is_err() {
            tracing::warn!("effect worker is not running, job dropped");
        }
    }
}

fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("aliasbox-effects")
        .enable_all()
        .build()
        .map_err(|e| AliasboxError::Runtime(format!("failed to start runtime: {}", e)))
}

async fn worker(
    mut jobs: mpsc::UnboundedReceiver<Job>,
    store: Store,
    clock: Arc<dyn Clock>,
    actions: Sender<Action>,
) {
    while let Some(job) = jobs.recv().await {
        match job {
            Job::Load => {
                let settings = store.load_settings().await;
                let aliases = store.load_aliases().await;
                let notes = store.load_notes().await;
                tracing::debug!(aliases = aliases.len(), notes = notes.len(), "loaded store");

                let loaded = [
                    Action::SettingsLoaded(settings),
                    Action::AliasesLoaded(aliases),
                    Action::NotesLoaded(notes),
                ];
                for action in loaded {
                    // Receiver gone means the front end is shutting down
                    let _ = actions.send(action);
                }
            }
            Job::Effect(Effect::RequestTimestamp { alias_id }) => {
                let created_at = clock.now();
                let _ = actions.send(Action::AliasCreated {
                    alias_id,
                    created_at,
                });
            }
            Job::Effect(effect) => store.apply(&effect).await,
            Job::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}

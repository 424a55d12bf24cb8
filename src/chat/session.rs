//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the transcript and
//! drives the interactive loop:
//!
//! ```text
//! AwaitingInput -> Processing -> Rendering -> AwaitingInput
//!       |              |
//!       |              +--(request error)--> AwaitingInput
//!       +--(/exit, Ctrl+C, EOF)--> Exiting
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::chat::commands::{ChatCommand, parse_command};
use crate::chat::config::ChatConfig;
use crate::chat::input::{LineSource, ReadOutcome};
use crate::client::AuraClient;
use crate::client_logger::StderrLogger;
use crate::error::Result;
use crate::history::{HistoryStore, Turn};
use crate::observability::SESSION_TURNS;
use crate::prompt::build_prompt;
use crate::render::Renderer;

/// Label printed before each reply.
pub const REPLY_LABEL: &str = "Aura: ";

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The user typed `/exit`.
    Command,

    /// The user interrupted the session.
    Interrupted,

    /// Input ran out.
    EndOfInput,
}

enum SessionState {
    AwaitingInput,
    Processing { prompt_text: String },
    Rendering { reply: String },
    Exiting(ExitReason),
}

/// A chat session: the transcript, its store, and the client that answers.
pub struct ChatSession {
    config: ChatConfig,
    store: HistoryStore,
    client: AuraClient,
    history: Vec<Turn>,
}

impl ChatSession {
    /// Creates a session from configuration, loading any persisted transcript.
    pub fn new(config: ChatConfig) -> Result<Self> {
        let mut client = AuraClient::new(&config)?;
        if config.verbose {
            client = client.with_logger(Arc::new(StderrLogger));
        }
        Ok(Self::with_client(config, client))
    }

    /// Creates a session around an existing client.
    pub fn with_client(config: ChatConfig, client: AuraClient) -> Self {
        let store = HistoryStore::new(config.history_path.clone(), config.max_history);
        let history = store.trim(store.load());
        Self {
            config,
            store,
            client,
            history,
        }
    }

    /// The session configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// The current transcript, oldest turn first.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Runs the loop until the user exits or input ends.
    ///
    /// `interrupted` is polled before every read; when set the session exits.  It is
    /// not consulted while a request is in flight.
    pub async fn run<S, R>(
        &mut self,
        input: &mut S,
        renderer: &mut R,
        interrupted: &AtomicBool,
    ) -> ExitReason
    where
        S: LineSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let mut state = SessionState::AwaitingInput;
        loop {
            state = match state {
                SessionState::AwaitingInput => self.await_input(input, renderer, interrupted),
                SessionState::Processing { prompt_text } => {
                    self.process(&prompt_text, renderer).await
                }
                SessionState::Rendering { reply } => self.render(reply, renderer),
                SessionState::Exiting(reason) => {
                    self.shutdown(renderer);
                    return reason;
                }
            };
        }
    }

    fn await_input<S, R>(
        &mut self,
        input: &mut S,
        renderer: &mut R,
        interrupted: &AtomicBool,
    ) -> SessionState
    where
        S: LineSource + ?Sized,
        R: Renderer + ?Sized,
    {
        if interrupted.load(Ordering::Relaxed) {
            renderer.print_info("\nSessiyadan chiqilyapti...");
            return SessionState::Exiting(ExitReason::Interrupted);
        }
        let line = match input.read_line() {
            ReadOutcome::Line(line) => line,
            ReadOutcome::Interrupted => {
                renderer.print_info("\nSessiyadan chiqilyapti...");
                return SessionState::Exiting(ExitReason::Interrupted);
            }
            ReadOutcome::Eof => {
                renderer.print_info("\nSessiyadan chiqilyapti...");
                return SessionState::Exiting(ExitReason::EndOfInput);
            }
        };
        let line = line.trim();
        if line.is_empty() {
            return SessionState::AwaitingInput;
        }
        if let Some(ChatCommand::Exit) = parse_command(line) {
            renderer.print_info("Goodbye!");
            return SessionState::Exiting(ExitReason::Command);
        }
        SessionState::Processing {
            prompt_text: self.accept_user_input(line),
        }
    }

    /// Records the user's turn and returns the prompt for it.
    fn accept_user_input(&mut self, user_input: &str) -> String {
        self.record(Turn::user(user_input));
        let history_prev = self
            .history
            .split_last()
            .map(|(_, prev)| prev)
            .unwrap_or(&[]);
        build_prompt(history_prev, user_input)
    }

    async fn process<R>(&mut self, prompt_text: &str, renderer: &mut R) -> SessionState
    where
        R: Renderer + ?Sized,
    {
        match self.client.send(prompt_text).await {
            Ok(reply) => SessionState::Rendering { reply },
            Err(err) => {
                renderer.print_error(&err.to_string());
                SessionState::AwaitingInput
            }
        }
    }

    fn render<R>(&mut self, reply: String, renderer: &mut R) -> SessionState
    where
        R: Renderer + ?Sized,
    {
        renderer.print_label(REPLY_LABEL);
        renderer.print_reply(&reply);
        self.record(Turn::assistant(reply));
        SESSION_TURNS.click();
        SessionState::AwaitingInput
    }

    fn shutdown<R>(&mut self, renderer: &mut R)
    where
        R: Renderer + ?Sized,
    {
        self.store.save(&self.history);
        renderer.print_success("Sessiya saqlandi");
    }

    fn record(&mut self, turn: Turn) {
        self.history.push(turn);
        self.history = self.store.trim(std::mem::take(&mut self.history));
        self.store.save(&self.history);
    }
}

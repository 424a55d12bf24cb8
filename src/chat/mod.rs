//! Chat application module for interactive conversations.
//!
//! This module provides a REPL chat interface built on top of the aura client
//! library. It supports:
//!
//! - A transcript persisted after every turn and bounded in length
//! - A spinner while a request is in flight
//! - Replies typed out word by word
//! - The `/exit` command
//!
//! # Architecture
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: the session state machine
//! - [`commands`]: slash command parsing
//! - [`input`]: line sources for the loop

mod commands;
mod config;
mod input;
mod session;

pub use crate::render::{Renderer, TypewriterRenderer};
pub use commands::{ChatCommand, parse_command};
pub use config::{
    ChatArgs, ChatConfig, DEFAULT_API_URL, DEFAULT_HISTORY_FILE, DEFAULT_MAX_HISTORY,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_SPINNER_INTERVAL, DEFAULT_TYPING_DELAY,
};
pub use input::{INPUT_PROMPT, LineSource, ReadOutcome, ReadlineSource, ScriptedSource};
pub use session::{ChatSession, ExitReason, REPLY_LABEL};

//! Interactive chat application.
//!
//! Reads lines from the terminal, sends each one (with the recent transcript) to
//! the chat endpoint, and types the reply back out.
//!
//! # Usage
//!
//! ```bash
//! # Keep the transcript in ./history.json
//! aura-chat
//!
//! # Keep the transcript somewhere else
//! aura-chat --history-file ~/.aura-history.json
//!
//! # Disable colors (useful for piping output)
//! aura-chat --no-color
//! ```
//!
//! Type `/exit` (or press Ctrl+C / Ctrl+D) to leave; the transcript is saved on the way out.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;

use aura::chat::{ChatArgs, ChatConfig, ChatSession, ReadlineSource, TypewriterRenderer};

/// Main entry point for the aura-chat application.
///
/// The loop runs on one thread; reqwest still resolves host names on tokio's blocking pool.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("aura-chat [OPTIONS]");
    let config = ChatConfig::from(args);

    let mut session = ChatSession::new(config.clone())?;
    let mut renderer = TypewriterRenderer::new(config.use_color, config.typing_delay);
    let mut input = ReadlineSource::new(config.use_color)?;

    // Ctrl+C while a request is in flight ends the session once the request returns.
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!();
    session.run(&mut input, &mut renderer, &interrupted).await;

    Ok(())
}

//! Logging trait for chat client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture
//! every exchange passing through the [`AuraClient`](crate::AuraClient).

use crate::Error;

/// A trait for logging chat client operations.
///
/// Implement this trait to record each request and its outcome.  Every call to
/// `send` ends in exactly one of [`log_reply`](ClientLogger::log_reply) or
/// [`log_error`](ClientLogger::log_error).  [`log_request`](ClientLogger::log_request)
/// precedes it only once a request URL exists, so a request whose URL cannot be
/// built is reported through `log_error` alone.
pub trait ClientLogger: Send + Sync {
    /// Log an outgoing request.
    ///
    /// `url` is the fully encoded request URL; `prompt_text` is the prompt before encoding.
    fn log_request(&self, url: &str, prompt_text: &str);

    /// Log the reply text extracted from a successful response.
    fn log_reply(&self, reply: &str);

    /// Log a failed request.
    fn log_error(&self, error: &Error);
}

/// Logs one line per event to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrLogger;

impl ClientLogger for StderrLogger {
    fn log_request(&self, url: &str, prompt_text: &str) {
        eprintln!(
            "[aura] GET {} ({} prompt lines, {} bytes)",
            url.split('?').next().unwrap_or(url),
            prompt_text.lines().count(),
            prompt_text.len()
        );
    }

    fn log_reply(&self, reply: &str) {
        eprintln!("[aura] reply: {} words", reply.split_whitespace().count());
    }

    fn log_error(&self, error: &Error) {
        eprintln!("[aura] request failed: {}", error.message());
    }
}

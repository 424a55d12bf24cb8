//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and the immutable
//! configuration structure threaded into every component of a session.

use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

/// Endpoint that answers chat prompts.
pub const DEFAULT_API_URL: &str = "https://ozodbekdev.uz/api/deepai/";

/// File the transcript is persisted to, relative to the working directory.
pub const DEFAULT_HISTORY_FILE: &str = "history.json";

/// Maximum number of turns kept in the transcript.
pub const DEFAULT_MAX_HISTORY: usize = 15;

/// Upper bound on a single request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Pause between words of a typed-out reply.
pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(40);

/// Pause between spinner frames.
pub const DEFAULT_SPINNER_INTERVAL: Duration = Duration::from_millis(80);

/// Command-line arguments for the aura-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Where to persist the transcript.
    #[arrrg(optional, "Transcript file (default: history.json)", "PATH")]
    pub history_file: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Log requests and replies to stderr.
    #[arrrg(flag, "Log requests and replies to stderr")]
    pub verbose: bool,
}

/// Configuration for a chat session.
///
/// Values are fixed once the session starts; every component receives the
/// fields it needs when it is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// Base URL of the remote endpoint.
    pub api_url: String,

    /// Path of the persisted transcript.
    pub history_path: PathBuf,

    /// Maximum number of turns kept in the transcript.
    pub max_history: usize,

    /// Timeout applied to each request.
    pub request_timeout: Duration,

    /// Delay between words when typing out a reply.
    pub typing_delay: Duration,

    /// Delay between spinner frames.
    pub spinner_interval: Duration,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Whether to log each exchange to stderr.
    pub verbose: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    pub fn new() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            history_path: PathBuf::from(DEFAULT_HISTORY_FILE),
            max_history: DEFAULT_MAX_HISTORY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            typing_delay: DEFAULT_TYPING_DELAY,
            spinner_interval: DEFAULT_SPINNER_INTERVAL,
            use_color: true,
            verbose: false,
        }
    }

    /// Sets the base URL of the remote endpoint.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Sets the transcript path.
    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }

    /// Sets the maximum transcript length.
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    /// Sets the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the delay between typed words.
    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }

    /// Sets the delay between spinner frames.
    pub fn with_spinner_interval(mut self, interval: Duration) -> Self {
        self.spinner_interval = interval;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Enables logging of each exchange to stderr.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let history_path = args
            .history_file
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE));

        ChatConfig {
            history_path,
            use_color: !args.no_color,
            verbose: args.verbose,
            ..ChatConfig::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.api_url, "https://ozodbekdev.uz/api/deepai/");
        assert_eq!(config.history_path, PathBuf::from("history.json"));
        assert_eq!(config.max_history, 15);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.typing_delay, Duration::from_millis(40));
        assert_eq!(config.spinner_interval, Duration::from_millis(80));
        assert!(config.use_color);
        assert!(!config.verbose);
    }

    #[test]
    fn config_from_args_defaults() {
        let config = ChatConfig::from(ChatArgs::default());
        assert_eq!(config, ChatConfig::new());
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            history_file: Some("/tmp/aura.json".to_string()),
            no_color: true,
            verbose: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.history_path, PathBuf::from("/tmp/aura.json"));
        assert!(!config.use_color);
        assert!(config.verbose);
        assert_eq!(config.max_history, DEFAULT_MAX_HISTORY);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_api_url("http://127.0.0.1:9000/")
            .with_history_path("h.json")
            .with_max_history(4)
            .with_request_timeout(Duration::from_secs(2))
            .with_typing_delay(Duration::ZERO)
            .with_spinner_interval(Duration::from_millis(5))
            .without_color()
            .with_verbose(true);

        assert_eq!(config.api_url, "http://127.0.0.1:9000/");
        assert_eq!(config.history_path, PathBuf::from("h.json"));
        assert_eq!(config.max_history, 4);
        assert_eq!(config.request_timeout, Duration::from_secs(2));
        assert_eq!(config.typing_delay, Duration::ZERO);
        assert_eq!(config.spinner_interval, Duration::from_millis(5));
        assert!(!config.use_color);
        assert!(config.verbose);
    }
}

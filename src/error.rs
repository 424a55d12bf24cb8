//! Error types for the Aura chat client.
//!
//! Every failure inside a single API call collapses into [`Error::Request`].  The history
//! variants exist so the store can report what went wrong before it falls back to its
//! lenient defaults.

use std::error;
use std::fmt;
use std::sync::Arc;

/// The main error type for the Aura client.
#[derive(Clone, Debug)]
pub enum Error {
    /// A request to the remote endpoint failed.
    ///
    /// Covers network failures, timeouts, non-success statuses and malformed bodies.
    Request {
        /// Human-readable error message, including the underlying cause.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// The persisted history could not be read or parsed.
    HistoryLoad {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// The history could not be written.
    HistorySave {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// The HTTP client could not be constructed.
    HttpClient {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// A URL parsing or manipulation error.
    Url {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<url::ParseError>,
    },
}

impl Error {
    /// Creates a new request error.
    pub fn request(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Request {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new history load error.
    pub fn history_load(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::HistoryLoad {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new history save error.
    pub fn history_save(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::HistorySave {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new HTTP client error.
    pub fn http_client(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::HttpClient {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new URL error.
    pub fn url(message: impl Into<String>, source: Option<url::ParseError>) -> Self {
        Error::Url {
            message: message.into(),
            source,
        }
    }

    /// Returns true if this error came from a request to the remote endpoint.
    pub fn is_request(&self) -> bool {
        matches!(self, Error::Request { .. })
    }

    /// Returns true if this error came from reading the history file.
    pub fn is_history_load(&self) -> bool {
        matches!(self, Error::HistoryLoad { .. })
    }

    /// Returns true if this error came from writing the history file.
    pub fn is_history_save(&self) -> bool {
        matches!(self, Error::HistorySave { .. })
    }

    /// Returns the human-readable message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::Request { message, .. }
            | Error::HistoryLoad { message, .. }
            | Error::HistorySave { message, .. }
            | Error::HttpClient { message, .. }
            | Error::Url { message, .. } => message,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Request { message, .. } => {
                write!(f, "So'rov yuborishda xatolik: {message}")
            }
            Error::HistoryLoad { message, .. } => {
                write!(f, "History load error: {message}")
            }
            Error::HistorySave { message, .. } => {
                write!(f, "History save error: {message}")
            }
            Error::HttpClient { message, .. } => {
                write!(f, "HTTP client error: {message}")
            }
            Error::Url { message, .. } => {
                write!(f, "URL error: {message}")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Request { source, .. }
            | Error::HistoryLoad { source, .. }
            | Error::HistorySave { source, .. }
            | Error::HttpClient { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Url { source, .. } => {
                source.as_ref().map(|e| e as &(dyn error::Error + 'static))
            }
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::url(format!("URL parse error: {err}"), Some(err))
    }
}

/// A specialized Result type for Aura operations.
pub type Result<T> = std::result::Result<T, Error>;

// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod history;
pub mod observability;
pub mod prompt;
pub mod render;
pub mod spinner;

// Re-exports
pub use client::{AuraClient, MISSING_REPLY_FALLBACK, REPLY_FIELD, extract_reply};
pub use client_logger::{ClientLogger, StderrLogger};
pub use error::{Error, Result};
pub use history::{HistoryStore, Role, Turn, trim};
pub use observability::register_biometrics;
pub use prompt::build_prompt;
pub use render::{Renderer, TypewriterRenderer};
pub use spinner::{SPINNER_FRAMES, Spinner};

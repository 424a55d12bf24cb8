//! Persistent, bounded chat transcript.
//!
//! The transcript lives in a single JSON file holding an array of
//! `{"role": ..., "content": ...}` objects.  Reading is lenient: a missing or
//! malformed file yields an empty transcript.  Writing is best effort: a failed
//! write is counted and otherwise ignored.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value, to_writer_pretty};

use crate::error::{Error, Result};
use crate::observability::{HISTORY_EVICTIONS, HISTORY_LOAD_FALLBACKS, HISTORY_SAVE_FAILURES};

/// Who produced a turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person at the keyboard.
    User,

    /// The remote assistant.
    Assistant,

    /// Any other role found in a transcript file.  Never sent to the endpoint.
    #[serde(other)]
    Other,
}

impl Role {
    /// The label used when the turn is rendered into a prompt, if it is rendered at all.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Role::User => Some("User"),
            Role::Assistant => Some("Assistant"),
            Role::Other => None,
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::Other,
        }
    }
}

/// A single message in the transcript.
///
/// Turns read from disk that are not a plain `{"role", "content"}` pair (extra keys,
/// a `null` or missing content, an unknown role, or not an object at all) keep their
/// original JSON and are written back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    /// Who produced the message.
    pub role: Role,

    /// The message text.
    pub content: String,

    verbatim: Option<Value>,
}

impl Turn {
    /// Create a new turn.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            verbatim: None,
        }
    }

    /// Create a new user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// The JSON this turn was read from, when it was not a plain role/content pair.
    pub fn verbatim(&self) -> Option<&Value> {
        self.verbatim.as_ref()
    }

    fn plain(fields: &Map<String, Value>) -> Option<Self> {
        if fields.len() != 2 {
            return None;
        }
        let role = Role::from_name(fields.get("role")?.as_str()?);
        if role == Role::Other {
            return None;
        }
        let content = fields.get("content")?.as_str()?;
        Some(Self::new(role, content))
    }
}

impl From<Value> for Turn {
    fn from(value: Value) -> Self {
        if let Value::Object(fields) = &value {
            if let Some(turn) = Self::plain(fields) {
                return turn;
            }
        }
        let field = |key: &str| value.get(key).and_then(Value::as_str);
        Self {
            role: field("role").map_or(Role::Other, Role::from_name),
            content: field("content").unwrap_or_default().to_string(),
            verbatim: Some(value),
        }
    }
}

impl Serialize for Turn {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if let Some(value) = &self.verbatim {
            return value.serialize(serializer);
        }
        let mut state = serializer.serialize_struct("Turn", 2)?;
        state.serialize_field("role", &self.role)?;
        state.serialize_field("content", &self.content)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Turn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Turn::from)
    }
}

/// Keep only the newest `max` turns.
///
/// Returns `history` untouched when it is already short enough.
pub fn trim(mut history: Vec<Turn>, max: usize) -> Vec<Turn> {
    if history.len() > max {
        let excess = history.len() - max;
        HISTORY_EVICTIONS.count(excess as u64);
        history.drain(..excess);
    }
    history
}

/// Reads and writes the transcript file.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    max_len: usize,
}

impl HistoryStore {
    /// Creates a store backed by `path` that keeps at most `max_len` turns.
    pub fn new(path: impl Into<PathBuf>, max_len: usize) -> Self {
        Self {
            path: path.into(),
            max_len,
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The maximum number of turns kept.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Loads the transcript, falling back to an empty one on any failure.
    pub fn load(&self) -> Vec<Turn> {
        match self.try_load() {
            Ok(turns) => turns,
            Err(_) => {
                HISTORY_LOAD_FALLBACKS.click();
                Vec::new()
            }
        }
    }

    /// Loads the transcript, reporting why it could not be read.
    ///
    /// A missing file is an empty transcript, not an error.  Every array element
    /// becomes a turn; see [`Turn`] for how irregular ones are kept.
    pub fn try_load(&self) -> Result<Vec<Turn>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path).map_err(|err| {
            Error::history_load("failed to read history file", Some(Box::new(err)))
        })?;
        let document: Value = serde_json::from_str(&text).map_err(|err| {
            Error::history_load("failed to parse history file", Some(Box::new(err)))
        })?;
        let Value::Array(items) = document else {
            return Err(Error::history_load(
                "history file does not hold a sequence",
                None,
            ));
        };
        Ok(items.into_iter().map(Turn::from).collect())
    }

    /// Keep only the newest turns this store allows.
    pub fn trim(&self, history: Vec<Turn>) -> Vec<Turn> {
        trim(history, self.max_len)
    }

    /// Writes the transcript, ignoring failures.
    pub fn save(&self, history: &[Turn]) {
        if self.try_save(history).is_err() {
            HISTORY_SAVE_FAILURES.click();
        }
    }

    /// Writes the transcript, replacing the file wholesale.
    pub fn try_save(&self, history: &[Turn]) -> Result<()> {
        let file = File::create(&self.path).map_err(|err| {
            Error::history_save("failed to create history file", Some(Box::new(err)))
        })?;
        let mut writer = BufWriter::new(file);
        to_writer_pretty(&mut writer, history).map_err(|err| {
            Error::history_save("failed to serialize history", Some(Box::new(err)))
        })?;
        writer.flush().map_err(|err| {
            Error::history_save("failed to flush history file", Some(Box::new(err)))
        })
    }
}

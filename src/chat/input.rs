//! Line input for the chat loop.

use std::collections::VecDeque;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::render::{ANSI_BLUE, ANSI_RESET};

/// Prompt shown before each line of input.
pub const INPUT_PROMPT: &str = "Siz: ";

/// What a single read produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line of text, without its terminator.
    Line(String),

    /// The user aborted input (Ctrl+C at the prompt).
    Interrupted,

    /// Input is exhausted (Ctrl+D, closed stdin, or an unreadable terminal).
    Eof,
}

/// A source of user input lines.
pub trait LineSource {
    /// Block until the next line is available.
    fn read_line(&mut self) -> ReadOutcome;
}

/// Interactive input through `rustyline`.
pub struct ReadlineSource {
    editor: DefaultEditor,
    prompt: String,
}

impl ReadlineSource {
    /// Creates an editor on the controlling terminal.
    pub fn new(use_color: bool) -> rustyline::Result<Self> {
        let prompt = if use_color {
            format!("{ANSI_BLUE}{INPUT_PROMPT}{ANSI_RESET}")
        } else {
            INPUT_PROMPT.to_string()
        };
        Ok(Self {
            editor: DefaultEditor::new()?,
            prompt,
        })
    }
}

impl LineSource for ReadlineSource {
    fn read_line(&mut self) -> ReadOutcome {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                ReadOutcome::Line(line)
            }
            Err(ReadlineError::Interrupted) => ReadOutcome::Interrupted,
            Err(_) => ReadOutcome::Eof,
        }
    }
}

/// Replays a fixed list of lines, then reports end of input.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSource {
    lines: VecDeque<String>,
}

impl ScriptedSource {
    /// Creates a source that yields `lines` in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for ScriptedSource {
    fn read_line(&mut self) -> ReadOutcome {
        self.lines
            .pop_front()
            .map(ReadOutcome::Line)
            .unwrap_or(ReadOutcome::Eof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_source_drains_then_eof() {
        let mut source = ScriptedSource::new(["one", "two"]);
        assert_eq!(source.read_line(), ReadOutcome::Line("one".to_string()));
        assert_eq!(source.read_line(), ReadOutcome::Line("two".to_string()));
        assert_eq!(source.read_line(), ReadOutcome::Eof);
        assert_eq!(source.read_line(), ReadOutcome::Eof);
    }
}

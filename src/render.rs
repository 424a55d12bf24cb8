//! Output rendering for the chat application.
//!
//! Replies are typed out one word at a time.  The [`Renderer`] trait keeps the
//! session loop independent of where the output goes; [`TypewriterRenderer`]
//! writes to stdout by default and to any [`Write`] for tests.

use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

/// ANSI escape code for bold text (used for the reply label).
pub(crate) const ANSI_BRIGHT: &str = "\x1b[1m";

/// ANSI escape code to reset all styling.
pub(crate) const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for red text (used for replies and errors).
pub(crate) const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for green text (used for the spinner and save notice).
pub(crate) const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for yellow text (used for session notices).
pub(crate) const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for blue text (used for the input prompt).
pub(crate) const ANSI_BLUE: &str = "\x1b[34m";

/// Trait for rendering chat output.
pub trait Renderer: Send {
    /// Print the label that introduces a reply.
    fn print_label(&mut self, label: &str);

    /// Type out a reply word by word, ending with a newline.
    fn print_reply(&mut self, text: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational notice.
    fn print_info(&mut self, info: &str);

    /// Print a notice that something completed.
    fn print_success(&mut self, text: &str);
}

/// Renderer that simulates typing with a fixed delay between words.
pub struct TypewriterRenderer<W: Write + Send = Stdout> {
    out: W,
    use_color: bool,
    delay: Duration,
}

impl TypewriterRenderer<Stdout> {
    /// Creates a renderer on stdout.
    pub fn new(use_color: bool, delay: Duration) -> Self {
        Self::with_writer(io::stdout(), use_color, delay)
    }
}

impl<W: Write + Send> TypewriterRenderer<W> {
    /// Creates a renderer on an arbitrary writer.
    pub fn with_writer(out: W, use_color: bool, delay: Duration) -> Self {
        Self {
            out,
            use_color,
            delay,
        }
    }

    /// Consumes the renderer, returning its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn styled_line(&mut self, style: &str, text: &str) {
        if self.use_color {
            let _ = writeln!(self.out, "{style}{text}{ANSI_RESET}");
        } else {
            let _ = writeln!(self.out, "{text}");
        }
        self.flush();
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }
}

impl<W: Write + Send> Renderer for TypewriterRenderer<W> {
    fn print_label(&mut self, label: &str) {
        if self.use_color {
            let _ = write!(self.out, "{ANSI_BRIGHT}{ANSI_RED}{label}{ANSI_RESET}");
        } else {
            let _ = write!(self.out, "{label}");
        }
        self.flush();
    }

    fn print_reply(&mut self, text: &str) {
        for word in text.split_whitespace() {
            if self.use_color {
                let _ = write!(self.out, "{ANSI_RED}{word} {ANSI_RESET}");
            } else {
                let _ = write!(self.out, "{word} ");
            }
            self.flush();
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }
        let _ = writeln!(self.out);
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        self.styled_line(ANSI_RED, &format!("\nXato: {error}"));
    }

    fn print_info(&mut self, info: &str) {
        self.styled_line(ANSI_YELLOW, info);
    }

    fn print_success(&mut self, text: &str) {
        self.styled_line(ANSI_GREEN, text);
    }
}

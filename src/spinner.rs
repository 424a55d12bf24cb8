//! Terminal spinner shown while a request is in flight.
//!
//! A [`Spinner`] wraps an `indicatif` spinner with a steady tick.  Dropping the
//! spinner (or calling [`Spinner::stop`]) disables the tick, which joins the
//! ticker thread, and clears the line, so nothing the ticker draws can interleave
//! with output that follows.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Frames cycled by the ticker, in order.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Shown once the spinner has finished; the line is cleared right after.
const FINISHED_FRAME: &str = " ";

/// A running spinner.  Stops, joins its ticker and clears the line on drop.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Starts a spinner on stdout.
    pub fn start(interval: Duration, use_color: bool) -> Self {
        Self::start_on(ProgressDrawTarget::stdout(), interval, use_color)
    }

    /// Starts a spinner drawing to `target`.
    pub fn start_on(target: ProgressDrawTarget, interval: Duration, use_color: bool) -> Self {
        let bar = ProgressBar::with_draw_target(None, target);
        bar.set_style(spinner_style(use_color));
        bar.enable_steady_tick(interval);
        Self { bar }
    }

    /// Stops the spinner and waits for the ticker to exit.
    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        if !self.bar.is_finished() {
            self.bar.disable_steady_tick();
            self.bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.halt();
    }
}

fn spinner_style(use_color: bool) -> ProgressStyle {
    let template = if use_color {
        "{spinner:.green}"
    } else {
        "{spinner}"
    };
    let mut ticks = SPINNER_FRAMES.to_vec();
    ticks.push(FINISHED_FRAME);
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&ticks)
}

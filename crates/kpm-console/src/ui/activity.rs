//! Activity handles for long-running operations
//!
//! The variant is picked once, when the activity is created, from the status
//! stream's interactivity. A terminal detaching mid-run does not turn a
//! spinner into a plain line or the other way around.

use super::spinner::Spinner;
use super::stream::OutputStream;
use crate::config::ActivityFallback;
use std::time::Duration;

/// Status indicator tied to one long-running operation
#[derive(Debug)]
pub enum Activity {
    /// Animated spinner on an interactive terminal
    Interactive(Spinner),
    /// Non-interactive output: the first label is written as a plain line
    Plain {
        /// Destination for the single line
        stream: OutputStream,
        /// Whether the line has been written already
        logged: bool,
    },
    /// Non-interactive output: nothing is written at all
    Silent,
}

impl Activity {
    /// Choose and start the right variant for `stream`.
    pub fn start(stream: OutputStream, interval: Duration, fallback: ActivityFallback) -> Self {
        if stream.is_tty() {
            let mut spinner = Spinner::new(stream).with_interval(interval);
            spinner.start();
            return Self::Interactive(spinner);
        }
        match fallback {
            ActivityFallback::Silent => Self::Silent,
            ActivityFallback::Plain => Self::Plain {
                stream,
                logged: false,
            },
        }
    }

    /// Whether a spinner is animating.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive(_))
    }

    /// Update the label of the running activity.
    pub fn tick(&mut self, text: &str) {
        match self {
            Self::Interactive(spinner) => spinner.set_text(text),
            Self::Plain { stream, logged } => {
                if !*logged {
                    stream.emit(&format!("{text}\n"));
                    *logged = true;
                }
            }
            Self::Silent => {}
        }
    }

    /// Finish the activity. Later calls to `tick` and `end` do nothing.
    pub fn end(&mut self) {
        if let Self::Interactive(spinner) = self {
            spinner.stop();
        }
        *self = Self::Silent;
    }
}

//! kpm-console - interactive console reporting for kpm
//!
//! Renders spinners, progress bars, colorized status lines and a numbered
//! select prompt, and degrades to plain (or no) output when the streams are
//! not terminals.
//!
//! # Example
//!
//! ```no_run
//! use kpm_console::{ConsoleConfig, ConsoleReporter, Reporter};
//!
//! let reporter = ConsoleReporter::new(ConsoleConfig::default());
//! reporter.header("install");
//!
//! let mut progress = reporter.progress(3);
//! for _ in 0..3 {
//!     progress.tick();
//! }
//!
//! let choice = reporter.select("Multiple versions found", "Pick one", &["1.0.0", "2.0.0"]);
//! # let _ = choice;
//! reporter.footer(true);
//! ```

pub mod config;
pub mod error;
pub mod reporter;
pub mod ui;

pub use config::{ActivityFallback, ConsoleConfig};
pub use error::{ConsoleError, Result};
pub use reporter::{ConsoleReporter, NullReporter, Progress, Reporter};

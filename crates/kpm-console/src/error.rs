//! Error taxonomy for the console layer

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the console reporter.
///
/// Rendering never fails for ordinary conditions (zero totals, non-TTY
/// streams, stopping twice). Only the select prompt and configuration
/// loading have genuine failure paths.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Standard input ended before the prompt was confirmed.
    #[error("input closed before a selection was made")]
    InputClosed,

    /// The user pressed Ctrl-C while a raw-mode prompt was active.
    #[error("prompt interrupted")]
    Interrupted,

    /// A select prompt was started without any options.
    #[error("select prompt needs at least one option")]
    NoOptions,

    /// The underlying output sink rejected a write.
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),

    /// Reading keystrokes from the input source failed.
    #[error("failed to read input: {0}")]
    Input(#[source] std::io::Error),

    /// A configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Config {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file was not valid TOML for [`crate::ConsoleConfig`].
    #[error("invalid console config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = ConsoleError> = std::result::Result<T, E>;

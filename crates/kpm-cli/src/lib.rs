//! kpm - console reporter playground
#![allow(missing_docs)]
//!
//! Drives every piece of `kpm-console` from the command line so the
//! rendering can be checked against a real terminal, a pipe or a file.
//!
//! ```text
//! kpm log                       # one line of every kind
//! kpm spin --seconds 2          # spinner with a changing label
//! kpm progress 40               # progress bar over 40 ticks
//! kpm select foo bar baz        # numbered prompt, prints the choice
//! ```

pub mod cmd;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "kpm")]
#[command(author, version, about = "kpm - console reporter playground")]
pub struct Cli {
    /// Config file (defaults to $KPM_HOME/console.toml)
    #[arg(long, global = true, env = "KPM_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print one line of every log kind
    Log {
        /// Message used for every line
        #[arg(default_value = "hello from kpm")]
        message: String,
    },
    /// Run a spinner for a while
    Spin {
        /// How long to spin
        #[arg(long, default_value_t = 2)]
        seconds: u64,
        /// Label shown next to the spinner
        #[arg(long, default_value = "working")]
        text: String,
    },
    /// Fill a progress bar
    Progress {
        /// Number of ticks
        total: u64,
        /// Pause between ticks
        #[arg(long, default_value_t = 50)]
        delay_ms: u64,
    },
    /// Ask for one of several options and print the choice
    Select {
        /// Line shown above the options
        #[arg(long, default_value = "Choose an option")]
        header: String,
        /// Prompt text, `?:` is appended
        #[arg(long, default_value = "Select one")]
        question: String,
        /// Options to pick from
        #[arg(required = true)]
        options: Vec<String>,
    },
}

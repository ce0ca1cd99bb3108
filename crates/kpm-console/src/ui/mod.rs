//! UI Module - Terminal rendering primitives
//!
//! Everything that draws on the terminal lives here. Each primitive writes
//! through an [`OutputStream`] and checks its interactivity before emitting
//! cursor control.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ ConsoleReporter │  (crate::reporter)
//! └────────┬────────┘
//!          │ hands out
//!          ▼
//! ┌──────────┬─────────────┬──────────┐
//! │ Activity │ ProgressBar │  select  │  one live primitive at a time
//! └────┬─────┴──────┬──────┴────┬─────┘
//!      │ Spinner    │           │ KeySource
//!      ▼            ▼           ▼
//! ┌─────────────────────────────────────┐
//! │ OutputStream (TTY gate + columns)   │
//! └─────────────────────────────────────┘
//!          │ styles with
//!          ▼
//! ┌─────────────┐
//! │    Theme    │  Escape sequences, colors, glyphs
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`theme`] - Escape sequences, colors and glyphs
//! - [`stream`] - TTY-aware output streams and capture buffers
//! - [`spinner`] - Timer-driven frame renderer
//! - [`progress`] - Tick-driven progress bar
//! - [`activity`] - Spinner / plain / silent activity handles
//! - [`keys`] - Keystroke sources (raw terminal, byte streams)
//! - [`select`] - Interactive single-choice prompt

pub mod activity;
pub mod keys;
pub mod progress;
pub mod select;
pub mod spinner;
pub mod stream;
pub mod theme;

// Re-export main types for convenience
pub use activity::Activity;
pub use keys::{ByteKeys, Key, KeySource, TerminalKeys};
pub use progress::ProgressBar;
pub use spinner::Spinner;
pub use stream::{Capture, OutputStream};

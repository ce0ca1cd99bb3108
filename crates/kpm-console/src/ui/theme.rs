//! UI Theme - Escape sequences, colors and glyphs
//!
//! This module defines every visual element the console emits:
//! - Cursor and line control sequences
//! - Foreground colors and bold
//! - Spinner frames and progress bar cells
//!
//! The sequences are fixed byte strings rather than terminal-negotiated
//! styles so that output is identical on every terminal and can be asserted
//! byte-for-byte.

/// Clear the entire current line.
pub const CLEAR_LINE: &str = "\x1b[2K";
/// Move the cursor to column 1 of the current line.
pub const CURSOR_HOME: &str = "\x1b[1G";
/// Clear from the cursor to the end of the screen.
pub const CLEAR_TO_END: &str = "\x1b[0J";

/// Braille spinner animation, advanced one frame per tick.
pub const SPINNER_FRAMES: [&str; 8] = ["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈"];

/// Glyphs for progress bar cells
#[derive(Debug, Clone, Copy)]
pub struct BarGlyphs {
    /// Completed cell (█)
    pub filled: char,
    /// Remaining cell (░)
    pub empty: char,
}

impl Default for BarGlyphs {
    fn default() -> Self {
        Self {
            filled: '█',
            empty: '░',
        }
    }
}

/// Sequence that clears the current line and homes the cursor.
///
/// Every single-line indicator redraw starts with this pair.
pub fn clear_line() -> String {
    format!("{CLEAR_LINE}{CURSOR_HOME}")
}

/// Move the cursor to a 1-based column.
pub fn cursor_to_column(column: usize) -> String {
    format!("\x1b[{column}G")
}

/// Foreground colors used by the reporter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Success states
    Green,
    /// Errors
    Red,
    /// Informational labels
    Blue,
    /// Warnings
    Yellow,
    /// Secondary text (step counters, commands)
    Gray,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Gray => 90,
        }
    }

    /// Wrap `text` in this color and the default-foreground reset.
    pub fn paint(self, text: &str) -> String {
        format!("\x1b[{}m{text}\x1b[39m", self.code())
    }
}

/// Wrap `text` in bold on/off.
pub fn bold(text: &str) -> String {
    format!("\x1b[1m{text}\x1b[22m")
}

/// Green, for success.
pub fn green(text: &str) -> String {
    Color::Green.paint(text)
}

/// Red, for errors.
pub fn red(text: &str) -> String {
    Color::Red.paint(text)
}

/// Blue, for info.
pub fn blue(text: &str) -> String {
    Color::Blue.paint(text)
}

/// Yellow, for warnings.
pub fn yellow(text: &str) -> String {
    Color::Yellow.paint(text)
}

/// Gray, for secondary text.
pub fn gray(text: &str) -> String {
    Color::Gray.paint(text)
}

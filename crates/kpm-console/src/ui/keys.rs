//! Keystroke sources for interactive prompts
//!
//! A prompt only needs "next key" and "end of input". [`KeySource`] is that
//! capability; [`TerminalKeys`] provides it from a raw-mode terminal and
//! [`ByteKeys`] from any byte stream (pipes, files, tests).

use crate::error::{ConsoleError, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use crossterm::tty::IsTty;
use std::io::{self, BufReader, Read};

/// A decoded keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable character
    Char(char),
    /// Enter / Return
    Enter,
    /// Backspace or Delete
    Backspace,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Escape, or an escape sequence that is not understood
    Escape,
    /// Ctrl-C
    Interrupt,
}

/// Exclusive, single-consumer source of keystrokes.
///
/// `next_key` returns `Ok(None)` once input has ended. `begin` and `end`
/// bracket one prompt and let terminal sources switch raw mode on and off.
pub trait KeySource: Send {
    /// Prepare for reading keys.
    fn begin(&mut self) -> Result<()> {
        Ok(())
    }

    /// Block until the next key, or `None` at end of input.
    fn next_key(&mut self) -> Result<Option<Key>>;

    /// Restore whatever `begin` changed.
    fn end(&mut self) {}
}

/// Keys for the process stdin: raw terminal events when stdin is a TTY,
/// decoded bytes otherwise.
pub fn stdin_keys() -> Box<dyn KeySource> {
    if io::stdin().is_tty() {
        Box::new(TerminalKeys::default())
    } else {
        Box::new(ByteKeys::new(io::stdin()))
    }
}

/// Decodes keys from a raw byte stream.
///
/// Understands `\r`/`\n` (Enter), DEL/BS (Backspace), Ctrl-C, Ctrl-D (end of
/// input), `ESC [ A` / `ESC [ B` (arrows) and UTF-8 characters.
#[derive(Debug)]
pub struct ByteKeys<R> {
    reader: BufReader<R>,
}

impl<R: Read> ByteKeys<R> {
    /// Decode keys from `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(ConsoleError::Input(err)),
            }
        }
    }

    fn escape_sequence(&mut self) -> Result<Key> {
        if self.next_byte()? != Some(b'[') {
            return Ok(Key::Escape);
        }
        Ok(match self.next_byte()? {
            Some(b'A') => Key::Up,
            Some(b'B') => Key::Down,
            _ => Key::Escape,
        })
    }

    fn utf8_char(&mut self, lead: u8) -> Result<Key> {
        let len = match lead {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Ok(Key::Char(char::REPLACEMENT_CHARACTER)),
        };
        let mut buf = vec![lead];
        for _ in 1..len {
            match self.next_byte()? {
                Some(byte) => buf.push(byte),
                None => break,
            }
        }
        let ch = std::str::from_utf8(&buf)
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        Ok(Key::Char(ch))
    }
}

impl<R: Read + Send> KeySource for ByteKeys<R> {
    fn next_key(&mut self) -> Result<Option<Key>> {
        let Some(byte) = self.next_byte()? else {
            return Ok(None);
        };
        let key = match byte {
            b'\r' | b'\n' => Key::Enter,
            0x7f | 0x08 => Key::Backspace,
            0x03 => Key::Interrupt,
            0x04 => return Ok(None),
            0x1b => self.escape_sequence()?,
            0x00..=0x7f => Key::Char(char::from(byte)),
            lead => self.utf8_char(lead)?,
        };
        Ok(Some(key))
    }
}

/// Restores cooked mode when dropped.
#[derive(Debug)]
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            tracing::warn!(error = %err, "failed to restore terminal mode");
        }
    }
}

/// Reads key events from the terminal in raw mode.
#[derive(Debug, Default)]
pub struct TerminalKeys {
    raw: Option<RawMode>,
}

enum Translated {
    Key(Key),
    EndOfInput,
    Ignored,
}

fn translate(event: KeyEvent) -> Translated {
    if event.kind == KeyEventKind::Release {
        return Translated::Ignored;
    }
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    match event.code {
        KeyCode::Char('c') if ctrl => Translated::Key(Key::Interrupt),
        KeyCode::Char('d') if ctrl => Translated::EndOfInput,
        KeyCode::Char(c) => Translated::Key(Key::Char(c)),
        KeyCode::Enter => Translated::Key(Key::Enter),
        KeyCode::Backspace | KeyCode::Delete => Translated::Key(Key::Backspace),
        KeyCode::Up => Translated::Key(Key::Up),
        KeyCode::Down => Translated::Key(Key::Down),
        KeyCode::Esc => Translated::Key(Key::Escape),
        _ => Translated::Ignored,
    }
}

impl KeySource for TerminalKeys {
    fn begin(&mut self) -> Result<()> {
        if self.raw.is_none() {
            self.raw = Some(RawMode::enable().map_err(ConsoleError::Input)?);
        }
        Ok(())
    }

    fn next_key(&mut self) -> Result<Option<Key>> {
        loop {
            if let Event::Key(key_event) = event::read().map_err(ConsoleError::Input)? {
                match translate(key_event) {
                    Translated::Key(key) => return Ok(Some(key)),
                    Translated::EndOfInput => return Ok(None),
                    Translated::Ignored => {}
                }
            }
        }
    }

    fn end(&mut self) {
        self.raw = None;
    }
}

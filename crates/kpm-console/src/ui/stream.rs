//! Output Stream Gate - TTY-aware output sinks
//!
//! Every renderer writes through an [`OutputStream`]. The stream answers two
//! questions before any cursor-control sequence is emitted: is this an
//! interactive terminal, and how wide is it.
//!
//! The interactive flag is an atomic that is read fresh on every call. It can
//! be flipped with [`OutputStream::set_interactive`] while handles are alive,
//! which is how tests simulate a terminal detaching mid-run.

use crate::error::{ConsoleError, Result};
use crossterm::tty::IsTty;
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Width used when the terminal cannot be queried.
pub const DEFAULT_COLUMNS: u16 = 80;

type Sink = Box<dyn Write + Send>;

/// A cloneable handle to one logical output stream (primary or status).
///
/// Clones share the sink, the interactive flag and the column override.
#[derive(Clone)]
pub struct OutputStream {
    sink: Arc<Mutex<Sink>>,
    interactive: Arc<AtomicBool>,
    columns: Arc<AtomicU16>,
    fallback_columns: u16,
}

impl OutputStream {
    /// Wrap an arbitrary writer.
    pub fn new(writer: impl Write + Send + 'static, interactive: bool) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
            interactive: Arc::new(AtomicBool::new(interactive)),
            columns: Arc::new(AtomicU16::new(0)),
            fallback_columns: DEFAULT_COLUMNS,
        }
    }

    /// Process stdout, interactive when attached to a terminal.
    pub fn stdout() -> Self {
        let interactive = io::stdout().is_tty();
        Self::new(io::stdout(), interactive)
    }

    /// Process stderr, interactive when attached to a terminal.
    pub fn stderr() -> Self {
        let interactive = io::stderr().is_tty();
        Self::new(io::stderr(), interactive)
    }

    /// An in-memory stream that records every write as a separate chunk.
    pub fn capture(interactive: bool) -> (Self, Capture) {
        let capture = Capture::default();
        let writer = CaptureWriter {
            chunks: Arc::clone(&capture.chunks),
        };
        (Self::new(writer, interactive), capture)
    }

    /// Pin the reported width instead of querying the terminal. `0` unpins.
    pub fn with_columns(self, columns: u16) -> Self {
        self.columns.store(columns, Ordering::Relaxed);
        self
    }

    /// Width reported when neither an override nor a terminal size exists.
    pub fn with_fallback_columns(mut self, columns: u16) -> Self {
        self.fallback_columns = columns;
        self
    }

    /// Whether the stream is currently an interactive terminal.
    pub fn is_tty(&self) -> bool {
        self.interactive.load(Ordering::SeqCst)
    }

    /// Flip the interactive flag for every clone of this stream.
    pub fn set_interactive(&self, interactive: bool) {
        self.interactive.store(interactive, Ordering::SeqCst);
    }

    /// Usable terminal width, always positive.
    pub fn columns(&self) -> usize {
        let pinned = self.columns.load(Ordering::Relaxed);
        if pinned > 0 {
            return usize::from(pinned);
        }
        if self.is_tty() {
            if let Ok((width, _)) = crossterm::terminal::size() {
                if width > 0 {
                    return usize::from(width);
                }
            }
        }
        if self.fallback_columns > 0 {
            usize::from(self.fallback_columns)
        } else {
            usize::from(DEFAULT_COLUMNS)
        }
    }

    /// Write `text` verbatim and flush. No newline is added.
    pub fn write(&self, text: &str) -> Result<()> {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        sink.write_all(text.as_bytes()).map_err(ConsoleError::Write)?;
        sink.flush().map_err(ConsoleError::Write)
    }

    /// Write without surfacing failures. Visuals simply stop updating.
    pub(crate) fn emit(&self, text: &str) {
        if let Err(err) = self.write(text) {
            tracing::debug!(error = %err, "dropping console write");
        }
    }
}

impl fmt::Debug for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputStream")
            .field("interactive", &self.is_tty())
            .field("columns", &self.columns.load(Ordering::Relaxed))
            .field("fallback_columns", &self.fallback_columns)
            .finish_non_exhaustive()
    }
}

/// Recorded output of a [`OutputStream::capture`] stream.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    chunks: Arc<Mutex<Vec<String>>>,
}

impl Capture {
    /// Every write, in order, one entry per call.
    pub fn chunks(&self) -> Vec<String> {
        self.chunks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// All writes concatenated.
    pub fn contents(&self) -> String {
        self.chunks().concat()
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.chunks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.chunks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

struct CaptureWriter {
    chunks: Arc<Mutex<Vec<String>>>,
}

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.chunks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(String::from_utf8_lossy(buf).into_owned());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

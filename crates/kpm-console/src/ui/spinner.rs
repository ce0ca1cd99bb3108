//! Spinner - Timer-driven frame renderer
//!
//! A background ticker thread redraws the spinner line on a fixed interval.
//! The thread blocks on a channel with a timeout: a timeout means "draw the
//! next frame", a message or a dropped sender means "exit".
//!
//! Frame state sits behind a mutex and the ticker draws while holding it.
//! [`Spinner::stop`] marks the spinner stopped under that same lock before
//! joining the thread, so no frame can be drawn after `stop` returns.

use super::stream::OutputStream;
use super::theme::{self, SPINNER_FRAMES};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Default delay between frames.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Stopped,
}

#[derive(Debug)]
struct SpinnerState {
    frame: usize,
    text: String,
    phase: Phase,
}

#[derive(Debug)]
struct Shared {
    stream: OutputStream,
    state: Mutex<SpinnerState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SpinnerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Draw the current frame and advance. Returns false once stopped.
    fn draw(&self) -> bool {
        let mut state = self.lock();
        if state.phase == Phase::Stopped {
            return false;
        }
        let glyph = SPINNER_FRAMES[state.frame];
        self.stream
            .emit(&format!("{}{glyph} {}", theme::clear_line(), state.text));
        state.frame = (state.frame + 1) % SPINNER_FRAMES.len();
        true
    }
}

/// Owned handle to the ticker thread. Cancelled by dropping the sender and
/// joining.
#[derive(Debug)]
struct Ticker {
    cancel: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl Ticker {
    fn spawn(shared: Arc<Shared>, interval: Duration) -> Option<Self> {
        let (cancel, receiver) = mpsc::channel::<()>();
        let spawned = thread::Builder::new()
            .name("kpm-spinner".to_string())
            .spawn(move || {
                loop {
                    match receiver.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            if !shared.draw() {
                                break;
                            }
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            });

        match spawned {
            Ok(handle) => Some(Self { cancel, handle }),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "spinner ticker unavailable, animating on demand only"
                );
                None
            }
        }
    }

    fn cancel(self) {
        let Self { cancel, handle } = self;
        let _ = cancel.send(());
        drop(cancel);
        if handle.join().is_err() {
            tracing::warn!("spinner ticker panicked");
        }
    }
}

/// An animated single-line status indicator.
///
/// # Example
///
/// ```no_run
/// use kpm_console::ui::{OutputStream, Spinner};
///
/// let mut spinner = Spinner::new(OutputStream::stderr());
/// spinner.start();
/// spinner.set_text("resolving packages");
/// // ... do work ...
/// spinner.stop();
/// ```
#[derive(Debug)]
pub struct Spinner {
    shared: Arc<Shared>,
    interval: Duration,
    ticker: Option<Ticker>,
}

impl Spinner {
    /// Create a stopped spinner writing to `stream`.
    pub fn new(stream: OutputStream) -> Self {
        Self {
            shared: Arc::new(Shared {
                stream,
                state: Mutex::new(SpinnerState {
                    frame: 0,
                    text: String::new(),
                    phase: Phase::Idle,
                }),
            }),
            interval: DEFAULT_INTERVAL,
            ticker: None,
        }
    }

    /// Use a different delay between frames.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Draw the first frame and begin animating.
    ///
    /// Starting a running or stopped spinner does nothing.
    pub fn start(&mut self) {
        {
            let mut state = self.shared.lock();
            if state.phase != Phase::Idle {
                return;
            }
            state.phase = Phase::Running;
        }
        tracing::debug!(interval_ms = self.interval.as_millis(), "spinner started");
        self.shared.draw();
        self.ticker = Ticker::spawn(Arc::clone(&self.shared), self.interval);
    }

    /// Replace the label. Picked up by the next frame.
    pub fn set_text(&self, text: impl Into<String>) {
        self.shared.lock().text = text.into();
    }

    /// Draw the current frame immediately and advance to the next one.
    pub fn render(&self) {
        self.shared.draw();
    }

    /// Index of the frame the next render will draw.
    pub fn frame(&self) -> usize {
        self.shared.lock().frame
    }

    /// Started and not yet stopped.
    pub fn is_running(&self) -> bool {
        self.shared.lock().phase == Phase::Running
    }

    /// Cancel the ticker and blank the line. Safe to call repeatedly.
    pub fn stop(&mut self) {
        {
            let mut state = self.shared.lock();
            if state.phase == Phase::Stopped {
                return;
            }
            state.phase = Phase::Stopped;
        }
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.shared.stream.emit(&theme::clear_line());
        tracing::debug!("spinner stopped");
    }
}

impl Drop for Spinner {
    /// Stops a running spinner. One that never started leaves the line alone.
    fn drop(&mut self) {
        if self.is_running() {
            self.stop();
        }
    }
}

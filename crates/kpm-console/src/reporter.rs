//! Reporter trait and the console implementation
//!
//! Core logic reports through [`Reporter`] without knowing whether a
//! terminal, a pipe or nothing at all sits on the other end.
//! [`ConsoleReporter`] is the terminal implementation; [`NullReporter`]
//! drops everything.
//!
//! Channel split: informational lines go to the primary stream (stdout);
//! errors, warnings, spinners and progress bars go to the status stream
//! (stderr).

use crate::config::ConsoleConfig;
use crate::error::Result;
use crate::ui::activity::Activity;
use crate::ui::keys::{self, KeySource};
use crate::ui::progress::ProgressBar;
use crate::ui::select;
use crate::ui::stream::OutputStream;
use crate::ui::theme;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Sink for user-facing status output.
pub trait Reporter: Send + Sync {
    /// `[current/total] message...`
    fn step(&self, current: usize, total: usize, msg: &str);

    /// Bold `<tool> <command> v<version>` banner.
    fn header(&self, command: &str);

    /// Elapsed time, optionally with peak memory usage.
    fn footer(&self, show_peak_memory: bool);

    /// Log an unadorned line.
    fn log(&self, msg: &str);

    /// Log a success message.
    fn success(&self, msg: &str);

    /// Log an error message.
    fn error(&self, msg: &str);

    /// Log an informational message.
    fn info(&self, msg: &str);

    /// Log a warning message.
    fn warn(&self, msg: &str);

    /// Echo a shell command about to run.
    fn command(&self, command: &str);

    /// Begin a long-running activity.
    fn activity(&self) -> Activity;

    /// Begin a progress bar for `total` ticks.
    fn progress(&self, total: u64) -> Progress;
}

impl<T: Reporter + ?Sized> Reporter for Arc<T> {
    fn step(&self, current: usize, total: usize, msg: &str) {
        (**self).step(current, total, msg);
    }
    fn header(&self, command: &str) {
        (**self).header(command);
    }
    fn footer(&self, show_peak_memory: bool) {
        (**self).footer(show_peak_memory);
    }
    fn log(&self, msg: &str) {
        (**self).log(msg);
    }
    fn success(&self, msg: &str) {
        (**self).success(msg);
    }
    fn error(&self, msg: &str) {
        (**self).error(msg);
    }
    fn info(&self, msg: &str) {
        (**self).info(msg);
    }
    fn warn(&self, msg: &str) {
        (**self).warn(msg);
    }
    fn command(&self, command: &str) {
        (**self).command(command);
    }
    fn activity(&self) -> Activity {
        (**self).activity()
    }
    fn progress(&self, total: u64) -> Progress {
        (**self).progress(total)
    }
}

/// A no-op reporter for silent operations (e.g., verification, testing).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn step(&self, _: usize, _: usize, _: &str) {}
    fn header(&self, _: &str) {}
    fn footer(&self, _: bool) {}
    fn log(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn error(&self, _: &str) {}
    fn info(&self, _: &str) {}
    fn warn(&self, _: &str) {}
    fn command(&self, _: &str) {}
    fn activity(&self) -> Activity {
        Activity::Silent
    }
    fn progress(&self, _: u64) -> Progress {
        Progress::disabled()
    }
}

/// Handle returned by [`Reporter::progress`].
///
/// Draws `0/total` on creation and redraws after every tick until the bar
/// completes, at which point the line is cleared.
#[derive(Debug)]
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    fn start(total: u64, stream: OutputStream) -> Self {
        if total == 0 || !stream.is_tty() {
            return Self::disabled();
        }
        let bar = ProgressBar::new(total, stream);
        bar.render();
        Self { bar: Some(bar) }
    }

    /// A handle that never writes.
    pub fn disabled() -> Self {
        Self { bar: None }
    }

    /// Whether ticks draw anything.
    pub fn is_enabled(&self) -> bool {
        self.bar.is_some()
    }

    /// Count one unit of work and redraw.
    pub fn tick(&mut self) {
        if let Some(bar) = &mut self.bar {
            bar.tick();
            if !bar.is_complete() {
                bar.render();
            }
        }
    }
}

/// Terminal implementation of [`Reporter`], plus the interactive prompt.
pub struct ConsoleReporter {
    stdout: OutputStream,
    stderr: OutputStream,
    keys: Mutex<Box<dyn KeySource>>,
    config: ConsoleConfig,
    started: Instant,
}

impl ConsoleReporter {
    /// Reporter over the process stdout, stderr and stdin.
    pub fn new(config: ConsoleConfig) -> Self {
        let stdout = OutputStream::stdout().with_fallback_columns(config.fallback_columns);
        let stderr = OutputStream::stderr().with_fallback_columns(config.fallback_columns);
        Self::with_streams(stdout, stderr, keys::stdin_keys(), config)
    }

    /// Reporter over explicit streams and keystroke source.
    pub fn with_streams(
        stdout: OutputStream,
        stderr: OutputStream,
        keys: Box<dyn KeySource>,
        config: ConsoleConfig,
    ) -> Self {
        Self {
            stdout,
            stderr,
            keys: Mutex::new(keys),
            config,
            started: Instant::now(),
        }
    }

    /// Primary stream.
    pub fn stdout(&self) -> &OutputStream {
        &self.stdout
    }

    /// Status stream.
    pub fn stderr(&self) -> &OutputStream {
        &self.stderr
    }

    /// Settings this reporter was built with.
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Ask the user to choose one of `options` and return it.
    ///
    /// Blocks until the choice is confirmed. The keystroke source is locked
    /// for the whole prompt.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::ConsoleError::InputClosed`] if stdin ends first;
    /// see [`select::select`] for the rest.
    pub fn select<S: AsRef<str>>(
        &self,
        header: &str,
        question: &str,
        options: &[S],
    ) -> Result<String> {
        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        select::select(&self.stdout, keys.as_mut(), header, question, options)
    }

    fn line(stream: &OutputStream, text: &str) {
        stream.emit(&format!("{text}\n"));
    }
}

impl fmt::Debug for ConsoleReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleReporter")
            .field("stdout", &self.stdout)
            .field("stderr", &self.stderr)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Reporter for ConsoleReporter {
    fn step(&self, current: usize, total: usize, msg: &str) {
        let counter = theme::gray(&format!("[{current}/{total}]"));
        Self::line(&self.stdout, &format!("{counter} {msg}..."));
    }

    fn header(&self, command: &str) {
        let banner = format!(
            "{} {command} v{}",
            self.config.tool_name, self.config.tool_version
        );
        Self::line(&self.stdout, &theme::bold(&banner));
    }

    fn footer(&self, show_peak_memory: bool) {
        let peak = show_peak_memory.then(|| peak_memory_bytes().unwrap_or(0));
        let text = format_footer(self.started.elapsed(), peak, self.config.emoji);
        Self::line(&self.stdout, &text);
    }

    fn log(&self, msg: &str) {
        Self::line(&self.stdout, msg);
    }

    fn success(&self, msg: &str) {
        Self::line(&self.stdout, &format!("{} {msg}", theme::green("success")));
    }

    fn error(&self, msg: &str) {
        Self::line(&self.stderr, &format!("{} {msg}", theme::red("error")));
    }

    fn info(&self, msg: &str) {
        Self::line(&self.stdout, &format!("{} {msg}", theme::blue("info")));
    }

    fn warn(&self, msg: &str) {
        Self::line(&self.stderr, &format!("{} {msg}", theme::yellow("warning")));
    }

    fn command(&self, command: &str) {
        Self::line(&self.stdout, &theme::gray(&format!("$ {command}")));
    }

    fn activity(&self) -> Activity {
        Activity::start(
            self.stderr.clone(),
            self.config.spinner_interval(),
            self.config.activity_fallback,
        )
    }

    fn progress(&self, total: u64) -> Progress {
        Progress::start(total, self.stderr.clone())
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

/// `✨  Done in 1.23s. Peak memory usage 4.56MB.`
pub fn format_footer(elapsed: Duration, peak_memory: Option<u64>, emoji: bool) -> String {
    let mut text = format!("Done in {:.2}s.", elapsed.as_secs_f64());
    if let Some(bytes) = peak_memory {
        let mb = bytes as f64 / 1024.0 / 1024.0;
        text.push_str(&format!(" Peak memory usage {mb:.2}MB."));
    }
    if emoji { format!("✨  {text}") } else { text }
}

/// Peak resident set size of this process, where the platform exposes it.
fn peak_memory_bytes() -> Option<u64> {
    if cfg!(target_os = "linux") {
        let status = std::fs::read_to_string("/proc/self/status").ok()?;
        parse_vm_hwm(&status)
    } else {
        None
    }
}

fn parse_vm_hwm(status: &str) -> Option<u64> {
    let line = status.lines().find(|line| line.starts_with("VmHWM:"))?;
    let kb: u64 = line
        .trim_start_matches("VmHWM:")
        .trim()
        .trim_end_matches("kB")
        .trim()
        .parse()
        .ok()?;
    Some(kb * 1024)
}

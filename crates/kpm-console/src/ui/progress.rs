//! Progress Bar - Tick-driven single line indicator
//!
//! Updates are driven by explicit [`ProgressBar::tick`] calls. Rendering is a
//! separate call so callers can batch ticks and draw once.

use super::stream::OutputStream;
use super::theme::{self, BarGlyphs};

/// A `current/total` bar drawn on one terminal line.
///
/// Nothing is ever written when the stream is not a terminal or when
/// `total` is zero.
#[derive(Debug)]
pub struct ProgressBar {
    current: u64,
    total: u64,
    stream: OutputStream,
    glyphs: BarGlyphs,
}

impl ProgressBar {
    /// Create a bar for `total` ticks writing to `stream`.
    pub fn new(total: u64, stream: OutputStream) -> Self {
        Self {
            current: 0,
            total,
            stream,
            glyphs: BarGlyphs::default(),
        }
    }

    /// Ticks counted so far.
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Ticks needed to complete.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// True once every tick has been counted.
    pub fn is_complete(&self) -> bool {
        self.current >= self.total
    }

    fn enabled(&self) -> bool {
        self.total > 0 && self.stream.is_tty()
    }

    /// Count one unit of work. Saturates at `total`.
    ///
    /// The tick that completes the bar clears its line so the next output
    /// starts on a blank row.
    pub fn tick(&mut self) {
        if self.is_complete() {
            return;
        }
        self.current += 1;
        if self.is_complete() && self.enabled() {
            self.stream.emit(&theme::clear_line());
        }
    }

    /// Redraw the bar in place.
    pub fn render(&self) {
        if !self.enabled() {
            return;
        }
        let line = format_progress_line(
            self.current,
            self.total,
            self.stream.columns(),
            self.glyphs,
        );
        self.stream.emit(&format!("{}{line}", theme::clear_line()));
    }
}

/// Format the bar plus its ` current/total` counter so the whole line fits
/// in `columns`.
pub fn format_progress_line(current: u64, total: u64, columns: usize, glyphs: BarGlyphs) -> String {
    let counter = format!(" {current}/{total}");
    let available = columns.saturating_sub(counter.chars().count()).max(1);
    let width = usize::try_from(total).map_or(available, |total| total.min(available));
    format!("{}{counter}", format_progress_bar(current, total, width, glyphs))
}

/// Format a `width`-cell bar with `current/total` of it filled.
pub fn format_progress_bar(current: u64, total: u64, width: usize, glyphs: BarGlyphs) -> String {
    let filled = if total > 0 {
        ((current.min(total) as f64 / total as f64) * width as f64).round() as usize
    } else {
        0
    };
    let empty = width.saturating_sub(filled);
    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat_n(glyphs.filled, filled));
    bar.extend(std::iter::repeat_n(glyphs.empty, empty));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tty_bar(total: u64) -> (ProgressBar, crate::ui::stream::Capture) {
        let (stream, capture) = OutputStream::capture(true);
        (ProgressBar::new(total, stream.with_columns(1000)), capture)
    }

    #[test]
    fn test_render_sequence() {
        let (mut bar, capture) = tty_bar(2);

        bar.render();
        assert_eq!(capture.contents(), "\x1b[2K\x1b[1G░░ 0/2");

        bar.tick();
        bar.render();
        assert_eq!(
            capture.contents(),
            "\x1b[2K\x1b[1G░░ 0/2\x1b[2K\x1b[1G█░ 1/2"
        );

        bar.tick();
        bar.render();
        assert_eq!(
            capture.contents(),
            "\x1b[2K\x1b[1G░░ 0/2\x1b[2K\x1b[1G█░ 1/2\x1b[2K\x1b[1G\x1b[2K\x1b[1G██ 2/2"
        );
    }

    #[test]
    fn test_render_without_tick_still_clears() {
        let (mut bar, capture) = tty_bar(2);
        bar.tick();
        bar.render();
        bar.render();
        assert_eq!(
            capture.chunks(),
            vec!["\x1b[2K\x1b[1G█░ 1/2", "\x1b[2K\x1b[1G█░ 1/2"]
        );
    }

    #[test]
    fn test_tick_saturates() {
        let (mut bar, capture) = tty_bar(3);
        for _ in 0..10 {
            bar.tick();
            assert!(bar.current() <= bar.total());
        }
        assert_eq!(bar.current(), 3);
        assert!(bar.is_complete());
        // only the completing tick clears
        assert_eq!(capture.chunks(), vec!["\x1b[2K\x1b[1G"]);
    }

    #[test]
    fn test_non_tty_writes_nothing() {
        let (stream, capture) = OutputStream::capture(false);
        let mut bar = ProgressBar::new(2, stream);
        bar.render();
        bar.tick();
        bar.render();
        bar.tick();
        bar.render();
        assert!(capture.is_empty());
    }

    #[test]
    fn test_tty_flag_is_read_per_render() {
        let (stream, capture) = OutputStream::capture(true);
        let mut bar = ProgressBar::new(4, stream.clone().with_columns(80));
        bar.render();
        stream.set_interactive(false);
        bar.tick();
        bar.render();
        assert_eq!(capture.chunks().len(), 1);
    }

    #[test]
    fn test_zero_total_writes_nothing() {
        let (mut bar, capture) = tty_bar(0);
        bar.render();
        bar.tick();
        bar.render();
        assert_eq!(bar.current(), 0);
        assert!(capture.is_empty());
    }

    #[test]
    fn test_line_fits_columns() {
        let glyphs = BarGlyphs::default();
        let line = format_progress_line(50, 100, 20, glyphs);
        assert_eq!(line.chars().count(), 20);
        assert!(line.ends_with(" 50/100"));

        // tiny terminals still draw one cell
        let line = format_progress_line(0, 100, 3, glyphs);
        assert!(line.starts_with('░'));
    }

    #[test]
    fn test_progress_bar_format() {
        let glyphs = BarGlyphs::default();

        let bar = format_progress_bar(50, 100, 10, glyphs);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(bar.chars().filter(|c| *c == '░').count(), 5);

        let bar = format_progress_bar(100, 100, 10, glyphs);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 10);

        let bar = format_progress_bar(0, 100, 10, glyphs);
        assert_eq!(bar.chars().filter(|c| *c == '░').count(), 10);
    }
}

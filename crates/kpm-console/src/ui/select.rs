//! Interactive single-choice prompt
//!
//! Lists the options as `N. option`, then reads keystrokes until Enter.
//! Digits are typed and echoed; arrow keys move a cursor through the list
//! and show its number in the input field. Enter picks the typed number, or
//! the cursor's option when the number is empty or out of range.
//!
//! On a non-interactive stream the cursor-control writes and in-place
//! redraws are skipped; the list, the question and echoed digits remain.

use super::keys::{Key, KeySource};
use super::stream::OutputStream;
use super::theme::{self, CLEAR_TO_END, CURSOR_HOME};
use crate::error::{ConsoleError, Result};

/// What a keystroke did to the prompt
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    /// Append the character to the visible input
    Echo(char),
    /// Redraw the whole input field
    Redraw,
    /// Nothing visible changed
    Ignore,
    /// Finish with the option at this index
    Confirm(usize),
    /// Abort the prompt
    Interrupt,
}

#[derive(Debug)]
struct SelectState {
    len: usize,
    cursor: usize,
    input: String,
}

impl SelectState {
    fn new(len: usize) -> Self {
        Self {
            len,
            cursor: 0,
            input: String::new(),
        }
    }

    fn apply(&mut self, key: Key) -> Outcome {
        match key {
            Key::Char(c) if c.is_ascii_digit() => {
                self.input.push(c);
                Outcome::Echo(c)
            }
            Key::Backspace => {
                if self.input.pop().is_some() {
                    Outcome::Redraw
                } else {
                    Outcome::Ignore
                }
            }
            Key::Up => self.move_cursor(self.cursor.saturating_sub(1)),
            Key::Down => self.move_cursor((self.cursor + 1).min(self.len - 1)),
            Key::Enter => Outcome::Confirm(self.resolve()),
            Key::Interrupt => Outcome::Interrupt,
            Key::Char(_) | Key::Escape => Outcome::Ignore,
        }
    }

    fn move_cursor(&mut self, cursor: usize) -> Outcome {
        self.cursor = cursor;
        self.input = (cursor + 1).to_string();
        Outcome::Redraw
    }

    /// Typed 1-based number if it names an option, else the cursor.
    fn resolve(&self) -> usize {
        self.input
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=self.len).contains(n))
            .map_or(self.cursor, |n| n - 1)
    }
}

/// Brackets raw-mode input for one prompt.
struct InputSession<'k> {
    keys: &'k mut dyn KeySource,
}

impl<'k> InputSession<'k> {
    fn begin(keys: &'k mut dyn KeySource) -> Result<Self> {
        keys.begin()?;
        Ok(Self { keys })
    }

    fn next_key(&mut self) -> Result<Option<Key>> {
        self.keys.next_key()
    }
}

impl Drop for InputSession<'_> {
    fn drop(&mut self) {
        self.keys.end();
    }
}

/// Ask the user to pick one of `options`.
///
/// Writes go to `stream`; keys come from `keys`, which is held exclusively
/// for the duration of the prompt.
///
/// # Errors
///
/// - [`ConsoleError::NoOptions`] when `options` is empty (nothing is written)
/// - [`ConsoleError::InputClosed`] when input ends before Enter
/// - [`ConsoleError::Interrupted`] on Ctrl-C
/// - [`ConsoleError::Input`] when reading keys fails
pub fn select<S: AsRef<str>>(
    stream: &OutputStream,
    keys: &mut dyn KeySource,
    header: &str,
    question: &str,
    options: &[S],
) -> Result<String> {
    if options.is_empty() {
        return Err(ConsoleError::NoOptions);
    }

    tracing::trace!(options = options.len(), "select: listing");
    stream.emit(&format!("{header}\n"));
    for (index, option) in options.iter().enumerate() {
        stream.emit(&format!("{}. {}\n", index + 1, option.as_ref()));
    }

    tracing::trace!("select: awaiting input");
    let prompt = format!("{question}?:");
    let input_column = prompt.chars().count() + 2;
    let interactive = stream.is_tty();
    if interactive {
        stream.emit(CURSOR_HOME);
        stream.emit(CLEAR_TO_END);
    }
    stream.emit(&prompt);
    if interactive {
        stream.emit(&theme::cursor_to_column(input_column));
    }

    let mut state = SelectState::new(options.len());
    let mut session = InputSession::begin(keys)?;
    loop {
        let Some(key) = session.next_key()? else {
            tracing::debug!("select: input closed before confirmation");
            return Err(ConsoleError::InputClosed);
        };
        match state.apply(key) {
            Outcome::Echo(c) => stream.emit(c.encode_utf8(&mut [0u8; 4])),
            Outcome::Redraw if interactive => stream.emit(&format!(
                "{}{CLEAR_TO_END}{}",
                theme::cursor_to_column(input_column),
                state.input
            )),
            Outcome::Redraw | Outcome::Ignore => {}
            Outcome::Confirm(index) => {
                drop(session);
                stream.emit("\n");
                tracing::trace!(index, "select: confirmed");
                return Ok(options[index].as_ref().to_string());
            }
            Outcome::Interrupt => return Err(ConsoleError::Interrupted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::keys::ByteKeys;

    #[derive(Default)]
    struct RecordingKeys {
        keys: Vec<Key>,
        began: usize,
        ended: usize,
    }

    impl KeySource for RecordingKeys {
        fn begin(&mut self) -> Result<()> {
            self.began += 1;
            Ok(())
        }

        fn next_key(&mut self) -> Result<Option<Key>> {
            if self.keys.is_empty() {
                Ok(None)
            } else {
                Ok(Some(self.keys.remove(0)))
            }
        }

        fn end(&mut self) {
            self.ended += 1;
        }
    }

    fn run(input: &[u8], options: &[&str]) -> (Result<String>, Vec<String>) {
        let (stream, capture) = OutputStream::capture(true);
        let mut keys = ByteKeys::new(input);
        let result = select(&stream, &mut keys, "Ayo", "Select one", options);
        (result, capture.chunks())
    }

    #[test]
    fn test_digit_selection_wire_format() {
        let (result, chunks) = run(b"1\n", &["foo", "bar"]);
        assert_eq!(result.unwrap(), "foo");
        assert_eq!(
            chunks,
            vec![
                "Ayo\n",
                "1. foo\n",
                "2. bar\n",
                "\x1b[1G",
                "\x1b[0J",
                "Select one?:",
                "\x1b[14G",
                "1",
                "\n",
            ]
        );
    }

    #[test]
    fn test_non_tty_skips_cursor_control() {
        let (stream, capture) = OutputStream::capture(false);
        let mut keys = ByteKeys::new(&b"1\n"[..]);
        let result = select(&stream, &mut keys, "Ayo", "Select one", &["foo", "bar"]);
        assert_eq!(result.unwrap(), "foo");
        assert_eq!(
            capture.chunks(),
            vec!["Ayo\n", "1. foo\n", "2. bar\n", "Select one?:", "1", "\n"]
        );

        let (stream, capture) = OutputStream::capture(false);
        let mut keys = ByteKeys::new(&b"\x1b[B2\x7f\n"[..]);
        let result = select(&stream, &mut keys, "Ayo", "Select one", &["foo", "bar"]);
        assert_eq!(result.unwrap(), "bar");
        assert!(!capture.contents().contains('\x1b'));
    }

    #[test]
    fn test_second_option() {
        let (result, _) = run(b"2\r", &["foo", "bar"]);
        assert_eq!(result.unwrap(), "bar");
    }

    #[test]
    fn test_out_of_range_falls_back_to_cursor() {
        let (result, _) = run(b"9\n", &["foo", "bar"]);
        assert_eq!(result.unwrap(), "foo");

        let (result, _) = run(b"\n", &["foo", "bar"]);
        assert_eq!(result.unwrap(), "foo");

        let (result, _) = run(b"0\n", &["foo", "bar"]);
        assert_eq!(result.unwrap(), "foo");
    }

    #[test]
    fn test_non_digits_are_ignored() {
        let (result, chunks) = run(b"x2y\n", &["foo", "bar"]);
        assert_eq!(result.unwrap(), "bar");
        assert!(!chunks.iter().any(|c| c == "x" || c == "y"));
    }

    #[test]
    fn test_arrow_navigation() {
        let (result, chunks) = run(b"\x1b[B\x1b[B\x1b[B\n", &["foo", "bar", "baz"]);
        assert_eq!(result.unwrap(), "baz");
        assert!(chunks.contains(&"\x1b[14G\x1b[0J2".to_string()));
        assert!(chunks.contains(&"\x1b[14G\x1b[0J3".to_string()));

        let (result, _) = run(b"\x1b[B\x1b[A\x1b[A\n", &["foo", "bar"]);
        assert_eq!(result.unwrap(), "foo");
    }

    #[test]
    fn test_backspace_edits_input() {
        let (result, chunks) = run(b"12\x7f\n", &["foo", "bar"]);
        assert_eq!(result.unwrap(), "foo");
        assert!(chunks.contains(&"\x1b[14G\x1b[0J1".to_string()));
    }

    #[test]
    fn test_input_closed_before_enter() {
        let (result, chunks) = run(b"1", &["foo", "bar"]);
        assert!(matches!(result, Err(ConsoleError::InputClosed)));
        assert_eq!(chunks.last().map(String::as_str), Some("1"));
    }

    #[test]
    fn test_interrupt() {
        let (result, _) = run(b"\x03", &["foo"]);
        assert!(matches!(result, Err(ConsoleError::Interrupted)));
    }

    #[test]
    fn test_empty_options_writes_nothing() {
        let (result, chunks) = run(b"1\n", &[]);
        assert!(matches!(result, Err(ConsoleError::NoOptions)));
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_session_brackets_input() {
        let (stream, _capture) = OutputStream::capture(true);
        let mut keys = RecordingKeys {
            keys: vec![Key::Char('1'), Key::Enter],
            ..RecordingKeys::default()
        };
        let result = select(&stream, &mut keys, "h", "q", &["a"]);
        assert_eq!(result.unwrap(), "a");
        assert_eq!((keys.began, keys.ended), (1, 1));

        let mut keys = RecordingKeys::default();
        let result = select(&stream, &mut keys, "h", "q", &["a"]);
        assert!(matches!(result, Err(ConsoleError::InputClosed)));
        assert_eq!((keys.began, keys.ended), (1, 1));
    }

    #[test]
    fn test_resolve() {
        let mut state = SelectState::new(3);
        assert_eq!(state.resolve(), 0);
        state.apply(Key::Down);
        assert_eq!(state.resolve(), 1);
        state.input = "3".to_string();
        assert_eq!(state.resolve(), 2);
        state.input = "4".to_string();
        assert_eq!(state.resolve(), 1);
    }
}

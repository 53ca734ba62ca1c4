//! Character cursor tracking line, column, and offsets.

use crate::lexer::location::Location;

/// Position cursor over recipe source text.
///
/// Keeps the byte index used for slicing next to the character-based
/// coordinates reported in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor {
    byte: usize,
    location: Location,
}

impl Cursor {
    /// Creates a cursor at the start of the input.
    pub(crate) fn new() -> Self {
        Self {
            byte: 0,
            location: Location::start(),
        }
    }

    /// Returns the current byte index.
    pub(crate) fn byte_offset(&self) -> usize {
        self.byte
    }

    /// Returns the current character location.
    pub(crate) fn location(&self) -> Location {
        self.location
    }

    /// Returns `true` if the cursor is at or beyond input end.
    pub(crate) fn is_eof(&self, input: &str) -> bool {
        self.byte >= input.len()
    }

    /// Returns the character at cursor position.
    pub(crate) fn peek_char(&self, input: &str) -> Option<char> {
        input.get(self.byte..)?.chars().next()
    }

    /// Consumes one character, updating line and column.
    pub(crate) fn advance_char(&mut self, input: &str) -> Option<char> {
        let ch = self.peek_char(input)?;
        self.byte += ch.len_utf8();
        self.location.offset += 1;
        if ch == '\n' {
            self.location.line += 1;
            self.location.column = 1;
        } else {
            self.location.column += 1;
        }
        Some(ch)
    }

    /// Consumes characters while `predicate` holds and returns the consumed slice.
    pub(crate) fn advance_while<'a, P>(&mut self, input: &'a str, predicate: P) -> &'a str
    where
        P: Fn(char) -> bool,
    {
        let start = self.byte;
        while let Some(ch) = self.peek_char(input) {
            if !predicate(ch) {
                break;
            }
            let _ = self.advance_char(input);
        }
        &input[start..self.byte]
    }
}

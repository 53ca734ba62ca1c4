//! Immutable source location primitives.

use std::fmt;

/// Position of a token or diagnostic in recipe source text.
///
/// `line` and `column` are 1-based and count characters, `offset` is the
/// 0-based character index from the start of the source. Editors map
/// diagnostics back to a cursor position through `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, in characters.
    pub column: usize,
    /// 0-based absolute character offset.
    pub offset: usize,
}

impl Location {
    /// Creates a location value.
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Location of the first character of a source.
    pub const fn start() -> Self {
        Self::new(1, 1, 0)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

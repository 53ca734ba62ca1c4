//! Line-oriented lexer for recipe source text.
//!
//! Tokens are produced lazily: the lexer scans one source line at a time into
//! a small buffer and hands tokens out on demand, so the parser never needs
//! the whole stream up front.

pub mod location;
pub mod token;
pub mod vocabulary;

mod cursor;
mod operator;
mod scanner;

use std::collections::VecDeque;

use tracing::trace;

use crate::error::{CompileError, CompileResult};
use crate::lexer::cursor::Cursor;
use crate::lexer::operator::operator_kind;
use crate::lexer::scanner::{scan_number, scan_phrase, scan_string, skip_horizontal_whitespace};

pub use location::Location;
pub use token::{Token, TokenKind, TokenValue};
pub use vocabulary::{KEY_PHRASES, MEASURES, ORDINAL_SUFFIXES, is_key_phrase};

/// Lazy, restartable token source over one recipe program.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    cursor: Cursor,
    pending: VecDeque<Token>,
    end: Option<Token>,
    failure: Option<CompileError>,
    drained: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: Cursor::new(),
            pending: VecDeque::new(),
            end: None,
            failure: None,
            drained: false,
        }
    }

    /// Returns the source text this lexer reads.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Rewinds to the start of the source.
    pub fn restart(&mut self) {
        *self = Self::new(self.input);
    }

    /// Scans and returns the next token.
    ///
    /// Once [`TokenKind::EndOfInput`] has been returned, every further call
    /// returns it again. A lexical error is likewise sticky.
    pub fn next_token(&mut self) -> CompileResult<Token> {
        loop {
            if let Some(error) = &self.failure {
                return Err(error.clone());
            }
            if let Some(token) = self.pending.pop_front() {
                if token.kind == TokenKind::EndOfInput {
                    self.end = Some(token.clone());
                }
                return Ok(token);
            }
            if let Some(end) = &self.end {
                return Ok(end.clone());
            }
            if let Err(error) = self.scan_line() {
                self.pending.clear();
                self.failure = Some(error.clone());
                return Err(error);
            }
        }
    }

    /// Scans one physical line into the pending buffer.
    ///
    /// A line that yields tokens gets a trailing newline token; a blank line
    /// yields nothing. Reaching the end of the source queues the end token.
    fn scan_line(&mut self) -> CompileResult<()> {
        let line_start = self.pending.len();

        loop {
            skip_horizontal_whitespace(&mut self.cursor, self.input);
            let Some(ch) = self.cursor.peek_char(self.input) else {
                break;
            };
            if ch == '\n' {
                break;
            }

            let token = if ch.is_ascii_digit() {
                scan_number(&mut self.cursor, self.input)?
            } else if ch.is_ascii_alphabetic() {
                scan_phrase(&mut self.cursor, self.input)?
            } else if ch == '"' {
                scan_string(&mut self.cursor, self.input)?
            } else if let Some(kind) = operator_kind(ch) {
                let location = self.cursor.location();
                let _ = self.cursor.advance_char(self.input);
                Token::new(kind, TokenValue::None, location)
            } else {
                return Err(CompileError::lexical(
                    format!("invalid character \"{ch}\""),
                    Some(self.cursor.location()),
                ));
            };
            self.pending.push_back(token);
        }

        let location = self.cursor.location();
        if self.pending.len() > line_start {
            trace!(
                line = location.line,
                tokens = self.pending.len() - line_start,
                "scanned line"
            );
            self.pending
                .push_back(Token::new(TokenKind::Newline, TokenValue::None, location));
        }

        if self.cursor.is_eof(self.input) {
            self.pending.push_back(Token::new(
                TokenKind::EndOfInput,
                TokenValue::None,
                location,
            ));
        } else {
            let _ = self.cursor.advance_char(self.input);
        }

        Ok(())
    }
}

impl Iterator for Lexer<'_> {
    type Item = CompileResult<Token>;

    /// Yields every token up to and including the end token (or the first
    /// lexical error), then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.drained {
            return None;
        }
        let step = self.next_token();
        if !matches!(&step, Ok(token) if token.kind != TokenKind::EndOfInput) {
            self.drained = true;
        }
        Some(step)
    }
}

/// Tokenizes a whole source eagerly, end token included.
pub fn tokenize(input: &str) -> CompileResult<Vec<Token>> {
    Lexer::new(input).collect()
}

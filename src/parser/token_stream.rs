//! Lexer-backed parser token stream with one-token lookahead.

use crate::error::{CompileError, CompileResult};
use crate::lexer::{Lexer, Token, TokenKind};

/// Pull-based token stream over the lexer.
///
/// The lexer keeps returning the end token once the source is exhausted, so
/// the stream never runs dry: [`Self::peek`] and [`Self::next`] always produce
/// a token or the lexical error that stopped scanning.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    lookahead: Option<Token>,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream from an existing lexer.
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            lookahead: None,
        }
    }

    /// Peeks the next token without consuming it.
    pub fn peek(&mut self) -> CompileResult<&Token> {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(self.lookahead.insert(token))
    }

    /// Consumes and returns the next token.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> CompileResult<Token> {
        match self.lookahead.take() {
            Some(token) => Ok(token),
            None => self.lexer.next_token(),
        }
    }

    /// Consumes the next token when the predicate matches it.
    pub fn consume_if<P>(&mut self, predicate: P) -> CompileResult<Option<Token>>
    where
        P: Fn(&Token) -> bool,
    {
        if predicate(self.peek()?) {
            self.next().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Consumes one token and requires it to be one of `kinds`.
    pub fn expect(&mut self, kinds: &[TokenKind]) -> CompileResult<Token> {
        let token = self.next()?;
        if kinds.contains(&token.kind) {
            return Ok(token);
        }

        let expected: Vec<&str> = kinds.iter().map(|kind| kind.label()).collect();
        Err(CompileError::syntax(
            format!("expecting {}, not {}", or_list(&expected), token.kind),
            Some(token.location),
        ))
    }

    /// Consumes one key phrase and requires it to be one of `phrases`.
    pub fn expect_key_phrase(&mut self, phrases: &[&str]) -> CompileResult<Token> {
        let token = self.expect(&[TokenKind::KeyPhrase])?;
        let text = token.text().unwrap_or_default();
        if phrases.contains(&text) {
            return Ok(token);
        }

        let expected: Vec<String> = phrases.iter().map(|phrase| format!("\"{phrase}\"")).collect();
        let expected: Vec<&str> = expected.iter().map(String::as_str).collect();
        Err(CompileError::syntax(
            format!("expecting {}, not \"{text}\"", or_list(&expected)),
            Some(token.location),
        ))
    }
}

/// Joins alternatives as `a`, `a or b`, or `a, b or c`.
pub(crate) fn or_list(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} or {last}", init.join(", ")),
    }
}

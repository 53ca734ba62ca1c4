//! Token contracts shared by the lexer and parser.

use std::fmt;

use crate::lexer::location::Location;

/// Token categories produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Fixed lowercase phrase such as `set up` or `proceed to step`.
    KeyPhrase,
    /// Title Case phrase such as `Muffin Cup` or `Flour`.
    Identifier,
    /// Plain integer literal.
    Number,
    /// Step label such as `3.`.
    StepLabel,
    /// Ordinal such as `2nd`.
    Ordinal,
    /// Oven temperature such as `190C`.
    Temperature,
    /// Double-quoted string literal.
    String,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// End of a non-blank source line.
    Newline,
    /// End of the source.
    EndOfInput,
}

impl TokenKind {
    /// Human-readable label used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Self::KeyPhrase => "key phrase",
            Self::Identifier => "identifier",
            Self::Number => "number",
            Self::StepLabel => "step label",
            Self::Ordinal => "ordinal",
            Self::Temperature => "temperature",
            Self::String => "string",
            Self::Comma => "comma",
            Self::Colon => "colon",
            Self::Newline => "new line",
            Self::EndOfInput => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payload carried by a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    /// Punctuation, newlines, and end of input carry nothing.
    None,
    /// Phrases, strings, and temperatures (`"230C"`).
    Text(String),
    /// Numbers, step labels, and ordinals.
    Integer(i64),
}

/// A lexical token with its payload and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token category.
    pub kind: TokenKind,
    /// Token payload.
    pub value: TokenValue,
    /// Location of the first character of the token.
    pub location: Location,
}

impl Token {
    /// Creates a token value.
    pub fn new(kind: TokenKind, value: TokenValue, location: Location) -> Self {
        Self {
            kind,
            value,
            location,
        }
    }

    /// Returns the textual payload, if any.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    pub fn integer(&self) -> Option<i64> {
        match self.value {
            TokenValue::Integer(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` for a key phrase token with exactly this text.
    pub fn is_key_phrase(&self, phrase: &str) -> bool {
        self.kind == TokenKind::KeyPhrase && self.text() == Some(phrase)
    }
}

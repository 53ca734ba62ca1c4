//! Compile error contracts shared by every pipeline stage.
//!
//! Compilation stops at the first error. Each error carries a message and,
//! when one is known, the source location it points at.

use snafu::Snafu;
use tracing::debug;

use crate::lexer::Location;

/// Result alias used throughout the compiler.
pub type CompileResult<T> = Result<T, CompileError>;

/// Stable compile error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompileErrorKind {
    /// Invalid character, numeric suffix, string, or lowercase phrase.
    Lexical,
    /// A token did not match the grammar.
    Syntax,
    /// A well-formed construct that breaks a language rule.
    Semantic,
}

/// Error raised by the lexer or parser.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CompileError {
    #[snafu(display("{}", located(message, location)))]
    Lexical {
        message: String,
        location: Option<Location>,
    },

    #[snafu(display("{}", located(message, location)))]
    Syntax {
        message: String,
        location: Option<Location>,
    },

    #[snafu(display("{}", located(message, location)))]
    Semantic {
        message: String,
        location: Option<Location>,
    },
}

impl CompileError {
    /// Creates a lexical error.
    pub fn lexical(message: impl Into<String>, location: Option<Location>) -> Self {
        let error = LexicalSnafu {
            message: message.into(),
            location,
        }
        .build();
        debug!(%error, "lexical error");
        error
    }

    /// Creates a syntax error.
    pub fn syntax(message: impl Into<String>, location: Option<Location>) -> Self {
        let error = SyntaxSnafu {
            message: message.into(),
            location,
        }
        .build();
        debug!(%error, "syntax error");
        error
    }

    /// Creates a semantic error.
    pub fn semantic(message: impl Into<String>, location: Option<Location>) -> Self {
        let error = SemanticSnafu {
            message: message.into(),
            location,
        }
        .build();
        debug!(%error, "semantic error");
        error
    }

    /// Returns the error category.
    pub fn kind(&self) -> CompileErrorKind {
        match self {
            Self::Lexical { .. } => CompileErrorKind::Lexical,
            Self::Syntax { .. } => CompileErrorKind::Syntax,
            Self::Semantic { .. } => CompileErrorKind::Semantic,
        }
    }

    /// Returns the bare message without location prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Lexical { message, .. }
            | Self::Syntax { message, .. }
            | Self::Semantic { message, .. } => message,
        }
    }

    /// Returns the source location, if the error has one.
    pub fn location(&self) -> Option<Location> {
        match self {
            Self::Lexical { location, .. }
            | Self::Syntax { location, .. }
            | Self::Semantic { location, .. } => *location,
        }
    }
}

fn located(message: &str, location: &Option<Location>) -> String {
    match location {
        Some(location) => format!("{location}: {message}"),
        None => message.to_string(),
    }
}

//! Recipe parser: token stream, grammar, and program tree.
//!
//! Parsing is one pass of recursive descent with one token of lookahead.
//! Ingredient constants are resolved while parsing, so the tree only holds
//! literal values.

pub mod ast;
pub mod parser;
pub mod token_stream;

pub use ast::{
    Action, BowlKind, BowlRef, Ingredient, MixOp, MoldKind, MoldRef, Predicate, Program, Recipe,
    Step, Temperature,
};
pub use parser::{ENTRY_RECIPE, Parser};
pub use token_stream::TokenStream;

use crate::error::CompileResult;
use crate::lexer::Lexer;

/// Parses a whole source text into a checked program.
pub fn parse_program(source: &str) -> CompileResult<Program> {
    Parser::new(TokenStream::new(Lexer::new(source))).parse_program()
}

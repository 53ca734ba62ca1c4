//! Library entrypoint for `muffin`.
//!
//! The crate compiles Muffin recipe programs to JavaScript: a lazy lexer,
//! a recursive-descent parser, and a code generator parameterized by a host
//! [`Target`].

pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;

pub use codegen::{HeadlessTarget, InteractiveTarget, Target, generate};
pub use error::{CompileError, CompileErrorKind, CompileResult};
pub use parser::parse_program;

use tracing::debug;

/// Compiles recipe source text to a JavaScript program for `target`.
pub fn compile<T: Target + ?Sized>(source: &str, target: &T) -> CompileResult<String> {
    debug!(bytes = source.len(), "compiling");
    let program = parse_program(source)?;
    Ok(generate(&program, target))
}

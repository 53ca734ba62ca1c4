//! JavaScript code generation from a parsed program.

pub mod emit;
pub mod ids;
pub mod target;

pub use emit::CodeGenerator;
pub use ids::{Interner, KindId, MessageId, PoolId, RecipeId};
pub use target::{DEFAULT_YIELD_THRESHOLD, Features, HeadlessTarget, InteractiveTarget, Target};

use crate::parser::Program;

/// Emits the JavaScript program for `program` on `target`.
///
/// Output depends only on the program and the target, so generating twice
/// yields byte-identical text.
pub fn generate<T: Target + ?Sized>(program: &Program, target: &T) -> String {
    CodeGenerator::new(program, target).generate()
}

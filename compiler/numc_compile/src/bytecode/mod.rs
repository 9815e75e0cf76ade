//! Bytecode backend.
//!
//! Compilation runs in two passes over the tree. The sizing pass
//! ([`size::scratch_size`]) computes how many argument slots the deepest
//! chain of nested calls needs. The emission pass walks the tree depth
//! first and appends [`Instruction`]s, interning every variable and
//! function name into the program's name pool and tracking the operand
//! stack depth. The resulting [`Program`] is interpreted by
//! [`Program::run`], which allocates its scratch buffer once per
//! evaluation.
//!
//! # Example
//!
//! `max(a, b + 1)` compiles to:
//!
//! ```text
//! ; scratch 2, stack 2
//! 0000  load a
//! 0001  starg 0
//! 0002  load b
//! 0003  const 1
//! 0004  add
//! 0005  starg 1
//! 0006  call max [0; 2]
//! ```

mod emit;
mod program;
mod size;
mod vm;

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;

use numc_eval::Context;
use numc_ir::{Name, Node, Number};
use tracing::debug;

pub use program::{Instruction, NameId, Program};

use crate::{Backend, CompileError, Evaluator};

pub fn compile<T: Number>(name: Name, tree: &Node<T>) -> Result<Evaluator<T>, CompileError> {
    let program = assemble(tree)?;
    debug!(
        name = name.as_str(),
        scratch = program.scratch_size(),
        instructions = program.instructions().len(),
        max_stack = program.max_stack(),
        "bytecode program sized"
    );
    Ok(Evaluator::new(
        name,
        Backend::Bytecode,
        Box::new(move |ctx: &dyn Context<T>| program.run(ctx)),
    ))
}

/// Build the program for `tree` without wrapping it in an evaluator.
pub fn assemble<T: Number>(tree: &Node<T>) -> Result<Program<T>, CompileError> {
    let scratch = size::scratch_size(tree, 0);
    let mut builder = emit::ProgramBuilder::default();
    builder.emit(tree, 0)?;
    Ok(builder.finish(scratch))
}

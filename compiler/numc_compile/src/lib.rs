//! Compilation of numc syntax trees into reusable evaluators.
//!
//! Three interchangeable backends turn a [`Node<T>`] into an
//! [`Evaluator<T>`]:
//!
//! - [`closure`]: one boxed closure per node, composed bottom-up.
//! - [`staged`]: a typed intermediate graph with separate value and
//!   condition nodes, constant-folded before it is wrapped into a single
//!   callable.
//! - [`bytecode`]: a flat instruction list with an explicit operand stack
//!   and a per-call scratch buffer for call arguments.
//!
//! All three agree on every observable result: the same values, the same
//! errors, and the same number of calls into the context. Operator
//! legality is decided once in [`ops`], so an integer-only operator in a
//! float tree fails at compile time in every backend.
//!
//! Logical `&&` and `||` evaluate both operands. There is no short
//! circuit, so functions with side effects run exactly once per operand.

pub mod bytecode;
pub mod closure;
mod error;
mod evaluator;
pub mod ops;
pub mod staged;

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

use numc_ir::{Name, Node, Number};
use tracing::debug;

pub use error::{CompileError, OperatorPosition};
pub use evaluator::{Backend, Evaluator};

/// Compile `tree` with the selected backend.
pub fn compile<T: Number>(
    name: impl Into<Name>,
    tree: &Node<T>,
    backend: Backend,
) -> Result<Evaluator<T>, CompileError> {
    let name = name.into();
    debug!(
        %backend,
        name = name.as_str(),
        ty = %T::KIND,
        nodes = count_nodes(tree),
        "compiling expression"
    );
    match backend {
        Backend::Closure => closure::compile(name, tree),
        Backend::Staged => staged::compile(name, tree),
        Backend::Bytecode => bytecode::compile(name, tree),
    }
}

fn count_nodes<T>(tree: &Node<T>) -> usize {
    use numc_ir::{walk_node, Visitor};

    struct Counter(usize);

    impl<'ast, T> Visitor<'ast, T> for Counter {
        fn visit_node(&mut self, node: &'ast Node<T>) {
            self.0 += 1;
            walk_node(self, node);
        }
    }

    let mut counter = Counter(0);
    counter.visit_node(tree);
    counter.0
}

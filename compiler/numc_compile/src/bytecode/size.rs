//! First pass: how many argument slots the program needs.

use numc_ir::Node;
use numc_stack::ensure_sufficient_stack;

/// Scratch slots needed to evaluate `node` when its calls start at `base`.
///
/// A call at base `b` stores argument `i` in slot `b + i`, and evaluates
/// that argument with base `b + i`, so a nested call only reuses slots the
/// enclosing call has not filled yet.
pub fn scratch_size<T>(node: &Node<T>, base: usize) -> usize {
    ensure_sufficient_stack(|| match node {
        Node::Literal(_) | Node::Variable(_) => 0,
        Node::Unary { child, .. } => scratch_size(child, base),
        Node::Binary { left, right, .. } => {
            scratch_size(left, base).max(scratch_size(right, base))
        }
        Node::Call { args, .. } => args
            .iter()
            .enumerate()
            .map(|(i, arg)| scratch_size(arg, base + i))
            .fold(base + args.len(), usize::max),
    })
}

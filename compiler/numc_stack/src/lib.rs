//! Stack growth guard for recursive tree passes.
//!
//! Every pass in numc that walks a syntax tree recursively (the parser,
//! the three compiler backends, the bytecode sizing pass, and the closures
//! produced by the closure and staged backends) wraps its recursive step in
//! [`ensure_sufficient_stack`]. An expression such as `-(-(-(...)))` nested
//! tens of thousands of levels deep is legal input and must not abort the
//! host process. That includes freeing it: trees and staged graphs drop
//! through a worklist, and the closure backend releases each captured
//! child under the guard.
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: the closure is called directly.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn emit(&mut self, node: &Node<T>) -> Result<(), CompileError> {
///     ensure_sufficient_stack(|| match node {
///         Node::Unary { child, .. } => self.emit(child),
///         ...
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    enum Chain {
        Link(Box<Chain>),
        End(i64),
    }

    fn build(depth: usize) -> Chain {
        let mut chain = Chain::End(7);
        for _ in 0..depth {
            chain = Chain::Link(Box::new(chain));
        }
        chain
    }

    fn sum_depth(chain: &Chain) -> i64 {
        ensure_sufficient_stack(|| match chain {
            Chain::Link(next) => sum_depth(next) + 1,
            Chain::End(value) => *value,
        })
    }

    #[test]
    fn shallow_chain() {
        assert_eq!(sum_depth(&build(3)), 10);
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let chain = build(200_000);
        assert_eq!(sum_depth(&chain), 200_007);
        // Drop iteratively; the derived drop glue would recurse.
        let mut current = chain;
        while let Chain::Link(next) = current {
            current = *next;
        }
    }

    #[test]
    fn propagates_results() {
        let result: Result<u8, &str> = ensure_sufficient_stack(|| Err("unknown variable"));
        assert_eq!(result, Err("unknown variable"));
    }
}

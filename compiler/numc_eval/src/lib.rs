//! Evaluation-time state for numc evaluators.
//!
//! Compiled evaluators resolve every variable and call through the
//! [`Context`] trait. [`EvaluationContext`] is the standard implementation:
//! a per-instance map of variables and functions layered over a
//! [`DefaultRegistry`] that holds the built-ins for `T`.
//!
//! The default registry is owned by the caller. Seed it once, wrap it in a
//! [`SharedRegistry`], and hand cheap clones to as many contexts as needed.
//! Instance entries shadow default entries of the same name.
//!
//! # Thread safety
//!
//! Nothing here locks. Reading a context from several threads is fine, and
//! every stored callable is `Send + Sync`; mutating a context while an
//! evaluator reads it is prevented by the borrow checker.

mod arity;
pub mod builtins;
mod context;
mod error;
mod function;
mod registry;
mod shared;

pub use arity::Arity;
pub use context::{Context, EvaluationContext};
pub use error::{EvalError, EvalResult};
pub use function::{FunctionDeclaration, NativeFunction};
pub use registry::DefaultRegistry;
pub use shared::SharedRegistry;

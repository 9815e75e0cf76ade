//! numc IR - syntax tree and numeric capability types.
//!
//! This crate contains the data model shared by every numc crate:
//! - [`Span`] for source locations reported by the lexer and parser
//! - [`Name`] for variable and function identifiers
//! - [`Node`] and [`OperatorType`], the immutable syntax tree
//! - [`Number`], the capability bridge implemented by the six supported
//!   primitive types (`i32`, `u32`, `i64`, `u64`, `f32`, `f64`)
//! - [`Visitor`] for read-only traversal
//!
//! # Design Philosophy
//!
//! - **Closed type set**: `Number` is sealed. Every backend can rely on
//!   the exact list of representations, and per-type decisions are made
//!   once through associated constants.
//! - **No reinterpretation**: integer-only operators dispatch through the
//!   [`Scalar`] sum type instead of reading one type's bits as another's.
//! - **Value equality for trees**: float literals compare by value with
//!   NaN equal to itself, so `Node<T>` is `Eq + Hash` for every `T`.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod name;
pub mod number;
mod span;
pub mod visitor;

pub use ast::{Node, OperatorType};
pub use name::Name;
pub use number::{ArithmeticError, NumFlags, NumKind, Number, Scalar};
pub use span::Span;
pub use visitor::{walk_call, walk_node, ReferenceCollector, Visitor};

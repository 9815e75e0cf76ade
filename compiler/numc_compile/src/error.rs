use std::fmt;

use numc_ir::{NumKind, OperatorType};

/// Where an operator appeared in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperatorPosition {
    Unary,
    Binary,
}

impl fmt::Display for OperatorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorPosition::Unary => f.write_str("unary"),
            OperatorPosition::Binary => f.write_str("binary"),
        }
    }
}

/// Failure to turn a tree into an evaluator. No evaluator is produced.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// An integer-only operator in a floating-point tree.
    #[error("operator `{op}` is not defined for {ty}")]
    IllegalOperator { op: OperatorType, ty: NumKind },

    /// An operator tag that has no meaning in its position, such as a
    /// binary `!`.
    #[error("`{op}` cannot be used as a {position} operator")]
    UnsupportedOperator {
        op: OperatorType,
        position: OperatorPosition,
    },
}

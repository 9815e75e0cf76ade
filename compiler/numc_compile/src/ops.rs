//! Operator classification shared by every backend.
//!
//! [`lower_unary`] and [`lower_binary`] map an [`OperatorType`] onto the
//! operation a backend must perform for `T`, rejecting integer-only
//! operators on floating-point types and operators that are meaningless in
//! their position. The `apply` methods are the reference semantics; the
//! bytecode interpreter reproduces them with its own instruction set.

use numc_eval::EvalResult;
use numc_ir::{Number, OperatorType};

use crate::{CompileError, OperatorPosition};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Unary `+`: the operand itself.
    Identity,
    Negate,
    OnesComplement,
    /// `!x`: `1` when `x` is zero, else `0`.
    BoolNot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl ArithOp {
    #[inline]
    pub fn apply<T: Number>(self, a: T, b: T) -> EvalResult<T> {
        match self {
            ArithOp::Add => Ok(a.plus(b)),
            ArithOp::Sub => Ok(a.minus(b)),
            ArithOp::Mul => Ok(a.times(b)),
            ArithOp::Div => Ok(a.divide(b)?),
            ArithOp::Rem => Ok(a.remainder(b)?),
        }
    }
}

/// Integer-only binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitOp {
    Xor,
    And,
    Or,
    Shl,
    /// Logical for unsigned `T`, arithmetic for signed `T`.
    Shr,
}

impl BitOp {
    /// The bridge helper implementing this operator.
    pub fn helper<T: Number>(self) -> fn(T, T) -> Option<T> {
        match self {
            BitOp::Xor => T::bit_xor,
            BitOp::And => T::bit_and,
            BitOp::Or => T::bit_or,
            BitOp::Shl => T::shift_left,
            BitOp::Shr => T::shift_right,
        }
    }

    #[inline]
    pub fn apply<T: Number>(self, a: T, b: T) -> T {
        match self.helper::<T>()(a, b) {
            Some(value) => value,
            None => unreachable!("bitwise operator reached a floating-point operand"),
        }
    }
}

#[inline]
pub(crate) fn ones_complement<T: Number>(value: T) -> T {
    match value.ones_complement() {
        Some(value) => value,
        None => unreachable!("`~` reached a floating-point operand"),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// Ordered comparison: any comparison involving NaN is false except `!=`.
    #[inline]
    pub fn apply<T: Number>(self, a: T, b: T) -> bool {
        match self {
            CompareOp::Eq => a.equal_to(b),
            CompareOp::Ne => !a.equal_to(b),
            CompareOp::Lt => a.less_than(b),
            CompareOp::Le => a <= b,
            CompareOp::Gt => a.greater_than(b),
            CompareOp::Ge => a >= b,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    /// Both operands are already evaluated; there is no short circuit.
    #[inline]
    pub fn apply(self, a: bool, b: bool) -> bool {
        match self {
            LogicOp::And => a && b,
            LogicOp::Or => a || b,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Arith(ArithOp),
    Bit(BitOp),
    Compare(CompareOp),
    Logic(LogicOp),
}

fn reject_float<T: Number>(op: OperatorType) -> Result<(), CompileError> {
    if op.requires_integer() && T::is_floating_point() {
        Err(CompileError::IllegalOperator { op, ty: T::KIND })
    } else {
        Ok(())
    }
}

pub fn lower_unary<T: Number>(op: OperatorType) -> Result<UnaryOp, CompileError> {
    reject_float::<T>(op)?;
    match op {
        OperatorType::Plus => Ok(UnaryOp::Identity),
        OperatorType::Minus => Ok(UnaryOp::Negate),
        OperatorType::OnesComplement => Ok(UnaryOp::OnesComplement),
        OperatorType::BoolNot => Ok(UnaryOp::BoolNot),
        _ => Err(CompileError::UnsupportedOperator {
            op,
            position: OperatorPosition::Unary,
        }),
    }
}

pub fn lower_binary<T: Number>(op: OperatorType) -> Result<BinaryOp, CompileError> {
    let lowered = match op {
        OperatorType::Plus => BinaryOp::Arith(ArithOp::Add),
        OperatorType::Minus => BinaryOp::Arith(ArithOp::Sub),
        OperatorType::Multiplication => BinaryOp::Arith(ArithOp::Mul),
        OperatorType::Division => BinaryOp::Arith(ArithOp::Div),
        OperatorType::Modulo => BinaryOp::Arith(ArithOp::Rem),
        OperatorType::Xor => BinaryOp::Bit(BitOp::Xor),
        OperatorType::And => BinaryOp::Bit(BitOp::And),
        OperatorType::Or => BinaryOp::Bit(BitOp::Or),
        OperatorType::LShift => BinaryOp::Bit(BitOp::Shl),
        OperatorType::RShift => BinaryOp::Bit(BitOp::Shr),
        OperatorType::EqualTo => BinaryOp::Compare(CompareOp::Eq),
        OperatorType::NotEqualTo => BinaryOp::Compare(CompareOp::Ne),
        OperatorType::LessThan => BinaryOp::Compare(CompareOp::Lt),
        OperatorType::LessThanOrEqualTo => BinaryOp::Compare(CompareOp::Le),
        OperatorType::GreaterThan => BinaryOp::Compare(CompareOp::Gt),
        OperatorType::GreaterThanOrEqualTo => BinaryOp::Compare(CompareOp::Ge),
        OperatorType::ConditionalAnd => BinaryOp::Logic(LogicOp::And),
        OperatorType::ConditionalOr => BinaryOp::Logic(LogicOp::Or),
        OperatorType::OnesComplement | OperatorType::BoolNot => {
            return Err(CompileError::UnsupportedOperator {
                op,
                position: OperatorPosition::Binary,
            })
        }
    };
    reject_float::<T>(op)?;
    Ok(lowered)
}

/// Evaluate a unary operator on an already-evaluated operand.
#[inline]
pub fn apply_unary<T: Number>(op: UnaryOp, value: T) -> T {
    match op {
        UnaryOp::Identity => value,
        UnaryOp::Negate => value.negate(),
        UnaryOp::OnesComplement => ones_complement(value),
        UnaryOp::BoolNot => T::from_bool(value.is_zero()),
    }
}

/// Evaluate a binary operator on already-evaluated operands.
#[inline]
pub fn apply_binary<T: Number>(op: BinaryOp, a: T, b: T) -> EvalResult<T> {
    match op {
        BinaryOp::Arith(op) => op.apply(a, b),
        BinaryOp::Bit(op) => Ok(op.apply(a, b)),
        BinaryOp::Compare(op) => Ok(T::from_bool(op.apply(a, b))),
        BinaryOp::Logic(op) => Ok(T::from_bool(op.apply(a.is_truthy(), b.is_truthy()))),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn integer_only_operators_are_rejected_for_floats() {
        for op in OperatorType::ALL.into_iter().filter(|op| op.requires_integer()) {
            let err = if op.is_binary() {
                lower_binary::<f64>(op).err()
            } else {
                lower_unary::<f32>(op).err()
            };
            assert!(
                matches!(err, Some(CompileError::IllegalOperator { .. })),
                "{op} should be illegal for floats"
            );
        }
        assert_eq!(lower_binary::<i32>(OperatorType::Xor), Ok(BinaryOp::Bit(BitOp::Xor)));
    }

    #[test]
    fn operators_in_the_wrong_position() {
        assert_eq!(
            lower_binary::<i64>(OperatorType::BoolNot),
            Err(CompileError::UnsupportedOperator {
                op: OperatorType::BoolNot,
                position: OperatorPosition::Binary,
            })
        );
        assert_eq!(
            lower_unary::<i64>(OperatorType::Multiplication),
            Err(CompileError::UnsupportedOperator {
                op: OperatorType::Multiplication,
                position: OperatorPosition::Unary,
            })
        );
    }

    #[test]
    fn nan_comparisons() {
        let nan = f64::NAN;
        for op in [CompareOp::Eq, CompareOp::Lt, CompareOp::Le, CompareOp::Gt, CompareOp::Ge] {
            assert!(!op.apply(nan, 1.0), "{op:?}");
        }
        assert!(CompareOp::Ne.apply(nan, nan));
    }

    #[test]
    fn bool_not_and_logic() {
        assert_eq!(apply_unary(UnaryOp::BoolNot, 0_i64), 1);
        assert_eq!(apply_unary(UnaryOp::BoolNot, 5_i64), 0);
        assert_eq!(apply_binary(BinaryOp::Logic(LogicOp::And), 2_u32, 7), Ok(1));
        assert_eq!(apply_binary(BinaryOp::Logic(LogicOp::Or), 0.0_f64, f64::NAN), Ok(1.0));
    }
}

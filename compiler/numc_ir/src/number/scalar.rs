//! Closed sum type over the six supported representations.
//!
//! Integer-only operators (`^ & | ~ << >>`) are not expressible through a
//! single generic operator bound, so the bridge converts the operands into
//! a [`Scalar`], matches on the variant, applies the native operator and
//! converts back. Float variants and mismatched pairs yield `None`.

use super::NumKind;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar {
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

macro_rules! integer_binary {
    ($(#[$attr:meta])* $name:ident, $op:tt) => {
        $(#[$attr])*
        pub fn $name(self, rhs: Scalar) -> Option<Scalar> {
            match (self, rhs) {
                (Scalar::I32(a), Scalar::I32(b)) => Some(Scalar::I32(a $op b)),
                (Scalar::U32(a), Scalar::U32(b)) => Some(Scalar::U32(a $op b)),
                (Scalar::I64(a), Scalar::I64(b)) => Some(Scalar::I64(a $op b)),
                (Scalar::U64(a), Scalar::U64(b)) => Some(Scalar::U64(a $op b)),
                _ => None,
            }
        }
    };
}

impl Scalar {
    pub fn kind(self) -> NumKind {
        match self {
            Scalar::I32(_) => NumKind::I32,
            Scalar::U32(_) => NumKind::U32,
            Scalar::I64(_) => NumKind::I64,
            Scalar::U64(_) => NumKind::U64,
            Scalar::F32(_) => NumKind::F32,
            Scalar::F64(_) => NumKind::F64,
        }
    }

    integer_binary!(
        /// `a ^ b`
        bit_xor, ^
    );
    integer_binary!(
        /// `a & b`
        bit_and, &
    );
    integer_binary!(
        /// `a | b`
        bit_or, |
    );

    /// `~a`
    pub fn ones_complement(self) -> Option<Scalar> {
        match self {
            Scalar::I32(a) => Some(Scalar::I32(!a)),
            Scalar::U32(a) => Some(Scalar::U32(!a)),
            Scalar::I64(a) => Some(Scalar::I64(!a)),
            Scalar::U64(a) => Some(Scalar::U64(!a)),
            Scalar::F32(_) | Scalar::F64(_) => None,
        }
    }

    /// `a << amount`; `amount` is masked to the operand width.
    pub fn shift_left(self, amount: u32) -> Option<Scalar> {
        match self {
            Scalar::I32(a) => Some(Scalar::I32(a.wrapping_shl(amount))),
            Scalar::U32(a) => Some(Scalar::U32(a.wrapping_shl(amount))),
            Scalar::I64(a) => Some(Scalar::I64(a.wrapping_shl(amount))),
            Scalar::U64(a) => Some(Scalar::U64(a.wrapping_shl(amount))),
            Scalar::F32(_) | Scalar::F64(_) => None,
        }
    }

    /// Sign-propagating right shift, regardless of the variant's signedness.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    pub fn shift_right_arithmetic(self, amount: u32) -> Option<Scalar> {
        match self {
            Scalar::I32(a) => Some(Scalar::I32(a.wrapping_shr(amount))),
            Scalar::U32(a) => Some(Scalar::U32((a as i32).wrapping_shr(amount) as u32)),
            Scalar::I64(a) => Some(Scalar::I64(a.wrapping_shr(amount))),
            Scalar::U64(a) => Some(Scalar::U64((a as i64).wrapping_shr(amount) as u64)),
            Scalar::F32(_) | Scalar::F64(_) => None,
        }
    }

    /// Zero-filling right shift, regardless of the variant's signedness.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    pub fn shift_right_logical(self, amount: u32) -> Option<Scalar> {
        match self {
            Scalar::I32(a) => Some(Scalar::I32((a as u32).wrapping_shr(amount) as i32)),
            Scalar::U32(a) => Some(Scalar::U32(a.wrapping_shr(amount))),
            Scalar::I64(a) => Some(Scalar::I64((a as u64).wrapping_shr(amount) as i64)),
            Scalar::U64(a) => Some(Scalar::U64(a.wrapping_shr(amount))),
            Scalar::F32(_) | Scalar::F64(_) => None,
        }
    }
}

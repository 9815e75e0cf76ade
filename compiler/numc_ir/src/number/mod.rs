//! Numeric capability bridge.
//!
//! Every backend is generic over `T: Number`. The trait is sealed: exactly
//! six representations are supported (`i32`, `u32`, `i64`, `u64`, `f32`,
//! `f64`) and each backend relies on the facts in [`NumFlags`] to decide
//! which operators are legal and how to lower them. All arithmetic goes
//! through the bridge so that the closure, staged and bytecode backends
//! agree bit-for-bit.

mod scalar;

#[cfg(test)]
mod tests;

use std::fmt;

use bitflags::bitflags;

pub use scalar::Scalar;

bitflags! {
    /// Per-type capability facts, fixed for each `Number` implementation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NumFlags: u8 {
        const FLOATING_POINT = 1;
        const UNSIGNED = 1 << 1;
        /// 64-bit representation.
        const WIDE = 1 << 2;
    }
}

/// Tag naming one of the six supported representations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumKind {
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl NumKind {
    pub const ALL: [NumKind; 6] = [
        NumKind::I32,
        NumKind::U32,
        NumKind::I64,
        NumKind::U64,
        NumKind::F32,
        NumKind::F64,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            NumKind::I32 => "i32",
            NumKind::U32 => "u32",
            NumKind::I64 => "i64",
            NumKind::U64 => "u64",
            NumKind::F32 => "f32",
            NumKind::F64 => "f64",
        }
    }

    pub const fn flags(self) -> NumFlags {
        match self {
            NumKind::I32 => NumFlags::empty(),
            NumKind::U32 => NumFlags::UNSIGNED,
            NumKind::I64 => NumFlags::WIDE,
            NumKind::U64 => NumFlags::UNSIGNED.union(NumFlags::WIDE),
            NumKind::F32 => NumFlags::FLOATING_POINT,
            NumKind::F64 => NumFlags::FLOATING_POINT.union(NumFlags::WIDE),
        }
    }

    /// Width of the representation in bits.
    pub const fn bits(self) -> u32 {
        if self.flags().contains(NumFlags::WIDE) {
            64
        } else {
            32
        }
    }
}

impl fmt::Display for NumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure of a checked arithmetic step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithmeticError {
    /// Integer division or remainder with a zero divisor.
    DivideByZero,
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticError::DivideByZero => f.write_str("attempt to divide by zero"),
        }
    }
}

impl std::error::Error for ArithmeticError {}

mod sealed {
    pub trait Sealed {}
}

/// A primitive numeric type expressions can be compiled for.
///
/// Boolean results are encoded in `T` itself: `ONE` for true, `ZERO` for
/// false. Any non-zero value (including NaN) is truthy.
pub trait Number:
    sealed::Sealed
    + Copy
    + PartialEq
    + PartialOrd
    + Default
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + 'static
{
    const KIND: NumKind;
    const FLAGS: NumFlags = Self::KIND.flags();
    const BITS: u32 = Self::KIND.bits();
    const ZERO: Self;
    const ONE: Self;

    #[inline]
    fn is_floating_point() -> bool {
        Self::FLAGS.contains(NumFlags::FLOATING_POINT)
    }

    #[inline]
    fn is_unsigned() -> bool {
        Self::FLAGS.contains(NumFlags::UNSIGNED)
    }

    #[inline]
    fn is_64_bit() -> bool {
        Self::FLAGS.contains(NumFlags::WIDE)
    }

    #[inline]
    fn from_bool(flag: bool) -> Self {
        if flag {
            Self::ONE
        } else {
            Self::ZERO
        }
    }

    #[inline]
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    #[inline]
    fn is_truthy(self) -> bool {
        !self.is_zero()
    }

    fn is_nan(self) -> bool;

    // Arithmetic. Integers wrap; floats follow IEEE 754.

    fn plus(self, rhs: Self) -> Self;
    fn minus(self, rhs: Self) -> Self;
    fn times(self, rhs: Self) -> Self;
    fn divide(self, rhs: Self) -> Result<Self, ArithmeticError>;
    fn remainder(self, rhs: Self) -> Result<Self, ArithmeticError>;
    /// `0 - x`; wraps for unsigned and for the signed minimum.
    fn negate(self) -> Self;
    fn absolute(self) -> Self;

    /// The smaller operand. NaN on either side yields NaN.
    #[inline]
    fn lesser(self, rhs: Self) -> Self {
        if self.is_nan() {
            self
        } else if rhs.is_nan() || rhs < self {
            rhs
        } else {
            self
        }
    }

    /// The larger operand. NaN on either side yields NaN.
    #[inline]
    fn greater(self, rhs: Self) -> Self {
        if self.is_nan() {
            self
        } else if rhs.is_nan() || rhs > self {
            rhs
        } else {
            self
        }
    }

    // Comparisons.

    #[inline]
    fn less_than(self, rhs: Self) -> bool {
        self < rhs
    }

    #[inline]
    fn greater_than(self, rhs: Self) -> bool {
        self > rhs
    }

    #[inline]
    fn equal_to(self, rhs: Self) -> bool {
        self == rhs
    }

    /// Unsigned less-than for integers; "unordered or less" for floats.
    fn less_than_un(self, rhs: Self) -> bool;

    /// Unsigned greater-than for integers; "unordered or greater" for floats.
    fn greater_than_un(self, rhs: Self) -> bool;

    // Bit-level operators. `None` for floating-point types.

    /// Converts a right-hand operand into a shift count that never panics.
    ///
    /// Unsigned targets clamp into `[0, BITS - 1]`. Signed targets clamp
    /// into the `i32` range and are then masked to the width.
    fn shift_amount(rhs: Self) -> u32;

    fn into_scalar(self) -> Scalar;
    fn from_scalar(scalar: Scalar) -> Option<Self>;

    #[inline]
    fn bit_xor(self, rhs: Self) -> Option<Self> {
        self.into_scalar()
            .bit_xor(rhs.into_scalar())
            .and_then(Self::from_scalar)
    }

    #[inline]
    fn bit_and(self, rhs: Self) -> Option<Self> {
        self.into_scalar()
            .bit_and(rhs.into_scalar())
            .and_then(Self::from_scalar)
    }

    #[inline]
    fn bit_or(self, rhs: Self) -> Option<Self> {
        self.into_scalar()
            .bit_or(rhs.into_scalar())
            .and_then(Self::from_scalar)
    }

    #[inline]
    fn ones_complement(self) -> Option<Self> {
        self.into_scalar()
            .ones_complement()
            .and_then(Self::from_scalar)
    }

    #[inline]
    fn shift_left(self, rhs: Self) -> Option<Self> {
        self.into_scalar()
            .shift_left(Self::shift_amount(rhs))
            .and_then(Self::from_scalar)
    }

    #[inline]
    fn shift_right_arithmetic(self, rhs: Self) -> Option<Self> {
        self.into_scalar()
            .shift_right_arithmetic(Self::shift_amount(rhs))
            .and_then(Self::from_scalar)
    }

    #[inline]
    fn shift_right_logical(self, rhs: Self) -> Option<Self> {
        self.into_scalar()
            .shift_right_logical(Self::shift_amount(rhs))
            .and_then(Self::from_scalar)
    }

    /// `>>`: logical for unsigned types, arithmetic for signed ones.
    #[inline]
    fn shift_right(self, rhs: Self) -> Option<Self> {
        if Self::is_unsigned() {
            self.shift_right_logical(rhs)
        } else {
            self.shift_right_arithmetic(rhs)
        }
    }

    // Conversions.

    fn to_f64(self) -> f64;
    /// Saturating for integers; NaN maps to zero.
    fn from_f64(value: f64) -> Self;
    fn to_i128(self) -> i128;
    /// Truncating (two's complement) for integers.
    fn from_i128(value: i128) -> Self;
    fn from_usize(value: usize) -> Self;

    /// Parses a plain decimal literal (digits with an optional fraction).
    fn parse_decimal(text: &str) -> Option<Self>;

    /// Reinterprets the low bits of a hexadecimal or binary literal.
    ///
    /// `None` when the value does not fit the width or `Self` is a float.
    fn from_radix_bits(bits: u64) -> Option<Self>;

    // Structural equality for literals: NaN equals NaN, `-0.0` equals `0.0`.

    fn literal_eq(self, other: Self) -> bool;
    fn literal_hash_bits(self) -> u64;
}

#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn signed_shift_amount(rhs: i128, bits: u32) -> u32 {
    let clamped = rhs.clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32;
    (clamped as u32) & (bits - 1)
}

#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn unsigned_shift_amount(rhs: i128, bits: u32) -> u32 {
    rhs.clamp(0, i128::from(bits - 1)) as u32
}

macro_rules! impl_integer {
    ($t:ty, $unsigned:ty, $kind:ident, $abs:expr, $shift:ident) => {
        impl sealed::Sealed for $t {}

        #[allow(
            clippy::cast_sign_loss,
            clippy::cast_possible_wrap,
            clippy::cast_possible_truncation,
            clippy::cast_precision_loss,
            clippy::cast_lossless
        )]
        impl Number for $t {
            const KIND: NumKind = NumKind::$kind;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline]
            fn is_nan(self) -> bool {
                false
            }

            #[inline]
            fn plus(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline]
            fn minus(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            #[inline]
            fn times(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            #[inline]
            fn divide(self, rhs: Self) -> Result<Self, ArithmeticError> {
                if rhs == 0 {
                    Err(ArithmeticError::DivideByZero)
                } else {
                    Ok(self.wrapping_div(rhs))
                }
            }

            #[inline]
            fn remainder(self, rhs: Self) -> Result<Self, ArithmeticError> {
                if rhs == 0 {
                    Err(ArithmeticError::DivideByZero)
                } else {
                    Ok(self.wrapping_rem(rhs))
                }
            }

            #[inline]
            fn negate(self) -> Self {
                self.wrapping_neg()
            }

            #[inline]
            fn absolute(self) -> Self {
                ($abs)(self)
            }

            #[inline]
            fn less_than_un(self, rhs: Self) -> bool {
                (self as $unsigned) < (rhs as $unsigned)
            }

            #[inline]
            fn greater_than_un(self, rhs: Self) -> bool {
                (self as $unsigned) > (rhs as $unsigned)
            }

            #[inline]
            fn shift_amount(rhs: Self) -> u32 {
                $shift(rhs as i128, Self::BITS)
            }

            #[inline]
            fn into_scalar(self) -> Scalar {
                Scalar::$kind(self)
            }

            #[inline]
            fn from_scalar(scalar: Scalar) -> Option<Self> {
                match scalar {
                    Scalar::$kind(value) => Some(value),
                    _ => None,
                }
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            #[inline]
            fn to_i128(self) -> i128 {
                self as i128
            }

            #[inline]
            fn from_i128(value: i128) -> Self {
                value as $t
            }

            #[inline]
            fn from_usize(value: usize) -> Self {
                value as $t
            }

            fn parse_decimal(text: &str) -> Option<Self> {
                text.parse().ok()
            }

            fn from_radix_bits(bits: u64) -> Option<Self> {
                <$unsigned>::try_from(bits).ok().map(|raw| raw as $t)
            }

            #[inline]
            fn literal_eq(self, other: Self) -> bool {
                self == other
            }

            #[inline]
            fn literal_hash_bits(self) -> u64 {
                self as u64
            }
        }
    };
}

macro_rules! impl_float {
    ($t:ty, $kind:ident) => {
        impl sealed::Sealed for $t {}

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_precision_loss,
            clippy::float_cmp
        )]
        impl Number for $t {
            const KIND: NumKind = NumKind::$kind;
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            #[inline]
            fn is_nan(self) -> bool {
                <$t>::is_nan(self)
            }

            #[inline]
            fn plus(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn minus(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline]
            fn times(self, rhs: Self) -> Self {
                self * rhs
            }

            #[inline]
            fn divide(self, rhs: Self) -> Result<Self, ArithmeticError> {
                Ok(self / rhs)
            }

            #[inline]
            fn remainder(self, rhs: Self) -> Result<Self, ArithmeticError> {
                Ok(self % rhs)
            }

            #[inline]
            fn negate(self) -> Self {
                -self
            }

            #[inline]
            fn absolute(self) -> Self {
                <$t>::abs(self)
            }

            #[inline]
            fn less_than_un(self, rhs: Self) -> bool {
                !(self >= rhs)
            }

            #[inline]
            fn greater_than_un(self, rhs: Self) -> bool {
                !(self <= rhs)
            }

            #[inline]
            fn shift_amount(_rhs: Self) -> u32 {
                0
            }

            #[inline]
            fn into_scalar(self) -> Scalar {
                Scalar::$kind(self)
            }

            #[inline]
            fn from_scalar(scalar: Scalar) -> Option<Self> {
                match scalar {
                    Scalar::$kind(value) => Some(value),
                    _ => None,
                }
            }

            #[inline]
            fn to_f64(self) -> f64 {
                f64::from(self)
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            #[inline]
            fn to_i128(self) -> i128 {
                self as i128
            }

            #[inline]
            fn from_i128(value: i128) -> Self {
                value as $t
            }

            #[inline]
            fn from_usize(value: usize) -> Self {
                value as $t
            }

            fn parse_decimal(text: &str) -> Option<Self> {
                text.parse().ok()
            }

            fn from_radix_bits(_bits: u64) -> Option<Self> {
                None
            }

            #[inline]
            fn literal_eq(self, other: Self) -> bool {
                self == other || (self.is_nan() && other.is_nan())
            }

            fn literal_hash_bits(self) -> u64 {
                if <$t>::is_nan(self) {
                    u64::MAX
                } else if self == 0.0 {
                    0
                } else {
                    u64::from(self.to_bits())
                }
            }
        }
    };
}

impl_integer!(i32, u32, I32, |x: i32| x.wrapping_abs(), signed_shift_amount);
impl_integer!(u32, u32, U32, |x: u32| x, unsigned_shift_amount);
impl_integer!(i64, u64, I64, |x: i64| x.wrapping_abs(), signed_shift_amount);
impl_integer!(u64, u64, U64, |x: u64| x, unsigned_shift_amount);
impl_float!(f32, F32);
impl_float!(f64, F64);

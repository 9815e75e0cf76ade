use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

#[test]
fn capability_facts_per_kind() {
    assert!(!i32::is_floating_point() && !i32::is_unsigned() && !i32::is_64_bit());
    assert!(u32::is_unsigned() && !u32::is_64_bit());
    assert!(i64::is_64_bit() && !i64::is_unsigned());
    assert!(u64::is_unsigned() && u64::is_64_bit());
    assert!(f32::is_floating_point() && !f32::is_64_bit());
    assert!(f64::is_floating_point() && f64::is_64_bit());

    assert_eq!(i32::BITS, 32);
    assert_eq!(<u64 as Number>::BITS, 64);
    assert_eq!(f64::KIND.to_string(), "f64");
}

#[test]
fn kind_table_is_consistent() {
    for kind in NumKind::ALL {
        let flags = kind.flags();
        assert_eq!(kind.bits() == 64, flags.contains(NumFlags::WIDE));
        assert!(
            !(flags.contains(NumFlags::FLOATING_POINT) && flags.contains(NumFlags::UNSIGNED)),
            "{kind} cannot be both float and unsigned"
        );
    }
}

#[test]
fn booleans_are_encoded_as_one_and_zero() {
    assert_eq!(i64::from_bool(true), 1);
    assert_eq!(u32::from_bool(false), 0);
    assert_eq!(f64::from_bool(true), 1.0);
    assert!(f64::NAN.is_truthy());
    assert!(!(-0.0_f64).is_truthy());
}

#[test]
fn integer_arithmetic_wraps() {
    assert_eq!(i32::MAX.plus(1), i32::MIN);
    assert_eq!(0_u32.minus(1), u32::MAX);
    assert_eq!(i64::MIN.divide(-1), Ok(i64::MIN));
    assert_eq!(i64::MIN.remainder(-1), Ok(0));
    assert_eq!(5_u64.negate(), u64::MAX - 4);
    assert_eq!(i32::MIN.absolute(), i32::MIN);
}

#[test]
fn integer_division_by_zero_is_an_error() {
    assert_eq!(7_i32.divide(0), Err(ArithmeticError::DivideByZero));
    assert_eq!(7_u64.remainder(0), Err(ArithmeticError::DivideByZero));
    assert_eq!(ArithmeticError::DivideByZero.to_string(), "attempt to divide by zero");
}

#[test]
fn float_division_by_zero_follows_ieee() {
    assert_eq!(1.0_f64.divide(0.0), Ok(f64::INFINITY));
    assert!(0.0_f32.divide(0.0).is_ok_and(f32::is_nan));
    assert!(1.0_f64.remainder(0.0).is_ok_and(f64::is_nan));
}

#[test]
fn unordered_comparisons() {
    assert!((-1_i32).greater_than_un(1));
    assert!(!(-1_i32).greater_than(1));
    assert!(1_i64.less_than_un(-1));

    let nan = f64::NAN;
    assert!(nan.less_than_un(1.0));
    assert!(nan.greater_than_un(1.0));
    assert!(!nan.less_than(1.0));
    assert!(!nan.greater_than(1.0));
}

#[test]
fn lesser_and_greater_propagate_nan_from_either_side() {
    let nan = f64::NAN;
    assert!(nan.lesser(1.0).is_nan());
    assert!(1.0_f64.lesser(nan).is_nan());
    assert!(nan.greater(1.0).is_nan());
    assert!(1.0_f64.greater(nan).is_nan());
    assert!(f32::NAN.lesser(-1.0).is_nan());
    assert_eq!(2.0_f64.lesser(-3.0), -3.0);
    assert_eq!((-7_i32).greater(4), 4);
}

#[test]
fn shift_amounts_never_escape_the_width() {
    assert_eq!(u32::shift_amount(100), 31);
    assert_eq!(u64::shift_amount(u64::MAX), 63);
    assert_eq!(i32::shift_amount(33), 1);
    assert_eq!(i32::shift_amount(-1), 31);
    assert_eq!(i64::shift_amount(i64::MAX), 63);
}

#[test]
fn shifts_pick_logical_or_arithmetic_by_signedness() {
    assert_eq!(256_i64.shift_right(4).and_then(|v| v.shift_left(2)), Some(64));
    assert_eq!((-16_i32).shift_right(2), Some(-4));
    assert_eq!(0x8000_0000_u32.shift_right(4), Some(0x0800_0000));
    assert_eq!((-16_i32).shift_right_logical(28), Some(15));
    assert_eq!(1.0_f64.shift_left(1.0), None);
}

#[test]
fn bitwise_ops_are_integer_only() {
    assert_eq!(0b1100_i32.bit_xor(0b1010), Some(0b0110));
    assert_eq!(0b1100_u32.bit_and(0b1010), Some(0b1000));
    assert_eq!(0b1100_u64.bit_or(0b1010), Some(0b1110));
    assert_eq!(0_i64.ones_complement(), Some(-1));
    assert_eq!(2.0_f32.bit_or(1.0), None);
    assert_eq!(2.0_f64.ones_complement(), None);
}

#[test]
fn mismatched_scalars_do_not_combine() {
    assert_eq!(Scalar::I32(1).bit_xor(Scalar::I64(1)), None);
    assert_eq!(Scalar::U64(3).kind(), NumKind::U64);
}

#[test]
fn radix_bits_reinterpret_for_signed_types() {
    assert_eq!(i32::from_radix_bits(0xFFFF_FFFF), Some(-1));
    assert_eq!(u32::from_radix_bits(0x1_0000_0000), None);
    assert_eq!(i64::from_radix_bits(u64::MAX), Some(-1));
    assert_eq!(f64::from_radix_bits(1), None);
}

#[test]
fn decimal_parsing() {
    assert_eq!(i32::parse_decimal("42"), Some(42));
    assert_eq!(u32::parse_decimal("4294967296"), None);
    assert_eq!(f64::parse_decimal("1.5"), Some(1.5));
    assert_eq!(i64::parse_decimal("1.5"), None);
}

#[test]
fn literal_equality_treats_nan_as_equal() {
    assert!(f64::NAN.literal_eq(f64::NAN));
    assert!(0.0_f32.literal_eq(-0.0));
    assert_eq!(0.0_f64.literal_hash_bits(), (-0.0_f64).literal_hash_bits());
    assert!(!1.0_f64.literal_eq(f64::NAN));
}

proptest! {
    #[test]
    fn i128_round_trip_preserves_integers(value in any::<i64>()) {
        prop_assert_eq!(i64::from_i128(value.to_i128()), value);
    }

    #[test]
    fn lesser_and_greater_bracket_both_operands(a in any::<i32>(), b in any::<i32>()) {
        let low = a.lesser(b);
        let high = a.greater(b);
        prop_assert!(low <= a && low <= b);
        prop_assert!(high >= a && high >= b);
    }

    #[test]
    fn signed_shift_amount_is_always_in_range(rhs in any::<i64>()) {
        prop_assert!(i64::shift_amount(rhs) < 64);
        prop_assert!(u64::shift_amount(rhs as u64) < 64);
    }
}

//! Literal text to value conversion.

use numc_ir::Number;

use crate::IntegerParseMode;

/// Convert literal token text into a `T`.
///
/// `_` separators are ignored. Integer types accept a `0x` or `0b` prefix
/// (either case); unprefixed integers follow `mode`. Radix literals are
/// read as raw bits of the type's width, so `0xFFFF_FFFF` is `-1` for
/// `i32` while `0x1_0000_0000` does not fit. Float types only accept
/// decimal text.
pub fn parse_literal<T: Number>(text: &str, mode: IntegerParseMode) -> Option<T> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    if T::is_floating_point() {
        return T::parse_decimal(&cleaned);
    }

    let (digits, radix) = match split_radix_prefix(&cleaned) {
        Some(split) => split,
        None => match mode {
            IntegerParseMode::Decimal => return T::parse_decimal(&cleaned),
            IntegerParseMode::Hexadecimal => (cleaned.as_str(), 16),
            IntegerParseMode::Binary => (cleaned.as_str(), 2),
        },
    };
    if digits.is_empty() {
        return None;
    }
    let bits = u64::from_str_radix(digits, radix).ok()?;
    T::from_radix_bits(bits)
}

fn split_radix_prefix(text: &str) -> Option<(&str, u32)> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    match bytes[1] {
        b'x' | b'X' => Some((&text[2..], 16)),
        b'b' | b'B' => Some((&text[2..], 2)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    use IntegerParseMode::{Binary, Decimal, Hexadecimal};

    #[test]
    fn decimal_integers() {
        assert_eq!(parse_literal::<i64>("1_000_000", Decimal), Some(1_000_000));
        assert_eq!(parse_literal::<u32>("4294967295", Decimal), Some(u32::MAX));
        assert_eq!(parse_literal::<u32>("4294967296", Decimal), None);
        assert_eq!(parse_literal::<i32>("1.5", Decimal), None);
    }

    #[test]
    fn prefixed_integers_ignore_the_mode() {
        assert_eq!(parse_literal::<u32>("0xff", Decimal), Some(255));
        assert_eq!(parse_literal::<u32>("0XFF", Binary), Some(255));
        assert_eq!(parse_literal::<i64>("0b1010", Hexadecimal), Some(10));
        assert_eq!(parse_literal::<i32>("0x", Decimal), None);
    }

    #[test]
    fn radix_literals_are_raw_bits() {
        assert_eq!(parse_literal::<i32>("0xFFFF_FFFF", Decimal), Some(-1));
        assert_eq!(parse_literal::<i32>("0x1_0000_0000", Decimal), None);
        assert_eq!(parse_literal::<u64>("0xFFFF_FFFF_FFFF_FFFF", Decimal), Some(u64::MAX));
    }

    #[test]
    fn unprefixed_literals_follow_the_mode() {
        assert_eq!(parse_literal::<i32>("ff", Hexadecimal), Some(255));
        assert_eq!(parse_literal::<i32>("10", Hexadecimal), Some(16));
        assert_eq!(parse_literal::<i32>("101", Binary), Some(5));
        assert_eq!(parse_literal::<i32>("102", Binary), None);
    }

    #[test]
    fn floats_are_decimal_only() {
        assert_eq!(parse_literal::<f64>("3.25", Decimal), Some(3.25));
        assert_eq!(parse_literal::<f64>("1_0.5", Hexadecimal), Some(10.5));
        assert_eq!(parse_literal::<f32>("2.", Decimal), Some(2.0));
        assert_eq!(parse_literal::<f64>("1e3", Decimal), Some(1000.0));
        assert_eq!(parse_literal::<f64>("0x10", Decimal), None);
    }
}

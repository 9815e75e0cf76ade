//! Operator definitions.
//!
//! A single flat enumeration covers unary and binary operators. Which
//! positions an operator may appear in is answered by
//! [`OperatorType::is_unary`] and [`OperatorType::is_binary`]; backends
//! reject a misplaced tag with a compile error.

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperatorType {
    // Arithmetic
    Plus,
    Minus,
    Multiplication,
    Division,
    Modulo,

    // Bitwise
    Xor,
    LShift,
    RShift,
    And,
    Or,
    OnesComplement,

    // Boolean
    BoolNot,
    EqualTo,
    NotEqualTo,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    ConditionalAnd,
    ConditionalOr,
}

impl OperatorType {
    /// Every operator, in declaration order.
    pub const ALL: [OperatorType; 20] = [
        Self::Plus,
        Self::Minus,
        Self::Multiplication,
        Self::Division,
        Self::Modulo,
        Self::Xor,
        Self::LShift,
        Self::RShift,
        Self::And,
        Self::Or,
        Self::OnesComplement,
        Self::BoolNot,
        Self::EqualTo,
        Self::NotEqualTo,
        Self::LessThan,
        Self::LessThanOrEqualTo,
        Self::GreaterThan,
        Self::GreaterThanOrEqualTo,
        Self::ConditionalAnd,
        Self::ConditionalOr,
    ];

    /// Returns the source-level symbol for this operator.
    ///
    /// Used by `Display` for trees and in error messages.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiplication => "*",
            Self::Division => "/",
            Self::Modulo => "%",
            Self::Xor => "^",
            Self::LShift => "<<",
            Self::RShift => ">>",
            Self::And => "&",
            Self::Or => "|",
            Self::OnesComplement => "~",
            Self::BoolNot => "!",
            Self::EqualTo => "==",
            Self::NotEqualTo => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqualTo => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqualTo => ">=",
            Self::ConditionalAnd => "&&",
            Self::ConditionalOr => "||",
        }
    }

    /// Valid as the operator of a `Node::Unary`.
    pub const fn is_unary(self) -> bool {
        matches!(
            self,
            Self::Plus | Self::Minus | Self::OnesComplement | Self::BoolNot
        )
    }

    /// Valid as the operator of a `Node::Binary`.
    pub const fn is_binary(self) -> bool {
        !matches!(self, Self::OnesComplement | Self::BoolNot)
    }

    /// Operators defined only on integer representations.
    pub const fn requires_integer(self) -> bool {
        matches!(
            self,
            Self::Xor | Self::LShift | Self::RShift | Self::And | Self::Or | Self::OnesComplement
        )
    }

    /// `<`, `<=`, `>`, `>=`, `==`, `!=`.
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::EqualTo
                | Self::NotEqualTo
                | Self::LessThan
                | Self::LessThanOrEqualTo
                | Self::GreaterThan
                | Self::GreaterThanOrEqualTo
        )
    }

    /// `&&` and `||`.
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::ConditionalAnd | Self::ConditionalOr)
    }
}

impl fmt::Display for OperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operator_has_a_position() {
        for op in OperatorType::ALL {
            assert!(op.is_unary() || op.is_binary(), "{op:?}");
        }
    }

    #[test]
    fn integer_only_operators() {
        let integer_only: Vec<_> = OperatorType::ALL
            .into_iter()
            .filter(|op| op.requires_integer())
            .collect();
        assert_eq!(
            integer_only,
            vec![
                OperatorType::Xor,
                OperatorType::LShift,
                OperatorType::RShift,
                OperatorType::And,
                OperatorType::Or,
                OperatorType::OnesComplement,
            ]
        );
    }

    #[test]
    fn plus_and_minus_are_both_positions() {
        assert!(OperatorType::Minus.is_unary() && OperatorType::Minus.is_binary());
        assert!(OperatorType::Plus.is_unary() && OperatorType::Plus.is_binary());
        assert!(!OperatorType::BoolNot.is_binary());
        assert!(!OperatorType::Multiplication.is_unary());
    }
}

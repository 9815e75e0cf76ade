//! Parser for numc expressions.
//!
//! Turns source text into a [`Node<T>`] for one numeric type `T`. The
//! grammar is a single expression:
//!
//! ```text
//! expr    := unary (binop unary)*
//! unary   := ('+' | '-' | '~' | '!') unary | primary
//! primary := literal | ident | ident '(' (expr (',' expr)*)? ')' | '(' expr ')'
//! ```
//!
//! Binary operators are left-associative and bind in the usual C order,
//! from `* / %` (tightest) down to `||`. Unary operators bind tighter than
//! every binary operator.
//!
//! Identifiers are not resolved here. A [`Validator`] can reject unknown
//! names or wrong call arities while parsing, with the offending span.

mod error;
mod literal;
mod options;
mod parser;
mod validate;


use numc_ir::{Node, Number};

pub use error::ParseError;
pub use literal::parse_literal;
pub use options::{IntegerParseMode, ParseOptions};
pub use parser::Parser;
pub use validate::{NoValidation, Validator};

/// Parse `source` into a tree of `T` literals.
pub fn parse<T: Number>(
    source: &str,
    options: &ParseOptions,
    validator: &dyn Validator<T>,
) -> Result<Node<T>, ParseError> {
    Parser::new(source, options, validator).parse()
}

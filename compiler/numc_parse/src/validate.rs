//! Parse-time identifier checks.

use numc_ir::Name;

/// Hook the parser calls for every variable reference and call site.
///
/// An `Err` aborts parsing with [`ParseError::Validation`](crate::ParseError)
/// carrying the message and the identifier's span.
pub trait Validator<T> {
    fn validate_variable(&self, _name: &Name) -> Result<(), String> {
        Ok(())
    }

    fn validate_function(&self, _name: &Name, _arg_count: usize) -> Result<(), String> {
        Ok(())
    }
}

/// Accepts every identifier.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoValidation;

impl<T> Validator<T> for NoValidation {}

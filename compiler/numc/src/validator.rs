//! Parse-time name resolution against an evaluation context.

use numc_eval::Context;
use numc_ir::{Name, Number};
use numc_parse::Validator;

/// Rejects variables and functions that `context` does not define, and
/// calls whose argument count the function's arity does not accept.
pub struct ContextValidator<'a, T> {
    context: &'a dyn Context<T>,
}

impl<'a, T: Number> ContextValidator<'a, T> {
    pub fn new(context: &'a dyn Context<T>) -> Self {
        ContextValidator { context }
    }
}

impl<T: Number> Validator<T> for ContextValidator<'_, T> {
    fn validate_variable(&self, name: &Name) -> Result<(), String> {
        match self.context.try_get_variable(name) {
            Some(_) => Ok(()),
            None => Err(format!("unknown variable `{name}`")),
        }
    }

    fn validate_function(&self, name: &Name, arg_count: usize) -> Result<(), String> {
        let Some(declaration) = self.context.try_get_function(name) else {
            return Err(format!("unknown function `{name}`"));
        };
        if declaration.arity.accepts(arg_count) {
            Ok(())
        } else {
            Err(format!(
                "function `{name}` takes {} argument(s) but {arg_count} were supplied",
                declaration.arity
            ))
        }
    }
}

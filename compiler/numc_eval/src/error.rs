//! Errors raised while an evaluator runs.

use numc_ir::{ArithmeticError, Name};

use crate::Arity;

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("unknown variable `{0}`")]
    UnknownVariable(Name),

    #[error("unknown function `{0}`")]
    UnknownFunction(Name),

    #[error(
        "function `{name}` takes {} argument(s) but {got} were supplied",
        expected(.min, .max)
    )]
    Arity {
        name: Name,
        got: usize,
        min: Option<usize>,
        max: Option<usize>,
    },

    #[error("attempt to divide by zero")]
    DivideByZero,

    #[error("invalid argument to `{function}`: {reason}")]
    InvalidArgument { function: Name, reason: String },
}

impl EvalError {
    pub fn invalid_argument(function: &str, reason: impl Into<String>) -> Self {
        EvalError::InvalidArgument {
            function: Name::new(function),
            reason: reason.into(),
        }
    }
}

fn expected(min: &Option<usize>, max: &Option<usize>) -> Arity {
    Arity::new(*min, *max)
}

impl From<ArithmeticError> for EvalError {
    fn from(err: ArithmeticError) -> Self {
        match err {
            ArithmeticError::DivideByZero => EvalError::DivideByZero,
        }
    }
}

use numc_compile::CompileError;
use numc_parse::ParseError;

/// Failure to turn source text into an evaluator.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Compile(#[from] CompileError),
}

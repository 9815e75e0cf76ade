use std::fmt;

use numc_eval::{Context, EvalResult};
use numc_ir::{Name, Number};

/// Which compiler produced an evaluator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Backend {
    Closure,
    Staged,
    #[default]
    Bytecode,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::Closure, Backend::Staged, Backend::Bytecode];

    pub const fn name(self) -> &'static str {
        match self {
            Backend::Closure => "closure",
            Backend::Staged => "staged",
            Backend::Bytecode => "bytecode",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) type EvalFn<T> = Box<dyn Fn(&dyn Context<T>) -> EvalResult<T> + Send + Sync>;

/// A compiled expression.
///
/// Immutable and `Send + Sync`: one evaluator may be invoked any number of
/// times, from any number of threads, with different contexts.
pub struct Evaluator<T: Number> {
    name: Name,
    backend: Backend,
    run: EvalFn<T>,
}

impl<T: Number> Evaluator<T> {
    pub(crate) fn new(name: Name, backend: Backend, run: EvalFn<T>) -> Self {
        Evaluator { name, backend, run }
    }

    /// Run the expression against `context`.
    pub fn evaluate(&self, context: &dyn Context<T>) -> EvalResult<T> {
        (self.run)(context)
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }
}

impl<T: Number> fmt::Debug for Evaluator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("name", &self.name)
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

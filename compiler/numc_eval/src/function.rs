use std::fmt;
use std::sync::Arc;

use numc_ir::Name;

use crate::{Arity, EvalResult};

/// A host function callable from expressions. Arguments are read-only.
pub type NativeFunction<T> = Arc<dyn Fn(&[T]) -> EvalResult<T> + Send + Sync>;

/// A callable plus the argument counts it accepts.
pub struct FunctionDeclaration<T> {
    pub function: NativeFunction<T>,
    pub arity: Arity,
}

impl<T> FunctionDeclaration<T> {
    pub fn new(arity: Arity, function: impl Fn(&[T]) -> EvalResult<T> + Send + Sync + 'static) -> Self {
        FunctionDeclaration {
            function: Arc::new(function),
            arity,
        }
    }

    /// Check the argument count against `arity`, then invoke.
    pub fn call(&self, name: &Name, args: &[T]) -> EvalResult<T> {
        self.arity.check(name, args.len())?;
        (self.function)(args)
    }
}

impl<T> Clone for FunctionDeclaration<T> {
    fn clone(&self) -> Self {
        FunctionDeclaration {
            function: Arc::clone(&self.function),
            arity: self.arity,
        }
    }
}

impl<T> fmt::Debug for FunctionDeclaration<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDeclaration")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

//! The callback surface evaluators resolve identifiers through.

use std::fmt;

use numc_ir::{Name, Number};
use rustc_hash::FxHashMap;

use crate::{
    Arity, DefaultRegistry, EvalError, EvalResult, FunctionDeclaration, SharedRegistry,
};

/// Variable and function lookup used by every compiled evaluator.
pub trait Context<T: Number> {
    fn try_get_variable(&self, name: &str) -> Option<T>;

    fn try_get_function(&self, name: &str) -> Option<&FunctionDeclaration<T>>;

    fn get_variable(&self, name: &Name) -> EvalResult<T> {
        self.try_get_variable(name)
            .ok_or_else(|| EvalError::UnknownVariable(name.clone()))
    }

    /// Resolve `name`, check the argument count, and invoke it.
    fn call_function(&self, name: &Name, args: &[T]) -> EvalResult<T> {
        let declaration = self
            .try_get_function(name)
            .ok_or_else(|| EvalError::UnknownFunction(name.clone()))?;
        declaration.call(name, args)
    }
}

/// Instance variables and functions over a shared default registry.
///
/// Lookups check the instance maps first, so an instance entry shadows a
/// default entry with the same name until it is removed.
pub struct EvaluationContext<T> {
    variables: FxHashMap<Name, T>,
    functions: FxHashMap<Name, FunctionDeclaration<T>>,
    defaults: SharedRegistry<DefaultRegistry<T>>,
}

impl<T: Number> EvaluationContext<T> {
    /// A context over a private registry seeded with `T`'s built-ins.
    pub fn new() -> Self {
        Self::with_defaults(SharedRegistry::new(DefaultRegistry::with_builtins()))
    }

    /// A context over a caller-owned registry.
    pub fn with_defaults(defaults: SharedRegistry<DefaultRegistry<T>>) -> Self {
        EvaluationContext {
            variables: FxHashMap::default(),
            functions: FxHashMap::default(),
            defaults,
        }
    }

    pub fn defaults(&self) -> &SharedRegistry<DefaultRegistry<T>> {
        &self.defaults
    }

    /// Set an instance variable; the last write wins.
    pub fn set_variable(&mut self, name: impl Into<Name>, value: T) {
        self.variables.insert(name.into(), value);
    }

    /// Set an instance function; the last write wins.
    pub fn set_function(
        &mut self,
        name: impl Into<Name>,
        arity: Arity,
        function: impl Fn(&[T]) -> EvalResult<T> + Send + Sync + 'static,
    ) {
        self.set_declaration(name, FunctionDeclaration::new(arity, function));
    }

    pub fn set_declaration(&mut self, name: impl Into<Name>, declaration: FunctionDeclaration<T>) {
        self.functions.insert(name.into(), declaration);
    }

    /// Remove an instance variable, exposing any default of the same name.
    pub fn remove_variable(&mut self, name: &str) -> Option<T> {
        self.variables.remove(name)
    }

    /// Remove an instance function, exposing any default of the same name.
    pub fn remove_function(&mut self, name: &str) -> Option<FunctionDeclaration<T>> {
        self.functions.remove(name)
    }
}

impl<T: Number> Context<T> for EvaluationContext<T> {
    fn try_get_variable(&self, name: &str) -> Option<T> {
        self.variables
            .get(name)
            .copied()
            .or_else(|| self.defaults.variable(name))
    }

    fn try_get_function(&self, name: &str) -> Option<&FunctionDeclaration<T>> {
        self.functions
            .get(name)
            .or_else(|| self.defaults.function(name))
    }
}

impl<T: Number> Default for EvaluationContext<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Number> fmt::Debug for EvaluationContext<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationContext")
            .field("variables", &self.variables)
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .field("defaults", &self.defaults)
            .finish()
    }
}

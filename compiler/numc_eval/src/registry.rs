//! The default tier of variables and functions.

use std::fmt;

use numc_ir::{Name, Number};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{builtins, Arity, EvalResult, FunctionDeclaration};

/// Variables and functions every context falls back to.
///
/// Populated up front (usually by [`DefaultRegistry::with_builtins`]) and
/// then shared read-only through a [`SharedRegistry`](crate::SharedRegistry).
pub struct DefaultRegistry<T> {
    variables: FxHashMap<Name, T>,
    functions: FxHashMap<Name, FunctionDeclaration<T>>,
}

impl<T: Number> DefaultRegistry<T> {
    /// An empty registry with no built-ins.
    pub fn new() -> Self {
        DefaultRegistry {
            variables: FxHashMap::default(),
            functions: FxHashMap::default(),
        }
    }

    /// A registry seeded with the built-ins for `T`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtins::register(&mut registry);
        debug!(
            ty = %T::KIND,
            variables = registry.variables.len(),
            functions = registry.functions.len(),
            "seeded default registry"
        );
        registry
    }

    pub fn set_variable(&mut self, name: impl Into<Name>, value: T) {
        self.variables.insert(name.into(), value);
    }

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

    pub fn remove_variable(&mut self, name: &str) -> Option<T> {
        self.variables.remove(name)
    }

    pub fn remove_function(&mut self, name: &str) -> Option<FunctionDeclaration<T>> {
        self.functions.remove(name)
    }

    pub fn variable(&self, name: &str) -> Option<T> {
        self.variables.get(name).copied()
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDeclaration<T>> {
        self.functions.get(name)
    }

    pub fn variables(&self) -> impl Iterator<Item = (&Name, T)> + '_ {
        self.variables.iter().map(|(name, value)| (name, *value))
    }

    pub fn functions(&self) -> impl Iterator<Item = (&Name, &FunctionDeclaration<T>)> + '_ {
        self.functions.iter()
    }
}

impl<T: Number> Default for DefaultRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Number> fmt::Debug for DefaultRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut variables: Vec<&str> = self.variables.keys().map(Name::as_str).collect();
        let mut functions: Vec<&str> = self.functions.keys().map(Name::as_str).collect();
        variables.sort_unstable();
        functions.sort_unstable();
        f.debug_struct("DefaultRegistry")
            .field("ty", &T::KIND)
            .field("variables", &variables)
            .field("functions", &functions)
            .finish()
    }
}

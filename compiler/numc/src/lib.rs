//! Compile numeric expressions from source text into reusable evaluators.
//!
//! ```text
//! let evaluator = numc::compile_expression::<f64>("area", "pi * r * r", Backend::Bytecode)?;
//! let mut ctx = EvaluationContext::new();
//! ctx.set_variable("r", 2.0);
//! let area = evaluator.evaluate(&ctx)?;
//! ```
//!
//! # Architecture
//!
//! ```text
//! numc_ir, numc_lexer, numc_parse, numc_eval, numc_compile
//!                         ↓
//!                       numc  ← this crate
//! ```
//!
//! Parsing and compiling happen once; the returned [`Evaluator`] is then
//! called with any number of contexts, from any number of threads.

mod error;
mod validator;

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;

use std::sync::Once;

use tracing::debug;

pub use error::Error;
pub use validator::ContextValidator;

pub use numc_compile::{compile, Backend, CompileError, Evaluator, OperatorPosition};
pub use numc_eval::{
    builtins, Arity, Context, DefaultRegistry, EvalError, EvalResult, EvaluationContext,
    FunctionDeclaration, NativeFunction, SharedRegistry,
};
pub use numc_ir::{Name, Node, NumKind, Number, OperatorType, ReferenceCollector, Span};
pub use numc_parse::{parse, IntegerParseMode, NoValidation, ParseError, ParseOptions, Validator};

/// Parse `source` with default options and compile it with `backend`.
pub fn compile_expression<T: Number>(
    name: impl Into<Name>,
    source: &str,
    backend: Backend,
) -> Result<Evaluator<T>, Error> {
    compile_expression_with(name, source, backend, &ParseOptions::default())
}

/// Parse `source` with `options` and compile it with `backend`.
pub fn compile_expression_with<T: Number>(
    name: impl Into<Name>,
    source: &str,
    backend: Backend,
    options: &ParseOptions,
) -> Result<Evaluator<T>, Error> {
    compile_validated(name, source, backend, options, &NoValidation)
}

/// Like [`compile_expression_with`], rejecting identifiers that
/// `context` cannot resolve while parsing.
///
/// Names are checked against `context` as it is now; evaluating later
/// against a different context may still fail with [`EvalError`].
pub fn compile_checked<T: Number>(
    name: impl Into<Name>,
    source: &str,
    backend: Backend,
    options: &ParseOptions,
    context: &dyn Context<T>,
) -> Result<Evaluator<T>, Error> {
    compile_validated(name, source, backend, options, &ContextValidator::new(context))
}

fn compile_validated<T: Number>(
    name: impl Into<Name>,
    source: &str,
    backend: Backend,
    options: &ParseOptions,
    validator: &dyn Validator<T>,
) -> Result<Evaluator<T>, Error> {
    let name = name.into();
    debug!(name = name.as_str(), len = source.len(), "parsing expression");
    let tree = parse(source, options, validator)?;
    Ok(compile(name, &tree, backend)?)
}

/// Resolve every variable and call in `tree` against `context` without
/// evaluating anything.
///
/// Reports the first problem in first-use order: variables before
/// functions, each as the error evaluation would raise.
pub fn check_references<T: Number>(tree: &Node<T>, context: &dyn Context<T>) -> EvalResult<()> {
    let references = ReferenceCollector::collect(tree);
    for &name in &references.variables {
        if context.try_get_variable(name).is_none() {
            return Err(EvalError::UnknownVariable(name.clone()));
        }
    }
    for &(name, arg_count) in &references.functions {
        match context.try_get_function(name) {
            Some(declaration) => declaration.arity.check(name, arg_count)?,
            None => return Err(EvalError::UnknownFunction(name.clone())),
        }
    }
    Ok(())
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for debug output.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=numc_compile=debug`.
/// Safe to call more than once. Library code never calls this.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

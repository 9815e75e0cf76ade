//! Closure backend: every node becomes a boxed closure that owns its
//! compiled children.

use numc_eval::{Context, EvalResult};
use numc_ir::{Name, Node, Number};
use numc_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use crate::evaluator::EvalFn;
use crate::ops::{self, BinaryOp, UnaryOp};
use crate::{Backend, CompileError, Evaluator};

/// Call arguments up to this count are collected without allocating.
const INLINE_ARGS: usize = 8;

/// A compiled child captured by its parent's closure.
///
/// Dropping an evaluator drops every closure it transitively owns, so the
/// release of each child runs under the stack guard.
struct Child<T: Number>(Option<EvalFn<T>>);

impl<T: Number> Child<T> {
    fn new(run: EvalFn<T>) -> Self {
        Child(Some(run))
    }

    #[inline]
    fn call(&self, ctx: &dyn Context<T>) -> EvalResult<T> {
        match &self.0 {
            Some(run) => ensure_sufficient_stack(|| run(ctx)),
            None => unreachable!("compiled child used after release"),
        }
    }
}

impl<T: Number> Drop for Child<T> {
    fn drop(&mut self) {
        let run = self.0.take();
        ensure_sufficient_stack(move || drop(run));
    }
}

pub fn compile<T: Number>(name: Name, tree: &Node<T>) -> Result<Evaluator<T>, CompileError> {
    let run = compile_node(tree)?;
    Ok(Evaluator::new(name, Backend::Closure, run))
}

fn compile_node<T: Number>(node: &Node<T>) -> Result<EvalFn<T>, CompileError> {
    ensure_sufficient_stack(|| match node {
        Node::Literal(value) => {
            let value = *value;
            Ok(Box::new(move |_: &dyn Context<T>| Ok(value)) as EvalFn<T>)
        }
        Node::Variable(name) => {
            let name = name.clone();
            Ok(Box::new(move |ctx: &dyn Context<T>| ctx.get_variable(&name)) as EvalFn<T>)
        }
        Node::Unary { op, child } => {
            let op = ops::lower_unary::<T>(*op)?;
            let child = compile_node(child)?;
            Ok(unary(op, child))
        }
        Node::Binary { op, left, right } => {
            let op = ops::lower_binary::<T>(*op)?;
            let left = compile_node(left)?;
            let right = compile_node(right)?;
            Ok(binary(op, left, right))
        }
        Node::Call { name, args } => {
            let args = args
                .iter()
                .map(compile_node)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(call(name.clone(), args))
        }
    })
}

fn unary<T: Number>(op: UnaryOp, child: EvalFn<T>) -> EvalFn<T> {
    match op {
        UnaryOp::Identity => child,
        op => {
            let child = Child::new(child);
            Box::new(move |ctx: &dyn Context<T>| Ok(ops::apply_unary(op, child.call(ctx)?)))
        }
    }
}

fn binary<T: Number>(op: BinaryOp, left: EvalFn<T>, right: EvalFn<T>) -> EvalFn<T> {
    let (left, right) = (Child::new(left), Child::new(right));
    Box::new(move |ctx: &dyn Context<T>| {
        let lhs = left.call(ctx)?;
        let rhs = right.call(ctx)?;
        ops::apply_binary(op, lhs, rhs)
    })
}

fn call<T: Number>(name: Name, args: Vec<EvalFn<T>>) -> EvalFn<T> {
    let args: Vec<Child<T>> = args.into_iter().map(Child::new).collect();
    Box::new(move |ctx: &dyn Context<T>| -> EvalResult<T> {
        let mut values = SmallVec::<[T; INLINE_ARGS]>::with_capacity(args.len());
        for arg in &args {
            values.push(arg.call(ctx)?);
        }
        ctx.call_function(&name, &values)
    })
}

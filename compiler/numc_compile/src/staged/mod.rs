//! Staged backend.
//!
//! The tree is first lowered into a typed graph that keeps values and
//! conditions apart ([`Value`], [`Condition`]). Comparisons and logical
//! operators produce conditions; a [`Value::Condition`] turns one back
//! into `1` or `0`. The graph is constant-folded once, then moved into a
//! single callable that interprets it on each evaluation.

mod fold;
mod graph;

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

use numc_eval::Context;
use numc_ir::{Name, Node, Number};
use numc_stack::ensure_sufficient_stack;
use tracing::debug;

pub use fold::Folder;
pub use graph::{ArgumentArray, Condition, ShiftHelper, Value};

use crate::ops::{self, BinaryOp, BitOp, LogicOp, UnaryOp};
use crate::{Backend, CompileError, Evaluator};

pub fn compile<T: Number>(name: Name, tree: &Node<T>) -> Result<Evaluator<T>, CompileError> {
    let mut graph = stage(tree)?;
    let mut folder = Folder::new();
    folder.fold_value(&mut graph);
    debug!(
        name = name.as_str(),
        folded = folder.folded(),
        constant = graph.as_constant().is_some(),
        "staged graph folded"
    );
    Ok(Evaluator::new(
        name,
        Backend::Staged,
        Box::new(move |ctx: &dyn Context<T>| graph.evaluate(ctx)),
    ))
}

/// Lower `tree` into an unfolded staged graph.
pub fn stage<T: Number>(tree: &Node<T>) -> Result<Value<T>, CompileError> {
    ensure_sufficient_stack(|| match tree {
        Node::Literal(value) => Ok(Value::Constant(*value)),
        Node::Variable(name) => Ok(Value::Variable(name.clone())),
        Node::Unary { op, child } => {
            let op = ops::lower_unary::<T>(*op)?;
            let child = stage(child)?;
            Ok(match op {
                UnaryOp::Identity => child,
                UnaryOp::Negate => Value::Negate(Box::new(child)),
                UnaryOp::OnesComplement => Value::OnesComplement(Box::new(child)),
                UnaryOp::BoolNot => Value::from_condition(Condition::EqualZero(child)),
            })
        }
        Node::Binary { op, left, right } => {
            let op = ops::lower_binary::<T>(*op)?;
            let left = stage(left)?;
            let right = stage(right)?;
            Ok(stage_binary(op, left, right))
        }
        Node::Call { name, args } => Ok(Value::Call {
            name: name.clone(),
            args: args.iter().map(stage).collect::<Result<_, _>>()?,
        }),
    })
}

fn stage_binary<T: Number>(op: BinaryOp, left: Value<T>, right: Value<T>) -> Value<T> {
    let left = Box::new(left);
    let right = Box::new(right);
    match op {
        BinaryOp::Arith(op) => Value::Arith { op, left, right },
        BinaryOp::Bit(op @ (BitOp::Shl | BitOp::Shr)) => Value::Shift {
            helper: op.helper::<T>(),
            left,
            right,
        },
        BinaryOp::Bit(op) => Value::Bitwise { op, left, right },
        BinaryOp::Compare(op) => Value::from_condition(Condition::Compare {
            op,
            left: *left,
            right: *right,
        }),
        BinaryOp::Logic(op) => {
            let lhs = Box::new(Condition::NotEqualZero(*left));
            let rhs = Box::new(Condition::NotEqualZero(*right));
            Value::from_condition(match op {
                LogicOp::And => Condition::And(lhs, rhs),
                LogicOp::Or => Condition::Or(lhs, rhs),
            })
        }
    }
}

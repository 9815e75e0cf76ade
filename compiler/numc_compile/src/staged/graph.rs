//! Staged graph node types and their interpretation.

use numc_eval::{Context, EvalResult};
use numc_ir::{Name, Number};
use numc_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use crate::ops::{self, ArithOp, BitOp, CompareOp};

/// Bridge helper used by a `Shift` node. Returns `None` only for
/// floating-point operands, which legality checks keep out of the graph.
pub type ShiftHelper<T> = fn(T, T) -> Option<T>;

/// Argument expressions of a call, evaluated left to right.
pub type ArgumentArray<T> = Vec<Value<T>>;

/// A node producing a `T`.
#[derive(Debug)]
pub enum Value<T> {
    Constant(T),
    Variable(Name),
    Arith {
        op: ArithOp,
        left: Box<Value<T>>,
        right: Box<Value<T>>,
    },
    Negate(Box<Value<T>>),
    OnesComplement(Box<Value<T>>),
    /// `^`, `&` or `|`.
    Bitwise {
        op: BitOp,
        left: Box<Value<T>>,
        right: Box<Value<T>>,
    },
    Shift {
        helper: ShiftHelper<T>,
        left: Box<Value<T>>,
        right: Box<Value<T>>,
    },
    /// Materializes a condition as `if_true` or `if_false`.
    Condition {
        test: Box<Condition<T>>,
        if_true: T,
        if_false: T,
    },
    Call {
        name: Name,
        args: ArgumentArray<T>,
    },
}

/// A node producing a `bool`.
#[derive(Debug)]
pub enum Condition<T> {
    Constant(bool),
    Compare {
        op: CompareOp,
        left: Value<T>,
        right: Value<T>,
    },
    NotEqualZero(Value<T>),
    EqualZero(Value<T>),
    /// Both sides are always tested.
    And(Box<Condition<T>>, Box<Condition<T>>),
    /// Both sides are always tested.
    Or(Box<Condition<T>>, Box<Condition<T>>),
}

impl<T: Number> Value<T> {
    /// `Condition { test, 1, 0 }`.
    pub fn from_condition(test: Condition<T>) -> Self {
        Value::Condition {
            test: Box::new(test),
            if_true: T::ONE,
            if_false: T::ZERO,
        }
    }

    pub fn as_constant(&self) -> Option<T> {
        match self {
            Value::Constant(value) => Some(*value),
            _ => None,
        }
    }

    pub fn evaluate(&self, ctx: &dyn Context<T>) -> EvalResult<T> {
        ensure_sufficient_stack(|| match self {
            Value::Constant(value) => Ok(*value),
            Value::Variable(name) => ctx.get_variable(name),
            Value::Arith { op, left, right } => {
                let lhs = left.evaluate(ctx)?;
                let rhs = right.evaluate(ctx)?;
                op.apply(lhs, rhs)
            }
            Value::Negate(child) => Ok(child.evaluate(ctx)?.negate()),
            Value::OnesComplement(child) => Ok(ops::ones_complement(child.evaluate(ctx)?)),
            Value::Bitwise { op, left, right } => {
                let lhs = left.evaluate(ctx)?;
                let rhs = right.evaluate(ctx)?;
                Ok(op.apply(lhs, rhs))
            }
            Value::Shift {
                helper,
                left,
                right,
            } => {
                let lhs = left.evaluate(ctx)?;
                let rhs = right.evaluate(ctx)?;
                match helper(lhs, rhs) {
                    Some(value) => Ok(value),
                    None => unreachable!("shift reached a floating-point operand"),
                }
            }
            Value::Condition {
                test,
                if_true,
                if_false,
            } => Ok(if test.test(ctx)? { *if_true } else { *if_false }),
            Value::Call { name, args } => {
                let mut values = SmallVec::<[T; 8]>::with_capacity(args.len());
                for arg in args {
                    values.push(arg.evaluate(ctx)?);
                }
                ctx.call_function(name, &values)
            }
        })
    }
}

impl<T: Number> Condition<T> {
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Condition::Constant(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn test(&self, ctx: &dyn Context<T>) -> EvalResult<bool> {
        ensure_sufficient_stack(|| match self {
            Condition::Constant(flag) => Ok(*flag),
            Condition::Compare { op, left, right } => {
                let lhs = left.evaluate(ctx)?;
                let rhs = right.evaluate(ctx)?;
                Ok(op.apply(lhs, rhs))
            }
            Condition::NotEqualZero(value) => Ok(!value.evaluate(ctx)?.is_zero()),
            Condition::EqualZero(value) => Ok(value.evaluate(ctx)?.is_zero()),
            Condition::And(left, right) => {
                let lhs = left.test(ctx)?;
                let rhs = right.test(ctx)?;
                Ok(lhs && rhs)
            }
            Condition::Or(left, right) => {
                let lhs = left.test(ctx)?;
                let rhs = right.test(ctx)?;
                Ok(lhs || rhs)
            }
        })
    }
}

// ── Teardown ──

/// Subgraphs detached from their parents, waiting to be dropped.
struct Teardown<T> {
    values: Vec<Value<T>>,
    conditions: Vec<Condition<T>>,
}

impl<T> Teardown<T> {
    fn new() -> Self {
        Teardown {
            values: Vec::new(),
            conditions: Vec::new(),
        }
    }

    fn value(&mut self, slot: &mut Value<T>) {
        if slot.has_children() {
            self.values
                .push(std::mem::replace(slot, Value::Variable(Name::default())));
        }
    }

    fn condition(&mut self, slot: &mut Condition<T>) {
        if !matches!(slot, Condition::Constant(_)) {
            self.conditions
                .push(std::mem::replace(slot, Condition::Constant(false)));
        }
    }

    fn run(mut self) {
        loop {
            if let Some(mut value) = self.values.pop() {
                value.detach_children(&mut self);
            } else if let Some(mut condition) = self.conditions.pop() {
                condition.detach_children(&mut self);
            } else {
                break;
            }
        }
    }
}

impl<T> Value<T> {
    fn has_children(&self) -> bool {
        match self {
            Value::Constant(_) | Value::Variable(_) => false,
            Value::Call { args, .. } => !args.is_empty(),
            _ => true,
        }
    }

    fn detach_children(&mut self, pending: &mut Teardown<T>) {
        match self {
            Value::Constant(_) | Value::Variable(_) => {}
            Value::Arith { left, right, .. }
            | Value::Bitwise { left, right, .. }
            | Value::Shift { left, right, .. } => {
                pending.value(&mut **left);
                pending.value(&mut **right);
            }
            Value::Negate(child) | Value::OnesComplement(child) => pending.value(&mut **child),
            Value::Condition { test, .. } => pending.condition(&mut **test),
            Value::Call { args, .. } => pending.values.append(args),
        }
    }
}

impl<T> Condition<T> {
    fn detach_children(&mut self, pending: &mut Teardown<T>) {
        match self {
            Condition::Constant(_) => {}
            Condition::Compare { left, right, .. } => {
                pending.value(left);
                pending.value(right);
            }
            Condition::NotEqualZero(value) | Condition::EqualZero(value) => pending.value(value),
            Condition::And(left, right) | Condition::Or(left, right) => {
                pending.condition(&mut **left);
                pending.condition(&mut **right);
            }
        }
    }
}

impl<T> Drop for Value<T> {
    fn drop(&mut self) {
        if self.has_children() {
            let mut pending = Teardown::new();
            self.detach_children(&mut pending);
            pending.run();
        }
    }
}

impl<T> Drop for Condition<T> {
    fn drop(&mut self) {
        if !matches!(self, Condition::Constant(_)) {
            let mut pending = Teardown::new();
            self.detach_children(&mut pending);
            pending.run();
        }
    }
}

//! Constant folding over the staged graph.
//!
//! A node folds when every input is a constant and the node itself is
//! pure. Variables and calls never fold. A fold that would fail, such as
//! a literal division by zero, is left in place so the error surfaces
//! when the expression is evaluated.

use numc_ir::Number;
use numc_stack::ensure_sufficient_stack;

use super::graph::{Condition, Value};
use crate::ops;

#[derive(Default)]
pub struct Folder {
    folded: usize,
}

impl Folder {
    pub fn new() -> Self {
        Folder::default()
    }

    /// Number of nodes replaced by constants so far.
    pub fn folded(&self) -> usize {
        self.folded
    }

    /// Fold `value` in place.
    pub fn fold_value<T: Number>(&mut self, value: &mut Value<T>) {
        let folded = ensure_sufficient_stack(|| match value {
            Value::Constant(_) | Value::Variable(_) => None,
            Value::Arith { op, left, right } => {
                self.fold_value(&mut **left);
                self.fold_value(&mut **right);
                let (a, b) = (left.as_constant()?, right.as_constant()?);
                op.apply(a, b).ok()
            }
            Value::Negate(child) => {
                self.fold_value(&mut **child);
                child.as_constant().map(Number::negate)
            }
            Value::OnesComplement(child) => {
                self.fold_value(&mut **child);
                child.as_constant().map(ops::ones_complement)
            }
            Value::Bitwise { op, left, right } => {
                self.fold_value(&mut **left);
                self.fold_value(&mut **right);
                Some(op.apply(left.as_constant()?, right.as_constant()?))
            }
            Value::Shift {
                helper,
                left,
                right,
            } => {
                self.fold_value(&mut **left);
                self.fold_value(&mut **right);
                (*helper)(left.as_constant()?, right.as_constant()?)
            }
            Value::Condition {
                test,
                if_true,
                if_false,
            } => {
                self.fold_condition(&mut **test);
                match **test {
                    Condition::Constant(flag) => Some(if flag { *if_true } else { *if_false }),
                    _ => None,
                }
            }
            Value::Call { args, .. } => {
                for arg in args {
                    self.fold_value(arg);
                }
                None
            }
        });
        if let Some(result) = folded {
            *value = self.constant(result);
        }
    }

    /// Fold `condition` in place.
    pub fn fold_condition<T: Number>(&mut self, condition: &mut Condition<T>) {
        let folded = ensure_sufficient_stack(|| match condition {
            Condition::Constant(_) => None,
            Condition::Compare { op, left, right } => {
                self.fold_value(left);
                self.fold_value(right);
                Some(op.apply(left.as_constant()?, right.as_constant()?))
            }
            Condition::NotEqualZero(value) => {
                self.fold_value(value);
                value.as_constant().map(|a| !a.is_zero())
            }
            Condition::EqualZero(value) => {
                self.fold_value(value);
                value.as_constant().map(Number::is_zero)
            }
            Condition::And(left, right) => {
                self.fold_condition(&mut **left);
                self.fold_condition(&mut **right);
                Some(left.as_flag()? && right.as_flag()?)
            }
            Condition::Or(left, right) => {
                self.fold_condition(&mut **left);
                self.fold_condition(&mut **right);
                Some(left.as_flag()? || right.as_flag()?)
            }
        });
        if let Some(flag) = folded {
            *condition = self.flag(flag);
        }
    }

    fn constant<T: Number>(&mut self, value: T) -> Value<T> {
        self.folded += 1;
        Value::Constant(value)
    }

    fn flag<T>(&mut self, flag: bool) -> Condition<T> {
        self.folded += 1;
        Condition::Constant(flag)
    }
}

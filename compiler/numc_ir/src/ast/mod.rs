//! Syntax tree for numc expressions.
//!
//! Trees are built bottom-up by the parser (or by hand in tests and host
//! code) and never mutated afterwards. Children are owned, so there are no
//! back references and no cycles.
//!
//! Equality and hashing are structural: same variant, same operator tag,
//! same literal value and same identifiers at every position. Float
//! literals use [`Number::literal_eq`], which treats NaN as equal to itself,
//! so every `Node<T>` is `Eq` and usable as a hash key.

mod operators;

use std::fmt;
use std::hash::{Hash, Hasher};

use numc_stack::ensure_sufficient_stack;

pub use operators::OperatorType;

use crate::{Name, Number};

/// A syntax tree node, generic over the literal representation.
#[derive(Debug)]
pub enum Node<T> {
    /// A constant of the evaluation type.
    Literal(T),
    /// A variable, resolved against the evaluation context at run time.
    Variable(Name),
    /// `op child` where `op` is `+`, `-`, `~` or `!`.
    Unary { op: OperatorType, child: Box<Node<T>> },
    /// `left op right`.
    Binary {
        op: OperatorType,
        left: Box<Node<T>>,
        right: Box<Node<T>>,
    },
    /// `name(args...)`, resolved against the evaluation context at run time.
    Call { name: Name, args: Vec<Node<T>> },
}

impl<T> Node<T> {
    pub fn literal(value: T) -> Self {
        Node::Literal(value)
    }

    pub fn variable(name: impl Into<Name>) -> Self {
        Node::Variable(name.into())
    }

    pub fn unary(op: OperatorType, child: Node<T>) -> Self {
        Node::Unary {
            op,
            child: Box::new(child),
        }
    }

    pub fn binary(op: OperatorType, left: Node<T>, right: Node<T>) -> Self {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(name: impl Into<Name>, args: Vec<Node<T>>) -> Self {
        Node::Call {
            name: name.into(),
            args,
        }
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        match self {
            Node::Literal(_) | Node::Variable(_) => 0,
            Node::Unary { .. } => 1,
            Node::Binary { .. } => 2,
            Node::Call { args, .. } => args.len(),
        }
    }

    fn has_children(&self) -> bool {
        match self {
            Node::Literal(_) | Node::Variable(_) => false,
            Node::Unary { .. } | Node::Binary { .. } => true,
            Node::Call { args, .. } => !args.is_empty(),
        }
    }

    /// Move every child that has children of its own onto `pending`,
    /// leaving a leaf in its place.
    fn detach_children(&mut self, pending: &mut Vec<Node<T>>) {
        match self {
            Node::Literal(_) | Node::Variable(_) => {}
            Node::Unary { child, .. } => Self::detach(&mut **child, pending),
            Node::Binary { left, right, .. } => {
                Self::detach(&mut **left, pending);
                Self::detach(&mut **right, pending);
            }
            Node::Call { args, .. } => pending.append(args),
        }
    }

    fn detach(slot: &mut Node<T>, pending: &mut Vec<Node<T>>) {
        if slot.has_children() {
            pending.push(std::mem::replace(slot, Node::Variable(Name::default())));
        }
    }

    /// Short variant name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Literal(_) => "literal",
            Node::Variable(_) => "variable",
            Node::Unary { .. } => "unary",
            Node::Binary { .. } => "binary",
            Node::Call { .. } => "call",
        }
    }
}

impl<T: Clone> Clone for Node<T> {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| match self {
            Node::Literal(value) => Node::Literal(value.clone()),
            Node::Variable(name) => Node::Variable(name.clone()),
            Node::Unary { op, child } => Node::Unary {
                op: *op,
                child: child.clone(),
            },
            Node::Binary { op, left, right } => Node::Binary {
                op: *op,
                left: left.clone(),
                right: right.clone(),
            },
            Node::Call { name, args } => Node::Call {
                name: name.clone(),
                args: args.clone(),
            },
        })
    }
}

/// Trees are torn down with a worklist, so dropping one never recurses
/// deeper than a single level regardless of nesting.
impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        if !self.has_children() {
            return;
        }
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

impl<T: Number> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| match (self, other) {
            (Node::Literal(a), Node::Literal(b)) => a.literal_eq(*b),
            (Node::Variable(a), Node::Variable(b)) => a == b,
            (
                Node::Unary { op: op_a, child: a },
                Node::Unary { op: op_b, child: b },
            ) => op_a == op_b && a == b,
            (
                Node::Binary {
                    op: op_a,
                    left: left_a,
                    right: right_a,
                },
                Node::Binary {
                    op: op_b,
                    left: left_b,
                    right: right_b,
                },
            ) => op_a == op_b && left_a == left_b && right_a == right_b,
            (
                Node::Call {
                    name: name_a,
                    args: args_a,
                },
                Node::Call {
                    name: name_b,
                    args: args_b,
                },
            ) => name_a == name_b && args_a == args_b,
            _ => false,
        })
    }
}

impl<T: Number> Eq for Node<T> {}

impl<T: Number> Hash for Node<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ensure_sufficient_stack(|| {
            std::mem::discriminant(self).hash(state);
            match self {
                Node::Literal(value) => value.literal_hash_bits().hash(state),
                Node::Variable(name) => name.hash(state),
                Node::Unary { op, child } => {
                    op.hash(state);
                    child.hash(state);
                }
                Node::Binary { op, left, right } => {
                    op.hash(state);
                    left.hash(state);
                    right.hash(state);
                }
                Node::Call { name, args } => {
                    name.hash(state);
                    args.hash(state);
                }
            }
        });
    }
}

/// Fully parenthesised rendering: `(2 + (1 * 5))`, `(-x)`, `sin((pi / 2))`.
impl<T: Number> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Node::Literal(value) => write!(f, "{value}"),
            Node::Variable(name) => write!(f, "{name}"),
            Node::Unary { op, child } => write!(f, "({op}{child})"),
            Node::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
            Node::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        })
    }
}

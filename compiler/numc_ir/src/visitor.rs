//! Syntax tree visitor.
//!
//! A single `Visitor` trait is provided for read-only traversal. The
//! visitor can mutate its own state; the tree stays immutable.
//!
//! Default implementations call [`walk_node`], which dispatches to the
//! per-variant hooks and recurses into children. Override a `visit_*`
//! method to observe a specific variant and call `walk_node` from it to
//! keep descending.
//!
//! # Example
//!
//! ```text
//! struct CountCalls {
//!     count: usize,
//! }
//!
//! impl<'ast, T> Visitor<'ast, T> for CountCalls {
//!     fn visit_call(&mut self, name: &'ast Name, args: &'ast [Node<T>]) {
//!         self.count += 1;
//!         walk_call(self, args);
//!     }
//! }
//! ```

use numc_stack::ensure_sufficient_stack;

use crate::{Name, Node, OperatorType};

/// Read-only syntax tree visitor.
pub trait Visitor<'ast, T> {
    fn visit_node(&mut self, node: &'ast Node<T>) {
        walk_node(self, node);
    }

    fn visit_literal(&mut self, _value: &'ast T) {}

    fn visit_variable(&mut self, _name: &'ast Name) {}

    fn visit_unary(&mut self, _op: OperatorType, child: &'ast Node<T>) {
        self.visit_node(child);
    }

    fn visit_binary(&mut self, _op: OperatorType, left: &'ast Node<T>, right: &'ast Node<T>) {
        self.visit_node(left);
        self.visit_node(right);
    }

    fn visit_call(&mut self, _name: &'ast Name, args: &'ast [Node<T>]) {
        walk_call(self, args);
    }
}

/// Dispatches `node` to the matching `visit_*` hook.
pub fn walk_node<'ast, T, V: Visitor<'ast, T> + ?Sized>(visitor: &mut V, node: &'ast Node<T>) {
    ensure_sufficient_stack(|| match node {
        Node::Literal(value) => visitor.visit_literal(value),
        Node::Variable(name) => visitor.visit_variable(name),
        Node::Unary { op, child } => visitor.visit_unary(*op, child),
        Node::Binary { op, left, right } => visitor.visit_binary(*op, left, right),
        Node::Call { name, args } => visitor.visit_call(name, args),
    });
}

/// Visits every argument of a call in order.
pub fn walk_call<'ast, T, V: Visitor<'ast, T> + ?Sized>(visitor: &mut V, args: &'ast [Node<T>]) {
    for arg in args {
        visitor.visit_node(arg);
    }
}

/// Collects the distinct identifiers a tree refers to, in first-use order.
///
/// Used to check a tree against a context before compiling it.
#[derive(Debug, Default)]
pub struct ReferenceCollector<'ast> {
    pub variables: Vec<&'ast Name>,
    pub functions: Vec<(&'ast Name, usize)>,
}

impl<'ast> ReferenceCollector<'ast> {
    pub fn collect<T>(node: &'ast Node<T>) -> Self {
        let mut collector = Self::default();
        collector.visit_node(node);
        collector
    }
}

impl<'ast, T> Visitor<'ast, T> for ReferenceCollector<'ast> {
    fn visit_variable(&mut self, name: &'ast Name) {
        if !self.variables.contains(&name) {
            self.variables.push(name);
        }
    }

    fn visit_call(&mut self, name: &'ast Name, args: &'ast [Node<T>]) {
        let entry = (name, args.len());
        if !self.functions.contains(&entry) {
            self.functions.push(entry);
        }
        walk_call(self, args);
    }
}

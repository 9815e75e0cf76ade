//! Second pass: depth-first emission into a [`Program`].

use numc_ir::{Name, Node, Number};
use numc_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

use super::program::{Instruction, NameId, Program};
use crate::ops::{self, ArithOp, BinaryOp, BitOp, CompareOp, LogicOp, UnaryOp};
use crate::CompileError;

#[derive(Default)]
pub struct ProgramBuilder<T> {
    instructions: Vec<Instruction<T>>,
    names: Vec<Name>,
    name_ids: FxHashMap<Name, NameId>,
    depth: usize,
    max_stack: usize,
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "slot and pool indices are bounded by the node count of a tree held in memory"
)]
fn slot(index: usize) -> u32 {
    index as u32
}

impl<T: Number> ProgramBuilder<T> {
    pub fn finish(self, scratch_size: usize) -> Program<T> {
        Program {
            instructions: self.instructions,
            names: self.names,
            scratch_size,
            max_stack: self.max_stack,
        }
    }

    fn intern(&mut self, name: &Name) -> NameId {
        if let Some(&id) = self.name_ids.get(name) {
            return id;
        }
        let id = NameId::new(slot(self.names.len()));
        self.names.push(name.clone());
        self.name_ids.insert(name.clone(), id);
        id
    }

    fn push(&mut self, instruction: Instruction<T>) {
        let (pops, pushes) = instruction.stack_effect();
        self.depth = self.depth - pops + pushes;
        self.max_stack = self.max_stack.max(self.depth);
        self.instructions.push(instruction);
    }

    /// Emit `node`, whose calls place their arguments from slot `base` on.
    pub fn emit(&mut self, node: &Node<T>, base: usize) -> Result<(), CompileError> {
        ensure_sufficient_stack(|| match node {
            Node::Literal(value) => {
                self.push(Instruction::Const(*value));
                Ok(())
            }
            Node::Variable(name) => {
                let id = self.intern(name);
                self.push(Instruction::LoadVariable(id));
                Ok(())
            }
            Node::Unary { op, child } => {
                let op = ops::lower_unary::<T>(*op)?;
                self.emit(child, base)?;
                match op {
                    UnaryOp::Identity => {}
                    UnaryOp::Negate => self.push(Instruction::Neg),
                    UnaryOp::OnesComplement => self.push(Instruction::Not),
                    UnaryOp::BoolNot => self.push(Instruction::IsZero),
                }
                Ok(())
            }
            Node::Binary { op, left, right } => {
                let op = ops::lower_binary::<T>(*op)?;
                self.emit_binary(op, left, right, base)
            }
            Node::Call { name, args } => {
                for (i, arg) in args.iter().enumerate() {
                    self.emit(arg, base + i)?;
                    self.push(Instruction::StoreArg(slot(base + i)));
                }
                let name = self.intern(name);
                self.push(Instruction::Call {
                    name,
                    base: slot(base),
                    argc: slot(args.len()),
                });
                Ok(())
            }
        })
    }

    fn emit_binary(
        &mut self,
        op: BinaryOp,
        left: &Node<T>,
        right: &Node<T>,
        base: usize,
    ) -> Result<(), CompileError> {
        if let BinaryOp::Logic(op) = op {
            self.emit(left, base)?;
            self.push(Instruction::IsZero);
            self.push(Instruction::IsZero);
            self.emit(right, base)?;
            self.push(Instruction::IsZero);
            self.push(Instruction::IsZero);
            self.push(match op {
                LogicOp::And => Instruction::LogicalAnd,
                LogicOp::Or => Instruction::LogicalOr,
            });
            return Ok(());
        }

        self.emit(left, base)?;
        self.emit(right, base)?;
        let unsigned = T::is_unsigned();
        // `<=`, `>=` and `!=` negate the opposite test. Floats use the
        // unordered form so NaN still yields 0.
        let unordered = unsigned || T::is_floating_point();
        match op {
            BinaryOp::Arith(op) => self.push(match op {
                ArithOp::Add => Instruction::Add,
                ArithOp::Sub => Instruction::Sub,
                ArithOp::Mul => Instruction::Mul,
                ArithOp::Div => Instruction::Div,
                ArithOp::Rem => Instruction::Rem,
            }),
            BinaryOp::Bit(op) => self.push(match op {
                BitOp::Xor => Instruction::Xor,
                BitOp::And => Instruction::And,
                BitOp::Or => Instruction::Or,
                BitOp::Shl => Instruction::Shl,
                BitOp::Shr if unsigned => Instruction::ShrUn,
                BitOp::Shr => Instruction::Shr,
            }),
            BinaryOp::Compare(op) => match op {
                CompareOp::Eq => self.push(Instruction::Ceq),
                CompareOp::Ne => {
                    self.push(Instruction::Ceq);
                    self.push(Instruction::IsZero);
                }
                CompareOp::Lt => self.push(if unsigned {
                    Instruction::CltUn
                } else {
                    Instruction::Clt
                }),
                CompareOp::Gt => self.push(if unsigned {
                    Instruction::CgtUn
                } else {
                    Instruction::Cgt
                }),
                CompareOp::Le => {
                    self.push(if unordered {
                        Instruction::CgtUn
                    } else {
                        Instruction::Cgt
                    });
                    self.push(Instruction::IsZero);
                }
                CompareOp::Ge => {
                    self.push(if unordered {
                        Instruction::CltUn
                    } else {
                        Instruction::Clt
                    });
                    self.push(Instruction::IsZero);
                }
            },
            BinaryOp::Logic(_) => unreachable!("logical operators are emitted above"),
        }
        Ok(())
    }
}

//! Instruction set and program container for the bytecode backend.

use std::fmt;

use numc_ir::Name;

// ── ID newtypes ─────────────────────────────────────────────────────

/// Index into a [`Program`]'s name pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NameId(u32);

impl NameId {
    #[inline]
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ── Instructions ────────────────────────────────────────────────────

/// One stack-machine instruction.
///
/// Binary instructions pop the right operand, then the left, and push the
/// result. Comparisons push `T`'s `1` or `0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Instruction<T> {
    Const(T),
    LoadVariable(NameId),

    Add,
    Sub,
    Mul,
    /// Fails with `DivideByZero` for an integer zero divisor.
    Div,
    Rem,
    Neg,

    Xor,
    And,
    Or,
    /// Ones' complement.
    Not,
    Shl,
    /// Arithmetic shift right.
    Shr,
    /// Logical shift right.
    ShrUn,

    Ceq,
    Clt,
    /// Unsigned `<` for integers, "less than or unordered" for floats.
    CltUn,
    Cgt,
    /// Unsigned `>` for integers, "greater than or unordered" for floats.
    CgtUn,
    /// `1` if the operand is zero, else `0`.
    IsZero,
    LogicalAnd,
    LogicalOr,

    /// Pop into scratch slot `n`.
    StoreArg(u32),
    /// Call `name` with scratch slots `base .. base + argc` and push the
    /// result.
    Call { name: NameId, base: u32, argc: u32 },
}

impl<T> Instruction<T> {
    /// `(pops, pushes)` on the operand stack.
    pub fn stack_effect(&self) -> (usize, usize) {
        match self {
            Instruction::Const(_) | Instruction::LoadVariable(_) | Instruction::Call { .. } => {
                (0, 1)
            }
            Instruction::Neg | Instruction::Not | Instruction::IsZero => (1, 1),
            Instruction::StoreArg(_) => (1, 0),
            Instruction::Add
            | Instruction::Sub
            | Instruction::Mul
            | Instruction::Div
            | Instruction::Rem
            | Instruction::Xor
            | Instruction::And
            | Instruction::Or
            | Instruction::Shl
            | Instruction::Shr
            | Instruction::ShrUn
            | Instruction::Ceq
            | Instruction::Clt
            | Instruction::CltUn
            | Instruction::Cgt
            | Instruction::CgtUn
            | Instruction::LogicalAnd
            | Instruction::LogicalOr => (2, 1),
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Const(_) => "const",
            Instruction::LoadVariable(_) => "load",
            Instruction::Add => "add",
            Instruction::Sub => "sub",
            Instruction::Mul => "mul",
            Instruction::Div => "div",
            Instruction::Rem => "rem",
            Instruction::Neg => "neg",
            Instruction::Xor => "xor",
            Instruction::And => "and",
            Instruction::Or => "or",
            Instruction::Not => "not",
            Instruction::Shl => "shl",
            Instruction::Shr => "shr",
            Instruction::ShrUn => "shr.un",
            Instruction::Ceq => "ceq",
            Instruction::Clt => "clt",
            Instruction::CltUn => "clt.un",
            Instruction::Cgt => "cgt",
            Instruction::CgtUn => "cgt.un",
            Instruction::IsZero => "iszero",
            Instruction::LogicalAnd => "land",
            Instruction::LogicalOr => "lor",
            Instruction::StoreArg(_) => "starg",
            Instruction::Call { .. } => "call",
        }
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Instruction;
    numc_ir::static_assert_size!(Instruction<i64>, 16);
    numc_ir::static_assert_size!(Instruction<f32>, 16);
}

// ── Program ─────────────────────────────────────────────────────────

/// A compiled instruction list with everything the interpreter needs to
/// size its buffers up front.
#[derive(Clone, Debug)]
pub struct Program<T> {
    pub(super) instructions: Vec<Instruction<T>>,
    pub(super) names: Vec<Name>,
    pub(super) scratch_size: usize,
    pub(super) max_stack: usize,
}

impl<T> Program<T> {
    pub fn instructions(&self) -> &[Instruction<T>] {
        &self.instructions
    }

    /// Deduplicated variable and function names, indexed by [`NameId`].
    pub fn names(&self) -> &[Name] {
        &self.names
    }

    pub fn name(&self, id: NameId) -> &Name {
        &self.names[id.index()]
    }

    /// Slots in the per-evaluation argument buffer.
    pub fn scratch_size(&self) -> usize {
        self.scratch_size
    }

    /// Deepest operand stack reached by any instruction.
    pub fn max_stack(&self) -> usize {
        self.max_stack
    }
}

impl<T: fmt::Display> fmt::Display for Program<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "; scratch {}, stack {}",
            self.scratch_size, self.max_stack
        )?;
        for (offset, instruction) in self.instructions.iter().enumerate() {
            write!(f, "{offset:04}  {}", instruction.mnemonic())?;
            match instruction {
                Instruction::Const(value) => write!(f, " {value}")?,
                Instruction::LoadVariable(name) => write!(f, " {}", self.name(*name))?,
                Instruction::StoreArg(slot) => write!(f, " {slot}")?,
                Instruction::Call { name, base, argc } => {
                    write!(f, " {} [{base}; {argc}]", self.name(*name))?;
                }
                _ => {}
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

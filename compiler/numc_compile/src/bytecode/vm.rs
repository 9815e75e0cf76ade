//! Stack-machine interpreter for [`Program`].

use numc_eval::{Context, EvalResult};
use numc_ir::Number;
use smallvec::SmallVec;

use super::program::{Instruction, Program};

/// Operand stack entries kept inline before spilling to the heap.
const INLINE_STACK: usize = 16;
/// Scratch slots kept inline before spilling to the heap.
const INLINE_SCRATCH: usize = 8;

fn pop<T: Number>(stack: &mut SmallVec<[T; INLINE_STACK]>) -> T {
    match stack.pop() {
        Some(value) => value,
        None => unreachable!("operand stack underflow in emitted program"),
    }
}

fn bit<T: Number>(result: Option<T>) -> T {
    match result {
        Some(value) => value,
        None => unreachable!("bitwise instruction reached a floating-point operand"),
    }
}

impl<T: Number> Program<T> {
    /// Interpret the program once against `ctx`.
    ///
    /// The operand stack and the scratch buffer are sized from the program
    /// and never grow during the run.
    pub fn run(&self, ctx: &dyn Context<T>) -> EvalResult<T> {
        let mut stack = SmallVec::<[T; INLINE_STACK]>::with_capacity(self.max_stack);
        let mut scratch = SmallVec::<[T; INLINE_SCRATCH]>::from_elem(T::ZERO, self.scratch_size);

        for instruction in &self.instructions {
            let value = match *instruction {
                Instruction::Const(value) => value,
                Instruction::LoadVariable(name) => ctx.get_variable(self.name(name))?,
                Instruction::Neg => pop(&mut stack).negate(),
                Instruction::Not => bit(pop(&mut stack).ones_complement()),
                Instruction::IsZero => T::from_bool(pop(&mut stack).is_zero()),
                Instruction::StoreArg(slot) => {
                    scratch[slot as usize] = pop(&mut stack);
                    continue;
                }
                Instruction::Call { name, base, argc } => {
                    let base = base as usize;
                    let args = &scratch[base..base + argc as usize];
                    ctx.call_function(self.name(name), args)?
                }
                binary => {
                    let rhs = pop(&mut stack);
                    let lhs = pop(&mut stack);
                    apply_binary(binary, lhs, rhs)?
                }
            };
            stack.push(value);
        }

        Ok(pop(&mut stack))
    }
}

fn apply_binary<T: Number>(instruction: Instruction<T>, lhs: T, rhs: T) -> EvalResult<T> {
    Ok(match instruction {
        Instruction::Add => lhs.plus(rhs),
        Instruction::Sub => lhs.minus(rhs),
        Instruction::Mul => lhs.times(rhs),
        Instruction::Div => lhs.divide(rhs)?,
        Instruction::Rem => lhs.remainder(rhs)?,
        Instruction::Xor => bit(lhs.bit_xor(rhs)),
        Instruction::And => bit(lhs.bit_and(rhs)),
        Instruction::Or => bit(lhs.bit_or(rhs)),
        Instruction::Shl => bit(lhs.shift_left(rhs)),
        Instruction::Shr => bit(lhs.shift_right_arithmetic(rhs)),
        Instruction::ShrUn => bit(lhs.shift_right_logical(rhs)),
        Instruction::Ceq => T::from_bool(lhs.equal_to(rhs)),
        Instruction::Clt => T::from_bool(lhs.less_than(rhs)),
        Instruction::CltUn => T::from_bool(lhs.less_than_un(rhs)),
        Instruction::Cgt => T::from_bool(lhs.greater_than(rhs)),
        Instruction::CgtUn => T::from_bool(lhs.greater_than_un(rhs)),
        Instruction::LogicalAnd => T::from_bool(lhs.is_truthy() && rhs.is_truthy()),
        Instruction::LogicalOr => T::from_bool(lhs.is_truthy() || rhs.is_truthy()),
        Instruction::Const(_)
        | Instruction::LoadVariable(_)
        | Instruction::Neg
        | Instruction::Not
        | Instruction::IsZero
        | Instruction::StoreArg(_)
        | Instruction::Call { .. } => unreachable!("`{}` is not a binary instruction", instruction.mnemonic()),
    })
}

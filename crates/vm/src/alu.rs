//! The arithmetic/logic unit of the machine.
//!
//! The ALU is stateless: [`apply`] is a pure function over register *values*. The
//! dispatch loop reads the operand registers, hands the values here and writes the
//! outcome back.

use crate::cpu::Flags;
use crate::error::Error;
use crate::instr::Opcode;

/// An operation the ALU can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// Addition modulo 256.
    Add,
    /// Multiplication modulo 256.
    Mul,
    /// Comparison, producing condition flags.
    Cmp,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Bitwise complement of the first operand; the second is unused.
    Not,
    /// Left shift of the first operand by the second.
    Shl,
    /// Right shift of the first operand by the second.
    Shr,
    /// Remainder of the first operand divided by the second.
    Mod,
}

impl AluOp {
    /// Maps an opcode to the ALU operation it requests.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedAluOperation`] if `opcode` is not backed by the ALU.
    pub fn from_opcode(opcode: Opcode) -> Result<Self, Error> {
        match opcode {
            Opcode::Add => Ok(Self::Add),
            Opcode::Mul => Ok(Self::Mul),
            Opcode::Cmp => Ok(Self::Cmp),
            Opcode::And => Ok(Self::And),
            Opcode::Or => Ok(Self::Or),
            Opcode::Xor => Ok(Self::Xor),
            Opcode::Not => Ok(Self::Not),
            Opcode::Shl => Ok(Self::Shl),
            Opcode::Shr => Ok(Self::Shr),
            Opcode::Mod => Ok(Self::Mod),
            other => Err(Error::UnsupportedAluOperation(other)),
        }
    }
}

/// The outcome of an ALU operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOutput {
    /// A value to be written back into the first operand's register.
    Value(u8),
    /// A replacement for the condition-flags register (`Cmp`).
    Flags(Flags),
}

/// Applies `op` to the register values `a` and `b`.
///
/// All arithmetic is performed modulo 256. [`AluOp::Not`] ignores `b`, and shift
/// counts of eight or more clear every bit.
///
/// # Errors
///
/// [`Error::DivisionByZero`] for [`AluOp::Mod`] with a zero `b`.
pub fn apply(op: AluOp, a: u8, b: u8) -> Result<AluOutput, Error> {
    let output = match op {
        AluOp::Add => AluOutput::Value(a.wrapping_add(b)),
        AluOp::Mul => AluOutput::Value(a.wrapping_mul(b)),
        AluOp::And => AluOutput::Value(a & b),
        AluOp::Or => AluOutput::Value(a | b),
        AluOp::Xor => AluOutput::Value(a ^ b),
        AluOp::Not => AluOutput::Value(!a),
        AluOp::Shl => AluOutput::Value(a.checked_shl(u32::from(b)).unwrap_or(0)),
        AluOp::Shr => AluOutput::Value(a.checked_shr(u32::from(b)).unwrap_or(0)),
        AluOp::Mod => {
            if b == 0 {
                return Err(Error::DivisionByZero);
            }
            AluOutput::Value(a % b)
        }
        AluOp::Cmp => AluOutput::Flags(Flags::from_cmp(a, b)),
    };

    Ok(output)
}

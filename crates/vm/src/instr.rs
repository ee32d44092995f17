//! Defines the [`Opcode`] table and the [`Instruction`] type, the transiently
//! decoded form of the byte at the program counter and its operands.

use std::fmt;

use crate::error::Error;

/// A single LS-8 opcode.
///
/// The discriminant of each variant is the byte value that encodes it. Bytes
/// outside of this table do not decode; see [`Opcode::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// `LDI reg, value` — load an immediate value into a register.
    Ldi = 0x82,
    /// `PRN reg` — emit the decimal value of a register.
    Prn = 0x47,
    /// `HLT` — stop execution.
    Hlt = 0x01,
    /// `MUL regA, regB` — multiply, result into the first register.
    Mul = 0xA2,
    /// `ADD regA, regB` — add, result into the first register.
    Add = 0xA0,
    /// `CMP regA, regB` — compare, writing the condition flags.
    Cmp = 0xA7,
    /// `POP reg` — pop the top of the stack into a register.
    Pop = 0x46,
    /// `PUSH reg` — push the value of a register onto the stack.
    Push = 0x45,
    /// `CALL reg` — push the return address and jump to the address in a register.
    Call = 0x50,
    /// `RET` — pop the return address into the program counter.
    Ret = 0x11,
    /// `JMP reg` — jump unconditionally to the address in a register.
    Jmp = 0x54,
    /// `JEQ reg` — jump to the address in a register if the Equal flag is set.
    Jeq = 0x55,
    /// `JNE reg` — jump to the address in a register if the Equal flag is clear.
    Jne = 0x56,
    /// `AND regA, regB` — bitwise AND, result into the first register.
    And = 0xA8,
    /// `OR regA, regB` — bitwise OR, result into the first register.
    Or = 0xAA,
    /// `XOR regA, regB` — bitwise XOR, result into the first register.
    Xor = 0xAB,
    /// `NOT reg` — bitwise complement of a register, in place.
    Not = 0x69,
    /// `SHL regA, regB` — shift the first register left by the second.
    Shl = 0xAC,
    /// `SHR regA, regB` — shift the first register right by the second.
    Shr = 0xAD,
    /// `MOD regA, regB` — remainder, result into the first register.
    Mod = 0xA4,
}

impl Opcode {
    /// Decodes a fetched byte against the opcode table.
    ///
    /// `pc` is the address the byte was fetched from; it is only used to report
    /// where decoding failed.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownOpcode`] if `byte` is not part of the table.
    pub fn decode(byte: u8, pc: usize) -> Result<Self, Error> {
        match byte {
            0x82 => Ok(Self::Ldi),
            0x47 => Ok(Self::Prn),
            0x01 => Ok(Self::Hlt),
            0xA2 => Ok(Self::Mul),
            0xA0 => Ok(Self::Add),
            0xA7 => Ok(Self::Cmp),
            0x46 => Ok(Self::Pop),
            0x45 => Ok(Self::Push),
            0x50 => Ok(Self::Call),
            0x11 => Ok(Self::Ret),
            0x54 => Ok(Self::Jmp),
            0x55 => Ok(Self::Jeq),
            0x56 => Ok(Self::Jne),
            0xA8 => Ok(Self::And),
            0xAA => Ok(Self::Or),
            0xAB => Ok(Self::Xor),
            0x69 => Ok(Self::Not),
            0xAC => Ok(Self::Shl),
            0xAD => Ok(Self::Shr),
            0xA4 => Ok(Self::Mod),
            opcode => Err(Error::UnknownOpcode { opcode, pc }),
        }
    }

    /// Returns the number of operand bytes following the opcode in memory.
    #[inline]
    pub const fn operand_count(self) -> usize {
        match self {
            Self::Hlt | Self::Ret => 0,
            Self::Prn
            | Self::Pop
            | Self::Push
            | Self::Call
            | Self::Jmp
            | Self::Jeq
            | Self::Jne
            | Self::Not => 1,
            Self::Ldi
            | Self::Mul
            | Self::Add
            | Self::Cmp
            | Self::And
            | Self::Or
            | Self::Xor
            | Self::Shl
            | Self::Shr
            | Self::Mod => 2,
        }
    }

    /// Returns the assembly mnemonic of the opcode.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Ldi => "LDI",
            Self::Prn => "PRN",
            Self::Hlt => "HLT",
            Self::Mul => "MUL",
            Self::Add => "ADD",
            Self::Cmp => "CMP",
            Self::Pop => "POP",
            Self::Push => "PUSH",
            Self::Call => "CALL",
            Self::Ret => "RET",
            Self::Jmp => "JMP",
            Self::Jeq => "JEQ",
            Self::Jne => "JNE",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Not => "NOT",
            Self::Shl => "SHL",
            Self::Shr => "SHR",
            Self::Mod => "MOD",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A single decoded LS-8 instruction.
///
/// This is not a stored object: it is rebuilt each cycle from the byte at the
/// program counter and the zero, one or two operand bytes that follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The decoded opcode.
    pub opcode: Opcode,
    /// The first operand byte. Meaningful only when the opcode takes at least one
    /// operand.
    pub a: u8,
    /// The second operand byte. Meaningful only when the opcode takes two
    /// operands.
    pub b: u8,
}

impl Instruction {
    /// Returns the size of the instruction in memory cells, opcode included.
    #[inline]
    pub const fn size(&self) -> usize {
        1 + self.opcode.operand_count()
    }
}

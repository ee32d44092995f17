//! Defines the [`Error`] type of the crate.

use crate::instr::Opcode;

/// An error that might occur when executing an LS-8 program.
///
/// Every variant is fatal: the machine that raised it transitions to
/// [`State::Faulted`](crate::State::Faulted) and stops executing. None of these
/// conditions are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A memory access referenced an address outside of the machine's 256 cells.
    ///
    /// The instruction set never legitimately addresses outside of memory, so this
    /// is reported explicitly rather than wrapped silently.
    #[error("address {address:#05x} is outside of memory")]
    OutOfRangeAddress {
        /// The offending address.
        address: usize,
    },

    /// The byte fetched at the program counter is not part of the opcode table.
    #[error("unknown opcode {opcode:#04x} at address {pc:#04x}")]
    UnknownOpcode {
        /// The byte that failed to decode.
        opcode: u8,
        /// The address it was fetched from.
        pc: usize,
    },

    /// A `MOD` instruction was executed with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// The ALU was invoked with an opcode it does not implement.
    ///
    /// Unreachable through the fixed opcode table; kept so that a bad routing is
    /// rejected explicitly instead of executing as a no-op.
    #[error("the ALU does not implement {0}")]
    UnsupportedAluOperation(Opcode),
}

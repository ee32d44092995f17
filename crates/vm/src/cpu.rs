//! Defines the [`Cpu`] type, responsible for describing the register state of the
//! machine.
//!
//! More information in the documentation for [`Cpu`].

use std::cmp::Ordering;

use bitflags::bitflags;

/// The index of the register reserved as the stack pointer.
pub const SP: u8 = 7;

/// The address the stack pointer is initialized to.
///
/// The stack grows downward from here, leaving the low end of memory for program
/// bytes.
pub const STACK_TOP: u8 = 0xF4;

bitflags! {
    /// The condition-flags register, written by `CMP` and consumed by the
    /// conditional jumps.
    ///
    /// # Invariants
    ///
    /// A flag set produced by [`Flags::from_cmp`] has exactly one bit set. The
    /// register starts out empty and is only ever replaced wholesale, so the three
    /// condition bits are mutually exclusive by construction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Flags: u8 {
        /// The two compared values were equal.
        const EQUAL = 1 << 0;
        /// The first compared value was greater than the second.
        const GREATER = 1 << 1;
        /// The first compared value was less than the second.
        const LESS = 1 << 2;
    }
}

impl Flags {
    /// Returns the flag set describing a comparison of `a` against `b`.
    ///
    /// Exactly one of the three condition bits is set in the result.
    #[inline]
    pub fn from_cmp(a: u8, b: u8) -> Self {
        match a.cmp(&b) {
            Ordering::Equal => Self::EQUAL,
            Ordering::Greater => Self::GREATER,
            Ordering::Less => Self::LESS,
        }
    }
}

/// The register file of the machine: eight byte-wide cells.
///
/// Register 7 is reserved as the stack pointer by convention. Nothing in this type
/// enforces stack discipline; that belongs to the dispatch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers([u8; 8]);

impl Registers {
    /// Creates a new [`Registers`] with the general registers zeroed and the stack
    /// pointer at [`STACK_TOP`].
    pub fn new() -> Self {
        let mut cells = [0; 8];
        cells[SP as usize] = STACK_TOP;
        Self(cells)
    }

    /// Returns the value held by register `index`.
    ///
    /// Register operands carry three significant bits; the higher bits of `index`
    /// are ignored.
    #[inline(always)]
    pub fn get(&self, index: u8) -> u8 {
        self.0[(index & 0x07) as usize]
    }

    /// Stores `value` into register `index`.
    ///
    /// Values are byte-wide, so everything written here is held modulo 256.
    #[inline(always)]
    pub fn set(&mut self, index: u8, value: u8) {
        self.0[(index & 0x07) as usize] = value;
    }

    /// Returns the values of all eight registers, for display.
    #[inline(always)]
    pub fn snapshot(&self) -> [u8; 8] {
        self.0
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

/// The Central Processing Unit (CPU) state of the LS-8 machine.
///
/// By itself, a [`Cpu`] is not enough to execute a program. In order to do
/// anything useful, it has to be connected to a
/// [`Memory`](crate::memory::Memory).
#[derive(Debug, Clone)]
pub struct Cpu {
    /// The Program Counter of the CPU, holding the memory address of the next
    /// opcode to be fetched.
    ///
    /// Every instruction advances it by one plus its operand count, except for the
    /// control-flow instructions (`JMP`, taken `JEQ`/`JNE`, `CALL`, `RET`), which
    /// set it explicitly.
    ///
    /// # Invariants
    ///
    /// A jump may set **PC** to any byte value; a value outside of the loaded
    /// program is only detected at the next fetch, which faults if the address is
    /// outside of memory.
    pub pc: usize,
    /// The register file. Register [`SP`] is the stack pointer.
    pub registers: Registers,
    /// The condition flags last produced by a `CMP` instruction.
    pub flags: Flags,
}

impl Cpu {
    /// Creates a new [`Cpu`] with **PC** at zero, empty flags and a freshly
    /// initialized register file.
    pub fn new() -> Self {
        Self {
            pc: 0,
            registers: Registers::new(),
            flags: Flags::empty(),
        }
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

//! Defines the [`Trace`] trait, used to observe the execution of an LS-8 program
//! within the virtual machine.

/// A point-in-time view of the machine, captured at the top of a cycle before the
/// fetched instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSnapshot {
    /// The program counter at the top of the cycle.
    pub pc: usize,
    /// The three memory bytes starting at the program counter.
    ///
    /// Bytes past the end of memory read as zero.
    pub bytes: [u8; 3],
    /// The values of the eight registers.
    pub registers: [u8; 8],
}

/// A collection of callbacks to be called during the execution of an LS-8
/// program.
///
/// Implementations observe the machine but cannot influence it.
#[allow(unused_variables)]
pub trait Trace {
    /// Called at the top of every cycle, before the fetched instruction executes.
    fn cycle(&mut self, snapshot: &CycleSnapshot) {}

    /// Called for every `PRN` instruction with the value to emit.
    fn output(&mut self, value: u8) {}
}

/// An implementation of [`Trace`] that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTrace;
impl Trace for NoopTrace {}

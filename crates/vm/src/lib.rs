//! # ls8-vm
//!
//! A virtual machine for the LS-8 instruction set: a teaching machine with 256
//! bytes of flat memory, eight byte-wide registers (register 7 reserved as the
//! stack pointer), a three-bit condition-flags register and a twenty-entry opcode
//! table.
//!
//! The machine is strictly sequential. One cycle fetches the opcode at the
//! program counter, decodes it against the table, executes it and advances the
//! program counter, and runs to completion before the next cycle begins. There
//! are no interrupts and no preemption; the host stops the machine by simply not
//! calling [`Ls8VM::step`] again.

#![warn(missing_docs, missing_debug_implementations)]

use alu::AluOutput;
use cpu::{Cpu, Flags, SP};
use error::Error;
use instr::{Instruction, Opcode};
use memory::Memory;
use trace::{CycleSnapshot, Trace};

pub mod alu;
pub mod cpu;
pub mod error;
pub mod instr;
pub mod memory;
pub mod trace;

/// The execution state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The machine is ready to execute the instruction at the program counter.
    Running,
    /// A `HLT` instruction was executed.
    Halted,
    /// A fatal fault stopped execution.
    Faulted(Error),
}

/// Contains the full state of an LS-8 virtual machine.
///
/// # Components
///
/// The [`Ls8VM`] is composed of two main components:
///
/// - [`Cpu`]: the register state of the machine, holding the program counter, the
///   eight registers and the condition flags.
///
/// - [`Memory`]: the flat 256-cell memory. Program bytes are loaded at address
///   zero and the stack grows downward from the high end.
///
/// The machine exclusively owns both for its entire lifetime.
#[derive(Debug, Clone)]
pub struct Ls8VM {
    /// The register state of the machine.
    cpu: Cpu,
    /// The memory associated with the virtual machine.
    ///
    /// Instructions and the stack are stored here.
    memory: Memory,
    /// The execution state, checked before every cycle.
    state: State,
}

impl Ls8VM {
    /// Creates a machine with zeroed memory and registers, ready to run from
    /// address zero.
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            memory: Memory::new(),
            state: State::Running,
        }
    }

    /// Returns the current state of the [`Cpu`].
    #[inline(always)]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Returns the current state of the [`Memory`].
    #[inline(always)]
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Returns the current execution [`State`].
    #[inline(always)]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Copies a program image into memory starting at address zero.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRangeAddress`] if the image does not fit in memory.
    pub fn load(&mut self, image: &[u8]) -> Result<(), Error> {
        self.memory.load(image)
    }

    /// Captures the diagnostic view of the machine handed to [`Trace::cycle`].
    ///
    /// This is a read-only probe with no side effects on the machine.
    pub fn snapshot(&self) -> CycleSnapshot {
        let pc = self.cpu.pc;
        let mut bytes = [0; 3];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = self.memory.get(pc + i).unwrap_or(0);
        }

        CycleSnapshot {
            pc,
            bytes,
            registers: self.cpu.registers.snapshot(),
        }
    }

    /// Advances the virtual machine by a single cycle, reporting events to the
    /// provided [`Trace`] implementation.
    ///
    /// Does nothing if the machine is no longer [`State::Running`].
    ///
    /// # Errors
    ///
    /// Any fault transitions the machine to [`State::Faulted`] before being
    /// returned; a faulted machine never resumes.
    pub fn step<T>(&mut self, trace: &mut T) -> Result<(), Error>
    where
        T: ?Sized + Trace,
    {
        if self.state != State::Running {
            return Ok(());
        }

        match self.cycle(trace) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.state = State::Faulted(err);
                Err(err)
            }
        }
    }

    /// Runs the machine until it halts or faults.
    ///
    /// # Errors
    ///
    /// The fault that stopped the machine, if any. On `Ok(())` the machine is in
    /// [`State::Halted`].
    pub fn run<T>(&mut self, trace: &mut T) -> Result<(), Error>
    where
        T: ?Sized + Trace,
    {
        while self.state == State::Running {
            self.step(trace)?;
        }

        Ok(())
    }

    /// Executes a single fetch/decode/execute cycle.
    fn cycle<T>(&mut self, trace: &mut T) -> Result<(), Error>
    where
        T: ?Sized + Trace,
    {
        trace.cycle(&self.snapshot());

        let instr = fetch_instruction(&self.cpu, &self.memory)?;

        // The address of the next instruction when the opcode does not set the
        // program counter itself.
        let next_pc = self.cpu.pc + instr.size();

        match instr.opcode {
            Opcode::Hlt => {
                self.state = State::Halted;
            }
            Opcode::Ldi => {
                self.cpu.registers.set(instr.a, instr.b);
                self.cpu.pc = next_pc;
            }
            Opcode::Prn => {
                trace.output(self.cpu.registers.get(instr.a));
                self.cpu.pc = next_pc;
            }
            Opcode::Push => {
                let value = self.cpu.registers.get(instr.a);
                push(&mut self.cpu, &mut self.memory, value)?;
                self.cpu.pc = next_pc;
            }
            Opcode::Pop => {
                let value = pop(&mut self.cpu, &self.memory)?;
                self.cpu.registers.set(instr.a, value);
                self.cpu.pc = next_pc;
            }
            Opcode::Call => {
                push(&mut self.cpu, &mut self.memory, next_pc as u8)?;
                self.cpu.pc = usize::from(self.cpu.registers.get(instr.a));
            }
            Opcode::Ret => {
                self.cpu.pc = usize::from(pop(&mut self.cpu, &self.memory)?);
            }
            Opcode::Jmp => {
                self.cpu.pc = usize::from(self.cpu.registers.get(instr.a));
            }
            Opcode::Jeq => {
                self.cpu.pc = if self.cpu.flags.contains(Flags::EQUAL) {
                    usize::from(self.cpu.registers.get(instr.a))
                } else {
                    next_pc
                };
            }
            Opcode::Jne => {
                self.cpu.pc = if self.cpu.flags.contains(Flags::EQUAL) {
                    next_pc
                } else {
                    usize::from(self.cpu.registers.get(instr.a))
                };
            }
            Opcode::Add
            | Opcode::Mul
            | Opcode::Cmp
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Not
            | Opcode::Shl
            | Opcode::Shr
            | Opcode::Mod => {
                let op = alu::AluOp::from_opcode(instr.opcode)?;
                let a = self.cpu.registers.get(instr.a);
                let b = self.cpu.registers.get(instr.b);

                match alu::apply(op, a, b)? {
                    AluOutput::Value(value) => self.cpu.registers.set(instr.a, value),
                    AluOutput::Flags(flags) => self.cpu.flags = flags,
                }

                self.cpu.pc = next_pc;
            }
        }

        Ok(())
    }
}

impl Default for Ls8VM {
    fn default() -> Self {
        Self::new()
    }
}

/// Attempts to fetch and decode the instruction referenced by the program counter
/// of the provided [`Cpu`].
///
/// The operand bytes directly following the opcode are read as part of the same
/// fetch, so a fetch near the end of memory can fault on an operand address.
fn fetch_instruction(cpu: &Cpu, memory: &Memory) -> Result<Instruction, Error> {
    let opcode = Opcode::decode(memory.read(cpu.pc)?, cpu.pc)?;

    let mut operands = [0; 2];
    for (i, operand) in operands.iter_mut().take(opcode.operand_count()).enumerate() {
        *operand = memory.read(cpu.pc + 1 + i)?;
    }

    Ok(Instruction {
        opcode,
        a: operands[0],
        b: operands[1],
    })
}

/// Pushes `value` onto the stack, moving the stack pointer down one cell.
///
/// The stack pointer wraps within the byte range; nothing prevents the stack from
/// growing into the program bytes at the low end of memory.
fn push(cpu: &mut Cpu, memory: &mut Memory, value: u8) -> Result<(), Error> {
    let sp = cpu.registers.get(SP).wrapping_sub(1);
    cpu.registers.set(SP, sp);
    memory.write(usize::from(sp), value)
}

/// Pops the byte at the top of the stack, moving the stack pointer up one cell.
fn pop(cpu: &mut Cpu, memory: &Memory) -> Result<u8, Error> {
    let sp = cpu.registers.get(SP);
    let value = memory.read(usize::from(sp))?;
    cpu.registers.set(SP, sp.wrapping_add(1));
    Ok(value)
}

//! The `ls8` command-line runner.
//!
//! Loads an `.ls8` program file into a fresh virtual machine, runs it to
//! completion and maps the outcome to the process exit status. `PRN` values go
//! to stdout; the optional per-cycle trace goes to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ls8_vm::trace::{CycleSnapshot, Trace};
use ls8_vm::Ls8VM;
use tracing_subscriber::EnvFilter;

mod loader;

/// Runs an LS-8 program.
#[derive(Debug, Parser)]
#[command(name = "ls8", version, about)]
struct Args {
    /// Path to the `.ls8` program to run.
    program: PathBuf,

    /// Print a TRACE line on stderr for every cycle.
    #[arg(short, long)]
    trace: bool,
}

/// The [`Trace`] implementation backing the console.
#[derive(Debug)]
struct Console {
    trace: bool,
}

impl Trace for Console {
    fn cycle(&mut self, snapshot: &CycleSnapshot) {
        if !self.trace {
            return;
        }

        let mut line = format!(
            "TRACE: {:02X} | {:02X} {:02X} {:02X} |",
            snapshot.pc, snapshot.bytes[0], snapshot.bytes[1], snapshot.bytes[2],
        );
        for value in snapshot.registers {
            line.push_str(&format!(" {value:02X}"));
        }
        eprintln!("{line}");
    }

    fn output(&mut self, value: u8) {
        println!("{value}");
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let image = match loader::load_program(&args.program) {
        Ok(image) => image,
        Err(err) => {
            tracing::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(bytes = image.len(), "program loaded");

    let mut vm = Ls8VM::new();
    if let Err(err) = vm.load(&image) {
        tracing::error!("{err}");
        return ExitCode::FAILURE;
    }

    let mut console = Console { trace: args.trace };
    match vm.run(&mut console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("execution fault: {err}");
            ExitCode::FAILURE
        }
    }
}

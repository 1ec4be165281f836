//! Virtual machine: dispatch loop and configuration

use crate::error::Result;
use crate::heap::Heap;
use crate::io::Streams;
use crate::registers::RegisterFile;
use crate::state::{HaltReason, VmState};
use std::io::{Read, Write};
use tracing::trace;
use triad_spec::Program;

/// VM configuration
#[derive(Debug, Clone)]
pub struct VmConfig {
    /// Cycle ceiling for harnesses. `None` (the default) means only HALT
    /// ends execution.
    pub max_cycles: Option<u64>,

    /// Total heap capacity in cells; allocation past it fails through the
    /// MALLOC flag.
    pub heap_limit_cells: usize,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            max_cycles: None,
            heap_limit_cells: 1 << 20,
        }
    }
}

/// Execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Instructions executed
    pub cycles: u64,

    /// Why execution stopped
    pub reason: HaltReason,
}

/// Triad virtual machine
///
/// Owns the register file, the heap, program memory, and the two byte
/// streams for the lifetime of the run; nothing is shared.
pub struct Vm<R, W> {
    pub(crate) state: VmState,
    pub(crate) regs: RegisterFile,
    pub(crate) heap: Heap,
    pub(crate) program: Program,
    pub(crate) streams: Streams<R, W>,
    max_cycles: Option<u64>,
}

impl<R: Read, W: Write> Vm<R, W> {
    /// Create a VM over a loaded program and its streams.
    ///
    /// The input stream should be the same one the loader consumed the
    /// program from; INPUT and READ_BLOCK continue reading where the
    /// terminator left off.
    pub fn new(program: Program, input: R, output: W, config: VmConfig) -> Self {
        Vm {
            state: VmState::new(),
            regs: RegisterFile::new(),
            heap: Heap::new(config.heap_limit_cells),
            program,
            streams: Streams::new(input, output),
            max_cycles: config.max_cycles,
        }
    }

    /// Run until HALT (or the configured cycle ceiling). Output is flushed
    /// before returning.
    pub fn run(&mut self) -> Result<RunSummary> {
        while !self.state.is_halted() {
            if let Some(limit) = self.max_cycles {
                if self.state.cycles >= limit {
                    self.state.halt(HaltReason::CycleLimit);
                    break;
                }
            }
            self.step()?;
        }
        self.streams.flush()?;
        Ok(RunSummary {
            cycles: self.state.cycles,
            reason: self.state.halt_reason.unwrap_or(HaltReason::Halt),
        })
    }

    /// Fetch, decode, and execute one instruction
    pub fn step(&mut self) -> Result<()> {
        let instr = self.program.fetch(self.state.ip)?;
        trace!(ip = self.state.ip, cycle = self.state.cycles, op = %instr, "execute");
        self.execute(instr)?;
        self.state.cycles += 1;
        Ok(())
    }

    pub fn state(&self) -> &VmState {
        &self.state
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Direct register access for harnesses and tests
    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.regs
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    /// Give back the output stream with whatever the program wrote
    pub fn into_output(self) -> W {
        self.streams.into_output()
    }
}

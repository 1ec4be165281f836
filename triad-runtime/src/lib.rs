//! # Triad Runtime
//!
//! Execute triad programs: a fetch/decode/execute loop over fixed-width
//! three-word instructions, two parallel 256-slot register banks, a
//! generational heap, and blocking stream I/O.
//!
//! ## Features
//!
//! - **14 primitives**: arithmetic, compare, jump, pointer arithmetic,
//!   cell dereference, heap allocation, byte and block stream I/O
//! - **Tagged addresses**: register / heap / code handles; type confusion
//!   and stale heap references are detected faults, not corruption
//! - **Single program-visible error**: the MALLOC success/failure flag;
//!   every hardened fault surfaces as a host-side [`VmError`]
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use triad_runtime::{HaltReason, Vm, VmConfig};
//! use triad_spec::{Instruction, Opcode, Program, Reg};
//!
//! let program = Program::from_instructions(&[
//!     Instruction::new(Opcode::Halt, Reg(0), Reg(0)),
//! ]).unwrap();
//! let mut vm = Vm::new(program, Cursor::new(vec![]), Vec::new(), VmConfig::default());
//! let summary = vm.run().unwrap();
//! assert_eq!(summary.reason, HaltReason::Halt);
//! ```

pub mod error;
mod execute;
pub mod heap;
pub mod io;
pub mod registers;
pub mod state;
pub mod vm;

pub use error::{Result, VmError};
pub use heap::Heap;
pub use io::Streams;
pub use registers::RegisterFile;
pub use state::{HaltReason, VmState};
pub use vm::{RunSummary, Vm, VmConfig};

/// Simple execution helper
///
/// Runs a program against in-memory input and returns the bytes it wrote.
pub fn run(program: triad_spec::Program, input: &[u8]) -> Result<Vec<u8>> {
    let mut vm = Vm::new(
        program,
        std::io::Cursor::new(input.to_vec()),
        Vec::new(),
        VmConfig::default(),
    );
    vm.run()?;
    Ok(vm.into_output())
}

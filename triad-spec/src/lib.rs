//! # Triad VM Specification
//!
//! Core data model for the triad virtual machine: a register-based
//! interpreter over a fixed-width three-word instruction stream.
//!
//! ## Key Features
//! - 32-bit words, uniform for opcodes and operands
//! - Two parallel 256-slot register banks (integer and address)
//! - Fixed 3-word instructions `(opcode, indexA, indexB)`
//! - Tagged address handles (register / heap block / code offset)
//! - Two stream encodings (symbolic ASCII, small-integer) of one
//!   canonical opcode set

pub mod encoding;
pub mod error;
pub mod handle;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod register;

pub use encoding::EncodingMode;
pub use error::SpecError;
pub use handle::{BlockId, Handle};
pub use instruction::{Instruction, INSTRUCTION_WORDS};
pub use opcode::Opcode;
pub use program::Program;
pub use register::{Cell, Reg, NUM_REGISTERS};

/// Uniform storage unit for opcodes and operands. All integer arithmetic
/// in the VM is 32-bit wrapping.
pub type Word = i32;

/// Size of one word in bytes. `Handle::Code` offsets move at this stride.
pub const WORD_BYTES: usize = 4;

/// Size of one addressable cell (integer word + address word) in bytes.
/// `Handle::Register` and `Handle::Heap` offsets move at this stride.
pub const CELL_BYTES: usize = 8;

/// Bytes spanned by one instruction (3 words).
pub const INSTRUCTION_BYTES: usize = INSTRUCTION_WORDS * WORD_BYTES;

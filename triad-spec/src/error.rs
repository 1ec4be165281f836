//! # Error Types for the Triad Specification

use crate::handle::Handle;
use crate::Word;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("Invalid opcode word: {word}")]
    InvalidOpcode { word: Word },

    #[error("Fetch past the end of program memory: word offset {word}")]
    OutOfCode { word: usize },

    #[error("Program too large: {words} words exceeds capacity of {capacity}")]
    ProgramTooLarge { words: usize, capacity: usize },

    #[error("Trailing partial instruction: {words} words is not a multiple of 3")]
    TruncatedInstruction { words: usize },

    #[error("Misaligned pointer offset: {bytes} bytes is not a multiple of the {stride}-byte stride")]
    MisalignedOffset { bytes: i64, stride: usize },

    #[error("Pointer offset leaves the address space: {handle} {bytes:+} bytes")]
    HandleOutOfRange { handle: Handle, bytes: i64 },
}

//! Loader error types

use thiserror::Error;
use triad_spec::{EncodingMode, SpecError};

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Empty input stream: no program before end of input")]
    EmptyProgram,

    #[error("Input ended before the terminator: {read} program bytes read")]
    UnexpectedEof { read: usize },

    #[error("Program too large: capacity is {capacity} words")]
    ProgramTooLarge { capacity: usize },

    #[error("Unknown opcode byte {byte:#04x} at word offset {offset} ({mode:?} encoding)")]
    UnknownOpcode {
        byte: u8,
        offset: usize,
        mode: EncodingMode,
    },

    #[error("Trailing partial instruction: {words} words is not a multiple of 3")]
    TruncatedInstruction { words: usize },

    #[error("Spec error: {0}")]
    Spec(#[from] SpecError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LoaderError>;

//! Runtime error types
//!
//! Every variant except [`VmError::Io`] hardens a behavior the original
//! machine left undefined. The running program never observes these; the
//! only program-visible failure remains the MALLOC flag.

use thiserror::Error;
use triad_spec::{BlockId, Handle, SpecError, Word};

#[derive(Debug, Error)]
pub enum VmError {
    #[error("Spec error: {0}")]
    Spec(#[from] SpecError),

    #[error("Invalid jump target {handle} at word offset {ip}")]
    InvalidJumpTarget { handle: Handle, ip: usize },

    #[error("Dereference through non-cell handle {handle}")]
    NotAddressable { handle: Handle },

    #[error("Stale heap block {block}: freed or re-allocated")]
    StaleBlock { block: BlockId },

    #[error("Cell {cell} out of bounds for heap block {block} of {len} cells")]
    BlockOutOfBounds { block: BlockId, cell: u32, len: u32 },

    #[error("Free of {handle}: not the start of an allocated block")]
    InvalidFree { handle: Handle },

    #[error("Block transfer count {count} at word offset {ip} is negative")]
    NegativeCount { count: Word, ip: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VmError>;

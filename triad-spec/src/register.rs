//! Register indices and cells for the triad VM

use crate::{Handle, Word};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of slots in each register bank
pub const NUM_REGISTERS: usize = 256;

/// Register index.
///
/// Instruction operands are raw bytes used directly as bank offsets, so
/// every `u8` names a valid slot; there is no out-of-range index.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reg(pub u8);

impl Reg {
    /// Integer slot seeded with the constant 0
    pub const ZERO: Self = Reg(b'0');
    /// Integer slot seeded with the constant 1
    pub const ONE: Self = Reg(b'1');
    /// Address slot seeded with the program-base handle
    pub const CODE_BASE: Self = Reg(b'~');

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Decode from the low byte of an operand word
    #[inline]
    pub fn from_word(word: Word) -> Self {
        Reg(word as u8)
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// One addressable storage unit: an integer word paired with an address
/// word. Register banks are 256 parallel cells; heap blocks are cell
/// arrays. DEREF_LOAD and DEREF_STORE move whole cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub int: Word,
    pub addr: Handle,
}

impl Default for Cell {
    /// Zeroed cell with the benign self-reference address. Fresh heap
    /// blocks are filled with this; register banks apply their own
    /// startup rule (all integers 1).
    fn default() -> Self {
        Cell {
            int: 0,
            addr: Handle::Register { index: Reg(1) },
        }
    }
}

//! # Tagged Address Handles
//!
//! The VM's address registers hold [`Handle`]s rather than raw pointers.
//! A handle names a location in one of three disjoint spaces: a
//! register-file cell, a cell inside a heap block, or a word offset into
//! program memory. Jump targets and data addresses share the program-visible
//! addressing model of the original machine, but the tag makes confusing
//! one space for another a detected fault instead of memory corruption.
//!
//! PTR_ADD moves handles by byte offsets. Each space has a fixed stride
//! ([`CELL_BYTES`] for cells, [`WORD_BYTES`] for code) and offsets must be
//! stride-aligned; upper bounds on heap cells and code words are enforced
//! where the spaces are known (the heap and the program, respectively).

use crate::error::SpecError;
use crate::register::Reg;
use crate::{CELL_BYTES, NUM_REGISTERS, WORD_BYTES};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Heap block identity: arena slot index plus the generation the slot had
/// when the block was allocated. A freed slot bumps its generation, so a
/// handle kept across FREE no longer resolves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId {
    pub index: u32,
    pub generation: u32,
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Tagged address
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    /// A cell of the register file
    Register { index: Reg },
    /// A cell inside an allocated heap block
    Heap { block: BlockId, cell: u32 },
    /// A word offset into program memory
    Code { word: u32 },
}

impl Handle {
    /// The benign startup value of every address register: slot 1 of the
    /// address bank itself.
    pub const DEFAULT: Self = Handle::Register { index: Reg(1) };

    /// The base of program memory
    pub const PROGRAM_BASE: Self = Handle::Code { word: 0 };

    /// Offset this handle by a signed byte count, staying within its space.
    ///
    /// The offset must be a multiple of the space's stride. Register
    /// handles are bounded by the bank here; heap cell and code word upper
    /// bounds are checked at resolution time by the component that owns
    /// the space.
    pub fn offset(self, bytes: i64) -> Result<Handle, SpecError> {
        match self {
            Handle::Register { index } => {
                let cells = Self::stride(bytes, CELL_BYTES)?;
                let target = index.index() as i64 + cells;
                if !(0..NUM_REGISTERS as i64).contains(&target) {
                    return Err(SpecError::HandleOutOfRange { handle: self, bytes });
                }
                Ok(Handle::Register {
                    index: Reg(target as u8),
                })
            }
            Handle::Heap { block, cell } => {
                let cells = Self::stride(bytes, CELL_BYTES)?;
                let target = cell as i64 + cells;
                if !(0..=u32::MAX as i64).contains(&target) {
                    return Err(SpecError::HandleOutOfRange { handle: self, bytes });
                }
                Ok(Handle::Heap {
                    block,
                    cell: target as u32,
                })
            }
            Handle::Code { word } => {
                let words = Self::stride(bytes, WORD_BYTES)?;
                let target = word as i64 + words;
                if !(0..=u32::MAX as i64).contains(&target) {
                    return Err(SpecError::HandleOutOfRange { handle: self, bytes });
                }
                Ok(Handle::Code {
                    word: target as u32,
                })
            }
        }
    }

    fn stride(bytes: i64, stride: usize) -> Result<i64, SpecError> {
        if bytes % stride as i64 != 0 {
            return Err(SpecError::MisalignedOffset { bytes, stride });
        }
        Ok(bytes / stride as i64)
    }

    /// Check if this handle can be dereferenced as a cell
    #[inline]
    pub const fn is_cell(self) -> bool {
        matches!(self, Handle::Register { .. } | Handle::Heap { .. })
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handle::Register { index } => write!(f, "reg:{}", index),
            Handle::Heap { block, cell } => write!(f, "heap:{}+{}", block, cell),
            Handle::Code { word } => write!(f, "code:{}", word),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::INSTRUCTION_BYTES;

    #[test]
    fn test_register_offset_moves_by_cells() {
        let h = Handle::Register { index: Reg(10) };
        assert_eq!(
            h.offset(3 * CELL_BYTES as i64).unwrap(),
            Handle::Register { index: Reg(13) }
        );
        assert_eq!(
            h.offset(-(2 * CELL_BYTES as i64)).unwrap(),
            Handle::Register { index: Reg(8) }
        );
    }

    #[test]
    fn test_register_offset_bounds() {
        let h = Handle::Register { index: Reg(255) };
        assert!(h.offset(CELL_BYTES as i64).is_err());
        let h = Handle::Register { index: Reg(0) };
        assert!(h.offset(-(CELL_BYTES as i64)).is_err());
    }

    #[test]
    fn test_misaligned_offset_is_a_fault() {
        let h = Handle::Register { index: Reg(0) };
        assert!(matches!(
            h.offset(3),
            Err(SpecError::MisalignedOffset { bytes: 3, stride: 8 })
        ));

        let h = Handle::Code { word: 0 };
        assert!(matches!(
            h.offset(2),
            Err(SpecError::MisalignedOffset { bytes: 2, stride: 4 })
        ));
    }

    #[test]
    fn test_code_offset_moves_by_words() {
        let h = Handle::PROGRAM_BASE;
        assert_eq!(
            h.offset(INSTRUCTION_BYTES as i64).unwrap(),
            Handle::Code { word: 3 }
        );
        let h = Handle::Code { word: 6 };
        assert_eq!(
            h.offset(-(INSTRUCTION_BYTES as i64)).unwrap(),
            Handle::Code { word: 3 }
        );
    }

    #[test]
    fn test_code_offset_cannot_go_negative() {
        assert!(Handle::PROGRAM_BASE.offset(-4).is_err());
    }

    #[test]
    fn test_heap_offset_keeps_block() {
        let block = BlockId {
            index: 7,
            generation: 2,
        };
        let h = Handle::Heap { block, cell: 1 };
        assert_eq!(
            h.offset(CELL_BYTES as i64).unwrap(),
            Handle::Heap { block, cell: 2 }
        );
        assert!(h.offset(-(2 * CELL_BYTES as i64)).is_err());
    }

    #[test]
    fn test_is_cell() {
        assert!(Handle::DEFAULT.is_cell());
        assert!(Handle::Heap {
            block: BlockId {
                index: 0,
                generation: 0
            },
            cell: 0
        }
        .is_cell());
        assert!(!Handle::PROGRAM_BASE.is_cell());
    }

    #[test]
    fn test_display() {
        assert_eq!(Handle::DEFAULT.to_string(), "reg:r1");
        assert_eq!(Handle::Code { word: 9 }.to_string(), "code:9");
        let h = Handle::Heap {
            block: BlockId {
                index: 3,
                generation: 1,
            },
            cell: 4,
        };
        assert_eq!(h.to_string(), "heap:3v1+4");
    }
}

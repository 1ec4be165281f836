//! # Opcode Definitions
//!
//! This module defines the canonical opcode values for all triad
//! instructions. The discriminants double as the numeric stream encoding:
//! values 0-9 preserve the layout of the original numeric instruction
//! table; 11-14 hold HALT and the byte-granular operations the original
//! numeric variant lacked.
//!
//! Value 10 is never assigned. It is the newline byte, the numeric
//! encoding's program terminator, so an opcode placed there could never
//! appear in a numeric stream. (The original table did put its halt
//! opcode at 10, which made halting unreachable in numeric programs and
//! forced the implicit-termination idioms this machine does not carry.)
//!
//! ## Opcode Layout
//!
//! - 0-1: Arithmetic/compare (SUB, LT)
//! - 2-3: Address (JUMP, PTR_ADD)
//! - 4, 12: Dereference (DEREF_LOAD, DEREF_STORE)
//! - 5-6: Heap (MALLOC, FREE)
//! - 7-9: Block I/O (READ_BLOCK, WRITE_BLOCK, FLUSH)
//! - 11: HALT
//! - 13-14: Byte I/O (INPUT, OUTPUT)

use crate::Word;
use serde::{Deserialize, Serialize};

/// Instruction opcode (canonical values 0-14, value 10 reserved)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// SUB: intA = intA - intB (32-bit wrapping)
    Sub = 0,
    /// LT: intA = (intA < intB) ? 1 : 0
    Lt = 1,
    /// JUMP: ip = addrA (must be a code handle on an instruction boundary)
    Jump = 2,
    /// PTR_ADD: addrA = addrA + intA bytes
    PtrAdd = 3,
    /// DEREF_LOAD: register pair A = cell designated by addrB
    Load = 4,
    /// MALLOC: addrB = new block of intA bytes; intA = 1 on failure, 0 on success
    Malloc = 5,
    /// FREE: release the block addressed by addrA
    Free = 6,
    /// READ_BLOCK: read up to intB bytes from input into cells at addrA
    ReadBlock = 7,
    /// WRITE_BLOCK: write intB bytes from cells at addrA to output
    WriteBlock = 8,
    /// FLUSH: flush the output stream
    Flush = 9,
    /// HALT: stop execution
    Halt = 11,
    /// DEREF_STORE: cell designated by addrB = register pair A
    Store = 12,
    /// INPUT: intA = next input byte, or -1 at end of stream
    Input = 13,
    /// OUTPUT: write the low byte of intA
    Output = 14,
}

impl Opcode {
    /// Every canonical opcode, in value order
    pub const ALL: [Opcode; 14] = [
        Opcode::Sub,
        Opcode::Lt,
        Opcode::Jump,
        Opcode::PtrAdd,
        Opcode::Load,
        Opcode::Malloc,
        Opcode::Free,
        Opcode::ReadBlock,
        Opcode::WriteBlock,
        Opcode::Flush,
        Opcode::Halt,
        Opcode::Store,
        Opcode::Input,
        Opcode::Output,
    ];

    /// Number of canonical opcodes
    pub const COUNT: usize = Self::ALL.len();

    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Opcode::Sub),
            1 => Some(Opcode::Lt),
            2 => Some(Opcode::Jump),
            3 => Some(Opcode::PtrAdd),
            4 => Some(Opcode::Load),
            5 => Some(Opcode::Malloc),
            6 => Some(Opcode::Free),
            7 => Some(Opcode::ReadBlock),
            8 => Some(Opcode::WriteBlock),
            9 => Some(Opcode::Flush),
            11 => Some(Opcode::Halt),
            12 => Some(Opcode::Store),
            13 => Some(Opcode::Input),
            14 => Some(Opcode::Output),
            _ => None,
        }
    }

    /// Try to convert from a program word. Words outside 0-255 never name
    /// an opcode.
    pub fn from_word(word: Word) -> Option<Self> {
        u8::try_from(word).ok().and_then(Self::from_u8)
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Convert to a program word
    #[inline]
    pub const fn to_word(self) -> Word {
        self as u8 as Word
    }

    /// Check if this opcode touches the heap
    #[inline]
    pub const fn is_heap(self) -> bool {
        matches!(self, Opcode::Malloc | Opcode::Free)
    }

    /// Check if this opcode performs stream I/O
    #[inline]
    pub const fn is_io(self) -> bool {
        matches!(
            self,
            Opcode::Input
                | Opcode::Output
                | Opcode::ReadBlock
                | Opcode::WriteBlock
                | Opcode::Flush
        )
    }

    /// Check if this opcode transfers whole byte runs rather than single bytes
    #[inline]
    pub const fn is_block_io(self) -> bool {
        matches!(self, Opcode::ReadBlock | Opcode::WriteBlock)
    }

    /// Check if this opcode may redirect the instruction pointer
    #[inline]
    pub const fn redirects_ip(self) -> bool {
        matches!(self, Opcode::Jump)
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Sub => "sub",
            Opcode::Lt => "lt",
            Opcode::Jump => "jump",
            Opcode::PtrAdd => "ptradd",
            Opcode::Load => "load",
            Opcode::Malloc => "malloc",
            Opcode::Free => "free",
            Opcode::ReadBlock => "readb",
            Opcode::WriteBlock => "writeb",
            Opcode::Flush => "flush",
            Opcode::Halt => "halt",
            Opcode::Store => "store",
            Opcode::Input => "input",
            Opcode::Output => "output",
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_values() {
        assert_eq!(Opcode::Sub.to_u8(), 0);
        assert_eq!(Opcode::Lt.to_u8(), 1);
        assert_eq!(Opcode::Jump.to_u8(), 2);
        assert_eq!(Opcode::PtrAdd.to_u8(), 3);
        assert_eq!(Opcode::Load.to_u8(), 4);
        assert_eq!(Opcode::Malloc.to_u8(), 5);
        assert_eq!(Opcode::Free.to_u8(), 6);
        assert_eq!(Opcode::ReadBlock.to_u8(), 7);
        assert_eq!(Opcode::WriteBlock.to_u8(), 8);
        assert_eq!(Opcode::Flush.to_u8(), 9);
        assert_eq!(Opcode::Halt.to_u8(), 11);
        assert_eq!(Opcode::Store.to_u8(), 12);
        assert_eq!(Opcode::Input.to_u8(), 13);
        assert_eq!(Opcode::Output.to_u8(), 14);
    }

    #[test]
    fn test_value_10_is_reserved() {
        // 10 is the numeric terminator byte; no opcode may sit there.
        assert_eq!(Opcode::from_u8(10), None);
        for op in Opcode::ALL {
            assert_ne!(op.to_u8(), b'\n');
        }
    }

    #[test]
    fn test_opcode_from_u8_roundtrip() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::from_u8(op.to_u8()), Some(op));
        }
        assert_eq!(Opcode::from_u8(15), None);
        assert_eq!(Opcode::from_u8(0xFF), None);
    }

    #[test]
    fn test_opcode_from_word() {
        assert_eq!(Opcode::from_word(0), Some(Opcode::Sub));
        assert_eq!(Opcode::from_word(11), Some(Opcode::Halt));
        assert_eq!(Opcode::from_word(-1), None);
        assert_eq!(Opcode::from_word(256), None);
    }

    #[test]
    fn test_opcode_predicates() {
        assert!(Opcode::Malloc.is_heap());
        assert!(Opcode::Free.is_heap());
        assert!(!Opcode::Sub.is_heap());

        assert!(Opcode::Input.is_io());
        assert!(Opcode::Flush.is_io());
        assert!(!Opcode::Halt.is_io());

        assert!(Opcode::ReadBlock.is_block_io());
        assert!(!Opcode::Output.is_block_io());

        assert!(Opcode::Jump.redirects_ip());
        assert!(!Opcode::PtrAdd.redirects_ip());
    }

    #[test]
    fn test_opcode_display() {
        assert_eq!(Opcode::Sub.to_string(), "sub");
        assert_eq!(Opcode::PtrAdd.to_string(), "ptradd");
        assert_eq!(Opcode::Halt.to_string(), "halt");
    }
}

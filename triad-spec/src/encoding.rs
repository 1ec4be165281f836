//! # Stream Encodings
//!
//! Two encodings of the same canonical opcode set exist on the wire: a
//! symbolic encoding using ASCII punctuation and letters, and a
//! small-integer encoding whose values are the canonical discriminants
//! themselves. The mapping lives entirely in this module; the dispatch
//! loop only ever sees canonical values.
//!
//! Block I/O (READ_BLOCK, WRITE_BLOCK) and FLUSH exist only in the numeric
//! encoding, mirroring the split in the original machine's two variants.

use crate::opcode::Opcode;
use serde::{Deserialize, Serialize};

/// Stream encoding mode
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncodingMode {
    /// ASCII opcode symbols, program terminated by `'x'`
    #[default]
    Symbolic,
    /// Raw small-integer opcode values, program terminated by newline
    Numeric,
}

/// Leading byte that selects the numeric encoding when present
pub const NUMERIC_SELECTOR: u8 = b'#';

impl EncodingMode {
    /// Sentinel byte that ends the program in this encoding. Not stored
    /// as part of the program.
    pub const fn terminator(self) -> u8 {
        match self {
            EncodingMode::Symbolic => b'x',
            EncodingMode::Numeric => b'\n',
        }
    }

    /// Map a stream opcode byte to the canonical opcode
    pub fn decode_opcode(self, byte: u8) -> Option<Opcode> {
        match self {
            EncodingMode::Symbolic => match byte {
                b'-' => Some(Opcode::Sub),
                b'<' => Some(Opcode::Lt),
                b'j' => Some(Opcode::Jump),
                b'+' => Some(Opcode::PtrAdd),
                b'r' => Some(Opcode::Load),
                b'w' => Some(Opcode::Store),
                b'm' => Some(Opcode::Malloc),
                b'f' => Some(Opcode::Free),
                b'i' => Some(Opcode::Input),
                b'o' => Some(Opcode::Output),
                b'h' => Some(Opcode::Halt),
                _ => None,
            },
            EncodingMode::Numeric => Opcode::from_u8(byte),
        }
    }

    /// Map a canonical opcode back to its stream byte. `None` for opcodes
    /// the encoding cannot express.
    pub fn encode_opcode(self, op: Opcode) -> Option<u8> {
        match self {
            EncodingMode::Symbolic => match op {
                Opcode::Sub => Some(b'-'),
                Opcode::Lt => Some(b'<'),
                Opcode::Jump => Some(b'j'),
                Opcode::PtrAdd => Some(b'+'),
                Opcode::Load => Some(b'r'),
                Opcode::Store => Some(b'w'),
                Opcode::Malloc => Some(b'm'),
                Opcode::Free => Some(b'f'),
                Opcode::Input => Some(b'i'),
                Opcode::Output => Some(b'o'),
                Opcode::Halt => Some(b'h'),
                Opcode::ReadBlock | Opcode::WriteBlock | Opcode::Flush => None,
            },
            EncodingMode::Numeric => Some(op.to_u8()),
        }
    }
}

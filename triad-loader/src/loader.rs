//! Byte stream to program memory

use crate::error::{LoaderError, Result};
use std::io::Read;
use tracing::debug;
use triad_spec::encoding::NUMERIC_SELECTOR;
use triad_spec::{EncodingMode, Program, Word, INSTRUCTION_WORDS};

/// Read one program from the stream.
///
/// Returns the program with opcode words already mapped to canonical
/// values, plus the encoding that was selected. The reader is left
/// positioned at the first byte after the terminator.
pub fn load_program<R: Read>(input: &mut R) -> Result<(Program, EncodingMode)> {
    let first = read_byte(input)?.ok_or(LoaderError::EmptyProgram)?;

    let (mode, carry) = if first == NUMERIC_SELECTOR {
        (EncodingMode::Numeric, None)
    } else {
        (EncodingMode::Symbolic, Some(first))
    };

    let raw = read_until_terminator(input, mode, carry)?;
    let words = map_opcodes(&raw, mode)?;
    let program = Program::from_words(words).map_err(|err| match err {
        triad_spec::SpecError::TruncatedInstruction { words } => {
            LoaderError::TruncatedInstruction { words }
        }
        other => LoaderError::Spec(other),
    })?;

    debug!(
        words = program.len_words(),
        instructions = program.instruction_count(),
        ?mode,
        "program loaded"
    );
    Ok((program, mode))
}

/// Collect raw program bytes up to (not including) the terminator.
///
/// Every byte, operand or opcode, is checked against the terminator,
/// exactly as the original loader did; a terminator value in an operand
/// position ends the program early.
fn read_until_terminator<R: Read>(
    input: &mut R,
    mode: EncodingMode,
    carry: Option<u8>,
) -> Result<Vec<u8>> {
    let terminator = mode.terminator();
    let mut raw = Vec::new();

    if let Some(byte) = carry {
        if byte == terminator {
            return Ok(raw);
        }
        raw.push(byte);
    }

    loop {
        let byte = read_byte(input)?.ok_or(LoaderError::UnexpectedEof { read: raw.len() })?;
        if byte == terminator {
            return Ok(raw);
        }
        if raw.len() == Program::CAPACITY_WORDS {
            return Err(LoaderError::ProgramTooLarge {
                capacity: Program::CAPACITY_WORDS,
            });
        }
        raw.push(byte);
    }
}

/// Map opcode positions through the encoding table; operand bytes pass
/// through raw.
fn map_opcodes(raw: &[u8], mode: EncodingMode) -> Result<Vec<Word>> {
    raw.iter()
        .enumerate()
        .map(|(offset, &byte)| {
            if offset % INSTRUCTION_WORDS == 0 {
                mode.decode_opcode(byte)
                    .map(|op| op.to_word())
                    .ok_or(LoaderError::UnknownOpcode { byte, offset, mode })
            } else {
                Ok(byte as Word)
            }
        })
        .collect()
}

fn read_byte<R: Read>(input: &mut R) -> std::io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match input.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}

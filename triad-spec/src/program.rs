//! # Program Memory
//!
//! A bounded buffer of instruction words, filled once by the loader before
//! execution and never resized. Instruction boundaries are word offsets
//! divisible by [`INSTRUCTION_WORDS`].

use crate::error::SpecError;
use crate::instruction::{Instruction, INSTRUCTION_WORDS};
use crate::Word;
use serde::{Deserialize, Serialize};

/// Program memory
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    words: Vec<Word>,
}

impl Program {
    /// Capacity of program memory in words (the original machine's 8 K
    /// word buffer).
    pub const CAPACITY_WORDS: usize = 8192;

    /// Build a program from canonical words.
    ///
    /// The word count must be a whole number of instructions and fit the
    /// fixed capacity. Opcode words are not validated here; an invalid one
    /// faults at fetch time, which is what a JUMP-reachable stale word
    /// would do anyway.
    pub fn from_words(words: Vec<Word>) -> Result<Self, SpecError> {
        if words.len() > Self::CAPACITY_WORDS {
            return Err(SpecError::ProgramTooLarge {
                words: words.len(),
                capacity: Self::CAPACITY_WORDS,
            });
        }
        if words.len() % INSTRUCTION_WORDS != 0 {
            return Err(SpecError::TruncatedInstruction { words: words.len() });
        }
        Ok(Program { words })
    }

    /// Build a program from decoded instructions (test and tooling aid)
    pub fn from_instructions(instructions: &[Instruction]) -> Result<Self, SpecError> {
        let words = instructions
            .iter()
            .flat_map(|instr| instr.encode())
            .collect();
        Self::from_words(words)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len_words(&self) -> usize {
        self.words.len()
    }

    pub fn instruction_count(&self) -> usize {
        self.words.len() / INSTRUCTION_WORDS
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check if a word offset is a valid jump target
    pub fn is_instruction_boundary(&self, word: usize) -> bool {
        word % INSTRUCTION_WORDS == 0 && word < self.words.len()
    }

    /// Fetch and decode the instruction at a word offset
    pub fn fetch(&self, word: usize) -> Result<Instruction, SpecError> {
        let end = word
            .checked_add(INSTRUCTION_WORDS)
            .filter(|&end| end <= self.words.len())
            .ok_or(SpecError::OutOfCode { word })?;
        let words: &[Word; INSTRUCTION_WORDS] = self.words[word..end].try_into().expect("3 words");
        Instruction::decode(words)
    }
}

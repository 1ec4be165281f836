//! Instruction execution
//!
//! One match arm per primitive. Every arm advances the instruction
//! pointer by one instruction unless it redirected it (JUMP) or latched
//! the halt flag. Only MALLOC failure is visible to the running program;
//! every other abnormal condition returns a [`VmError`] and ends the run.

use crate::error::{Result, VmError};
use crate::state::HaltReason;
use crate::vm::Vm;
use std::io::{Read, Write};
use triad_spec::{Cell, Handle, Instruction, Opcode, Reg, Word, CELL_BYTES, INSTRUCTION_WORDS};

impl<R: Read, W: Write> Vm<R, W> {
    pub(crate) fn execute(&mut self, instr: Instruction) -> Result<()> {
        let Instruction { op, a, b } = instr;

        match op {
            Opcode::Sub => {
                let value = self.regs.int(a).wrapping_sub(self.regs.int(b));
                self.regs.set_int(a, value);
                self.advance();
            }

            Opcode::Lt => {
                let value = (self.regs.int(a) < self.regs.int(b)) as Word;
                self.regs.set_int(a, value);
                self.advance();
            }

            Opcode::Jump => {
                let handle = self.regs.addr(a);
                match handle {
                    Handle::Code { word }
                        if self.program.is_instruction_boundary(word as usize) =>
                    {
                        self.state.ip = word as usize;
                    }
                    _ => {
                        return Err(VmError::InvalidJumpTarget {
                            handle,
                            ip: self.state.ip,
                        })
                    }
                }
            }

            Opcode::PtrAdd => {
                let moved = self.regs.addr(a).offset(self.regs.int(a) as i64)?;
                self.regs.set_addr(a, moved);
                self.advance();
            }

            Opcode::Load => {
                let cell = self.deref(self.regs.addr(b))?;
                self.regs.set_cell(a, cell);
                self.advance();
            }

            Opcode::Store => {
                let target = self.regs.addr(b);
                let cell = self.regs.cell(a);
                self.deref_write(target, cell)?;
                self.advance();
            }

            Opcode::Malloc => {
                match self.heap.alloc(self.regs.int(a)) {
                    Some(block) => {
                        self.regs.set_addr(b, Handle::Heap { block, cell: 0 });
                        self.regs.set_int(a, 0);
                    }
                    None => self.regs.set_int(a, 1),
                }
                self.advance();
            }

            Opcode::Free => {
                match self.regs.addr(a) {
                    Handle::Heap { block, cell: 0 } => self.heap.free(block)?,
                    handle => return Err(VmError::InvalidFree { handle }),
                }
                self.advance();
            }

            Opcode::Input => {
                let value = match self.streams.read_byte()? {
                    Some(byte) => byte as Word,
                    None => -1,
                };
                self.regs.set_int(a, value);
                self.advance();
            }

            Opcode::Output => {
                self.streams.write_byte(self.regs.int(a) as u8)?;
                self.advance();
            }

            Opcode::ReadBlock => {
                let count = self.block_count(b)?;
                let base = self.regs.addr(a);
                let mut buf = vec![0u8; count];
                let filled = self.streams.read_block(&mut buf)?;
                for (k, &byte) in buf[..filled].iter().enumerate() {
                    let handle = base.offset((k * CELL_BYTES) as i64)?;
                    let mut cell = self.deref(handle)?;
                    cell.int = byte as Word;
                    self.deref_write(handle, cell)?;
                }
                self.advance();
            }

            Opcode::WriteBlock => {
                let count = self.block_count(b)?;
                let base = self.regs.addr(a);
                let mut bytes = Vec::with_capacity(count);
                for k in 0..count {
                    let handle = base.offset((k * CELL_BYTES) as i64)?;
                    bytes.push(self.deref(handle)?.int as u8);
                }
                self.streams.write_block(&bytes)?;
                self.advance();
            }

            Opcode::Flush => {
                self.streams.flush()?;
                self.advance();
            }

            Opcode::Halt => {
                self.state.halt(HaltReason::Halt);
            }
        }

        Ok(())
    }

    #[inline]
    fn advance(&mut self) {
        self.state.ip += INSTRUCTION_WORDS;
    }

    fn block_count(&self, b: Reg) -> Result<usize> {
        let count = self.regs.int(b);
        if count < 0 {
            return Err(VmError::NegativeCount {
                count,
                ip: self.state.ip,
            });
        }
        Ok(count as usize)
    }

    /// Resolve a handle to the cell it designates
    fn deref(&self, handle: Handle) -> Result<Cell> {
        match handle {
            Handle::Register { index } => Ok(self.regs.cell(index)),
            Handle::Heap { block, cell } => self.heap.cell(block, cell),
            Handle::Code { .. } => Err(VmError::NotAddressable { handle }),
        }
    }

    /// Write a cell through a handle
    fn deref_write(&mut self, handle: Handle, cell: Cell) -> Result<()> {
        match handle {
            Handle::Register { index } => {
                self.regs.set_cell(index, cell);
                Ok(())
            }
            Handle::Heap { block, cell: index } => {
                *self.heap.cell_mut(block, index)? = cell;
                Ok(())
            }
            Handle::Code { .. } => Err(VmError::NotAddressable { handle }),
        }
    }
}

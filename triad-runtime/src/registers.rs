//! Register file
//!
//! Two parallel 256-slot banks: integer words and address handles. All
//! storage the opcode handlers touch goes through this type or the heap;
//! nothing else holds VM-visible state.
//!
//! Initialization is the only lifecycle event. Every integer slot starts
//! at 1 and every address slot at the slot-1 self-reference, then three
//! constant seeds are applied: integer `'0'` holds 0, integer `'1'`
//! holds 1, and address `'~'` holds the program-base handle, the anchor
//! from which programs derive jump targets with PTR_ADD.

use triad_spec::{Cell, Handle, Reg, Word, NUM_REGISTERS};

#[derive(Debug, Clone)]
pub struct RegisterFile {
    ints: [Word; NUM_REGISTERS],
    addrs: [Handle; NUM_REGISTERS],
}

impl RegisterFile {
    pub fn new() -> Self {
        let mut regs = RegisterFile {
            ints: [1; NUM_REGISTERS],
            addrs: [Handle::DEFAULT; NUM_REGISTERS],
        };
        regs.ints[Reg::ZERO.index()] = 0;
        regs.ints[Reg::ONE.index()] = 1;
        regs.addrs[Reg::CODE_BASE.index()] = Handle::PROGRAM_BASE;
        regs
    }

    #[inline]
    pub fn int(&self, reg: Reg) -> Word {
        self.ints[reg.index()]
    }

    #[inline]
    pub fn set_int(&mut self, reg: Reg, value: Word) {
        self.ints[reg.index()] = value;
    }

    #[inline]
    pub fn addr(&self, reg: Reg) -> Handle {
        self.addrs[reg.index()]
    }

    #[inline]
    pub fn set_addr(&mut self, reg: Reg, handle: Handle) {
        self.addrs[reg.index()] = handle;
    }

    /// Read both banks at one index as a cell
    #[inline]
    pub fn cell(&self, reg: Reg) -> Cell {
        Cell {
            int: self.ints[reg.index()],
            addr: self.addrs[reg.index()],
        }
    }

    /// Write both banks at one index from a cell
    #[inline]
    pub fn set_cell(&mut self, reg: Reg, cell: Cell) {
        self.ints[reg.index()] = cell.int;
        self.addrs[reg.index()] = cell.addr;
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

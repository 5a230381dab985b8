//! Register file access.
//!
//! The instruction loop and the register storage live outside this
//! workspace. Syscall handlers only need to read and write integer and
//! float registers and to stop the CPU, which is what [`CpuState`] exposes.
use sysdefs::constants::reg_const::NUM_REGS;

/// Register access used by the syscall layer.
///
/// Float registers are exchanged as raw bit patterns; the single precision
/// value lives in the low 32 bits (NaN boxing is the implementor's concern).
pub trait CpuState {
    fn get_reg(&self, idx: usize) -> u32;
    fn set_reg(&mut self, idx: usize, val: u32);
    fn get_freg(&self, idx: usize) -> u32;
    fn set_freg(&mut self, idx: usize, bits: u32);
    /// Stop fetching instructions after the current syscall returns.
    fn halt(&mut self);
    fn is_halted(&self) -> bool;
}

/// Plain register file. x0 reads as zero and ignores writes.
#[derive(Debug, Clone)]
pub struct Registers {
    pub x: [u32; NUM_REGS],
    pub f: [u32; NUM_REGS],
    halted: bool,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            x: [0; NUM_REGS],
            f: [0; NUM_REGS],
            halted: false,
        }
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuState for Registers {
    fn get_reg(&self, idx: usize) -> u32 {
        if idx == 0 {
            return 0;
        }
        self.x[idx]
    }

    fn set_reg(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.x[idx] = val;
        }
    }

    fn get_freg(&self, idx: usize) -> u32 {
        self.f[idx]
    }

    fn set_freg(&mut self, idx: usize, bits: u32) {
        self.f[idx] = bits;
    }

    fn halt(&mut self) {
        self.halted = true;
    }

    fn is_halted(&self) -> bool {
        self.halted
    }
}

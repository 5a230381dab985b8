//! RV32 register indices used by the syscall ABI.
//!
//! Integer registers follow the standard RISC-V calling convention: the
//! syscall number lives in `a7`, arguments in `a0`..`a6` and the primary
//! return value goes back into `a0`. Floating-point arguments and results use
//! `fa0`.

/// Hard-wired zero register
pub const REG_ZERO: usize = 0;

pub const REG_A0: usize = 10;
pub const REG_A1: usize = 11;
pub const REG_A2: usize = 12;
/// Syscall number register
pub const REG_A7: usize = 17;

/// First floating-point argument / return register
pub const FREG_FA0: usize = 10;

/// Number of integer (and floating-point) registers in the hart
pub const NUM_REGS: usize = 32;

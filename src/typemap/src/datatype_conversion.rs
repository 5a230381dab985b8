//! Basic primitive type conversion API
//!
//! Register values are 32-bit words. These helpers give them the type a
//! handler wants.
//! Function naming convention:
//! - All functions starting with `sc_` are **public APIs** used by the syscall handlers.
use cage::Vm;

/// Raw 32-bit register value.
#[inline]
pub fn sc_convert_sysarg_to_u32(vm: &Vm, reg: usize) -> u32 {
    vm.cpu.get_reg(reg)
}

/// Register value reinterpreted as a signed 32-bit integer.
#[inline]
pub fn sc_convert_sysarg_to_i32(vm: &Vm, reg: usize) -> i32 {
    vm.cpu.get_reg(reg) as i32
}

/// Register value as a host size (counts, lengths). Zero extended.
#[inline]
pub fn sc_convert_sysarg_to_usize(vm: &Vm, reg: usize) -> usize {
    vm.cpu.get_reg(reg) as usize
}

/// Register value sign-extended to 64 bits, e.g. a file offset.
///
/// ## Returns:
/// `0xFFFF_FFFF` becomes `-1`, so a guest can seek backwards.
#[inline]
pub fn sc_convert_sysarg_to_i64(vm: &Vm, reg: usize) -> i64 {
    vm.cpu.get_reg(reg) as i32 as i64
}

/// Single precision value held in a float register.
#[inline]
pub fn sc_convert_freg_to_f32(vm: &Vm, freg: usize) -> f32 {
    f32::from_bits(vm.cpu.get_freg(freg))
}

/// Optional guest pointer: `None` for a null (zero) address.
#[inline]
pub fn sc_convert_addr(vm: &Vm, reg: usize) -> Option<u32> {
    match vm.cpu.get_reg(reg) {
        0 => None,
        addr => Some(addr),
    }
}

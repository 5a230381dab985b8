//! Syscall dispatch.
//!
//! The instruction loop calls [`syscall_handler`] when the guest executes
//! `ecall`. The number in a7 picks the handler; the handler's result is
//! written back to a0 or fa0.
use cage::{SyscallFn, SyscallRet, Vm};
use sysdefs::constants::err_const::Errno;
use sysdefs::constants::reg_const::{FREG_FA0, REG_A0, REG_A7};
use sysdefs::constants::syscall_const::syscall_name;

/// Runs the syscall the guest asked for.
///
/// An unknown number is reported on host stderr and otherwise ignored: no
/// register changes and the VM keeps running. Whatever the outcome, a0 as
/// it stands afterwards is recorded in `VmAttributes::error`.
pub fn syscall_handler(vm: &mut Vm) {
    let callnum = vm.cpu.get_reg(REG_A7);

    match vm.syscalls.get_handler(callnum) {
        Some(handler) => {
            log::debug!(
                "syscall {} ({})",
                callnum,
                syscall_name(callnum).unwrap_or("extension")
            );
            match handler(vm) {
                SyscallRet::Int(value) => vm.cpu.set_reg(REG_A0, value as u32),
                SyscallRet::Float(value) => vm.cpu.set_freg(FREG_FA0, value.to_bits()),
                SyscallRet::Unset => {}
            }
        }
        None => {
            eprintln!("unknown syscall {}", callnum as i32);
            log::warn!("unknown syscall {}", callnum as i32);
        }
    }

    vm.attr.error = vm.cpu.get_reg(REG_A0);
}

/// Installs a handler for a number the core does not serve, such as the
/// multimedia extension calls.
///
/// ## Returns:
/// `Err(EEXIST)` if the number already has a handler; core syscalls cannot
/// be replaced.
pub fn register_extension(vm: &mut Vm, callnum: u32, handler: SyscallFn) -> Result<(), Errno> {
    vm.syscalls.register_handler(callnum, handler)
}

//! File descriptor conversion.
use cage::{FloatFdKey, Vm};
use sysdefs::constants::err_const::Errno;
use sysdefs::constants::reg_const::{FREG_FA0, REG_A0};

/// Translates a guest virtual fd to the host kernel fd behind it.
///
/// ## Returns:
/// `Err(EBADF)` when the fd is reserved or not open.
pub fn convert_fd_to_host(vm: &Vm, virtual_fd: u64) -> Result<i32, Errno> {
    let entry = vm.attr.fdtable.translate_virtual_fd(virtual_fd)?;
    Ok(entry.underfd as i32)
}

/// The virtual fd a `readfloat` call refers to.
///
/// By default the table is keyed with the raw bit pattern of fa0, matching
/// the reference runtime; `FloatFdKey::IntegerRegister` uses a0 instead.
pub fn sc_convert_readfloat_fd(vm: &Vm) -> u64 {
    match vm.attr.config.float_fd_key {
        FloatFdKey::FloatRegisterBits => vm.cpu.get_freg(FREG_FA0) as u64,
        FloatFdKey::IntegerRegister => vm.cpu.get_reg(REG_A0) as u64,
    }
}

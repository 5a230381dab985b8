//! Guest path conversion.
use cage::memory::bridge::read_cstr;
use cage::Vm;
use std::ffi::CString;
use sysdefs::constants::err_const::Errno;
use sysdefs::constants::fs_const::PATH_MAX;

/// Reads the NUL-terminated path at guest address `path_addr` and returns it
/// as a host `CString`.
///
/// The path is used verbatim: no prefix is added and nothing is normalized,
/// so the guest sees the host filesystem with the emulator's permissions.
///
/// ## Returns:
/// - `Err(EFAULT)` if the string runs off the end of guest memory
/// - `Err(ENAMETOOLONG)` if it is longer than `PATH_MAX` with its terminator
pub fn sc_convert_path_to_host(vm: &Vm, path_addr: u32) -> Result<CString, Errno> {
    let bytes = read_cstr(&*vm.mem, path_addr, PATH_MAX).map_err(|e| {
        log::debug!("guest path at {:#x} unreadable: {}", path_addr, e);
        e
    })?;
    // read_cstr stops at the first NUL, so this cannot fail
    CString::new(bytes).map_err(|_| Errno::EINVAL)
}

//! Guest address helpers
//!
//! Address validation shared by guest memory implementations and the bridge.
//! Guest addresses are absolute 32-bit values; every computed address is
//! checked for wrap-around before it is used.
use sysdefs::constants::err_const::Errno;

/// Validates that `[addr, addr + len)` lies inside a guest memory of `size`
/// bytes and returns the start offset as a host index.
///
/// # Arguments
/// * `addr` - guest address of the first byte
/// * `len` - number of bytes accessed
/// * `size` - size of the guest memory in bytes
///
/// # Returns
/// * `Ok(usize)` - index of `addr` in the backing storage
/// * `Err(EFAULT)` - the range is not fully inside guest memory
pub fn check_and_convert_addr(addr: u32, len: usize, size: u64) -> Result<usize, Errno> {
    let end = (addr as u64)
        .checked_add(len as u64)
        .ok_or(Errno::EFAULT)?;
    if end > size {
        return Err(Errno::EFAULT);
    }
    Ok(addr as usize)
}

/// Guest address `offset` bytes past `base`.
///
/// Fails with `EFAULT` instead of wrapping past the top of the 32-bit
/// address space.
pub fn offset_addr(base: u32, offset: usize) -> Result<u32, Errno> {
    let offset = u32::try_from(offset).map_err(|_| Errno::EFAULT)?;
    base.checked_add(offset).ok_or(Errno::EFAULT)
}

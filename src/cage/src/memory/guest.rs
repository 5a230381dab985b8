//! Guest memory view.
use crate::memory::mem_helper::check_and_convert_addr;
use sysdefs::constants::err_const::Errno;

/// Byte-addressable guest memory.
///
/// Addresses are absolute guest addresses with no alignment requirement.
/// Implementations must bounds check every access and fail with `EFAULT`
/// rather than touch anything outside the guest.
pub trait GuestMemory {
    fn read(&self, addr: u32, buf: &mut [u8]) -> Result<(), Errno>;
    fn write(&mut self, addr: u32, data: &[u8]) -> Result<(), Errno>;
    /// Size of the addressable range in bytes, starting at address 0.
    fn size(&self) -> u64;
}

/// Guest memory backed by one contiguous host allocation.
#[derive(Debug, Clone)]
pub struct FlatMemory {
    bytes: Vec<u8>,
}

impl FlatMemory {
    /// Zero-filled memory of `size` bytes.
    pub fn new(size: usize) -> Self {
        FlatMemory {
            bytes: vec![0; size],
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl GuestMemory for FlatMemory {
    fn read(&self, addr: u32, buf: &mut [u8]) -> Result<(), Errno> {
        let start = check_and_convert_addr(addr, buf.len(), self.size())?;
        buf.copy_from_slice(&self.bytes[start..start + buf.len()]);
        Ok(())
    }

    fn write(&mut self, addr: u32, data: &[u8]) -> Result<(), Errno> {
        let start = check_and_convert_addr(addr, data.len(), self.size())?;
        self.bytes[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_back_what_was_written() {
        let mut mem = FlatMemory::new(64);
        mem.write(10, b"hello").unwrap();
        let mut buf = [0u8; 5];
        mem.read(10, &mut buf).unwrap();
        assert_eq!(&buf, b"hello");
        assert_eq!(&mem.as_slice()[9..16], b"\0hello\0");
    }

    #[test]
    fn out_of_range_access_faults_without_side_effects() {
        let mut mem = FlatMemory::new(8);
        assert_eq!(mem.write(6, b"abc"), Err(Errno::EFAULT));
        assert!(mem.as_slice().iter().all(|&b| b == 0));
        let mut buf = [0u8; 4];
        assert_eq!(mem.read(u32::MAX, &mut buf), Err(Errno::EFAULT));
    }
}

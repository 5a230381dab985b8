//! Guest memory bridge
//!
//! Every byte moving between guest memory and the host goes through here,
//! in chunks no larger than the VM's staging buffer. Host memory use stays
//! bounded by the staging capacity whatever length the guest asks for.
use crate::memory::guest::GuestMemory;
use crate::memory::mem_helper::offset_addr;
use sysdefs::constants::err_const::Errno;
use sysdefs::constants::fs_const::STAGING_SIZE;
use sysdefs::data::fs_struct::Transfer;

/// Fixed-size host scratch area, one per VM.
#[derive(Debug)]
pub struct StagingBuffer {
    buf: Box<[u8]>,
}

impl StagingBuffer {
    pub fn new() -> Self {
        Self::with_capacity(STAGING_SIZE)
    }

    /// A staging buffer of `capacity` bytes. A zero capacity is bumped to
    /// one byte so chunk loops always make progress.
    pub fn with_capacity(capacity: usize) -> Self {
        StagingBuffer {
            buf: vec![0u8; capacity.max(1)].into_boxed_slice(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
}

impl Default for StagingBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies `len` guest bytes starting at `addr` into a host vector.
pub fn pull(
    mem: &dyn GuestMemory,
    staging: &mut StagingBuffer,
    addr: u32,
    len: usize,
) -> Result<Vec<u8>, Errno> {
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        let n = (len - out.len()).min(staging.capacity());
        let chunk = &mut staging.buf[..n];
        mem.read(offset_addr(addr, out.len())?, chunk)?;
        out.extend_from_slice(chunk);
    }
    Ok(out)
}

/// Copies `bytes` into guest memory starting at `addr`.
///
/// On a fault the chunks before the faulting one have already landed.
pub fn push(
    mem: &mut dyn GuestMemory,
    staging: &mut StagingBuffer,
    addr: u32,
    bytes: &[u8],
) -> Result<(), Errno> {
    let mut done = 0;
    while done < bytes.len() {
        let n = (bytes.len() - done).min(staging.capacity());
        let chunk = &mut staging.buf[..n];
        chunk.copy_from_slice(&bytes[done..done + n]);
        mem.write(offset_addr(addr, done)?, chunk)?;
        done += n;
    }
    Ok(())
}

/// Reads a NUL-terminated string from guest memory.
///
/// `max` bounds the string including its terminator. The returned bytes do
/// not include the NUL.
///
/// # Returns
/// * `Err(ENAMETOOLONG)` - no terminator within `max` bytes
/// * `Err(EFAULT)` - guest memory ends before the terminator
pub fn read_cstr(mem: &dyn GuestMemory, addr: u32, max: usize) -> Result<Vec<u8>, Errno> {
    let mut out = Vec::new();
    let mut byte = [0u8; 1];
    while out.len() < max {
        mem.read(offset_addr(addr, out.len())?, &mut byte)?;
        if byte[0] == 0 {
            return Ok(out);
        }
        out.push(byte[0]);
    }
    Err(Errno::ENAMETOOLONG)
}

/// Streams a NUL-terminated guest string to `sink`, one staging buffer at a
/// time. There is no length bound; the walk stops at the terminator or at
/// the first byte outside guest memory.
///
/// `Transfer::done` counts the bytes handed to the sink. A guest fault is
/// reported in `Transfer::error` after whatever was collected so far has
/// been flushed.
pub fn stream_cstr<F>(
    mem: &dyn GuestMemory,
    staging: &mut StagingBuffer,
    addr: u32,
    mut sink: F,
) -> Transfer
where
    F: FnMut(&[u8]),
{
    let mut transfer = Transfer::default();
    let mut filled = 0;
    let mut byte = [0u8; 1];
    loop {
        let read = offset_addr(addr, transfer.done + filled).and_then(|a| mem.read(a, &mut byte));
        if let Err(e) = read {
            transfer.error = Some(e);
            break;
        }
        if byte[0] == 0 {
            break;
        }
        staging.buf[filled] = byte[0];
        filled += 1;
        if filled == staging.capacity() {
            sink(&staging.buf[..filled]);
            transfer.done += filled;
            filled = 0;
        }
    }
    if filled > 0 {
        sink(&staging.buf[..filled]);
        transfer.done += filled;
    }
    transfer
}

/// Moves `count` guest bytes at `addr` to a host consumer.
///
/// `sink` is handed one staged chunk at a time and reports how many bytes it
/// took plus the host error, if any, that stopped it. A chunk the sink only
/// partly accepts ends the loop, as does a guest fault.
pub fn guest_to_host<F>(
    mem: &dyn GuestMemory,
    staging: &mut StagingBuffer,
    addr: u32,
    count: usize,
    mut sink: F,
) -> Transfer
where
    F: FnMut(&[u8]) -> (usize, Option<Errno>),
{
    let mut transfer = Transfer::default();
    while transfer.done < count {
        let n = (count - transfer.done).min(staging.capacity());
        let chunk = &mut staging.buf[..n];
        let read = offset_addr(addr, transfer.done).and_then(|a| mem.read(a, chunk));
        if let Err(e) = read {
            transfer.error = Some(e);
            break;
        }
        let (taken, err) = sink(chunk);
        transfer.done += taken.min(n);
        if taken < n {
            transfer.error = err;
            break;
        }
    }
    transfer
}

/// Moves up to `count` bytes from a host producer into guest memory at
/// `addr`.
///
/// `source` fills the staged chunk and reports how many bytes it produced
/// plus the host error, if any. Fewer bytes than asked for (end of file, or
/// an error) ends the loop after those bytes are stored. Bytes that could
/// not be stored because of a guest fault are not counted.
pub fn host_to_guest<F>(
    mem: &mut dyn GuestMemory,
    staging: &mut StagingBuffer,
    addr: u32,
    count: usize,
    mut source: F,
) -> Transfer
where
    F: FnMut(&mut [u8]) -> (usize, Option<Errno>),
{
    let mut transfer = Transfer::default();
    while transfer.done < count {
        let n = (count - transfer.done).min(staging.capacity());
        let (got, err) = source(&mut staging.buf[..n]);
        let got = got.min(n);
        if got > 0 {
            let stored =
                offset_addr(addr, transfer.done).and_then(|a| mem.write(a, &staging.buf[..got]));
            if let Err(e) = stored {
                transfer.error = Some(e);
                break;
            }
            transfer.done += got;
        }
        if got < n {
            transfer.error = err;
            break;
        }
    }
    transfer
}

//! File related constants for the guest ABI.

/// Lowest identifier handed out by the virtual fd table. 0, 1 and 2 are the
/// standard streams, which never live in the table: console syscalls talk to
/// the host streams directly.
pub const FIRST_VIRTUAL_FD: u64 = 3;

// ===== Guest open(2) access modes =====
// Source: newlib sys/_default_fcntl.h
pub const O_RDONLY: u32 = 0;
pub const O_WRONLY: u32 = 1;
pub const O_RDWR: u32 = 2;
pub const O_ACCMODE: u32 = 3;

/// Permission bits for files created by `open`, same as stdio `fopen`.
/// The process umask still applies.
pub const DEFAULT_CREATE_MODE: u32 = 0o666;

// ===== lseek whence =====
// Guest values are passed to the host unchanged, so they have to agree with
// the host encoding.
pub const SEEK_SET: u32 = 0;
pub const SEEK_CUR: u32 = 1;
pub const SEEK_END: u32 = 2;

/// Maximum path length accepted from the guest, terminator included.
pub const PATH_MAX: usize = 4096;

/// Capacity of the per-VM staging buffer. Every copy between guest memory
/// and host I/O is split into chunks of at most this many bytes.
pub const STAGING_SIZE: usize = 4096;

//! Error values and the translation to the guest return contract.
//!
//! Inside the workspace every fallible operation returns `Result<_, Errno>`.
//! The guest never sees the reason: at the boundary every failure collapses
//! into [`SYSCALL_FAILURE`]. The errno is only kept around long enough to be
//! logged and to decide how a partial transfer is reported.
use crate::data::fs_struct::Transfer;
use once_cell::sync::OnceCell;
use std::fmt;

/// Verbosity of the syscall layer, set once at VM bring-up. When greater
/// than zero, every syscall failure is echoed to host stderr.
pub static VERBOSE: OnceCell<isize> = OnceCell::new();

/// The single failure value written to the guest return register.
pub const SYSCALL_FAILURE: i32 = -1;

/// Success value for syscalls that return nothing but a status.
pub const SYSCALL_SUCCESS: i32 = 0;

/// Host error numbers (Linux values) used on the internal error channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Errno {
    EPERM = 1,
    ENOENT = 2,
    EINTR = 4,
    EIO = 5,
    EBADF = 9,
    EAGAIN = 11,
    ENOMEM = 12,
    EACCES = 13,
    EFAULT = 14,
    EEXIST = 17,
    ENOTDIR = 20,
    EISDIR = 21,
    EINVAL = 22,
    ENFILE = 23,
    EMFILE = 24,
    EFBIG = 27,
    ENOSPC = 28,
    ESPIPE = 29,
    EROFS = 30,
    EPIPE = 32,
    ENAMETOOLONG = 36,
    ENOSYS = 38,
    ELOOP = 40,
    EOVERFLOW = 75,
}

impl Errno {
    /// Map a raw host errno onto the enum. Values we do not track are
    /// reported as `EIO`, the guest cannot tell the difference anyway.
    pub fn from_raw(errno: i32) -> Errno {
        match errno {
            1 => Errno::EPERM,
            2 => Errno::ENOENT,
            4 => Errno::EINTR,
            5 => Errno::EIO,
            9 => Errno::EBADF,
            11 => Errno::EAGAIN,
            12 => Errno::ENOMEM,
            13 => Errno::EACCES,
            14 => Errno::EFAULT,
            17 => Errno::EEXIST,
            20 => Errno::ENOTDIR,
            21 => Errno::EISDIR,
            22 => Errno::EINVAL,
            23 => Errno::ENFILE,
            24 => Errno::EMFILE,
            27 => Errno::EFBIG,
            28 => Errno::ENOSPC,
            29 => Errno::ESPIPE,
            30 => Errno::EROFS,
            32 => Errno::EPIPE,
            36 => Errno::ENAMETOOLONG,
            38 => Errno::ENOSYS,
            40 => Errno::ELOOP,
            75 => Errno::EOVERFLOW,
            _ => Errno::EIO,
        }
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, *self as i32)
    }
}

impl std::error::Error for Errno {}

/// Read the errno left behind by the last failing libc call.
pub fn get_errno() -> i32 {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/// Report a failure of `syscall` and produce the guest sentinel.
pub fn syscall_error(e: Errno, syscall: &str, message: &str) -> i32 {
    log::debug!("{}: {} ({})", syscall, message, e);
    if VERBOSE.get().copied().unwrap_or(0) > 0 {
        eprintln!("syscall error in {}: {} ({})", syscall, message, e);
    }
    SYSCALL_FAILURE
}

/// Same as [`syscall_error`] for a raw host errno.
pub fn handle_errno(errno: i32, syscall: &str) -> i32 {
    syscall_error(Errno::from_raw(errno), syscall, "host call failed")
}

/// Decide what the guest sees after a chunked transfer.
///
/// Fewer bytes than requested is not an error by itself: end of file or a
/// short write without a host error still reports the partial count. Only a
/// short transfer that also carries an error becomes the failure sentinel.
pub fn transfer_result(requested: usize, transfer: &Transfer, syscall: &str) -> i32 {
    match transfer.error {
        Some(e) if !transfer.is_complete(requested) => {
            syscall_error(e, syscall, "short transfer with host error")
        }
        _ => transfer.done as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_errno_becomes_eio() {
        assert_eq!(Errno::from_raw(9), Errno::EBADF);
        assert_eq!(Errno::from_raw(14), Errno::EFAULT);
        assert_eq!(Errno::from_raw(4242), Errno::EIO);
    }

    #[test]
    fn full_transfer_reports_count() {
        let t = Transfer { done: 10, error: None };
        assert_eq!(transfer_result(10, &t, "read"), 10);
    }

    #[test]
    fn short_transfer_without_error_is_success() {
        // end of file case
        let t = Transfer { done: 3, error: None };
        assert_eq!(transfer_result(10, &t, "read"), 3);
    }

    #[test]
    fn short_transfer_with_error_fails() {
        let t = Transfer { done: 3, error: Some(Errno::EIO) };
        assert_eq!(transfer_result(10, &t, "read"), SYSCALL_FAILURE);
    }

    #[test]
    fn complete_transfer_ignores_late_error() {
        let t = Transfer { done: 10, error: Some(Errno::EIO) };
        assert_eq!(transfer_result(10, &t, "write"), 10);
    }
}

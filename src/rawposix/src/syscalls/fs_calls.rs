//! File System Syscall Implementation
//!
//! File syscalls go through the VM's virtual fd table: the guest only ever
//! sees virtual fds, the host kernel fds behind them stay in the table.
//! Data moves through the VM's staging buffer one chunk at a time.
use cage::memory::bridge::{guest_to_host, host_to_guest};
use cage::{ClosePolicy, SyscallRet, Vm};
use fdtables::FDTableEntry;
use libc::c_void;
use sysdefs::constants::err_const::{
    get_errno, handle_errno, syscall_error, transfer_result, Errno, SYSCALL_FAILURE,
    SYSCALL_SUCCESS,
};
use sysdefs::constants::fs_const::{DEFAULT_CREATE_MODE, O_ACCMODE, O_RDONLY, O_RDWR, O_WRONLY};
use sysdefs::constants::reg_const::{REG_A0, REG_A1, REG_A2};
use typemap::{
    convert_fd_to_host, sc_convert_path_to_host, sc_convert_readfloat_fd, sc_convert_sysarg_to_i32,
    sc_convert_sysarg_to_i64, sc_convert_sysarg_to_u32, sc_convert_sysarg_to_usize, NumberScanner,
};

/// Close handler registered with every VM's fd table.
///
/// Releases the host kernel fd behind a virtual fd.
pub fn kernel_close(fdentry: FDTableEntry) -> Result<(), Errno> {
    let ret = unsafe { libc::close(fdentry.underfd as i32) };
    if ret < 0 {
        return Err(Errno::from_raw(get_errno()));
    }
    Ok(())
}

/// Reads from a kernel fd until `buf` is full, end of file, or an error,
/// the way `fread` fills its buffer.
///
/// Returns the bytes read and the error that stopped the loop, if any.
pub fn kernel_read_full(kernel_fd: i32, buf: &mut [u8]) -> (usize, Option<Errno>) {
    let mut done = 0;
    while done < buf.len() {
        let rest = &mut buf[done..];
        let ret = unsafe { libc::read(kernel_fd, rest.as_mut_ptr() as *mut c_void, rest.len()) };
        if ret < 0 {
            return (done, Some(Errno::from_raw(get_errno())));
        }
        if ret == 0 {
            break;
        }
        done += ret as usize;
    }
    (done, None)
}

/// Writes `buf` to a kernel fd until everything is written or the kernel
/// refuses more.
pub fn kernel_write_full(kernel_fd: i32, buf: &[u8]) -> (usize, Option<Errno>) {
    let mut done = 0;
    while done < buf.len() {
        let rest = &buf[done..];
        let ret = unsafe { libc::write(kernel_fd, rest.as_ptr() as *const c_void, rest.len()) };
        if ret < 0 {
            return (done, Some(Errno::from_raw(get_errno())));
        }
        if ret == 0 {
            break;
        }
        done += ret as usize;
    }
    (done, None)
}

/// Feeds bytes from a kernel fd into `scanner` until it refuses one.
///
/// The refused byte is given back to the file with a one byte backwards
/// seek so the next read starts right after the number. On a pipe or
/// terminal the seek fails and the byte is lost, same as a stdio stream
/// that was closed right after the scan.
fn scan_kernel_fd(kernel_fd: i32, scanner: &mut NumberScanner) -> Result<(), Errno> {
    let mut byte = [0u8; 1];
    loop {
        let (n, err) = kernel_read_full(kernel_fd, &mut byte);
        if let Some(e) = err {
            return Err(e);
        }
        if n == 0 {
            return Ok(());
        }
        if !scanner.feed(byte[0]) {
            unsafe { libc::lseek(kernel_fd, -1, libc::SEEK_CUR) };
            return Ok(());
        }
    }
}

/// Host `open` flags for a guest access mode.
///
/// Read-only, write-only and read-write behave like stdio's "rb", "wb" and
/// "a+" respectively.
pub(crate) fn host_open_flags(guest_flags: u32) -> Option<i32> {
    match guest_flags & O_ACCMODE {
        O_RDONLY => Some(libc::O_RDONLY),
        O_WRONLY => Some(libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC),
        O_RDWR => Some(libc::O_RDWR | libc::O_CREAT | libc::O_APPEND),
        _ => None,
    }
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/open.2.html
///
/// Opens a host file and hands the guest the smallest free virtual fd for
/// it. Only the access mode bits of `flags` are looked at; the guest `mode`
/// is ignored and new files get 0666 minus the umask. The path is used as
/// given, relative paths resolve against the emulator's working directory.
///
/// Input:
///     - a0: guest address of the NUL-terminated path
///     - a1: flags
///     - a2: mode (ignored)
///
/// Return:
///     - virtual fd (>= 3) on success, -1 on failure. Nothing is added to the
///       table on failure.
pub fn open_syscall(vm: &mut Vm) -> SyscallRet {
    let path_addr = sc_convert_sysarg_to_u32(vm, REG_A0);
    let flags = sc_convert_sysarg_to_u32(vm, REG_A1);

    let oflag = match host_open_flags(flags) {
        Some(oflag) => oflag,
        None => {
            return SyscallRet::Int(syscall_error(Errno::EINVAL, "open", "Invalid access mode"))
        }
    };
    let path = match sc_convert_path_to_host(vm, path_addr) {
        Ok(path) => path,
        Err(e) => return SyscallRet::Int(syscall_error(e, "open", "Invalid path")),
    };

    let kernel_fd = unsafe { libc::open(path.as_ptr(), oflag, DEFAULT_CREATE_MODE as libc::c_uint) };
    if kernel_fd < 0 {
        return SyscallRet::Int(handle_errno(get_errno(), "open"));
    }

    let virtual_fd = vm.attr.fdtable.get_unused_virtual_fd(FDTableEntry {
        underfd: kernel_fd as u64,
    });
    log::debug!("open: {:?} -> vfd {} (kernel fd {})", path, virtual_fd, kernel_fd);
    SyscallRet::Int(virtual_fd as i32)
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/close.2.html
///
/// Closes a virtual fd and the host file behind it. What happens for an fd
/// that is not open depends on `ClosePolicy`: the lenient default reports
/// success, the strict policy reports failure. If the host close fails the
/// fd stays open.
///
/// Input:
///     - a0: virtual fd
///
/// Return:
///     - 0 on success, -1 on failure
pub fn close_syscall(vm: &mut Vm) -> SyscallRet {
    let virtual_fd = sc_convert_sysarg_to_u32(vm, REG_A0) as u64;

    if !vm.attr.fdtable.contains(virtual_fd) {
        return match vm.attr.config.close_policy {
            ClosePolicy::Lenient => {
                log::debug!("close: vfd {} not open, ignored", virtual_fd);
                SyscallRet::Int(SYSCALL_SUCCESS)
            }
            ClosePolicy::Strict => {
                SyscallRet::Int(syscall_error(Errno::EBADF, "close", "Bad File Descriptor"))
            }
        };
    }

    match vm.attr.fdtable.close_virtual_fd(virtual_fd) {
        Ok(()) => SyscallRet::Int(SYSCALL_SUCCESS),
        Err(e) => SyscallRet::Int(syscall_error(e, "close", "Host close failed")),
    }
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/lseek.2.html
///
/// Input:
///     - a0: virtual fd
///     - a1: offset, a signed 32-bit value
///     - a2: whence, passed to the host unchanged
///
/// Return:
///     - 0 on success (not the new offset), -1 on failure
pub fn lseek_syscall(vm: &mut Vm) -> SyscallRet {
    let virtual_fd = sc_convert_sysarg_to_u32(vm, REG_A0) as u64;
    let offset = sc_convert_sysarg_to_i64(vm, REG_A1);
    let whence = sc_convert_sysarg_to_i32(vm, REG_A2);

    let kernel_fd = match convert_fd_to_host(vm, virtual_fd) {
        Ok(fd) => fd,
        Err(e) => return SyscallRet::Int(syscall_error(e, "lseek", "Bad File Descriptor")),
    };

    let ret = unsafe { libc::lseek(kernel_fd, offset as libc::off_t, whence) };
    if ret < 0 {
        return SyscallRet::Int(handle_errno(get_errno(), "lseek"));
    }
    SyscallRet::Int(SYSCALL_SUCCESS)
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/read.2.html
///
/// Reads up to `count` bytes from a virtual fd into guest memory, one
/// staging buffer at a time. Reaching end of file early is not an error:
/// the guest gets the bytes actually read. A short read caused by a host
/// error (or a bad guest buffer) is reported as failure.
///
/// Input:
///     - a0: virtual fd
///     - a1: guest buffer address
///     - a2: count
///
/// Return:
///     - bytes read, or -1
pub fn read_syscall(vm: &mut Vm) -> SyscallRet {
    let virtual_fd = sc_convert_sysarg_to_u32(vm, REG_A0) as u64;
    let buf = sc_convert_sysarg_to_u32(vm, REG_A1);
    let count = sc_convert_sysarg_to_usize(vm, REG_A2);

    let kernel_fd = match convert_fd_to_host(vm, virtual_fd) {
        Ok(fd) => fd,
        Err(e) => return SyscallRet::Int(syscall_error(e, "read", "Bad File Descriptor")),
    };

    // Early return
    if count == 0 {
        return SyscallRet::Int(0);
    }

    let transfer = host_to_guest(&mut *vm.mem, &mut vm.attr.staging, buf, count, |chunk| {
        kernel_read_full(kernel_fd, chunk)
    });
    SyscallRet::Int(transfer_result(count, &transfer, "read"))
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/write.2.html
///
/// Writes `count` guest bytes to a virtual fd, one staging buffer at a
/// time. Same partial count rule as `read`.
///
/// Input:
///     - a0: virtual fd
///     - a1: guest buffer address
///     - a2: count
///
/// Return:
///     - bytes written, or -1
pub fn write_syscall(vm: &mut Vm) -> SyscallRet {
    let virtual_fd = sc_convert_sysarg_to_u32(vm, REG_A0) as u64;
    let buf = sc_convert_sysarg_to_u32(vm, REG_A1);
    let count = sc_convert_sysarg_to_usize(vm, REG_A2);

    let kernel_fd = match convert_fd_to_host(vm, virtual_fd) {
        Ok(fd) => fd,
        Err(e) => return SyscallRet::Int(syscall_error(e, "write", "Bad File Descriptor")),
    };

    // Early return
    if count == 0 {
        return SyscallRet::Int(0);
    }

    let transfer = guest_to_host(&*vm.mem, &mut vm.attr.staging, buf, count, |chunk| {
        kernel_write_full(kernel_fd, chunk)
    });
    SyscallRet::Int(transfer_result(count, &transfer, "write"))
}

/// Not implemented: guest `fstat` calls succeed without touching anything.
pub fn fstat_syscall(_vm: &mut Vm) -> SyscallRet {
    log::debug!("fstat: not implemented, ignored");
    SyscallRet::Unset
}

/// Scans one signed decimal integer from a virtual fd.
///
/// Leading whitespace is skipped; the scan stops right after the last
/// digit.
///
/// Input:
///     - a0: virtual fd
///
/// Return:
///     - the value, or -1 if the fd is not open or no integer was found
pub fn readint_syscall(vm: &mut Vm) -> SyscallRet {
    let virtual_fd = sc_convert_sysarg_to_u32(vm, REG_A0) as u64;

    let kernel_fd = match convert_fd_to_host(vm, virtual_fd) {
        Ok(fd) => fd,
        Err(e) => return SyscallRet::Int(syscall_error(e, "readint", "Bad File Descriptor")),
    };

    let mut scanner = NumberScanner::int();
    if let Err(e) = scan_kernel_fd(kernel_fd, &mut scanner) {
        log::debug!("readint: host read stopped the scan ({})", e);
    }
    match scanner.finish_int() {
        Some(value) => SyscallRet::Int(value),
        None => SyscallRet::Int(syscall_error(Errno::EINVAL, "readint", "No integer to read")),
    }
}

/// Scans one decimal float from a virtual fd.
///
/// Which register names the fd is chosen by `FloatFdKey`.
///
/// Return:
///     - the value in fa0, or -1.0 in fa0 if the fd is not open or no number
///       was found
pub fn readfloat_syscall(vm: &mut Vm) -> SyscallRet {
    let virtual_fd = sc_convert_readfloat_fd(vm);
    let failure = SyscallRet::Float(SYSCALL_FAILURE as f32);

    let kernel_fd = match convert_fd_to_host(vm, virtual_fd) {
        Ok(fd) => fd,
        Err(e) => {
            syscall_error(e, "readfloat", "Bad File Descriptor");
            return failure;
        }
    };

    let mut scanner = NumberScanner::float();
    if let Err(e) = scan_kernel_fd(kernel_fd, &mut scanner) {
        log::debug!("readfloat: host read stopped the scan ({})", e);
    }
    match scanner.finish_float() {
        Some(value) => SyscallRet::Float(value),
        None => {
            syscall_error(Errno::EINVAL, "readfloat", "No number to read");
            failure
        }
    }
}

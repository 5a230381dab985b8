use crate::syscalls::fs_calls::{
    close_syscall, fstat_syscall, lseek_syscall, open_syscall, read_syscall, readfloat_syscall,
    readint_syscall, write_syscall,
};
use crate::syscalls::io_calls::{
    readchar_syscall, readstring_syscall, writechar_syscall, writefloat_syscall,
    writeinthex_syscall, writeint_syscall, writestring_syscall,
};
use crate::syscalls::sys_calls::{
    brk_syscall, clock_gettime_syscall, exit2_syscall, exit_syscall, gettimeofday_syscall,
};
use cage::SyscallFn;
use sysdefs::constants::syscall_const::*;

/// Guest syscall numbers served by this crate. Loaded into every VM's
/// handler table when the VM starts.
pub const SYSCALL_TABLE: &[(u32, SyscallFn)] = &[
    (SYS_WRITEINT, writeint_syscall),
    (SYS_WRITEFLOAT, writefloat_syscall),
    (SYS_WRITESTRING, writestring_syscall),
    (SYS_READINT, readint_syscall),
    (SYS_READFLOAT, readfloat_syscall),
    (SYS_READSTRING, readstring_syscall),
    (SYS_EXIT, exit_syscall),
    (SYS_WRITECHAR, writechar_syscall),
    (SYS_READCHAR, readchar_syscall),
    (SYS_WRITEINTHEX, writeinthex_syscall),
    (SYS_CLOSE, close_syscall),
    (SYS_LSEEK, lseek_syscall),
    (SYS_READ, read_syscall),
    (SYS_WRITE, write_syscall),
    (SYS_FSTAT, fstat_syscall),
    (SYS_EXIT2, exit2_syscall),
    (SYS_GETTIMEOFDAY, gettimeofday_syscall),
    (SYS_BRK, brk_syscall),
    (SYS_CLOCK_GETTIME, clock_gettime_syscall),
    (SYS_OPEN, open_syscall),
];

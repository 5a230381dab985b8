//! System syscalls implementation
//!
//! Process exit, heap break bookkeeping and host clocks.
use cage::memory::bridge::push;
use cage::memory::mem_helper::{check_and_convert_addr, offset_addr};
use cage::{SyscallRet, Vm};
use sysdefs::constants::err_const::{
    get_errno, handle_errno, syscall_error, Errno, SYSCALL_SUCCESS,
};
use sysdefs::constants::reg_const::{REG_A0, REG_A1};
use sysdefs::constants::sys_const::{
    CLOCK_MONOTONIC, CLOCK_REALTIME, EXIT_SUCCESS, TIME_FRAC_OFFSET, TIME_SECS_OFFSET,
};
use sysdefs::data::sys_struct::HostTimeWords;
use typemap::{sc_convert_addr, sc_convert_sysarg_to_i32, sc_convert_sysarg_to_u32};

/// Stores a host time value at guest address `addr`: seconds at +0, the
/// sub-second word at +8. Nothing is written unless both words fit.
fn store_time_words(vm: &mut Vm, addr: u32, words: &HostTimeWords) -> Result<(), Errno> {
    let span = TIME_FRAC_OFFSET + words.frac.len();
    check_and_convert_addr(addr, span, vm.mem.size())?;
    push(
        &mut *vm.mem,
        &mut vm.attr.staging,
        offset_addr(addr, TIME_SECS_OFFSET)?,
        &words.secs,
    )?;
    push(
        &mut *vm.mem,
        &mut vm.attr.staging,
        offset_addr(addr, TIME_FRAC_OFFSET)?,
        &words.frac,
    )
}

/// Halts the CPU with exit code 0. Nothing is written back.
pub fn exit_syscall(vm: &mut Vm) -> SyscallRet {
    vm.halt_with(EXIT_SUCCESS);
    SyscallRet::Unset
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/exit.2.html
///
/// Halts the CPU with the exit code in a0. Nothing is written back.
pub fn exit2_syscall(vm: &mut Vm) -> SyscallRet {
    let code = sc_convert_sysarg_to_i32(vm, REG_A0);
    vm.halt_with(code);
    SyscallRet::Unset
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/brk.2.html
///
/// A nonzero a0 becomes the new break, with no validation at all: the
/// guest owns its address space. a0 == 0 only queries.
///
/// Return:
///     - the break address after the call
pub fn brk_syscall(vm: &mut Vm) -> SyscallRet {
    let new_break = sc_convert_sysarg_to_u32(vm, REG_A0);
    if new_break != 0 {
        vm.attr.break_addr = new_break;
    }
    SyscallRet::Int(vm.attr.break_addr as i32)
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/gettimeofday.2.html
///
/// When a0 is nonzero the host wall clock is stored there: seconds at +0,
/// microseconds at +8, both as host-native words. The timezone argument is
/// ignored.
///
/// Return:
///     - 0, or -1 when the guest buffer is out of range
pub fn gettimeofday_syscall(vm: &mut Vm) -> SyscallRet {
    let tv_addr = match sc_convert_addr(vm, REG_A0) {
        Some(addr) => addr,
        None => return SyscallRet::Int(SYSCALL_SUCCESS),
    };

    let mut tv: libc::timeval = unsafe { std::mem::zeroed() };
    let ret = unsafe { libc::gettimeofday(&mut tv, std::ptr::null_mut()) };
    if ret < 0 {
        return SyscallRet::Int(handle_errno(get_errno(), "gettimeofday"));
    }

    match store_time_words(vm, tv_addr, &HostTimeWords::from(tv)) {
        Ok(()) => SyscallRet::Int(SYSCALL_SUCCESS),
        Err(e) => SyscallRet::Int(syscall_error(e, "gettimeofday", "Bad guest buffer")),
    }
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/clock_gettime.2.html
///
/// Only `CLOCK_REALTIME` and `CLOCK_MONOTONIC` are served; any other clock
/// fails without touching guest memory. The requested clock is read from
/// the host and, when a1 is nonzero, stored there: seconds at +0,
/// nanoseconds at +8.
///
/// Return:
///     - 0 on success, -1 on failure
pub fn clock_gettime_syscall(vm: &mut Vm) -> SyscallRet {
    let clockid = sc_convert_sysarg_to_u32(vm, REG_A0);
    let tp_addr = sc_convert_addr(vm, REG_A1);

    if clockid != CLOCK_REALTIME && clockid != CLOCK_MONOTONIC {
        return SyscallRet::Int(syscall_error(Errno::EINVAL, "clock_gettime", "Unsupported clock"));
    }

    let mut ts: libc::timespec = unsafe { std::mem::zeroed() };
    let ret = unsafe { libc::clock_gettime(clockid as libc::clockid_t, &mut ts) };
    if ret < 0 {
        return SyscallRet::Int(handle_errno(get_errno(), "clock_gettime"));
    }

    if let Some(addr) = tp_addr {
        if let Err(e) = store_time_words(vm, addr, &HostTimeWords::from(ts)) {
            return SyscallRet::Int(syscall_error(e, "clock_gettime", "Bad guest buffer"));
        }
    }
    SyscallRet::Int(SYSCALL_SUCCESS)
}

//! Console Syscall Implementation
//!
//! The console helpers talk to the VM's console directly, never through the
//! fd table. Every write is flushed before the syscall returns.
use cage::memory::bridge::{push, stream_cstr};
use cage::memory::mem_helper::offset_addr;
use cage::{SyscallRet, Vm};
use sysdefs::constants::err_const::{syscall_error, Errno, SYSCALL_FAILURE};
use sysdefs::constants::reg_const::{FREG_FA0, REG_A0, REG_A1};
use typemap::{
    format_float, format_hex, format_int, sc_convert_freg_to_f32, sc_convert_sysarg_to_i32,
    sc_convert_sysarg_to_u32, sc_convert_sysarg_to_usize,
};

fn console_print(vm: &mut Vm, text: &str, syscall: &str) -> SyscallRet {
    match vm.attr.console.write(text.as_bytes()) {
        Ok(n) => SyscallRet::Int(n as i32),
        Err(e) => SyscallRet::Int(syscall_error(e, syscall, "Console write failed")),
    }
}

/// Prints a0 as a signed decimal.
///
/// Return:
///     - number of bytes printed, or -1
pub fn writeint_syscall(vm: &mut Vm) -> SyscallRet {
    let value = sc_convert_sysarg_to_i32(vm, REG_A0);
    console_print(vm, &format_int(value), "writeint")
}

/// Prints a0 as `0x` followed by eight lowercase hex digits.
pub fn writeinthex_syscall(vm: &mut Vm) -> SyscallRet {
    let value = sc_convert_sysarg_to_u32(vm, REG_A0);
    console_print(vm, &format_hex(value), "writeinthex")
}

/// Prints fa0 with one digit after the decimal point.
///
/// Return:
///     - number of bytes printed in a0; on failure fa0 is set to -1.0 and a0
///       is left alone
pub fn writefloat_syscall(vm: &mut Vm) -> SyscallRet {
    let value = sc_convert_freg_to_f32(vm, FREG_FA0);
    match vm.attr.console.write(format_float(value).as_bytes()) {
        Ok(n) => SyscallRet::Int(n as i32),
        Err(e) => {
            syscall_error(e, "writefloat", "Console write failed");
            SyscallRet::Float(SYSCALL_FAILURE as f32)
        }
    }
}

fn print_guest_string(vm: &mut Vm, syscall: &str) -> SyscallRet {
    let addr = sc_convert_sysarg_to_u32(vm, REG_A0);
    let console = &mut vm.attr.console;
    let mut write_error: Option<Errno> = None;
    let transfer = stream_cstr(&*vm.mem, &mut vm.attr.staging, addr, |chunk| {
        if write_error.is_none() {
            if let Err(e) = console.write(chunk) {
                write_error = Some(e);
            }
        }
    });
    if let Some(e) = transfer.error.or(write_error) {
        syscall_error(e, syscall, "String not fully printed");
    }
    SyscallRet::Unset
}

/// Prints the NUL-terminated guest string at a0.
///
/// There is no length limit. Printing stops at the terminator or at the
/// first address outside guest memory. No result register is written.
pub fn writestring_syscall(vm: &mut Vm) -> SyscallRet {
    print_guest_string(vm, "writestring")
}

/// Same as `writestring`.
pub fn writechar_syscall(vm: &mut Vm) -> SyscallRet {
    print_guest_string(vm, "writechar")
}

/// Reads one line from the console into the guest buffer at a0.
///
/// The newline is consumed but not stored. At most `a1 - 1` bytes are kept
/// and a NUL is always written after them. With a1 == 0 nothing is read or
/// written.
///
/// Return:
///     - number of bytes stored, terminator excluded, or -1
pub fn readstring_syscall(vm: &mut Vm) -> SyscallRet {
    let addr = sc_convert_sysarg_to_u32(vm, REG_A0);
    let max = sc_convert_sysarg_to_usize(vm, REG_A1);

    if max == 0 {
        return SyscallRet::Int(0);
    }

    // pieces go straight to the guest, the host never holds the whole line
    let mem = &mut *vm.mem;
    let staging = &mut vm.attr.staging;
    let mut stored = 0usize;
    let mut fault: Option<Errno> = None;
    let read = vm.attr.console.read_line_bounded(max - 1, |piece| {
        if fault.is_some() {
            return;
        }
        match offset_addr(addr, stored).and_then(|at| push(&mut *mem, &mut *staging, at, piece)) {
            Ok(()) => stored += piece.len(),
            Err(e) => fault = Some(e),
        }
    });
    if let Err(e) = read {
        return SyscallRet::Int(syscall_error(e, "readstring", "Console read failed"));
    }
    if let Some(e) = fault {
        return SyscallRet::Int(syscall_error(e, "readstring", "Bad guest buffer"));
    }

    match offset_addr(addr, stored).and_then(|at| push(mem, staging, at, &[0])) {
        Ok(()) => SyscallRet::Int(stored as i32),
        Err(e) => SyscallRet::Int(syscall_error(e, "readstring", "Bad guest buffer")),
    }
}

/// Reads a single byte from the console and stores it, NUL terminated, at
/// a0.
///
/// Return:
///     - 0 without reading anything if a1 < 2
///     - 1 when a byte was stored
///     - -1 at end of input or on a bad guest buffer
pub fn readchar_syscall(vm: &mut Vm) -> SyscallRet {
    let addr = sc_convert_sysarg_to_u32(vm, REG_A0);
    let max = sc_convert_sysarg_to_u32(vm, REG_A1);

    if max < 2 {
        return SyscallRet::Int(0);
    }

    let ch = match vm.attr.console.read_byte() {
        Ok(Some(ch)) => ch,
        Ok(None) => return SyscallRet::Int(syscall_error(Errno::EIO, "readchar", "End of input")),
        Err(e) => return SyscallRet::Int(syscall_error(e, "readchar", "Console read failed")),
    };

    match push(&mut *vm.mem, &mut vm.attr.staging, addr, &[ch, 0]) {
        Ok(()) => SyscallRet::Int(1),
        Err(e) => SyscallRet::Int(syscall_error(e, "readchar", "Bad guest buffer")),
    }
}

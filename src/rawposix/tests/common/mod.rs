// ---------- Test helper functions ----------
#![allow(dead_code)]
use cage::{memory_console, Console, FlatMemory, Registers, SharedOutput, Vm, VmConfig};
use lazy_static::lazy_static;
use parking_lot::Mutex;
use rawposix::{syscall_handler, vm_start_with_console};
use std::ffi::CString;
use std::path::Path;
use sysdefs::constants::reg_const::{REG_A0, REG_A7};

/// Guest memory size used by every test VM.
pub const MEM_SIZE: usize = 64 * 1024;

/// Scratch guest addresses.
pub const PATH_ADDR: u32 = 0x100;
pub const BUF_ADDR: u32 = 0x2000;

lazy_static! {
    // the working directory is process-wide
    pub static ref CWD_MUTEX: Mutex<()> = Mutex::new(());
}

/// A fresh VM with in-memory console input `stdin` and captured output.
pub fn test_vm(stdin: &[u8]) -> (Vm, SharedOutput) {
    test_vm_with(VmConfig::default(), stdin)
}

pub fn test_vm_with(config: VmConfig, stdin: &[u8]) -> (Vm, SharedOutput) {
    let (console, out) = memory_console(stdin);
    (test_vm_with_console(config, console), out)
}

pub fn test_vm_with_console(config: VmConfig, console: Console) -> Vm {
    vm_start_with_console(
        Box::new(Registers::new()),
        Box::new(FlatMemory::new(MEM_SIZE)),
        config,
        console,
    )
}

/// Loads a7 and a0.. with `callnum` and `args`, dispatches, and returns a0.
pub fn ecall(vm: &mut Vm, callnum: u32, args: &[u32]) -> u32 {
    for (i, &arg) in args.iter().enumerate() {
        vm.cpu.set_reg(REG_A0 + i, arg);
    }
    vm.cpu.set_reg(REG_A7, callnum);
    syscall_handler(vm);
    vm.cpu.get_reg(REG_A0)
}

/// Same as [`ecall`] with a0 read back as a signed value.
pub fn ecall_i32(vm: &mut Vm, callnum: u32, args: &[u32]) -> i32 {
    ecall(vm, callnum, args) as i32
}

pub fn put_bytes(vm: &mut Vm, addr: u32, bytes: &[u8]) {
    vm.mem.write(addr, bytes).unwrap();
}

/// Writes `s` plus a NUL terminator at `addr`.
pub fn put_cstr(vm: &mut Vm, addr: u32, s: &str) {
    let c = CString::new(s).unwrap();
    put_bytes(vm, addr, c.as_bytes_with_nul());
}

pub fn get_bytes(vm: &Vm, addr: u32, len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    vm.mem.read(addr, &mut buf).unwrap();
    buf
}

/// Puts `path` in guest memory and opens it with `flags`.
pub fn guest_open(vm: &mut Vm, path: &Path, flags: u32) -> i32 {
    put_cstr(vm, PATH_ADDR, path.to_str().unwrap());
    ecall_i32(vm, sysdefs::constants::syscall_const::SYS_OPEN, &[PATH_ADDR, flags, 0o644])
}

pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 % 253) as u8).collect()
}

// Unit tests for the pieces of the syscall layer that the integration tests
// under tests/ cannot reach: host fd helpers and teardown behavior.

use crate::syscall_table::SYSCALL_TABLE;
use crate::syscall_handler;
use crate::syscalls::fs_calls::{host_open_flags, kernel_close, kernel_read_full, kernel_write_full};
use cage::{memory_console, FlatMemory, Registers, Vm, VmAttributes, VmConfig};
use fdtables::FDTableEntry;
use lazy_static::lazy_static;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use sysdefs::constants::err_const::Errno;
use sysdefs::constants::reg_const::{REG_A0, REG_A7};
use sysdefs::constants::syscall_const::{syscall_name, SYS_CLOSE};
use threei::HandlerTable;

lazy_static! {
    // Tests below share the CLOSED counter
    static ref TEST_MUTEX: Mutex<()> = Mutex::new(());
}

static CLOSED: AtomicUsize = AtomicUsize::new(0);

fn count_close(_entry: FDTableEntry) -> Result<(), Errno> {
    CLOSED.fetch_add(1, Ordering::SeqCst);
    Ok(())
}

fn fail_close(_entry: FDTableEntry) -> Result<(), Errno> {
    Err(Errno::EIO)
}

fn vm_with_close_handler(handler: fdtables::CloseHandler) -> Vm {
    let (console, _out) = memory_console(b"");
    Vm::new(
        Box::new(Registers::new()),
        Box::new(FlatMemory::new(4096)),
        VmAttributes::new(VmConfig::default(), console, handler),
        HandlerTable::from_table(SYSCALL_TABLE),
    )
}

fn make_pipe() -> (i32, i32) {
    let mut fds = [0i32; 2];
    assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
    (fds[0], fds[1])
}

#[test]
fn syscall_table_has_unique_named_entries() {
    let mut seen = std::collections::HashSet::new();
    for &(callnum, _) in SYSCALL_TABLE {
        assert!(seen.insert(callnum), "syscall {} listed twice", callnum);
        assert!(syscall_name(callnum).is_some(), "syscall {} has no name", callnum);
    }
    assert_eq!(seen.len(), 20);
}

#[test]
fn access_modes_map_to_stdio_modes() {
    assert_eq!(host_open_flags(0), Some(libc::O_RDONLY));
    assert_eq!(
        host_open_flags(1),
        Some(libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC)
    );
    assert_eq!(
        host_open_flags(2),
        Some(libc::O_RDWR | libc::O_CREAT | libc::O_APPEND)
    );
    assert_eq!(host_open_flags(3), None);
    // only the low two bits count
    assert_eq!(host_open_flags(0x200 | 1), host_open_flags(1));
}

#[test]
fn kernel_helpers_move_whole_buffers() {
    let (rd, wr) = make_pipe();
    assert_eq!(kernel_write_full(wr, b"pipe data"), (9, None));
    unsafe { libc::close(wr) };

    let mut buf = [0u8; 32];
    // stops at end of file without an error
    assert_eq!(kernel_read_full(rd, &mut buf), (9, None));
    assert_eq!(&buf[..9], b"pipe data");
    assert_eq!(kernel_read_full(rd, &mut buf), (0, None));
    unsafe { libc::close(rd) };
}

#[test]
fn kernel_helpers_report_host_errors() {
    let mut buf = [0u8; 4];
    assert_eq!(kernel_read_full(-1, &mut buf), (0, Some(Errno::EBADF)));
    assert_eq!(kernel_write_full(-1, b"x"), (0, Some(Errno::EBADF)));
    assert_eq!(kernel_close(FDTableEntry { underfd: u32::MAX as u64 }), Err(Errno::EBADF));
}

#[test]
fn dropping_the_vm_closes_every_fd() {
    let _guard = TEST_MUTEX.lock();
    CLOSED.store(0, Ordering::SeqCst);
    let mut vm = vm_with_close_handler(count_close);
    for underfd in 100..103 {
        vm.attr.fdtable.get_unused_virtual_fd(FDTableEntry { underfd });
    }
    drop(vm);
    assert_eq!(CLOSED.load(Ordering::SeqCst), 3);
}

#[test]
fn close_syscall_uses_the_close_handler() {
    let _guard = TEST_MUTEX.lock();
    CLOSED.store(0, Ordering::SeqCst);
    let mut vm = vm_with_close_handler(count_close);
    let fd = vm.attr.fdtable.get_unused_virtual_fd(FDTableEntry { underfd: 100 });

    vm.cpu.set_reg(REG_A0, fd as u32);
    vm.cpu.set_reg(REG_A7, SYS_CLOSE);
    syscall_handler(&mut vm);
    assert_eq!(vm.cpu.get_reg(REG_A0), 0);
    assert_eq!(CLOSED.load(Ordering::SeqCst), 1);
    assert!(vm.attr.fdtable.is_empty());
}

#[test]
fn failed_host_close_keeps_the_fd() {
    let mut vm = vm_with_close_handler(fail_close);
    let fd = vm.attr.fdtable.get_unused_virtual_fd(FDTableEntry { underfd: 100 });

    vm.cpu.set_reg(REG_A0, fd as u32);
    vm.cpu.set_reg(REG_A7, SYS_CLOSE);
    syscall_handler(&mut vm);
    assert_eq!(vm.cpu.get_reg(REG_A0) as i32, -1);
    assert!(vm.attr.fdtable.contains(fd));
}

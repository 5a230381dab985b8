mod common;

use cage::{Console, VmConfig};
use common::*;
use std::io::{self, Cursor, Write};
use sysdefs::constants::reg_const::FREG_FA0;
use sysdefs::constants::syscall_const::*;

/// Output that refuses every write.
struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from_raw_os_error(libc::EPIPE))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn broken_console_vm() -> cage::Vm {
    let console = Console::new(Box::new(Cursor::new(Vec::new())), Box::new(BrokenPipe));
    test_vm_with_console(VmConfig::default(), console)
}

#[test]
fn writestring_prints_up_to_terminator() {
    let (mut vm, out) = test_vm(b"");
    put_bytes(&mut vm, BUF_ADDR, b"hi\0there");
    assert_eq!(ecall(&mut vm, SYS_WRITESTRING, &[BUF_ADDR]), BUF_ADDR);
    assert_eq!(out.contents(), b"hi".to_vec());
}

#[test]
fn writestring_has_no_length_limit() {
    let (mut vm, out) = test_vm(b"");
    let text: Vec<u8> = (0..10_000).map(|i| b'a' + (i % 26) as u8).collect();
    put_bytes(&mut vm, BUF_ADDR, &text);
    put_bytes(&mut vm, BUF_ADDR + text.len() as u32, b"\0");
    ecall(&mut vm, SYS_WRITESTRING, &[BUF_ADDR]);
    assert_eq!(out.contents(), text);
}

#[test]
fn writestring_stops_at_end_of_memory() {
    let (mut vm, out) = test_vm(b"");
    let end = (MEM_SIZE - 3) as u32;
    put_bytes(&mut vm, end, b"xyz");
    ecall(&mut vm, SYS_WRITESTRING, &[end]);
    assert_eq!(out.as_string(), "xyz");
}

#[test]
fn writechar_prints_a_string_once() {
    let (mut vm, out) = test_vm(b"");
    put_cstr(&mut vm, BUF_ADDR, "ok");
    ecall(&mut vm, SYS_WRITECHAR, &[BUF_ADDR]);
    assert_eq!(out.as_string(), "ok");
}

#[test]
fn writeint_prints_signed_decimal() {
    let (mut vm, out) = test_vm(b"");
    assert_eq!(ecall_i32(&mut vm, SYS_WRITEINT, &[(-42i32) as u32]), 3);
    assert_eq!(ecall_i32(&mut vm, SYS_WRITEINT, &[7]), 1);
    assert_eq!(out.as_string(), "-427");
}

#[test]
fn writeinthex_pads_to_eight_digits() {
    let (mut vm, out) = test_vm(b"");
    assert_eq!(ecall_i32(&mut vm, SYS_WRITEINTHEX, &[255]), 10);
    assert_eq!(ecall_i32(&mut vm, SYS_WRITEINTHEX, &[0xDEADBEEF]), 10);
    assert_eq!(out.as_string(), "0x000000ff0xdeadbeef");
}

#[test]
fn writefloat_prints_one_decimal() {
    let (mut vm, out) = test_vm(b"");
    vm.cpu.set_freg(FREG_FA0, 3.14159f32.to_bits());
    assert_eq!(ecall_i32(&mut vm, SYS_WRITEFLOAT, &[]), 3);
    vm.cpu.set_freg(FREG_FA0, (-0.3f32).to_bits());
    ecall(&mut vm, SYS_WRITEFLOAT, &[]);
    assert_eq!(out.as_string(), "3.1-0.3");
}

#[test]
fn console_write_failures() {
    let mut vm = broken_console_vm();
    assert_eq!(ecall_i32(&mut vm, SYS_WRITEINT, &[1]), -1);
    assert_eq!(ecall_i32(&mut vm, SYS_WRITEINTHEX, &[1]), -1);

    vm.cpu.set_freg(FREG_FA0, 2.0f32.to_bits());
    assert_eq!(ecall(&mut vm, SYS_WRITEFLOAT, &[77]), 77);
    assert_eq!(f32::from_bits(vm.cpu.get_freg(FREG_FA0)), -1.0);

    // no result register, nothing to report
    put_cstr(&mut vm, BUF_ADDR, "lost");
    assert_eq!(ecall(&mut vm, SYS_WRITESTRING, &[BUF_ADDR]), BUF_ADDR);
}

#[test]
fn readstring_reads_one_line_per_call() {
    let (mut vm, _out) = test_vm(b"hello\nsecond line\n");
    assert_eq!(ecall_i32(&mut vm, SYS_READSTRING, &[BUF_ADDR, 100]), 5);
    assert_eq!(get_bytes(&vm, BUF_ADDR, 6), b"hello\0".to_vec());
    assert_eq!(ecall_i32(&mut vm, SYS_READSTRING, &[BUF_ADDR, 100]), 11);
    assert_eq!(get_bytes(&vm, BUF_ADDR, 12), b"second line\0".to_vec());
}

#[test]
fn readstring_truncates_to_buffer() {
    let (mut vm, _out) = test_vm(b"hello world\nnext\n");
    put_bytes(&mut vm, BUF_ADDR, &[0xEE; 16]);
    assert_eq!(ecall_i32(&mut vm, SYS_READSTRING, &[BUF_ADDR, 6]), 5);
    assert_eq!(get_bytes(&vm, BUF_ADDR, 7), b"hello\0\xEE".to_vec());
    // the rest of the long line was consumed
    assert_eq!(ecall_i32(&mut vm, SYS_READSTRING, &[BUF_ADDR, 16]), 4);
    assert_eq!(get_bytes(&vm, BUF_ADDR, 5), b"next\0".to_vec());
}

#[test]
fn readstring_line_longer_than_guest_memory() {
    let mut input = vec![b'x'; 2 * MEM_SIZE];
    input.extend_from_slice(b"\nnext\n");
    let (mut vm, _out) = test_vm(&input);
    put_bytes(&mut vm, BUF_ADDR, &[0xEE; 20]);

    assert_eq!(ecall_i32(&mut vm, SYS_READSTRING, &[BUF_ADDR, 16]), 15);
    let mut expected = vec![b'x'; 15];
    expected.push(0);
    expected.push(0xEE);
    assert_eq!(get_bytes(&vm, BUF_ADDR, 17), expected);

    assert_eq!(ecall_i32(&mut vm, SYS_READSTRING, &[BUF_ADDR, 16]), 4);
    assert_eq!(get_bytes(&vm, BUF_ADDR, 5), b"next\0".to_vec());
}

#[test]
fn readstring_edge_cases() {
    let (mut vm, _out) = test_vm(b"abc\n");
    put_bytes(&mut vm, BUF_ADDR, b"\xEE");
    // zero sized buffer: nothing read, nothing written
    assert_eq!(ecall_i32(&mut vm, SYS_READSTRING, &[BUF_ADDR, 0]), 0);
    assert_eq!(get_bytes(&vm, BUF_ADDR, 1), b"\xEE".to_vec());
    // room for the terminator only
    assert_eq!(ecall_i32(&mut vm, SYS_READSTRING, &[BUF_ADDR, 1]), 0);
    assert_eq!(get_bytes(&vm, BUF_ADDR, 1), b"\0".to_vec());
    // end of input stores an empty string
    put_bytes(&mut vm, BUF_ADDR, b"\xEE");
    assert_eq!(ecall_i32(&mut vm, SYS_READSTRING, &[BUF_ADDR, 8]), 0);
    assert_eq!(get_bytes(&vm, BUF_ADDR, 1), b"\0".to_vec());
}

#[test]
fn readstring_last_line_without_newline() {
    let (mut vm, _out) = test_vm(b"tail");
    assert_eq!(ecall_i32(&mut vm, SYS_READSTRING, &[BUF_ADDR, 32]), 4);
    assert_eq!(get_bytes(&vm, BUF_ADDR, 5), b"tail\0".to_vec());
}

#[test]
fn readchar_reads_single_bytes() {
    let (mut vm, _out) = test_vm(b"xy");
    assert_eq!(ecall_i32(&mut vm, SYS_READCHAR, &[BUF_ADDR, 1]), 0);
    assert_eq!(ecall_i32(&mut vm, SYS_READCHAR, &[BUF_ADDR, 2]), 1);
    assert_eq!(get_bytes(&vm, BUF_ADDR, 2), b"x\0".to_vec());
    assert_eq!(ecall_i32(&mut vm, SYS_READCHAR, &[BUF_ADDR, 10]), 1);
    assert_eq!(get_bytes(&vm, BUF_ADDR, 2), b"y\0".to_vec());
    assert_eq!(ecall_i32(&mut vm, SYS_READCHAR, &[BUF_ADDR, 10]), -1);
}

#[test]
fn readchar_into_bad_buffer_fails() {
    let (mut vm, _out) = test_vm(b"z");
    let last = (MEM_SIZE - 1) as u32;
    assert_eq!(ecall_i32(&mut vm, SYS_READCHAR, &[last, 2]), -1);
}

//! Guest-visible syscall numbers.
//!
//! These numbers are a stable contract with guest programs (newlib based).
//! They do not follow the Linux numbering for the console helpers.

pub const SYS_WRITEINT: u32 = 1;
pub const SYS_WRITEFLOAT: u32 = 2;
pub const SYS_WRITESTRING: u32 = 4;
pub const SYS_READINT: u32 = 5;
pub const SYS_READFLOAT: u32 = 6;
pub const SYS_READSTRING: u32 = 8;
pub const SYS_EXIT: u32 = 10;
pub const SYS_WRITECHAR: u32 = 11;
pub const SYS_READCHAR: u32 = 12;
pub const SYS_WRITEINTHEX: u32 = 34;
pub const SYS_CLOSE: u32 = 57;
pub const SYS_LSEEK: u32 = 62;
pub const SYS_READ: u32 = 63;
pub const SYS_WRITE: u32 = 64;
pub const SYS_FSTAT: u32 = 80;
pub const SYS_EXIT2: u32 = 93;
pub const SYS_GETTIMEOFDAY: u32 = 169;
pub const SYS_BRK: u32 = 214;
pub const SYS_CLOCK_GETTIME: u32 = 403;
pub const SYS_OPEN: u32 = 1024;

// ===== Multimedia extension =====
// Served by an external rendering subsystem when one is plugged in.
pub const SYS_DRAW_FRAME: u32 = 0xBEEF;
pub const SYS_SETUP_QUEUE: u32 = 0xC0DE;
pub const SYS_SUBMIT_QUEUE: u32 = 0xFEED;
pub const SYS_SETUP_AUDIO: u32 = 0xBABE;
pub const SYS_CONTROL_AUDIO: u32 = 0xD00D;

/// Numbers reserved for the multimedia extension.
pub const EXTENSION_SYSCALLS: &[u32] = &[
    SYS_DRAW_FRAME,
    SYS_SETUP_QUEUE,
    SYS_SUBMIT_QUEUE,
    SYS_SETUP_AUDIO,
    SYS_CONTROL_AUDIO,
];

/// Human readable name of a syscall number, used in diagnostics.
pub fn syscall_name(callnum: u32) -> Option<&'static str> {
    let name = match callnum {
        SYS_WRITEINT => "writeint",
        SYS_WRITEFLOAT => "writefloat",
        SYS_WRITESTRING => "writestring",
        SYS_READINT => "readint",
        SYS_READFLOAT => "readfloat",
        SYS_READSTRING => "readstring",
        SYS_EXIT => "exit",
        SYS_WRITECHAR => "writechar",
        SYS_READCHAR => "readchar",
        SYS_WRITEINTHEX => "writeinthex",
        SYS_CLOSE => "close",
        SYS_LSEEK => "lseek",
        SYS_READ => "read",
        SYS_WRITE => "write",
        SYS_FSTAT => "fstat",
        SYS_EXIT2 => "exit2",
        SYS_GETTIMEOFDAY => "gettimeofday",
        SYS_BRK => "brk",
        SYS_CLOCK_GETTIME => "clock_gettime",
        SYS_OPEN => "open",
        SYS_DRAW_FRAME => "draw_frame",
        SYS_SETUP_QUEUE => "setup_queue",
        SYS_SUBMIT_QUEUE => "submit_queue",
        SYS_SETUP_AUDIO => "setup_audio",
        SYS_CONTROL_AUDIO => "control_audio",
        _ => return None,
    };
    Some(name)
}

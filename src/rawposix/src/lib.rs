//! Syscall layer of an RV32 guest emulator.
//!
//! The instruction loop hands every `ecall` to
//! [`dispatcher::syscall_handler`]. Handlers read their arguments from the
//! guest registers, perform the host side effect, and their result is
//! written back to the guest.

pub mod dispatcher;
pub mod init;
pub mod syscall_table;
pub mod syscalls;

#[cfg(test)]
mod tests;

pub use dispatcher::{register_extension, syscall_handler};
pub use init::{vm_shutdown, vm_start, vm_start_with_console};
pub use syscall_table::SYSCALL_TABLE;

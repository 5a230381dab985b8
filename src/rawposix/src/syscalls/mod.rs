//! This module contains the actual syscall implementations
pub mod fs_calls;
pub mod io_calls;
pub mod sys_calls;

pub use fs_calls::*;
pub use io_calls::*;
pub use sys_calls::*;

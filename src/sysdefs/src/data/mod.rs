pub mod fs_struct;
pub mod sys_struct;

pub use fs_struct::*;
pub use sys_struct::*;

pub mod err_const;
pub mod fs_const;
pub mod reg_const;
pub mod sys_const;
pub mod syscall_const;

pub use err_const::*;
pub use fs_const::*;
pub use reg_const::*;
pub use sys_const::*;
pub use syscall_const::*;

// This file exists to make it easier to vary a single file of constants
// instead of editing each implementation...
use sysdefs::constants::err_const::Errno;

/// Lowest virtual fd handed out.  0, 1 and 2 belong to the standard streams,
/// which never live in the table.
pub use sysdefs::constants::fs_const::FIRST_VIRTUAL_FD;

/// This is a table entry, looked up by virtual fd.
#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq)]
pub struct FDTableEntry {
    /// underlying fd.  For the syscall layer this is the host kernel fd
    /// returned by open(2); the table never interprets it, it only hands it
    /// back to the close handler.
    pub underfd: u64,
}

/// Called when an entry is closed, either by an explicit close or when the
/// table is dropped.  An `Err` from an explicit close keeps the entry in the
/// table.
pub type CloseHandler = fn(FDTableEntry) -> Result<(), Errno>;

#[allow(non_snake_case)]
/// A close handler which does nothing...  Useful when the underfd values are
/// not real resources (benchmarks, tests).
pub fn NULL_FUNC(_: FDTableEntry) -> Result<(), Errno> {
    Ok(())
}

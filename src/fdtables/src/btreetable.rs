use crate::commonconstants::*;

use sysdefs::constants::err_const::Errno;

use std::collections::BTreeMap;

// This is a basic fdtable.  The purpose is to allow a VM to have a set of
// virtual fds which are translated into real (host) fds.
//
// Each VM owns exactly one table, so there is no cage id and no global
// lock.  The entries are kept in a BTreeMap so iteration (and teardown) is
// in fd order, which makes the log output stable.

// algorithm name.  Need not be listed in the docs.
#[doc(hidden)]
pub const ALGONAME: &str = "BTreeTable";

/// The virtual fd table of one VM.  Owns every entry it holds and runs the
/// close handler on all of them when dropped.
#[derive(Debug)]
pub struct FdTable {
    entries: BTreeMap<u64, FDTableEntry>,
    close_handler: CloseHandler,
}

impl FdTable {
    /// Creates an empty table.  `close_handler` releases the underlying
    /// resource of an entry.
    pub fn new(close_handler: CloseHandler) -> FdTable {
        FdTable {
            entries: BTreeMap::new(),
            close_handler,
        }
    }

    /// Inserts `entry` under the smallest unused virtual fd >= 3 and returns
    /// that fd.  There is no upper bound, so this cannot fail.
    // Linear probe from FIRST_VIRTUAL_FD upward.  Tables are tiny in
    // practice; if that ever changes, keeping a free list would be the fix.
    pub fn get_unused_virtual_fd(&mut self, entry: FDTableEntry) -> u64 {
        let mut fdcandidate = FIRST_VIRTUAL_FD;
        while self.entries.contains_key(&fdcandidate) {
            fdcandidate += 1;
        }
        self.entries.insert(fdcandidate, entry);
        log::debug!(
            "fdtables: virtual fd {} -> underfd {}",
            fdcandidate,
            entry.underfd
        );
        fdcandidate
    }

    /// Looks up a virtual fd.  Returns `EBADF` when it is not in the table.
    pub fn translate_virtual_fd(&self, virtualfd: u64) -> Result<FDTableEntry, Errno> {
        match self.entries.get(&virtualfd) {
            Some(tableentry) => Ok(*tableentry),
            None => Err(Errno::EBADF),
        }
    }

    /// Closes a virtual fd.
    ///
    /// The close handler runs first; if it fails, its error is returned and
    /// the entry stays in the table.  Otherwise the entry is removed and the
    /// fd becomes available to the next allocation.
    pub fn close_virtual_fd(&mut self, virtualfd: u64) -> Result<(), Errno> {
        let entry = self.translate_virtual_fd(virtualfd)?;
        (self.close_handler)(entry)?;
        self.entries.remove(&virtualfd);
        Ok(())
    }

    /// Is this virtual fd currently allocated?
    pub fn contains(&self, virtualfd: u64) -> bool {
        self.entries.contains_key(&virtualfd)
    }

    /// Number of open virtual fds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no virtual fd is open.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The open virtual fds, in ascending order.
    pub fn virtual_fds(&self) -> Vec<u64> {
        self.entries.keys().copied().collect()
    }
}

impl Drop for FdTable {
    // Teardown closes everything that is still open.  There is nobody left
    // to report a failure to, so it is only logged.
    fn drop(&mut self) {
        let entries = std::mem::take(&mut self.entries);
        for (virtualfd, entry) in entries {
            if let Err(e) = (self.close_handler)(entry) {
                log::warn!(
                    "fdtables: closing virtual fd {} at teardown failed: {}",
                    virtualfd,
                    e
                );
            }
        }
    }
}

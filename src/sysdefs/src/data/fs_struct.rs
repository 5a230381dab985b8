//! Bookkeeping for data moved between guest memory and host files.
use crate::constants::err_const::Errno;

/// Outcome of a chunked copy between guest memory and a host file.
///
/// `done` is the running byte count across all chunks. `error` is set when
/// the loop stopped because the host (or a guest memory access) failed, as
/// opposed to a plain short transfer such as end of file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub done: usize,
    pub error: Option<Errno>,
}

impl Transfer {
    pub fn is_complete(&self, requested: usize) -> bool {
        self.done == requested
    }
}

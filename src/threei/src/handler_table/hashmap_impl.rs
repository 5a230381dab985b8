use std::collections::HashMap;
use std::fmt;
use sysdefs::constants::err_const::Errno;

/// A syscall handler: runs against the VM context `C` and produces the
/// value `R` the dispatcher writes back to the guest.
pub type SyscallFn<C, R> = fn(&mut C) -> R;

/// HandlerTable:
/// <callnum, handler>
///
/// Built once per VM. Lookups are by the number the guest put in its
/// syscall register; there is no fallback handler, an unknown number is the
/// dispatcher's business.
pub struct HandlerTable<C, R> {
    handlers: HashMap<u32, SyscallFn<C, R>>,
}

impl<C, R> HandlerTable<C, R> {
    /// An empty table.
    pub fn new() -> Self {
        HandlerTable {
            handlers: HashMap::new(),
        }
    }

    /// Builds a table from a static `(callnum, handler)` list.
    ///
    /// Panics if the list names the same number twice, which is a bug in the
    /// list itself rather than something a guest can trigger.
    pub fn from_table(table: &[(u32, SyscallFn<C, R>)]) -> Self {
        let mut handlers = HashMap::with_capacity(table.len());
        for &(callnum, func) in table.iter() {
            if handlers.insert(callnum, func).is_some() {
                panic!("HandlerTable: syscall {} listed twice", callnum);
            }
        }
        HandlerTable { handlers }
    }

    /// Adds a handler for `callnum`.
    ///
    /// ## Returns:
    /// `Ok(())` on success, `Err(EEXIST)` if the number already has a
    /// handler. Existing handlers are never replaced.
    pub fn register_handler(&mut self, callnum: u32, func: SyscallFn<C, R>) -> Result<(), Errno> {
        if self.handlers.contains_key(&callnum) {
            return Err(Errno::EEXIST);
        }
        self.handlers.insert(callnum, func);
        log::debug!("HandlerTable: registered handler for syscall {}", callnum);
        Ok(())
    }

    /// Removes the handler for `callnum`, returning it if there was one.
    pub fn deregister_handler(&mut self, callnum: u32) -> Option<SyscallFn<C, R>> {
        self.handlers.remove(&callnum)
    }

    /// Looks up the handler for `callnum`.
    pub fn get_handler(&self, callnum: u32) -> Option<SyscallFn<C, R>> {
        self.handlers.get(&callnum).copied()
    }

    pub fn contains(&self, callnum: u32) -> bool {
        self.handlers.contains_key(&callnum)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered syscall numbers in ascending order.
    pub fn callnums(&self) -> Vec<u32> {
        let mut nums: Vec<u32> = self.handlers.keys().copied().collect();
        nums.sort_unstable();
        nums
    }
}

impl<C, R> Default for HandlerTable<C, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, R> fmt::Debug for HandlerTable<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
            .field("callnums", &self.callnums())
            .finish()
    }
}

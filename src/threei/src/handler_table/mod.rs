//! Handler table implementation.
//!
//! Per-VM `HashMap` keyed by syscall number. The VM is single threaded, so
//! no locking is involved; the table is owned by the VM and only touched by
//! its dispatcher.
pub mod hashmap_impl;

pub use crate::handler_table::hashmap_impl::*;

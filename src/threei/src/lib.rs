//! Syscall routing.
//!
//! A [`HandlerTable`] maps syscall numbers to handler functions. The syscall
//! layer builds one table per VM from its static syscall list when the VM
//! is constructed; embedders may add handlers for numbers the core does not
//! serve (the multimedia extension, for instance).
pub mod handler_table;

pub use handler_table::*;

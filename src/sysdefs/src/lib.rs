//! Shared definitions for the syscall layer.
//!
//! `constants` holds the guest-visible numbers (syscall numbers, register
//! indices, open flags, clock ids) together with the error translation used
//! at the guest boundary. `data` holds the small structs that describe how
//! host results are laid out before they are copied into guest memory.
pub mod constants;
pub mod data;

//! This module provides an fdtable, an abstraction which separates the file
//! descriptors a guest sees from the descriptors the host hands out.  There
//! are several reasons why this is needed.  First, host fd numbers depend on
//! whatever else the emulator has open, so exposing them would leak host
//! state into the guest.  Second, the guest's 0, 1 and 2 are served by the
//! console syscalls and must never collide with a file.  Third, every VM
//! must be able to close all of its files at teardown, which means somebody
//! has to own them.
//!
//! Virtual fds start at 3 and the smallest free one is always handed out
//! next.  A table owns its entries: dropping it runs the registered close
//! handler on everything still open.
//!
//! Note that the code re-exports an implementation from a specific submodule.
//! You, the caller, should only use the base `fdtables` API and not
//! `fdtables::btreetable` directly.

#![warn(
    // `clippy::all` is already on by default.
    clippy::all,
    // It's always good to write as much documentation as possible
    missing_docs,
)]
// I do a fair amount of casting between u64 and host fd types.
#![allow(clippy::cast_possible_truncation)]

// This includes the specific implementation of the algorithm chosen.
mod btreetable;
pub use btreetable::*;

// This includes general constants and definitions for things that are
// needed everywhere, like FDTableEntry.  I use the * import here to flatten
// the namespace so folks importing this have the symbols directly imported.
mod commonconstants;
pub use commonconstants::*;

/// Error values (matching errno in Linux) for the various call Results
pub use sysdefs::constants::err_const::Errno;

/***************************** TESTS FOLLOW ******************************/

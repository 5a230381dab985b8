//! Syscall argument conversion.
//!
//! Handlers never read registers or guest memory by hand; they go through
//! the `sc_` helpers here, which turn raw register values into typed
//! arguments and guest pointers into host values.
pub mod datatype_conversion;
pub mod filesystem_helpers;
pub mod path_conversion;
pub mod text_conversion;

pub use datatype_conversion::*;
pub use filesystem_helpers::*;
pub use path_conversion::*;
pub use text_conversion::*;

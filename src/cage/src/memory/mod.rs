pub mod bridge;
pub mod guest;
pub mod mem_helper;

pub use bridge::*;
pub use guest::*;
pub use mem_helper::*;

pub mod cage;
pub mod config;
pub mod console;
pub mod cpu;
pub mod memory;

pub use cage::*;
pub use config::*;
pub use console::*;
pub use cpu::*;
pub use memory::*;

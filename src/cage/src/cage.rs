//! Per-VM state.
//!
//! A [`Vm`] bundles the guest collaborators (registers and memory) with the
//! state the syscall layer keeps for one guest: its virtual fd table, heap
//! break, staging buffer and console. Nothing here is global; several VMs
//! can live side by side in one process.
use crate::config::VmConfig;
use crate::console::Console;
use crate::cpu::CpuState;
use crate::memory::bridge::StagingBuffer;
use crate::memory::guest::GuestMemory;
use fdtables::{CloseHandler, FdTable};
use threei::HandlerTable;

/// What a syscall handler asks the dispatcher to write back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyscallRet {
    /// Written to a0.
    Int(i32),
    /// Written to fa0 as a single precision bit pattern.
    Float(f32),
    /// No register is touched.
    Unset,
}

/// Signature shared by every syscall handler.
pub type SyscallFn = fn(&mut Vm) -> SyscallRet;

/// Syscall-layer state owned by one VM.
#[derive(Debug)]
pub struct VmAttributes {
    pub fdtable: FdTable,
    /// Current guest heap break. Moved only by `brk`, never validated.
    pub break_addr: u32,
    /// a0 as it stood after the most recent syscall.
    pub error: u32,
    pub exit_code: i32,
    pub staging: StagingBuffer,
    pub console: Console,
    pub config: VmConfig,
}

impl VmAttributes {
    /// Fresh attributes. `close_handler` releases host handles when fds are
    /// closed and when the attributes are dropped.
    pub fn new(config: VmConfig, console: Console, close_handler: CloseHandler) -> Self {
        VmAttributes {
            fdtable: FdTable::new(close_handler),
            break_addr: config.initial_break,
            error: 0,
            exit_code: 0,
            staging: StagingBuffer::new(),
            console,
            config,
        }
    }
}

pub struct Vm {
    pub cpu: Box<dyn CpuState>,
    pub mem: Box<dyn GuestMemory>,
    pub attr: VmAttributes,
    pub syscalls: HandlerTable<Vm, SyscallRet>,
}

impl Vm {
    pub fn new(
        cpu: Box<dyn CpuState>,
        mem: Box<dyn GuestMemory>,
        attr: VmAttributes,
        syscalls: HandlerTable<Vm, SyscallRet>,
    ) -> Self {
        Vm {
            cpu,
            mem,
            attr,
            syscalls,
        }
    }

    /// Stops the CPU and records the code the guest exited with.
    pub fn halt_with(&mut self, exit_code: i32) {
        self.cpu.halt();
        self.attr.exit_code = exit_code;
        log::debug!("vm halted, exit code {}", exit_code);
    }

    pub fn is_halted(&self) -> bool {
        self.cpu.is_halted()
    }
}

impl std::fmt::Debug for Vm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vm")
            .field("attr", &self.attr)
            .field("syscalls", &self.syscalls)
            .finish()
    }
}

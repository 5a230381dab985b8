//! VM bring-up and teardown for the syscall layer.
use crate::syscall_table::SYSCALL_TABLE;
use crate::syscalls::fs_calls::kernel_close;
use cage::{Console, CpuState, GuestMemory, Vm, VmAttributes, VmConfig};
use sysdefs::constants::err_const::VERBOSE;
use threei::HandlerTable;

/// Creates a VM whose console is the host's stdin and stdout.
///
/// See [`vm_start_with_console`].
pub fn vm_start(cpu: Box<dyn CpuState>, mem: Box<dyn GuestMemory>, config: VmConfig) -> Vm {
    vm_start_with_console(cpu, mem, config, Console::stdio())
}

/// Creates a VM around the given CPU and guest memory.
///
/// This function will do following things:
/// 1. Set the process-wide verbosity. Only the first VM in a process gets to
///    set it.
/// 2. Create an empty fd table that closes host fds with `kernel_close`.
/// 3. Load `SYSCALL_TABLE` into the VM's handler table.
pub fn vm_start_with_console(
    cpu: Box<dyn CpuState>,
    mem: Box<dyn GuestMemory>,
    config: VmConfig,
    console: Console,
) -> Vm {
    if VERBOSE.set(config.verbosity).is_err() {
        log::debug!(
            "verbosity already set to {:?}, ignoring {}",
            VERBOSE.get(),
            config.verbosity
        );
    }

    let attr = VmAttributes::new(config, console, kernel_close);
    let syscalls = HandlerTable::from_table(SYSCALL_TABLE);
    log::debug!("vm started with {} syscalls", syscalls.len());
    Vm::new(cpu, mem, attr, syscalls)
}

/// Tears a VM down and returns the guest's exit code.
///
/// Every virtual fd still open is closed along with the host file behind it.
pub fn vm_shutdown(vm: Vm) -> i32 {
    let exit_code = vm.attr.exit_code;
    let open_fds = vm.attr.fdtable.len();
    drop(vm);
    log::debug!("vm shut down, exit code {}, {} fds closed", exit_code, open_fds);
    exit_code
}

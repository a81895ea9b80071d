pub mod chip8_vm;

pub use chip8_vm::app::{run_vm_app, run_vm_headless};
pub use chip8_vm::cpu::{execute_cycle, execute_opcode, tick_timers};
pub use chip8_vm::error::VmError;
pub use chip8_vm::state::{
    clear_display, create_state, create_state_with_seed, dump_state, key_down, key_up,
    load_program, load_rom_file, reset_state, VmState,
};

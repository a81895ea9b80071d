use std::fs;
use std::path::Path;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chip8_vm::config::{
    FONT_BYTES, KEY_COUNT, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, SCREEN_HEIGHT,
    SCREEN_WIDTH, STACK_DEPTH,
};
use crate::chip8_vm::error::VmError;

#[derive(Debug, Clone)]
pub struct VmState {
    pub memory: [u8; MEMORY_SIZE],
    pub v: [u8; REGISTER_COUNT],
    pub stack: [u16; STACK_DEPTH],
    pub stack_len: usize,
    pub keys: [bool; KEY_COUNT],
    pub framebuffer: [u8; SCREEN_WIDTH * SCREEN_HEIGHT],
    pub pc: usize,
    pub index: usize,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub should_draw: bool,
    pub halted: bool,
    // Register index parked on FX0A until the next key-down event arrives.
    pub waiting_key: Option<usize>,
    pub rng: StdRng,
}

impl Default for VmState {
    fn default() -> Self {
        Self {
            memory: [0; MEMORY_SIZE],
            v: [0; REGISTER_COUNT],
            stack: [0; STACK_DEPTH],
            stack_len: 0,
            keys: [false; KEY_COUNT],
            framebuffer: [0; SCREEN_WIDTH * SCREEN_HEIGHT],
            pc: PROGRAM_START,
            index: 0,
            delay_timer: 0,
            sound_timer: 0,
            should_draw: true,
            halted: false,
            waiting_key: None,
            rng: StdRng::from_entropy(),
        }
    }
}

pub fn create_state() -> VmState {
    let mut state = VmState::default();
    reset_state(&mut state);
    state
}

pub fn create_state_with_seed(seed: u64) -> VmState {
    let mut state = create_state();
    state.rng = StdRng::seed_from_u64(seed);
    state
}

// Idempotent. Leaves the RNG alone: seeding is a construction-time decision.
pub fn reset_state(state: &mut VmState) {
    state.memory = [0; MEMORY_SIZE];
    state.v = [0; REGISTER_COUNT];
    state.stack = [0; STACK_DEPTH];
    state.stack_len = 0;
    state.keys = [false; KEY_COUNT];
    clear_display(state);

    state.pc = PROGRAM_START;
    state.index = 0;
    state.delay_timer = 0;
    state.sound_timer = 0;
    state.halted = false;
    state.waiting_key = None;

    load_font(state);
}

pub fn clear_display(state: &mut VmState) {
    state.framebuffer = [0; SCREEN_WIDTH * SCREEN_HEIGHT];
    state.should_draw = true;
}

pub fn load_font(state: &mut VmState) {
    state.memory[..FONT_BYTES.len()].copy_from_slice(&FONT_BYTES);
}

pub fn load_program(state: &mut VmState, bytes: &[u8]) -> Result<(), VmError> {
    if bytes.len() > MAX_ROM_SIZE {
        return Err(VmError::RomTooLarge {
            size: bytes.len(),
            max: MAX_ROM_SIZE,
        });
    }

    let end = PROGRAM_START + bytes.len();
    state.memory[PROGRAM_START..end].copy_from_slice(bytes);

    Ok(())
}

pub fn load_rom_file(state: &mut VmState, path: &Path) -> Result<(), VmError> {
    let bytes = fs::read(path)?;
    load_program(state, &bytes)?;
    info!("loaded {} byte rom from {}", bytes.len(), path.display());
    Ok(())
}

pub fn key_down(state: &mut VmState, key: usize) {
    if key >= KEY_COUNT {
        return;
    }

    state.keys[key] = true;
    if let Some(reg) = state.waiting_key.take() {
        state.v[reg] = key as u8;
    }
}

pub fn key_up(state: &mut VmState, key: usize) {
    if key >= KEY_COUNT {
        return;
    }

    state.keys[key] = false;
}

pub fn dump_state(state: &VmState) -> String {
    let registers = state
        .v
        .iter()
        .enumerate()
        .map(|(i, value)| format!("v{i:X}: {value:02x}"))
        .collect::<Vec<_>>()
        .join(" ");
    let stack = state.stack[..state.stack_len]
        .iter()
        .map(|slot| format!("{slot:03x}"))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "pc: {:03x}  i: {:03x}  delay: {}  sound: {}\n{}\nstack ({}): [{}]",
        state.pc,
        state.index,
        state.delay_timer,
        state.sound_timer,
        registers,
        state.stack_len,
        stack,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_is_idempotent() {
        let mut state = create_state_with_seed(0);
        state.v[3] = 0x42;
        state.pc = 0x300;
        state.stack_len = 4;
        state.delay_timer = 9;
        state.waiting_key = Some(2);
        state.halted = true;

        reset_state(&mut state);
        let first = state.clone();
        reset_state(&mut state);

        assert_eq!(state.memory[..], first.memory[..]);
        assert_eq!(state.v, first.v);
        assert_eq!(state.pc, first.pc);
        assert_eq!(state.stack_len, 0);
        assert_eq!(state.waiting_key, None);
        assert!(!state.halted);
    }

    #[test]
    fn reset_writes_font_at_base_of_memory() {
        let mut state = create_state_with_seed(0);
        assert_eq!(state.memory[..80], FONT_BYTES[..]);
        assert_eq!(state.memory[80], 0);
    }

    #[test]
    fn out_of_range_key_codes_are_ignored() {
        let mut state = create_state_with_seed(0);
        key_down(&mut state, 0x20);
        key_up(&mut state, 0x20);
        assert!(state.keys.iter().all(|pressed| !pressed));
    }

    #[test]
    fn dump_includes_registers_and_stack() {
        let mut state = create_state_with_seed(0);
        state.v[0xA] = 0xBC;
        state.stack[0] = 0x234;
        state.stack_len = 1;

        let dump = dump_state(&state);

        assert!(dump.contains("pc: 200"));
        assert!(dump.contains("vA: bc"));
        assert!(dump.contains("[234]"));
    }
}

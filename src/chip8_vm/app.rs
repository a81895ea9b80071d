use std::path::Path;
use std::time::Instant;

use crate::chip8_vm::config::{SCREEN_HEIGHT, SCREEN_WIDTH, TIMER_HZ};
use crate::chip8_vm::cpu::{execute_cycle, tick_timers};
use crate::chip8_vm::error::VmError;
use crate::chip8_vm::state::{
    create_state, create_state_with_seed, key_down, key_up, load_rom_file, VmState,
};

fn new_state(seed: Option<u64>) -> VmState {
    match seed {
        Some(seed) => create_state_with_seed(seed),
        None => create_state(),
    }
}

pub fn run_vm_headless(
    rom_path: &Path,
    max_cycles: usize,
    cpu_hz: usize,
    seed: Option<u64>,
) -> Result<VmState, VmError> {
    if max_cycles == 0 {
        return Err(VmError::InvalidArgument("max_cycles must be > 0"));
    }
    if cpu_hz == 0 {
        return Err(VmError::InvalidArgument("cpu_hz must be > 0"));
    }

    let mut state = new_state(seed);
    load_rom_file(&mut state, rom_path)?;

    let cycles_per_timer_tick = usize::max(1, cpu_hz / TIMER_HZ);

    for i in 0..max_cycles {
        if state.halted {
            break;
        }

        execute_cycle(&mut state)?;

        if ((i + 1) % cycles_per_timer_tick) == 0 {
            tick_timers(&mut state, None);
        }
    }

    Ok(state)
}

pub fn run_vm_app(
    rom_path: &Path,
    scale: usize,
    cpu_hz: usize,
    target_fps: usize,
    seed: Option<u64>,
) -> Result<VmState, VmError> {
    use raylib::prelude::{Color, KeyboardKey, RaylibDraw};

    if scale == 0 {
        return Err(VmError::InvalidArgument("scale must be > 0"));
    }
    if cpu_hz == 0 {
        return Err(VmError::InvalidArgument("cpu_hz must be > 0"));
    }
    if target_fps == 0 {
        return Err(VmError::InvalidArgument("target_fps must be > 0"));
    }

    let mut state = new_state(seed);
    load_rom_file(&mut state, rom_path)?;

    let width = (SCREEN_WIDTH * scale) as i32;
    let height = (SCREEN_HEIGHT * scale) as i32;
    let (mut rl, thread) = raylib::init()
        .size(width, height)
        .title("chip8-vm-rs")
        .build();
    rl.set_target_fps(target_fps as u32);

    let key_map = [
        (KeyboardKey::KEY_ONE, 0x1usize),
        (KeyboardKey::KEY_TWO, 0x2),
        (KeyboardKey::KEY_THREE, 0x3),
        (KeyboardKey::KEY_FOUR, 0xC),
        (KeyboardKey::KEY_Q, 0x4),
        (KeyboardKey::KEY_W, 0x5),
        (KeyboardKey::KEY_E, 0x6),
        (KeyboardKey::KEY_R, 0xD),
        (KeyboardKey::KEY_A, 0x7),
        (KeyboardKey::KEY_S, 0x8),
        (KeyboardKey::KEY_D, 0x9),
        (KeyboardKey::KEY_F, 0xE),
        (KeyboardKey::KEY_Z, 0xA),
        (KeyboardKey::KEY_X, 0x0),
        (KeyboardKey::KEY_C, 0xB),
        (KeyboardKey::KEY_V, 0xF),
    ];

    let cycle_interval = 1.0f32 / cpu_hz as f32;
    let timer_interval = 1.0f32 / TIMER_HZ as f32;
    let max_cycles_per_frame = usize::max(1, (cpu_hz / target_fps) * 3);
    let mut accumulated_time = 0.0f32;
    let mut timer_accumulated_time = 0.0f32;
    let mut front_buffer = state.framebuffer;
    let mut previous_tick = Instant::now();

    while !rl.window_should_close() && !state.halted {
        if rl.is_key_pressed(KeyboardKey::KEY_ESCAPE) {
            state.halted = true;
            break;
        }

        // Key-down edges double as the FX0A completion event, so the latch
        // is fed from press/release transitions rather than polled levels.
        for (key, code) in key_map {
            if rl.is_key_pressed(key) {
                key_down(&mut state, code);
            }
            if rl.is_key_released(key) {
                key_up(&mut state, code);
            }
        }

        let now = Instant::now();
        let frame_dt = (now - previous_tick).as_secs_f32().min(0.1);
        previous_tick = now;
        accumulated_time += frame_dt;
        timer_accumulated_time += frame_dt;

        let mut cycles_run = 0;
        while accumulated_time >= cycle_interval
            && cycles_run < max_cycles_per_frame
            && !state.halted
        {
            execute_cycle(&mut state)?;
            accumulated_time -= cycle_interval;
            cycles_run += 1;
        }

        // Timer rate is fixed at 60 Hz regardless of how many cycles ran.
        while timer_accumulated_time >= timer_interval {
            tick_timers(&mut state, None);
            timer_accumulated_time -= timer_interval;
        }

        if state.should_draw {
            front_buffer = state.framebuffer;
            state.should_draw = false;
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        for (index, value) in front_buffer.iter().enumerate() {
            if *value == 0 {
                continue;
            }
            let x = (index % SCREEN_WIDTH) as i32;
            let y = (index / SCREEN_WIDTH) as i32;
            d.draw_rectangle(
                x * scale as i32,
                y * scale as i32,
                scale as i32,
                scale as i32,
                Color::WHITE,
            );
        }
    }

    Ok(state)
}

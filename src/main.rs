use std::path::PathBuf;

use clap::Parser;

use chip8_vm_rs::{dump_state, run_vm_app, run_vm_headless, VmError};

#[derive(Debug, Parser)]
#[command(name = "chip8-vm-rs")]
#[command(about = "Run the CHIP-8 virtual machine")]
struct Args {
    #[arg(long)]
    rom: PathBuf,

    #[arg(long, default_value_t = 16)]
    scale: usize,

    #[arg(long, default_value_t = 700)]
    hz: usize,

    #[arg(long, default_value_t = 60)]
    fps: usize,

    #[arg(long, default_value_t = 2000)]
    max_cycles: usize,

    #[arg(long)]
    headless: bool,

    // Fixes the CXNN byte stream for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    dump: bool,
}

fn main() -> Result<(), VmError> {
    env_logger::init();
    let args = Args::parse();

    let state = if args.headless {
        run_vm_headless(&args.rom, args.max_cycles, args.hz, args.seed)?
    } else {
        run_vm_app(&args.rom, args.scale, args.hz, args.fps, args.seed)?
    };

    if args.dump {
        println!("{}", dump_state(&state));
    } else if args.headless {
        println!(
            "headless finished: halted={} pc=0x{:03x}",
            state.halted, state.pc
        );
    }

    Ok(())
}

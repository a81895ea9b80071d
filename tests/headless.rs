use chip8_vm_rs::{run_vm_headless, VmError};

#[test]
fn headless_runs_until_cycle_budget() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), [0x12, 0x00]).unwrap();

    let state = run_vm_headless(tmp.path(), 10, 700, Some(0)).unwrap();

    assert_eq!(state.pc, 0x200);
    assert!(!state.halted);
}

#[test]
fn headless_reports_invalid_opcode_with_address() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), [0xFF, 0xFF]).unwrap();

    let result = run_vm_headless(tmp.path(), 10, 700, Some(0));

    assert!(matches!(
        result,
        Err(VmError::InvalidOpcode {
            opcode: 0xFFFF,
            addr: 0x200
        })
    ));
}

#[test]
fn headless_draw_rom_lights_pixels() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    // LD I, 0x206; DRW V0, V0, 1; JP 0x204; sprite 0xFF
    std::fs::write(tmp.path(), [0xA2, 0x06, 0xD0, 0x01, 0x12, 0x04, 0xFF]).unwrap();

    let state = run_vm_headless(tmp.path(), 64, 700, Some(0)).unwrap();

    assert!(state.framebuffer.iter().any(|pixel| *pixel == 1));
}

#[test]
fn headless_rejects_oversized_rom_file() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), vec![0u8; 0x1000 - 0x200 + 1]).unwrap();

    let result = run_vm_headless(tmp.path(), 10, 700, None);

    assert!(matches!(result, Err(VmError::RomTooLarge { .. })));
}

#[test]
fn headless_validates_arguments() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), [0x12, 0x00]).unwrap();

    assert!(matches!(
        run_vm_headless(tmp.path(), 0, 700, None),
        Err(VmError::InvalidArgument(_))
    ));
    assert!(matches!(
        run_vm_headless(tmp.path(), 10, 0, None),
        Err(VmError::InvalidArgument(_))
    ));
}

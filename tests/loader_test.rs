//! Loader tests
//!
//! Verifies that programs are placed into memory as described, including the
//! entry-point stub, and that invalid programs are rejected without side
//! effects.

use cpu6502::{
    CycleBudget, FlatMemory, LoadError, Loader, MemoryBus, Program, RecordingSink, CPU,
};

#[test]
fn test_program_segments_are_written() {
    let mut memory = FlatMemory::new();
    let program = Program::new()
        .segment(0x0600, &[0xA9, 0x01, 0xA5, 0x10])
        .segment(0x0010, &[0x7E]);

    program.load(&mut memory).unwrap();

    assert_eq!(memory.read(0x0600), 0xA9);
    assert_eq!(memory.read(0x0603), 0x10);
    assert_eq!(memory.read(0x0010), 0x7E);
}

#[test]
fn test_later_segments_overwrite_earlier_ones() {
    let mut memory = FlatMemory::new();
    Program::new()
        .segment(0x0300, &[0x11, 0x22, 0x33])
        .segment(0x0301, &[0xFF])
        .load(&mut memory)
        .unwrap();

    assert_eq!(memory.read(0x0300), 0x11);
    assert_eq!(memory.read(0x0301), 0xFF);
    assert_eq!(memory.read(0x0302), 0x33);
}

#[test]
fn test_entry_point_writes_jsr_stub() {
    let mut memory = FlatMemory::new();
    Program::new()
        .entry_point(0xC000)
        .load(&mut memory)
        .unwrap();

    assert_eq!(memory.read(0xFFFC), 0x20);
    assert_eq!(memory.read(0xFFFD), 0x00);
    assert_eq!(memory.read(0xFFFE), 0xC0);
}

#[test]
fn test_entry_point_program_runs_after_load() {
    let sink = RecordingSink::new();
    let mut cpu = CPU::new(FlatMemory::new()).with_diagnostics(sink.clone());
    cpu.load(
        &Program::new()
            .segment(0x0600, &[0xA9, 0x01])
            .entry_point(0x0600),
    )
    .unwrap();

    // JSR from the stub, then LDA #$01 at the entry point
    let mut budget = CycleBudget::new(8);
    assert_eq!(cpu.execute(&mut budget), Ok(8));

    assert_eq!(cpu.a(), 0x01);
    assert_eq!(cpu.pc(), 0x0602);
    assert_eq!(cpu.memory().read_word(0x0100), 0xFFFE);
    assert!(sink.reports().is_empty());
}

#[test]
fn test_empty_segment_at_top_is_accepted() {
    let mut memory = FlatMemory::new();
    assert_eq!(Program::new().segment(0xFFFF, &[]).load(&mut memory), Ok(()));
}

#[test]
fn test_segment_overflow_is_rejected() {
    let mut memory = FlatMemory::new();
    let result = Program::new()
        .segment(0xFFF0, &[0xEA; 17])
        .load(&mut memory);

    assert_eq!(
        result,
        Err(LoadError::SegmentOverflow {
            origin: 0xFFF0,
            len: 17
        })
    );
    assert!(memory.as_slice().iter().all(|&b| b == 0));
}

#[test]
fn test_load_error_display() {
    let err = LoadError::SegmentOverflow {
        origin: 0xFFF0,
        len: 17,
    };
    assert_eq!(
        err.to_string(),
        "Segment of 17 bytes at 0xFFF0 runs past the end of memory"
    );
}

#[test]
fn test_cpu_load_then_execute() {
    let mut cpu = CPU::new(FlatMemory::new());

    // LDA $10 at the reset-vector location, data in page zero
    cpu.load(
        &Program::new()
            .segment(0xFFFC, &[0xA5, 0x10])
            .segment(0x0010, &[0x00]),
    )
    .unwrap();

    let mut budget = CycleBudget::new(3);
    cpu.execute(&mut budget).unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flags().zero);
    assert_eq!(cpu.pc(), 0xFFFE);
}

#[test]
fn test_custom_loader() {
    struct Fill(u8);

    impl Loader for Fill {
        fn load(&self, memory: &mut dyn MemoryBus) -> Result<(), LoadError> {
            for addr in 0x0000..=0x00FF {
                memory.write(addr, self.0);
            }
            Ok(())
        }
    }

    let mut cpu = CPU::new(FlatMemory::new());
    cpu.load(&Fill(0x5A)).unwrap();

    assert_eq!(cpu.memory().read(0x0000), 0x5A);
    assert_eq!(cpu.memory().read(0x00FF), 0x5A);
    assert_eq!(cpu.memory().read(0x0100), 0x00);
}

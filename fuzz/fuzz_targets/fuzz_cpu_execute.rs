//! Fuzz target for CPU execution.
//!
//! This target creates arbitrary CPU states and memory contents, then runs
//! them for an arbitrary cycle budget to find edge cases and crashes.

#![no_main]

use arbitrary::Arbitrary;
use cpu6502::{CycleBudget, FlatMemory, Program, RecordingSink, StatusFlags, CPU};
use libfuzzer_sys::fuzz_target;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    /// Program counter
    pc: u16,
    /// Accumulator register
    a: u8,
    /// X index register
    x: u8,
    /// Y index register
    y: u8,
    /// Stack pointer
    sp: u16,
    /// Packed NV-BDIZC status
    status: u8,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    /// Bytes placed at PC
    program: Vec<u8>,
    /// Zero page contents
    zero_page: [u8; 256],
    /// Cycle budget, kept small so each run stays fast
    budget: u8,
}

fuzz_target!(|input: FuzzInput| {
    let sink = RecordingSink::new();
    let mut cpu = CPU::new(FlatMemory::new()).with_diagnostics(sink.clone());

    let state = &input.cpu_state;
    let program = Program::new()
        .segment(0x0000, &input.zero_page)
        .segment(state.pc, &input.program);

    // Programs running past 0xFFFF are rejected without touching memory
    if cpu.load(&program).is_err() {
        assert!(cpu.memory().as_slice().iter().all(|&b| b == 0));
        return;
    }

    cpu.set_pc(state.pc);
    cpu.set_a(state.a);
    cpu.set_x(state.x);
    cpu.set_y(state.y);
    cpu.set_sp(state.sp);
    *cpu.flags_mut() = StatusFlags::from_byte(state.status);

    let mut budget = CycleBudget::new(input.budget as u32);
    let consumed = cpu
        .execute(&mut budget)
        .expect("default policy never halts");

    // Invariants that must hold for any program
    assert_eq!(consumed as i64, input.budget as i64 - budget.remaining());
    assert!(budget.remaining() > -6, "overran by more than one instruction");
    assert_eq!(cpu.cycles(), consumed);
    assert!(sink.reports().len() as u64 <= consumed);

    // Only load instructions touch the flags, and only Z and N
    let before = StatusFlags::from_byte(state.status);
    let after = cpu.flags();
    assert_eq!(after.carry, before.carry);
    assert_eq!(after.overflow, before.overflow);
    assert_eq!(after.interrupt_disable, before.interrupt_disable);
    assert_eq!(after.decimal, before.decimal);
    assert_eq!(after.break_command, before.break_command);
});

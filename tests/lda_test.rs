//! Comprehensive tests for the LDA (Load Accumulator) instruction.
//!
//! Tests cover:
//! - All addressing modes implemented:
//!   - Immediate (opcode 0xA9)
//!   - Zero Page (opcode 0xA5)
//!   - Zero Page,X (opcode 0xB5)
//! - Zero and Negative flag updates
//! - Zero page wraparound for indexed access
//! - Correct cycle counts for all addressing modes
//! - Other flags and registers untouched

use cpu6502::{CycleBudget, FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with its PC at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.set_pc(0x8000);
    cpu
}

/// Runs exactly one instruction and returns the cycles it took
fn step(cpu: &mut CPU<FlatMemory>) -> i64 {
    let mut budget = CycleBudget::new(100);
    cpu.step(&mut budget).unwrap();
    100 - budget.remaining()
}

// ========== Immediate ==========

#[test]
fn test_lda_immediate_basic() {
    let mut cpu = setup_cpu();

    // LDA #$42
    cpu.memory_mut().write(0x8000, 0xA9);
    cpu.memory_mut().write(0x8001, 0x42);

    assert_eq!(step(&mut cpu), 2);
    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cpu.pc(), 0x8002);
    assert!(!cpu.flags().zero);
    assert!(!cpu.flags().negative);
}

#[test]
fn test_lda_immediate_zero_sets_zero_flag() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x55);

    cpu.memory_mut().write(0x8000, 0xA9);
    cpu.memory_mut().write(0x8001, 0x00);

    step(&mut cpu);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flags().zero);
    assert!(!cpu.flags().negative);
}

#[test]
fn test_lda_immediate_negative_sets_negative_flag() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0xA9);
    cpu.memory_mut().write(0x8001, 0x84);

    step(&mut cpu);

    assert_eq!(cpu.a(), 0x84);
    assert!(!cpu.flags().zero);
    assert!(cpu.flags().negative);
}

#[test]
fn test_lda_clears_stale_flags() {
    let mut cpu = setup_cpu();
    cpu.flags_mut().zero = true;
    cpu.flags_mut().negative = true;

    cpu.memory_mut().write(0x8000, 0xA9);
    cpu.memory_mut().write(0x8001, 0x01);

    step(&mut cpu);

    assert!(!cpu.flags().zero);
    assert!(!cpu.flags().negative);
}

// ========== Zero Page ==========

#[test]
fn test_lda_zero_page_basic() {
    let mut cpu = setup_cpu();

    // LDA $10
    cpu.memory_mut().write(0x8000, 0xA5);
    cpu.memory_mut().write(0x8001, 0x10);
    cpu.memory_mut().write(0x0010, 0x99);

    assert_eq!(step(&mut cpu), 3);
    assert_eq!(cpu.a(), 0x99);
    assert_eq!(cpu.pc(), 0x8002);
    assert!(cpu.flags().negative);
}

#[test]
fn test_lda_zero_page_address_ff() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0xA5);
    cpu.memory_mut().write(0x8001, 0xFF);
    cpu.memory_mut().write(0x00FF, 0x00);
    cpu.memory_mut().write(0x0100, 0x77); // must not be read

    step(&mut cpu);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flags().zero);
}

// ========== Zero Page,X ==========

#[test]
fn test_lda_zero_page_x_basic() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x05);

    // LDA $10,X
    cpu.memory_mut().write(0x8000, 0xB5);
    cpu.memory_mut().write(0x8001, 0x10);
    cpu.memory_mut().write(0x0015, 0x37);

    assert_eq!(step(&mut cpu), 4);
    assert_eq!(cpu.a(), 0x37);
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_lda_zero_page_x_wraps_within_page_zero() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x20);

    // LDA $F0,X reads 0x0010, not 0x0110
    cpu.memory_mut().write(0x8000, 0xB5);
    cpu.memory_mut().write(0x8001, 0xF0);
    cpu.memory_mut().write(0x0010, 0xAB);
    cpu.memory_mut().write(0x0110, 0xCD);

    assert_eq!(step(&mut cpu), 4);
    assert_eq!(cpu.a(), 0xAB);
}

#[test]
fn test_lda_zero_page_x_with_x_ff() {
    let mut cpu = setup_cpu();
    cpu.set_x(0xFF);

    // 0x01 + 0xFF = 0x00 within page zero
    cpu.memory_mut().write(0x8000, 0xB5);
    cpu.memory_mut().write(0x8001, 0x01);
    cpu.memory_mut().write(0x0000, 0x80);

    step(&mut cpu);

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flags().negative);
}

// ========== Side effects ==========

#[test]
fn test_lda_preserves_other_state() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x01);
    cpu.set_y(0x02);
    cpu.flags_mut().carry = true;
    cpu.flags_mut().overflow = true;
    cpu.flags_mut().decimal = true;

    cpu.memory_mut().write(0x8000, 0xB5);
    cpu.memory_mut().write(0x8001, 0x40);
    cpu.memory_mut().write(0x0041, 0x00);

    step(&mut cpu);

    assert_eq!(cpu.x(), 0x01);
    assert_eq!(cpu.y(), 0x02);
    assert_eq!(cpu.sp(), 0x0100);
    assert!(cpu.flags().carry);
    assert!(cpu.flags().overflow);
    assert!(cpu.flags().decimal);
    assert!(!cpu.flags().interrupt_disable);
    assert!(!cpu.flags().break_command);
}

//! Reference program
//!
//! Runs the canonical two-instruction program: JSR $4242 at the reset-vector
//! location, then LDA #$84 in the subroutine, for a budget of 8 cycles.
//!
//! Run with `RUST_LOG=trace` to see every instruction as it executes.

use cpu6502::{CycleBudget, FlatMemory, MemoryBus, Program, CPU};

fn main() {
    env_logger::init();

    println!("6502 CPU Core - Reference Program");
    println!("=================================\n");

    // Construction resets: PC = 0xFFFC, SP = 0x0100, memory zeroed
    let mut cpu = CPU::new(FlatMemory::new());

    let program = Program::new()
        .segment(0xFFFC, &[0x20, 0x42, 0x42]) // JSR $4242
        .segment(0x4242, &[0xA9, 0x84]); // LDA #$84

    if let Err(e) = cpu.load(&program) {
        eprintln!("Failed to load program: {}", e);
        std::process::exit(1);
    }

    let mut budget = CycleBudget::new(8);
    match cpu.execute(&mut budget) {
        Ok(cycles) => println!("Executed {} cycles\n", cycles),
        Err(e) => {
            eprintln!("Execution error: {}", e);
            std::process::exit(1);
        }
    }

    println!("CPU Final State:");
    println!("----------------");
    println!("  PC: 0x{:04X}", cpu.pc());
    println!("  SP: 0x{:04X}", cpu.sp());
    println!("  A:  0x{:02X}", cpu.a());
    println!("  X:  0x{:02X}", cpu.x());
    println!("  Y:  0x{:02X}", cpu.y());
    println!("  P:  {} (0x{:02X})", cpu.flags(), cpu.status());
    println!(
        "  Return address on stack: 0x{:04X}",
        cpu.memory().read_word(0x0100)
    );
    println!("  Budget remaining: {}", budget.remaining());
}

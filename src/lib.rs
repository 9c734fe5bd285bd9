//! # 6502 CPU Core
//!
//! A cycle-counting CPU core modeled on the MOS Technology 6502, built for
//! learners and tool-builders who want a deterministic, inspectable model of
//! fetch-decode-execute behavior.
//!
//! The crate provides a flat 64KB memory image behind the `MemoryBus` trait,
//! processor state with named status flags, fetch/read primitives that charge a
//! caller-supplied [`CycleBudget`], and a table-driven instruction dispatcher.
//!
//! ## Quick Start
//!
//! ```rust
//! use cpu6502::{CycleBudget, FlatMemory, Program, CPU};
//!
//! // Construction resets the CPU: PC = 0xFFFC, SP = 0x0100, memory zeroed
//! let mut cpu = CPU::new(FlatMemory::new());
//!
//! // JSR $4242 at the reset vector, LDA #$84 at the subroutine
//! let program = Program::new()
//!     .segment(0xFFFC, &[0x20, 0x42, 0x42])
//!     .segment(0x4242, &[0xA9, 0x84]);
//! cpu.load(&program).unwrap();
//!
//! let mut budget = CycleBudget::new(8);
//! cpu.execute(&mut budget).unwrap();
//!
//! assert_eq!(cpu.pc(), 0x4244);
//! assert_eq!(cpu.a(), 0x84);
//! assert!(cpu.flags().negative);
//! assert_eq!(budget.remaining(), 0);
//! ```
//!
//! ## Modules
//!
//! - `cpu` - Processor state, fetch/read primitives and the execution loop
//! - `memory` - MemoryBus trait and the flat 64KB implementation
//! - `status` - Named status flags
//! - `cycles` - Cycle budget threaded through every primitive
//! - `opcodes` - Static opcode table
//! - `addressing` - Addressing mode enumeration
//! - `loader` - Loader collaborator that places program bytes in memory
//! - `diagnostics` - Sink for unrecognized-opcode reports
//! - `disassembler` - Instruction decoding and formatting

pub mod addressing;
pub mod cpu;
pub mod cycles;
pub mod diagnostics;
pub mod disassembler;
pub mod loader;
pub mod memory;
pub mod opcodes;
pub mod status;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::{CpuConfig, UnknownOpcodePolicy, CPU};
pub use cycles::CycleBudget;
pub use diagnostics::{DiagnosticsSink, LogSink, RecordingSink, UnrecognizedOpcode};
pub use disassembler::{decode_at, format_instruction, Instruction};
pub use loader::{LoadError, Loader, Program};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{lookup, OpcodeMetadata, Operation, OPCODE_TABLE};
pub use status::StatusFlags;

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The fetched opcode has no entry in the opcode table and the CPU is
    /// configured with [`UnknownOpcodePolicy::Halt`].
    UnrecognizedOpcode {
        /// The opcode byte value
        opcode: u8,
        /// Address the opcode was fetched from
        address: u16,
    },
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::UnrecognizedOpcode { opcode, address } => {
                write!(
                    f,
                    "Unrecognized opcode 0x{:02X} at address 0x{:04X}",
                    opcode, address
                )
            }
        }
    }
}

impl std::error::Error for ExecutionError {}

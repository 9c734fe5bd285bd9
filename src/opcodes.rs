//! # Opcode Metadata Table
//!
//! The 256-entry opcode table is the single source of truth for instruction
//! decoding. Each recognized opcode maps to an `OpcodeMetadata` descriptor
//! carrying its mnemonic, addressing mode, operation and total cycle cost;
//! every other byte maps to `None`.
//!
//! Adding an instruction means adding an entry in `build_table` and, for a new
//! operation, a handler in the dispatcher. The execution loop itself never
//! changes.

use crate::addressing::AddressingMode;

/// The operation an opcode performs once its operand is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Load Accumulator
    Lda,
    /// Jump to Subroutine
    Jsr,
}

/// Metadata for a single opcode.
///
/// # Examples
///
/// ```
/// use cpu6502::{lookup, AddressingMode, Operation};
///
/// let lda_imm = lookup(0xA9).unwrap();
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.operation, Operation::Lda);
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic (e.g., "LDA", "JSR").
    pub mnemonic: &'static str,

    /// What the instruction does.
    pub operation: Operation,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Total cycle cost, including the opcode fetch.
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,
}

impl OpcodeMetadata {
    const fn new(
        mnemonic: &'static str,
        operation: Operation,
        addressing_mode: AddressingMode,
        base_cycles: u8,
    ) -> Self {
        Self {
            mnemonic,
            operation,
            addressing_mode,
            base_cycles,
            size_bytes: 1 + addressing_mode.operand_bytes(),
        }
    }
}

/// Complete 256-entry opcode table indexed by opcode byte value.
///
/// # Examples
///
/// ```
/// use cpu6502::OPCODE_TABLE;
///
/// let jsr = OPCODE_TABLE[0x20].unwrap();
/// assert_eq!(jsr.mnemonic, "JSR");
/// assert_eq!(jsr.base_cycles, 6);
///
/// // Unrecognized opcodes have no entry
/// assert!(OPCODE_TABLE[0xFF].is_none());
/// ```
pub static OPCODE_TABLE: [Option<OpcodeMetadata>; 256] = build_table();

const fn build_table() -> [Option<OpcodeMetadata>; 256] {
    use AddressingMode::*;

    let mut table: [Option<OpcodeMetadata>; 256] = [None; 256];

    // Load
    table[0xA9] = Some(OpcodeMetadata::new("LDA", Operation::Lda, Immediate, 2));
    table[0xA5] = Some(OpcodeMetadata::new("LDA", Operation::Lda, ZeroPage, 3));
    table[0xB5] = Some(OpcodeMetadata::new("LDA", Operation::Lda, ZeroPageX, 4));

    // Control
    table[0x20] = Some(OpcodeMetadata::new("JSR", Operation::Jsr, Absolute, 6));

    table
}

/// Looks up the descriptor for `opcode`, or `None` if it is unrecognized.
pub fn lookup(opcode: u8) -> Option<&'static OpcodeMetadata> {
    OPCODE_TABLE[opcode as usize].as_ref()
}

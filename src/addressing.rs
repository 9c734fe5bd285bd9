//! # Addressing Modes
//!
//! The addressing modes the dispatcher knows how to resolve. Each mode fixes how
//! many operand bytes follow the opcode and how the operand is located.

/// Addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX
/// - **2 bytes**: Absolute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10 (load immediate value 0x10 into accumulator)
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80 (load from address 0x0080)
    ZeroPage,

    /// Zero page address indexed by X register.
    ///
    /// Example: LDA $80,X (load from address 0x0080 + X, wraps within zero page)
    /// Costs one cycle more than ZeroPage for the addition.
    ZeroPageX,

    /// Full 16-bit address.
    ///
    /// Example: JSR $1234 (call subroutine at 0x1234)
    Absolute,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Immediate | AddressingMode::ZeroPage | AddressingMode::ZeroPageX => 1,
            AddressingMode::Absolute => 2,
        }
    }
}

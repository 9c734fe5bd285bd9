//! Disassembler
//!
//! Decodes the instruction at an address into its opcode table entry and
//! operand bytes, and formats it as assembly text. Decoding reads memory
//! directly and never charges cycles, so it is safe to call from trace logging.

use crate::addressing::AddressingMode;
use crate::opcodes::lookup;
use crate::MemoryBus;

/// A single decoded instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Instruction mnemonic, or ".byte" for unrecognized opcodes
    pub mnemonic: &'static str,

    /// Addressing mode, `None` for unrecognized opcodes
    pub addressing_mode: Option<AddressingMode>,

    /// Operand bytes (0-2 bytes depending on addressing mode)
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes (opcode + operands)
    pub size_bytes: u8,

    /// Total cycle cost, 0 for unrecognized opcodes
    pub base_cycles: u8,
}

/// Decodes the instruction starting at `address`.
///
/// Operand bytes past 0xFFFF wrap to 0x0000, matching how the CPU fetches them.
///
/// # Examples
///
/// ```
/// use cpu6502::{decode_at, FlatMemory, MemoryBus};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x8000, 0x20);
/// mem.write(0x8001, 0x42);
/// mem.write(0x8002, 0x42);
///
/// let instr = decode_at(&mem, 0x8000);
/// assert_eq!(instr.mnemonic, "JSR");
/// assert_eq!(instr.operand_bytes, vec![0x42, 0x42]);
/// assert_eq!(instr.size_bytes, 3);
/// ```
pub fn decode_at<M: MemoryBus + ?Sized>(memory: &M, address: u16) -> Instruction {
    let opcode = memory.read(address);

    match lookup(opcode) {
        Some(metadata) => {
            let operand_bytes = (1..metadata.size_bytes as u16)
                .map(|offset| memory.read(address.wrapping_add(offset)))
                .collect();

            Instruction {
                address,
                opcode,
                mnemonic: metadata.mnemonic,
                addressing_mode: Some(metadata.addressing_mode),
                operand_bytes,
                size_bytes: metadata.size_bytes,
                base_cycles: metadata.base_cycles,
            }
        }
        None => Instruction {
            address,
            opcode,
            mnemonic: ".byte",
            addressing_mode: None,
            operand_bytes: Vec::new(),
            size_bytes: 1,
            base_cycles: 0,
        },
    }
}

/// Format a single instruction as assembly text
///
/// # Examples
///
/// ```
/// use cpu6502::{decode_at, format_instruction, FlatMemory, MemoryBus};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x0000, 0xB5);
/// mem.write(0x0001, 0x10);
/// assert_eq!(format_instruction(&decode_at(&mem, 0x0000)), "LDA $10,X");
/// ```
pub fn format_instruction(instr: &Instruction) -> String {
    let operand = format_operand(instr);

    if operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, operand)
    }
}

/// Format the operand based on addressing mode
fn format_operand(instr: &Instruction) -> String {
    use AddressingMode::*;

    let Some(mode) = instr.addressing_mode else {
        return format!("${:02X}", instr.opcode);
    };

    match (mode, instr.operand_bytes.as_slice()) {
        (Immediate, [value]) => format!("#${:02X}", value),
        (ZeroPage, [addr]) => format!("${:02X}", addr),
        (ZeroPageX, [addr]) => format!("${:02X},X", addr),
        (Absolute, [lo, hi]) => format!("${:04X}", u16::from_le_bytes([*lo, *hi])),
        _ => String::new(),
    }
}

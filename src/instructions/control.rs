//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JSR: Jump to Subroutine
//!
//! The stack pointer is a full 16-bit address. A return address is pushed as a
//! little-endian word at SP, after which SP advances by 2, so consecutive pushes
//! never overlap.

use crate::{AddressingMode, CycleBudget, MemoryBus, OpcodeMetadata, CPU};

/// Bytes occupied by one pushed return address.
const RETURN_ADDRESS_BYTES: u16 = 2;

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// 1. Fetch the 16-bit target from the instruction stream
/// 2. Push PC - 1 (the address of JSR's last byte) as a word at SP
/// 3. Advance SP by 2
/// 4. Set PC to the target
///
/// The pushed address points one byte short of the next instruction; a return
/// instruction adds 1 when it pops it.
///
/// Cycle timing: 6 cycles (opcode 1, target 2, push 2, internal 1)
///
/// Flags affected: None
pub(crate) fn execute_jsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
    budget: &mut CycleBudget,
) {
    debug_assert_eq!(metadata.addressing_mode, AddressingMode::Absolute);

    let target = cpu.effective_address(metadata.addressing_mode, budget);

    let return_address = cpu.pc.wrapping_sub(1);
    let sp = cpu.sp;
    cpu.memory.write_word(budget, sp, return_address);
    cpu.sp = cpu.sp.wrapping_add(RETURN_ADDRESS_BYTES);

    cpu.pc = target;
}

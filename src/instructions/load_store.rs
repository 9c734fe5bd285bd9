//! # Load and Store Instructions
//!
//! This module implements load operations:
//! - LDA: Load Accumulator

use crate::{CycleBudget, MemoryBus, OpcodeMetadata, CPU};

/// Executes the LDA (Load Accumulator) instruction.
///
/// Loads a byte of memory into the accumulator, setting the zero and negative
/// flags as appropriate.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if A = 0
/// - Negative (N): Set if bit 7 of A is set
/// - Other flags: Not affected
///
/// # Cycle timing
///
/// - Immediate (0xA9): 2 cycles
/// - Zero Page (0xA5): 3 cycles
/// - Zero Page,X (0xB5): 4 cycles
pub(crate) fn execute_lda<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
    budget: &mut CycleBudget,
) {
    let value = cpu.operand_value(metadata.addressing_mode, budget);

    cpu.a = value;
    cpu.update_zero_and_negative_flags(value);
}

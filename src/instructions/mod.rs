//! # Instruction Dispatcher
//!
//! `dispatch` is the only place that branches on instruction identity. It looks
//! the opcode up in the opcode table, hands the descriptor to the handler for
//! its operation, and then tops the budget up to the descriptor's total cycle
//! cost. Handlers charge for their bus accesses through the fetch/read
//! primitives; whatever remains of `base_cycles` is internal processor time.
//!
//! ## Categories
//!
//! - **load_store**: LDA
//! - **control**: JSR

pub mod control;
pub mod load_store;

use crate::cpu::UnknownOpcodePolicy;
use crate::opcodes::{lookup, Operation};
use crate::{CycleBudget, ExecutionError, MemoryBus, CPU};

/// Cycles charged for the opcode fetch before `dispatch` runs.
const OPCODE_FETCH_CYCLES: i64 = 1;

/// Decodes and executes an already-fetched opcode.
///
/// `address` is where the opcode was fetched from. Unrecognized opcodes are
/// reported to the CPU's diagnostics sink without consuming cycles or touching
/// state.
pub(crate) fn dispatch<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
    address: u16,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    let Some(metadata) = lookup(opcode) else {
        cpu.diagnostics.unrecognized_opcode(opcode, address);
        return match cpu.config.unknown_opcode {
            UnknownOpcodePolicy::Continue => Ok(()),
            UnknownOpcodePolicy::Halt => Err(ExecutionError::UnrecognizedOpcode { opcode, address }),
        };
    };

    let before = budget.remaining();

    match metadata.operation {
        Operation::Lda => load_store::execute_lda(cpu, metadata, budget),
        Operation::Jsr => control::execute_jsr(cpu, metadata, budget),
    }

    let charged = OPCODE_FETCH_CYCLES + (before - budget.remaining());
    let internal = metadata.base_cycles as i64 - charged;
    debug_assert!(
        internal >= 0,
        "{} charged {} cycles, table allows {}",
        metadata.mnemonic,
        charged,
        metadata.base_cycles
    );
    if internal > 0 {
        budget.charge(internal as u8);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlatMemory, RecordingSink, UnrecognizedOpcode};

    #[test]
    fn test_unrecognized_opcode_reports_and_changes_nothing() {
        let sink = RecordingSink::new();
        let mut cpu = CPU::new(FlatMemory::new()).with_diagnostics(sink.clone());
        cpu.pc = 0x8001;
        let mut budget = CycleBudget::new(10);

        assert_eq!(dispatch(&mut cpu, 0x02, 0x8000, &mut budget), Ok(()));

        assert_eq!(budget.remaining(), 10);
        assert_eq!(cpu.pc(), 0x8001);
        assert_eq!(
            sink.reports(),
            vec![UnrecognizedOpcode {
                opcode: 0x02,
                address: 0x8000
            }]
        );
    }

    #[test]
    fn test_jsr_tops_up_internal_cycle() {
        let mut cpu = CPU::new(FlatMemory::new());
        cpu.pc = 0x0201;
        cpu.memory.write(0x0201, 0x00);
        cpu.memory.write(0x0202, 0x30);
        // The opcode fetch was charged by the caller
        let mut budget = CycleBudget::new(5);

        dispatch(&mut cpu, 0x20, 0x0200, &mut budget).unwrap();

        assert_eq!(budget.remaining(), 0);
        assert_eq!(cpu.pc(), 0x3000);
    }
}

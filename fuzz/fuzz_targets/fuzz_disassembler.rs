//! Fuzz target for the disassembler.
//!
//! This target fills memory with arbitrary bytes and walks it with the
//! disassembler to find edge cases and crashes in instruction decoding.

#![no_main]

use arbitrary::Arbitrary;
use cpu6502::{decode_at, format_instruction, FlatMemory, Loader, Program};
use libfuzzer_sys::fuzz_target;

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    start_address: u16,
    bytes: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    if Program::new()
        .segment(input.start_address, &input.bytes)
        .load(&mut memory)
        .is_err()
    {
        return;
    }

    let mut address = input.start_address;
    let mut total_size: usize = 0;

    while total_size < input.bytes.len() {
        let instr = decode_at(&memory, address);

        assert_eq!(instr.address, address);
        assert!(instr.size_bytes >= 1 && instr.size_bytes <= 3);
        assert_eq!(instr.operand_bytes.len(), instr.size_bytes as usize - 1);
        assert!(!format_instruction(&instr).is_empty());

        total_size += instr.size_bytes as usize;
        address = address.wrapping_add(instr.size_bytes as u16);
    }
});

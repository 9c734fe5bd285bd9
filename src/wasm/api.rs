//! WASM API for the CPU core.
//!
//! Provides JavaScript-callable interfaces for CPU control, program loading and
//! state inspection.

use crate::{
    decode_at, format_instruction, CpuConfig, CycleBudget, FlatMemory, MemoryBus, Program,
    UnknownOpcodePolicy, CPU,
};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator6502 {
    cpu: CPU<FlatMemory>,
}

#[wasm_bindgen]
impl Emulator6502 {
    /// Create a reset emulator. With `halt_on_unknown`, unrecognized opcodes
    /// stop execution instead of being skipped.
    #[wasm_bindgen(constructor)]
    pub fn new(halt_on_unknown: bool) -> Self {
        let config = CpuConfig {
            unknown_opcode: if halt_on_unknown {
                UnknownOpcodePolicy::Halt
            } else {
                UnknownOpcodePolicy::Continue
            },
        };

        Emulator6502 {
            cpu: CPU::with_config(FlatMemory::new(), config),
        }
    }

    /// Execute a single instruction and return its cycle cost
    pub fn step(&mut self) -> Result<u32, JsError> {
        let mut budget = CycleBudget::new(0);
        self.cpu
            .step(&mut budget)
            .map(|c| c as u32)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Execute until `cycles` are used up and return actual cycles executed
    pub fn execute(&mut self, cycles: u32) -> Result<u32, JsError> {
        let mut budget = CycleBudget::new(cycles);
        self.cpu
            .execute(&mut budget)
            .map(|c| c as u32)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Reset the CPU and clear memory
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u16 {
        self.cpu.sp()
    }

    /// Total cycles (f64 since JavaScript numbers cannot hold a full u64)
    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64
    }

    /// Status flags packed as NV-BDIZC
    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_n(&self) -> bool {
        self.cpu.flags().negative
    }

    #[wasm_bindgen(getter)]
    pub fn flag_z(&self) -> bool {
        self.cpu.flags().zero
    }

    pub fn set_x(&mut self, value: u8) {
        self.cpu.set_x(value);
    }

    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.memory().read(addr)
    }

    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }

    /// Get a 256-byte page of memory
    pub fn get_memory_page(&self, page: u8) -> js_sys::Uint8Array {
        let start = (page as usize) << 8;
        js_sys::Uint8Array::from(&self.cpu.memory().as_slice()[start..start + 256])
    }

    /// Load program bytes at `start_addr`
    pub fn load_program(&mut self, program: &[u8], start_addr: u16) -> Result<(), JsError> {
        self.cpu
            .load(&Program::new().segment(start_addr, program))
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Disassemble `count` instructions starting at `start_addr`
    pub fn disassemble(&self, start_addr: u16, count: u32) -> js_sys::Array {
        let lines = js_sys::Array::new();
        let mut addr = start_addr;

        for _ in 0..count {
            let instr = decode_at(self.cpu.memory(), addr);
            let text = format!("{:04X}  {}", addr, format_instruction(&instr));
            lines.push(&JsValue::from_str(&text));
            addr = addr.wrapping_add(instr.size_bytes as u16);
        }

        lines
    }
}

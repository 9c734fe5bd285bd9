//! WebAssembly bindings for the CPU core.
//!
//! This module provides JavaScript-callable interfaces to the emulator,
//! enabling browser-based stepping and inspection.

pub mod api;

pub use api::Emulator6502;

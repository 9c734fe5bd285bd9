//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from its
//! memory implementation, and `FlatMemory`, the 64KB image the core runs on.
//!
//! ## Design Principles
//!
//! - Addresses are `u16`, so every address maps to exactly one byte; there is
//!   no out-of-range access to report. Multi-byte accesses wrap from 0xFFFF to
//!   0x0000.
//! - Plain `read`/`write` never charge cycles. Timing is a property of the
//!   instruction, so callers that want cycle-accurate behavior charge the
//!   budget themselves (see `CPU::read_byte`).
//! - `write_word` is the one exception: it models two byte writes as a single
//!   charged operation.

use crate::CycleBudget;

/// Number of addressable bytes.
pub const MEMORY_SIZE: usize = 0x1_0000;

/// Memory bus trait for CPU to read/write bytes.
///
/// # Examples
///
/// ```
/// use cpu6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
///
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use cpu6502::MemoryBus;
///
/// struct TracingMemory {
///     data: Vec<u8>,
///     writes: usize,
/// }
///
/// impl MemoryBus for TracingMemory {
///     fn read(&self, addr: u16) -> u8 {
///         self.data[addr as usize]
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         self.writes += 1;
///         self.data[addr as usize] = value;
///     }
/// }
///
/// let mut mem = TracingMemory { data: vec![0; 0x10000], writes: 0 };
/// mem.write(0x0010, 0xAA);
/// assert_eq!(mem.writes, 1);
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address. Never charges cycles.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address. Never charges cycles.
    fn write(&mut self, addr: u16, value: u8);

    /// Sets every byte to zero.
    ///
    /// This is a convenience, not an emulated hardware operation, so it takes no
    /// cycles. The default implementation writes all 65536 addresses;
    /// implementations with direct storage access should override it.
    fn reset(&mut self) {
        for addr in 0..=u16::MAX {
            self.write(addr, 0x00);
        }
    }

    /// Reads a little-endian word at `addr` and `addr + 1` (wrapping).
    ///
    /// Inspection helper; charges no cycles.
    fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Writes `value` little-endian: low byte at `addr`, high byte at
    /// `addr + 1` (wrapping). Charges 2 cycles.
    ///
    /// # Examples
    ///
    /// ```
    /// use cpu6502::{CycleBudget, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// let mut budget = CycleBudget::new(10);
    ///
    /// mem.write_word(&mut budget, 0x0200, 0xBEEF);
    /// assert_eq!(mem.read(0x0200), 0xEF);
    /// assert_eq!(mem.read(0x0201), 0xBE);
    /// assert_eq!(budget.remaining(), 8);
    /// ```
    fn write_word(&mut self, budget: &mut CycleBudget, addr: u16, value: u16) {
        self.write(addr, (value & 0xFF) as u8);
        self.write(addr.wrapping_add(1), (value >> 8) as u8);
        budget.charge(2);
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses (0x0000-0xFFFF) are mapped to a single contiguous RAM
/// array initialized to 0x00.
///
/// # Examples
///
/// ```
/// use cpu6502::{FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFF, 0x01);
/// memory.reset();
/// assert_eq!(memory.read(0xFFFF), 0x00);
/// ```
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; MEMORY_SIZE]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; MEMORY_SIZE]),
        }
    }

    /// Returns the whole image as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }

    fn reset(&mut self) {
        self.data.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_memory_read_write() {
        let mut mem = FlatMemory::new();

        // Initially all zeros
        assert_eq!(mem.read(0x0000), 0x00);
        assert_eq!(mem.read(0xFFFF), 0x00);

        mem.write(0x1234, 0x42);
        assert_eq!(mem.read(0x1234), 0x42);

        // Neighbours untouched
        assert_eq!(mem.read(0x1233), 0x00);
        assert_eq!(mem.read(0x1235), 0x00);
    }

    #[test]
    fn test_reset_zeroes_every_byte() {
        let mut mem = FlatMemory::new();
        mem.write(0x0000, 0x01);
        mem.write(0x8000, 0x80);
        mem.write(0xFFFF, 0xFF);

        mem.reset();

        assert!(mem.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_default_reset_through_trait() {
        struct Sparse(std::collections::HashMap<u16, u8>);

        impl MemoryBus for Sparse {
            fn read(&self, addr: u16) -> u8 {
                self.0.get(&addr).copied().unwrap_or(0)
            }

            fn write(&mut self, addr: u16, value: u8) {
                self.0.insert(addr, value);
            }
        }

        let mut mem = Sparse(Default::default());
        mem.write(0x4000, 0x99);
        mem.reset();
        assert_eq!(mem.read(0x4000), 0x00);
    }

    #[test]
    fn test_write_word_wraps_at_top_of_memory() {
        let mut mem = FlatMemory::new();
        let mut budget = CycleBudget::new(2);

        mem.write_word(&mut budget, 0xFFFF, 0x1234);

        assert_eq!(mem.read(0xFFFF), 0x34);
        assert_eq!(mem.read(0x0000), 0x12);
        assert_eq!(budget.remaining(), 0);
    }

    #[test]
    fn test_read_word_little_endian() {
        let mut mem = FlatMemory::new();
        mem.write(0xFFFC, 0x00);
        mem.write(0xFFFD, 0x80);
        assert_eq!(mem.read_word(0xFFFC), 0x8000);
    }
}

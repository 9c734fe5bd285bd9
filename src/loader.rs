//! # Program Loader
//!
//! The core never embeds program data. A `Loader` places bytes into memory
//! after the CPU has been reset and before execution starts, including the
//! bytes at the reset-vector location 0xFFFC where execution begins.
//!
//! Reset does not read a vector: PC is set to 0xFFFC and the bytes there run
//! as code. A program that starts elsewhere places a `JSR entry` stub at
//! 0xFFFC, which `Program::entry_point` does.

use crate::MemoryBus;

/// Conventional reset-vector location.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// JSR absolute, used for the entry-point stub.
const JSR_OPCODE: u8 = 0x20;

/// Errors raised while loading a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// A segment would run past address 0xFFFF.
    SegmentOverflow {
        /// First address of the segment
        origin: u16,
        /// Segment length in bytes
        len: usize,
    },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LoadError::SegmentOverflow { origin, len } => {
                write!(
                    f,
                    "Segment of {} bytes at 0x{:04X} runs past the end of memory",
                    len, origin
                )
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Populates a memory image from some external representation.
pub trait Loader {
    /// Writes the program into `memory`.
    ///
    /// Implementations should validate before writing, so that a failed load
    /// leaves memory untouched.
    fn load(&self, memory: &mut dyn MemoryBus) -> Result<(), LoadError>;
}

/// In-memory program made of byte segments.
///
/// # Examples
///
/// ```
/// use cpu6502::{CycleBudget, FlatMemory, Program, CPU};
///
/// let program = Program::new()
///     .segment(0x0600, &[0xA9, 0x01]) // LDA #$01
///     .entry_point(0x0600);
///
/// let mut cpu = CPU::new(FlatMemory::new());
/// cpu.load(&program).unwrap();
///
/// // JSR $0600 from the stub (6), then LDA #$01 (2)
/// cpu.execute(&mut CycleBudget::new(8)).unwrap();
/// assert_eq!(cpu.a(), 0x01);
/// assert_eq!(cpu.pc(), 0x0602);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    segments: Vec<(u16, Vec<u8>)>,
    entry_point: Option<u16>,
}

impl Program {
    /// Creates an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `bytes` to be written starting at `origin`.
    ///
    /// Segments are written in the order they were added, so later segments
    /// overwrite earlier ones where they overlap.
    pub fn segment(mut self, origin: u16, bytes: &[u8]) -> Self {
        self.segments.push((origin, bytes.to_vec()));
        self
    }

    /// Makes execution after reset reach `address`.
    ///
    /// Writes `JSR address` at 0xFFFC..0xFFFE after all segments, so it wins
    /// over any segment bytes there. The stub's return address is pushed at
    /// the initial SP like any other JSR.
    pub fn entry_point(mut self, address: u16) -> Self {
        self.entry_point = Some(address);
        self
    }

    fn validate(&self) -> Result<(), LoadError> {
        for (origin, bytes) in &self.segments {
            if *origin as usize + bytes.len() > 0x1_0000 {
                return Err(LoadError::SegmentOverflow {
                    origin: *origin,
                    len: bytes.len(),
                });
            }
        }
        Ok(())
    }
}

impl Loader for Program {
    fn load(&self, memory: &mut dyn MemoryBus) -> Result<(), LoadError> {
        self.validate()?;

        for (origin, bytes) in &self.segments {
            for (offset, &byte) in bytes.iter().enumerate() {
                memory.write(origin.wrapping_add(offset as u16), byte);
            }
        }

        if let Some(address) = self.entry_point {
            memory.write(RESET_VECTOR, JSR_OPCODE);
            memory.write(RESET_VECTOR.wrapping_add(1), (address & 0xFF) as u8);
            memory.write(RESET_VECTOR.wrapping_add(2), (address >> 8) as u8);
        }

        log::debug!(
            "Loaded {} segment(s), {} byte(s)",
            self.segments.len(),
            self.segments.iter().map(|(_, b)| b.len()).sum::<usize>()
        );

        Ok(())
    }
}

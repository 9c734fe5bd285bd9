//! # Diagnostics Sink
//!
//! The dispatcher reports every unrecognized opcode to a `DiagnosticsSink`
//! together with the address it was fetched from. Sinks must not block or fail;
//! whether the run continues is decided by the CPU's `UnknownOpcodePolicy`, not
//! by the sink.

use std::sync::{Arc, Mutex, MutexGuard};

/// One unrecognized-opcode report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnrecognizedOpcode {
    /// The opcode byte value
    pub opcode: u8,
    /// Address the opcode was fetched from
    pub address: u16,
}

/// Receiver for dispatcher diagnostics.
pub trait DiagnosticsSink {
    /// Called once per unrecognized opcode, after its fetch.
    fn unrecognized_opcode(&mut self, opcode: u8, address: u16);
}

/// Default sink: forwards reports to the `log` facade at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn unrecognized_opcode(&mut self, opcode: u8, address: u16) {
        log::warn!(
            "Unrecognized opcode 0x{:02X} at address 0x{:04X}",
            opcode,
            address
        );
    }
}

/// Sink that keeps every report in a shared list.
///
/// Clones share the same list, so a test can hand one clone to the CPU and
/// inspect the other, even when the CPU runs on another thread.
///
/// # Examples
///
/// ```
/// use cpu6502::{CycleBudget, FlatMemory, MemoryBus, RecordingSink, CPU};
///
/// let sink = RecordingSink::new();
/// let mut cpu = CPU::new(FlatMemory::new()).with_diagnostics(sink.clone());
///
/// cpu.memory_mut().write(0xFFFC, 0xFF); // not an instruction
/// cpu.step(&mut CycleBudget::new(1)).unwrap();
///
/// let reports = sink.reports();
/// assert_eq!(reports.len(), 1);
/// assert_eq!(reports[0].opcode, 0xFF);
/// assert_eq!(reports[0].address, 0xFFFC);
/// ```
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    reports: Arc<Mutex<Vec<UnrecognizedOpcode>>>,
}

impl RecordingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all reports received so far, oldest first.
    pub fn reports(&self) -> Vec<UnrecognizedOpcode> {
        self.lock().clone()
    }

    // A push never panics while holding the lock, so a poisoned list is intact.
    fn lock(&self) -> MutexGuard<'_, Vec<UnrecognizedOpcode>> {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticsSink for RecordingSink {
    fn unrecognized_opcode(&mut self, opcode: u8, address: u16) {
        self.lock().push(UnrecognizedOpcode { opcode, address });
    }
}

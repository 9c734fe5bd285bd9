//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the processor state, the
//! fetch/read primitives that charge the cycle budget, and the execution loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next byte to fetch
//! - **Stack pointer** (SP): full 16-bit address; each word push writes at SP
//!   and advances it by 2
//! - **Status flags**: N, V, B, D, I, Z, C as named booleans
//! - **Cycle counter**: u64 total of cycles consumed since construction
//!
//! ## Execution Model
//!
//! - `step()`: fetch one opcode and dispatch it
//! - `execute()`: step until the budget is exhausted
//!
//! The budget is only checked between instructions, so a run overshoots its
//! budget by at most one instruction.

use log::{debug, trace};

use crate::addressing::AddressingMode;
use crate::diagnostics::{DiagnosticsSink, LogSink};
use crate::disassembler::{decode_at, format_instruction};
use crate::instructions;
use crate::loader::{LoadError, Loader};
use crate::{CycleBudget, ExecutionError, MemoryBus, StatusFlags};

/// Program counter value after reset (the reset-vector location).
pub const RESET_PC: u16 = 0xFFFC;

/// Stack pointer value after reset (base of the stack page).
pub const RESET_SP: u16 = 0x0100;

/// What the dispatcher does after reporting an unrecognized opcode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownOpcodePolicy {
    /// Report and carry on with the next fetch.
    #[default]
    Continue,

    /// Report and stop, returning `ExecutionError::UnrecognizedOpcode`.
    Halt,
}

/// CPU configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuConfig {
    /// Handling of opcodes with no table entry.
    pub unknown_opcode: UnknownOpcodePolicy,
}

/// CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait. The CPU
/// owns its memory; independent CPUs share nothing but the opcode table.
/// `CPU<M>` is `Send` whenever `M` is, so a machine can be built on one thread
/// and run on another.
///
/// Construction performs a reset, so there is no way to execute on a CPU whose
/// state was never initialized.
///
/// # Examples
///
/// ```
/// use cpu6502::{FlatMemory, MemoryBus, CPU};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0x1234, 0x56);
///
/// let cpu = CPU::new(memory);
///
/// assert_eq!(cpu.pc(), 0xFFFC);
/// assert_eq!(cpu.sp(), 0x0100);
/// assert_eq!(cpu.a(), 0x00);
/// assert_eq!(cpu.memory().read(0x1234), 0x00); // reset zeroes memory
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next byte to fetch)
    pub(crate) pc: u16,

    /// Stack pointer (address the next word push writes to)
    pub(crate) sp: u16,

    /// Status flags
    pub(crate) flags: StatusFlags,

    /// Total CPU cycles consumed
    pub(crate) cycles: u64,

    /// Memory bus implementation
    pub(crate) memory: M,

    pub(crate) config: CpuConfig,

    pub(crate) diagnostics: Box<dyn DiagnosticsSink + Send>,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a reset CPU with the default configuration and a `LogSink`.
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, CpuConfig::default())
    }

    /// Creates a reset CPU with the given configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use cpu6502::{CpuConfig, CycleBudget, ExecutionError, FlatMemory, UnknownOpcodePolicy, CPU};
    ///
    /// let config = CpuConfig { unknown_opcode: UnknownOpcodePolicy::Halt };
    /// let mut cpu = CPU::with_config(FlatMemory::new(), config);
    ///
    /// // Memory is zeroed, and 0x00 is not in the instruction set
    /// let result = cpu.execute(&mut CycleBudget::new(10));
    /// assert_eq!(
    ///     result,
    ///     Err(ExecutionError::UnrecognizedOpcode { opcode: 0x00, address: 0xFFFC })
    /// );
    /// ```
    pub fn with_config(memory: M, config: CpuConfig) -> Self {
        let mut cpu = Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: RESET_PC,
            sp: RESET_SP,
            flags: StatusFlags::default(),
            cycles: 0,
            memory,
            config,
            diagnostics: Box::new(LogSink),
        };
        cpu.reset();
        cpu
    }

    /// Replaces the diagnostics sink, builder style.
    ///
    /// The sink must be `Send` so the CPU can be moved to another thread.
    pub fn with_diagnostics<D: DiagnosticsSink + Send + 'static>(mut self, sink: D) -> Self {
        self.set_diagnostics(sink);
        self
    }

    /// Replaces the diagnostics sink.
    pub fn set_diagnostics<D: DiagnosticsSink + Send + 'static>(&mut self, sink: D) {
        self.diagnostics = Box::new(sink);
    }

    /// Resets processor state and zeroes memory.
    ///
    /// After reset PC = 0xFFFC, SP = 0x0100, A/X/Y and all flags are zero and
    /// every memory byte is zero. Consumes no cycles and leaves the running
    /// cycle total untouched.
    pub fn reset(&mut self) {
        self.pc = RESET_PC;
        self.sp = RESET_SP;
        self.a = 0x00;
        self.x = 0x00;
        self.y = 0x00;
        self.flags = StatusFlags::default();
        self.memory.reset();

        debug!("CPU reset: PC=0x{:04X} SP=0x{:04X}", self.pc, self.sp);
    }

    /// Runs a loader against this CPU's memory.
    ///
    /// Call after `reset()`, since reset zeroes memory.
    pub fn load<L: Loader + ?Sized>(&mut self, loader: &L) -> Result<(), LoadError> {
        loader.load(&mut self.memory)
    }

    // ========== Fetch/Read Primitives ==========

    /// Reads the byte at PC and advances PC by one. Charges 1 cycle.
    ///
    /// This is the only way the instruction stream is read byte-wise: opcodes
    /// and immediate operands both go through it.
    pub fn fetch_byte(&mut self, budget: &mut CycleBudget) -> u8 {
        let data = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        budget.charge(1);
        data
    }

    /// Reads a little-endian word at PC and advances PC by two. Charges 2 cycles.
    ///
    /// # Examples
    ///
    /// ```
    /// use cpu6502::{CycleBudget, FlatMemory, MemoryBus, CPU};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.set_pc(0x0200);
    /// cpu.memory_mut().write(0x0200, 0x34);
    /// cpu.memory_mut().write(0x0201, 0x12);
    ///
    /// let mut budget = CycleBudget::new(2);
    /// assert_eq!(cpu.fetch_word(&mut budget), 0x1234);
    /// assert_eq!(cpu.pc(), 0x0202);
    /// assert_eq!(budget.remaining(), 0);
    /// ```
    pub fn fetch_word(&mut self, budget: &mut CycleBudget) -> u16 {
        let lo = self.memory.read(self.pc) as u16;
        self.pc = self.pc.wrapping_add(1);

        let hi = self.memory.read(self.pc) as u16;
        self.pc = self.pc.wrapping_add(1);

        budget.charge(2);
        (hi << 8) | lo
    }

    /// Reads an arbitrary address without touching PC. Charges 1 cycle.
    pub fn read_byte(&self, budget: &mut CycleBudget, address: u16) -> u8 {
        let data = self.memory.read(address);
        budget.charge(1);
        data
    }

    /// Zero := value == 0; Negative := bit 7 of value.
    pub fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.flags.zero = value == 0;
        self.flags.negative = (value & 0x80) != 0;
    }

    /// Resolves the operand value for `mode`, consuming its operand bytes.
    ///
    /// Immediate takes the next stream byte as the value; every other mode
    /// reads the value from its effective address.
    pub(crate) fn operand_value(&mut self, mode: AddressingMode, budget: &mut CycleBudget) -> u8 {
        if mode == AddressingMode::Immediate {
            return self.fetch_byte(budget);
        }
        let addr = self.effective_address(mode, budget);
        self.read_byte(budget, addr)
    }

    /// Computes the effective address for a memory addressing mode.
    ///
    /// Zero page indexing wraps within page zero: 0xF0 + X=0x20 is 0x0010. The
    /// index addition costs one cycle. For Immediate the operand byte's own
    /// location is returned; the byte is fetched (and charged) like any other.
    pub(crate) fn effective_address(
        &mut self,
        mode: AddressingMode,
        budget: &mut CycleBudget,
    ) -> u16 {
        match mode {
            AddressingMode::Immediate => {
                let addr = self.pc;
                self.fetch_byte(budget);
                addr
            }
            AddressingMode::ZeroPage => self.fetch_byte(budget) as u16,
            AddressingMode::ZeroPageX => {
                let base = self.fetch_byte(budget);
                budget.charge(1);
                base.wrapping_add(self.x) as u16
            }
            AddressingMode::Absolute => self.fetch_word(budget),
        }
    }

    // ========== Execution ==========

    /// Executes one instruction regardless of the remaining budget.
    ///
    /// Returns the cycles it consumed. An unrecognized opcode costs the single
    /// cycle of its fetch.
    ///
    /// # Examples
    ///
    /// ```
    /// use cpu6502::{CycleBudget, FlatMemory, MemoryBus, CPU};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.memory_mut().write(0xFFFC, 0xA9); // LDA #$00
    /// cpu.memory_mut().write(0xFFFD, 0x00);
    ///
    /// // A budget of zero still runs the whole instruction
    /// let mut budget = CycleBudget::new(0);
    /// assert_eq!(cpu.step(&mut budget), Ok(2));
    /// assert_eq!(budget.remaining(), -2);
    /// assert!(cpu.flags().zero);
    /// ```
    pub fn step(&mut self, budget: &mut CycleBudget) -> Result<u64, ExecutionError> {
        let start = budget.remaining();
        let address = self.pc;

        if log::log_enabled!(log::Level::Trace) {
            trace!(
                "{:04X}  {:<12} A:{:02X} X:{:02X} Y:{:02X} SP:{:04X} P:{} budget:{}",
                address,
                format_instruction(&decode_at(&self.memory, address)),
                self.a,
                self.x,
                self.y,
                self.sp,
                self.flags,
                start
            );
        }

        let opcode = self.fetch_byte(budget);
        let result = instructions::dispatch(self, opcode, address, budget);

        let consumed = (start - budget.remaining()) as u64;
        self.cycles += consumed;

        result.map(|()| consumed)
    }

    /// Executes instructions until the budget is exhausted.
    ///
    /// The budget is checked only between instructions; the last instruction
    /// may drive it below zero. Returns the cycles consumed by this call.
    ///
    /// # Examples
    ///
    /// ```
    /// use cpu6502::{CycleBudget, FlatMemory, MemoryBus, CPU};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.memory_mut().write(0xFFFC, 0xA9); // LDA #$01
    /// cpu.memory_mut().write(0xFFFD, 0x01);
    /// cpu.memory_mut().write(0xFFFE, 0xA9); // LDA #$02
    /// cpu.memory_mut().write(0xFFFF, 0x02);
    ///
    /// let mut budget = CycleBudget::new(3);
    /// assert_eq!(cpu.execute(&mut budget), Ok(4));
    /// assert_eq!(cpu.a(), 0x02);
    /// assert_eq!(budget.remaining(), -1);
    /// ```
    pub fn execute(&mut self, budget: &mut CycleBudget) -> Result<u64, ExecutionError> {
        debug!(
            "Executing from PC 0x{:04X} with budget {}",
            self.pc,
            budget.remaining()
        );

        let mut consumed = 0;
        while !budget.is_exhausted() {
            consumed += self.step(budget)?;
        }

        debug!(
            "Execution finished at PC 0x{:04X}: {} cycles consumed, {} remaining",
            self.pc,
            consumed,
            budget.remaining()
        );

        Ok(consumed)
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    pub fn sp(&self) -> u16 {
        self.sp
    }

    /// Returns the status flags.
    pub fn flags(&self) -> StatusFlags {
        self.flags
    }

    /// Returns the status flags packed as NV-BDIZC.
    pub fn status(&self) -> u8 {
        self.flags.to_byte()
    }

    /// Returns the total number of cycles consumed since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns the active configuration.
    pub fn config(&self) -> CpuConfig {
        self.config
    }

    // ========== Register Setters ==========

    /// Sets the accumulator register.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer (address the next word push writes to).
    pub fn set_sp(&mut self, value: u16) {
        self.sp = value;
    }

    /// Mutable access to the status flags.
    pub fn flags_mut(&mut self) -> &mut StatusFlags {
        &mut self.flags
    }

    // ========== Memory Access ==========

    /// Returns a reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }
}

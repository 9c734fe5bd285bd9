//! # Status Flags
//!
//! The seven processor status flags as named booleans. Only the boolean values
//! carry meaning; the packed byte view exists for display and debugging.

/// Processor status flags.
///
/// All flags are false after reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusFlags {
    /// Carry flag (set on unsigned overflow/underflow)
    pub carry: bool,

    /// Zero flag (set if result is zero)
    pub zero: bool,

    /// Interrupt disable flag
    pub interrupt_disable: bool,

    /// Decimal mode flag
    pub decimal: bool,

    /// Break command flag
    pub break_command: bool,

    /// Overflow flag (set on signed overflow)
    pub overflow: bool,

    /// Negative flag (set if bit 7 of result is 1)
    pub negative: bool,
}

impl StatusFlags {
    /// Packs the flags into a byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused, always 1)
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    ///
    /// # Examples
    ///
    /// ```
    /// use cpu6502::StatusFlags;
    ///
    /// let flags = StatusFlags { zero: true, negative: true, ..Default::default() };
    /// assert_eq!(flags.to_byte(), 0b1010_0010);
    /// ```
    pub fn to_byte(&self) -> u8 {
        let mut status: u8 = 0b0010_0000; // Bit 5 always 1

        if self.negative {
            status |= 0b1000_0000;
        }
        if self.overflow {
            status |= 0b0100_0000;
        }
        if self.break_command {
            status |= 0b0001_0000;
        }
        if self.decimal {
            status |= 0b0000_1000;
        }
        if self.interrupt_disable {
            status |= 0b0000_0100;
        }
        if self.zero {
            status |= 0b0000_0010;
        }
        if self.carry {
            status |= 0b0000_0001;
        }

        status
    }

    /// Unpacks an NV-BDIZC byte. Bit 5 is ignored.
    pub fn from_byte(value: u8) -> Self {
        Self {
            negative: value & 0b1000_0000 != 0,
            overflow: value & 0b0100_0000 != 0,
            break_command: value & 0b0001_0000 != 0,
            decimal: value & 0b0000_1000 != 0,
            interrupt_disable: value & 0b0000_0100 != 0,
            zero: value & 0b0000_0010 != 0,
            carry: value & 0b0000_0001 != 0,
        }
    }
}

impl std::fmt::Display for StatusFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let pick = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "{}{}-{}{}{}{}{}",
            pick(self.negative, 'N'),
            pick(self.overflow, 'V'),
            pick(self.break_command, 'B'),
            pick(self.decimal, 'D'),
            pick(self.interrupt_disable, 'I'),
            pick(self.zero, 'Z'),
            pick(self.carry, 'C'),
        )
    }
}

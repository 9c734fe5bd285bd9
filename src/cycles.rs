//! # Cycle Budget
//!
//! The budget is the only piece of state threaded through the whole call graph
//! besides the CPU and its memory. Every primitive that models a bus access
//! charges its fixed cost against it.
//!
//! The budget is a target to reach or exceed, not a hard cutoff: the execution
//! loop only checks it between instructions, so an instruction that starts with
//! one cycle left still runs to completion and leaves the budget negative.

/// Remaining cycles for an execution run.
///
/// # Examples
///
/// ```
/// use cpu6502::CycleBudget;
///
/// let mut budget = CycleBudget::new(3);
/// budget.charge(2);
/// assert_eq!(budget.remaining(), 1);
/// assert!(!budget.is_exhausted());
///
/// budget.charge(2); // overrun is allowed
/// assert_eq!(budget.remaining(), -1);
/// assert!(budget.is_exhausted());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleBudget {
    remaining: i64,
}

impl CycleBudget {
    /// Creates a budget of `cycles` cycles.
    pub fn new(cycles: u32) -> Self {
        Self {
            remaining: cycles as i64,
        }
    }

    /// Deducts `cycles` from the budget.
    ///
    /// Never fails: a budget driven below zero simply reports itself exhausted.
    pub fn charge(&mut self, cycles: u8) {
        self.remaining -= cycles as i64;
    }

    /// Cycles left. Negative after an overrun.
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Returns true once no cycles remain.
    pub fn is_exhausted(&self) -> bool {
        self.remaining <= 0
    }
}

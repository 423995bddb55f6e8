//! Error types for the hardware-ownership core
//!
//! Claim failures are reported to the caller as explicit results; the
//! tables are left untouched on any failure. Fatal conditions (guard
//! underflow, hard faults) never surface here, they diverge through the
//! reset controller instead.

/// Claim table error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ClaimError {
    /// Resource is already claimed by another owner
    Conflict = 1,
    /// Indices do not name a physical unit, channel, or pin
    OutOfRange = 2,
    /// Slot is marked persistent; clear persistence before freeing it
    StillPersistent = 3,
    /// Operation requires the slot to be claimed
    NotAllocated = 4,
}

/// Result type alias for claim operations
pub type ClaimResult<T> = Result<T, ClaimError>;

//! Peripheral ownership tables
//!
//! Build-time sized claim tables are the single source of truth for which
//! physical resources are in use. Every resource slot runs the same
//! three-state machine; the per-peripheral submodules apply it to their
//! own addressing scheme. All mutation of the process-wide tables happens
//! inside a critical section.

pub mod timer;

#[cfg(feature = "pins")]
pub mod pin;

use crate::mcu::error::{ClaimError, ClaimResult};

// ============ Slot State Machine ============

/// Ownership state of one peripheral resource slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ClaimState {
    /// Available for allocation
    Free = 0,
    /// In use; released by the next soft-restart sweep
    Claimed = 1,
    /// In use and surviving soft-restart sweeps
    Persistent = 2,
}

impl ClaimState {
    /// Take ownership of a free slot
    pub(crate) fn try_claim(&mut self, persistent: bool) -> ClaimResult<()> {
        match *self {
            ClaimState::Free => {
                *self = if persistent {
                    ClaimState::Persistent
                } else {
                    ClaimState::Claimed
                };
                Ok(())
            }
            _ => Err(ClaimError::Conflict),
        }
    }

    /// Return a slot to the free pool
    ///
    /// Releasing a slot that is already free succeeds as a no-op. A
    /// persistent slot refuses to release until its persistence has been
    /// cleared.
    pub(crate) fn try_release(&mut self) -> ClaimResult<()> {
        match *self {
            ClaimState::Free => Ok(()),
            ClaimState::Claimed => {
                *self = ClaimState::Free;
                Ok(())
            }
            ClaimState::Persistent => Err(ClaimError::StillPersistent),
        }
    }

    /// Promote an owned slot to survive soft-restart sweeps
    pub(crate) fn try_mark_persistent(&mut self) -> ClaimResult<()> {
        match *self {
            ClaimState::Free => Err(ClaimError::NotAllocated),
            _ => {
                *self = ClaimState::Persistent;
                Ok(())
            }
        }
    }

    /// Demote an owned slot back to ordinary claimed
    pub(crate) fn try_clear_persistent(&mut self) -> ClaimResult<()> {
        match *self {
            ClaimState::Free => Err(ClaimError::NotAllocated),
            _ => {
                *self = ClaimState::Claimed;
                Ok(())
            }
        }
    }

    /// Apply the soft-restart sweep to this slot
    #[inline]
    pub(crate) fn sweep(&mut self) {
        if *self == ClaimState::Claimed {
            *self = ClaimState::Free;
        }
    }

    /// Check if the slot is available
    #[inline(always)]
    pub fn is_free(self) -> bool {
        self == ClaimState::Free
    }

    /// Check if the slot is owned, persistently or not
    #[inline(always)]
    pub fn is_claimed(self) -> bool {
        self != ClaimState::Free
    }

    /// Check if the slot keeps its owner across a sweep
    #[inline(always)]
    pub fn survives_sweep(self) -> bool {
        self == ClaimState::Persistent
    }
}

// ============ Table Reset ============

/// Return every claim table to all-free
///
/// Only called from crate initialization, before any interrupt source or
/// concurrent user of the tables can exist.
pub(crate) fn reset_tables() {
    unsafe {
        timer::TIMER_CLAIMS.get_unchecked().reset();
    }

    #[cfg(feature = "pins")]
    unsafe {
        pin::PIN_CLAIMS.get_unchecked().reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_from_free() {
        let mut slot = ClaimState::Free;
        assert!(slot.try_claim(false).is_ok());
        assert_eq!(slot, ClaimState::Claimed);

        let mut slot = ClaimState::Free;
        assert!(slot.try_claim(true).is_ok());
        assert_eq!(slot, ClaimState::Persistent);
    }

    #[test]
    fn test_claim_conflicts() {
        let mut slot = ClaimState::Claimed;
        assert_eq!(slot.try_claim(false), Err(ClaimError::Conflict));
        assert_eq!(slot, ClaimState::Claimed);

        let mut slot = ClaimState::Persistent;
        assert_eq!(slot.try_claim(true), Err(ClaimError::Conflict));
        assert_eq!(slot, ClaimState::Persistent);
    }

    #[test]
    fn test_release() {
        let mut slot = ClaimState::Claimed;
        assert!(slot.try_release().is_ok());
        assert_eq!(slot, ClaimState::Free);

        // Already free: succeeds without change
        assert!(slot.try_release().is_ok());
        assert_eq!(slot, ClaimState::Free);

        let mut slot = ClaimState::Persistent;
        assert_eq!(slot.try_release(), Err(ClaimError::StillPersistent));
        assert_eq!(slot, ClaimState::Persistent);
    }

    #[test]
    fn test_persistence_toggle() {
        let mut slot = ClaimState::Claimed;
        assert!(slot.try_mark_persistent().is_ok());
        assert_eq!(slot, ClaimState::Persistent);

        // Marking an already-persistent slot is a legal no-op
        assert!(slot.try_mark_persistent().is_ok());
        assert_eq!(slot, ClaimState::Persistent);

        assert!(slot.try_clear_persistent().is_ok());
        assert_eq!(slot, ClaimState::Claimed);

        // So is clearing a slot that was never persistent
        assert!(slot.try_clear_persistent().is_ok());
        assert_eq!(slot, ClaimState::Claimed);

        let mut slot = ClaimState::Free;
        assert_eq!(slot.try_mark_persistent(), Err(ClaimError::NotAllocated));
        assert_eq!(slot.try_clear_persistent(), Err(ClaimError::NotAllocated));
        assert_eq!(slot, ClaimState::Free);
    }

    #[test]
    fn test_sweep() {
        let mut claimed = ClaimState::Claimed;
        claimed.sweep();
        assert_eq!(claimed, ClaimState::Free);

        let mut persistent = ClaimState::Persistent;
        persistent.sweep();
        assert_eq!(persistent, ClaimState::Persistent);

        let mut free = ClaimState::Free;
        free.sweep();
        assert_eq!(free, ClaimState::Free);
    }
}

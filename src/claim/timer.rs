//! Timer unit/channel claim table
//!
//! Timer hardware is addressed as a grid: independent units, each with a
//! fixed set of output channels. A channel is the allocatable resource.
//! The table is sized at build time from [`CFG_TIMER_UNITS`] and
//! [`CFG_TIMER_CHANNELS`] and never allocates.

use crate::claim::ClaimState;
use crate::mcu::config::{CFG_TIMER_CHANNELS, CFG_TIMER_UNITS};
use crate::mcu::critical::critical_section;
use crate::mcu::cs_cell::CsCell;
use crate::mcu::error::{ClaimError, ClaimResult};
use crate::mcu::types::{ChannelIndex, UnitIndex};
use crate::port;

// ============ Claim Token ============

/// Ownership token for one timer channel
///
/// Returned by a successful [`allocate`]. The token carries no state of
/// its own; the table stays authoritative, and dropping a token does not
/// release the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerClaim {
    unit: UnitIndex,
    channel: ChannelIndex,
}

impl TimerClaim {
    /// Get the claimed unit index
    #[inline(always)]
    pub fn unit(&self) -> UnitIndex {
        self.unit
    }

    /// Get the claimed channel index
    #[inline(always)]
    pub fn channel(&self) -> ChannelIndex {
        self.channel
    }
}

// ============ Claim Table ============

/// Claim table covering every timer unit and channel
pub struct TimerClaimTable {
    slots: [[ClaimState; CFG_TIMER_CHANNELS]; CFG_TIMER_UNITS],
}

impl TimerClaimTable {
    pub const fn new() -> Self {
        Self {
            slots: [[ClaimState::Free; CFG_TIMER_CHANNELS]; CFG_TIMER_UNITS],
        }
    }

    pub(crate) fn reset(&mut self) {
        self.slots = [[ClaimState::Free; CFG_TIMER_CHANNELS]; CFG_TIMER_UNITS];
    }

    #[inline]
    fn in_range(unit: UnitIndex, channel: ChannelIndex) -> bool {
        (unit as usize) < CFG_TIMER_UNITS && (channel as usize) < CFG_TIMER_CHANNELS
    }

    fn slot_mut(
        &mut self,
        unit: UnitIndex,
        channel: ChannelIndex,
    ) -> ClaimResult<&mut ClaimState> {
        if !Self::in_range(unit, channel) {
            return Err(ClaimError::OutOfRange);
        }
        Ok(&mut self.slots[unit as usize][channel as usize])
    }

    /// Allocate one channel, optionally persistent from the start
    ///
    /// Fails with `Conflict` if the slot is owned in any form; the
    /// existing claim is untouched.
    pub fn allocate(
        &mut self,
        unit: UnitIndex,
        channel: ChannelIndex,
        persistent: bool,
    ) -> ClaimResult<TimerClaim> {
        self.slot_mut(unit, channel)?.try_claim(persistent)?;
        Ok(TimerClaim { unit, channel })
    }

    /// Release one channel
    pub fn free(&mut self, unit: UnitIndex, channel: ChannelIndex) -> ClaimResult<()> {
        self.slot_mut(unit, channel)?.try_release()
    }

    /// Mark an owned channel as surviving soft-restart sweeps
    pub fn mark_persistent(&mut self, unit: UnitIndex, channel: ChannelIndex) -> ClaimResult<()> {
        self.slot_mut(unit, channel)?.try_mark_persistent()
    }

    /// Clear the persistence of an owned channel
    pub fn clear_persistent(&mut self, unit: UnitIndex, channel: ChannelIndex) -> ClaimResult<()> {
        self.slot_mut(unit, channel)?.try_clear_persistent()
    }

    /// Get the state of one slot
    pub fn state(&self, unit: UnitIndex, channel: ChannelIndex) -> ClaimResult<ClaimState> {
        if !Self::in_range(unit, channel) {
            return Err(ClaimError::OutOfRange);
        }
        Ok(self.slots[unit as usize][channel as usize])
    }

    /// Check if a slot is available; out-of-range slots are never free
    pub fn is_free(&self, unit: UnitIndex, channel: ChannelIndex) -> bool {
        self.state(unit, channel).is_ok_and(|s| s.is_free())
    }

    /// Release every non-persistent claim
    pub fn sweep(&mut self) {
        for row in self.slots.iter_mut() {
            for slot in row.iter_mut() {
                slot.sweep();
            }
        }
    }
}

impl Default for TimerClaimTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Global timer claim table
pub(crate) static TIMER_CLAIMS: CsCell<TimerClaimTable> = CsCell::new(TimerClaimTable::new());

// ============ Public API ============

/// Allocate a timer channel from the global table
pub fn allocate(
    unit: UnitIndex,
    channel: ChannelIndex,
    persistent: bool,
) -> ClaimResult<TimerClaim> {
    critical_section(|cs| TIMER_CLAIMS.get(cs).allocate(unit, channel, persistent))
}

/// Release a timer channel in the global table
pub fn free(unit: UnitIndex, channel: ChannelIndex) -> ClaimResult<()> {
    critical_section(|cs| TIMER_CLAIMS.get(cs).free(unit, channel))
}

/// Mark a claimed channel as surviving soft-restart sweeps
pub fn mark_persistent(unit: UnitIndex, channel: ChannelIndex) -> ClaimResult<()> {
    critical_section(|cs| TIMER_CLAIMS.get(cs).mark_persistent(unit, channel))
}

/// Clear the persistence of a claimed channel
pub fn clear_persistent(unit: UnitIndex, channel: ChannelIndex) -> ClaimResult<()> {
    critical_section(|cs| TIMER_CLAIMS.get(cs).clear_persistent(unit, channel))
}

/// Check if a channel is available in the global table
pub fn is_free(unit: UnitIndex, channel: ChannelIndex) -> bool {
    critical_section(|cs| TIMER_CLAIMS.get(cs).is_free(unit, channel))
}

/// Get the state of one slot in the global table
pub fn state(unit: UnitIndex, channel: ChannelIndex) -> ClaimResult<ClaimState> {
    critical_section(|cs| TIMER_CLAIMS.get(cs).state(unit, channel))
}

/// Soft-restart sweep: release every non-persistent timer claim
///
/// Called once per soft restart by the embedding runtime, from mainline
/// context.
pub fn sweep() {
    debug_assert!(!port::is_isr_context());
    critical_section(|cs| TIMER_CLAIMS.get(cs).sweep());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let mut table = TimerClaimTable::new();

        assert_eq!(
            table.allocate(CFG_TIMER_UNITS as UnitIndex, 0, false),
            Err(ClaimError::OutOfRange)
        );
        assert_eq!(
            table.allocate(0, CFG_TIMER_CHANNELS as ChannelIndex, false),
            Err(ClaimError::OutOfRange)
        );
        assert_eq!(table.free(255, 255), Err(ClaimError::OutOfRange));
        assert_eq!(table.state(255, 0), Err(ClaimError::OutOfRange));
        assert!(!table.is_free(255, 0));
    }

    #[test]
    fn test_token_addresses_slot() {
        let mut table = TimerClaimTable::new();

        let claim = table.allocate(3, 1, false).unwrap();
        assert_eq!(claim.unit(), 3);
        assert_eq!(claim.channel(), 1);
        assert!(!table.is_free(3, 1));
        assert!(table.is_free(3, 0));
    }
}

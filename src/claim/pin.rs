//! Bare pin claim table
//!
//! Flat table over the package's GPIO pins, one slot per pin number.
//! Pin-name lookup (board silk to number) is generated board data and
//! lives outside this crate; everything here works on raw numbers.

use crate::claim::ClaimState;
use crate::mcu::config::CFG_PIN_COUNT;
use crate::mcu::critical::critical_section;
use crate::mcu::cs_cell::CsCell;
use crate::mcu::error::{ClaimError, ClaimResult};
use crate::mcu::types::PinNumber;
use crate::port;

/// Claim table covering every package pin
pub struct PinClaimTable {
    pins: [ClaimState; CFG_PIN_COUNT],
}

impl PinClaimTable {
    pub const fn new() -> Self {
        Self {
            pins: [ClaimState::Free; CFG_PIN_COUNT],
        }
    }

    pub(crate) fn reset(&mut self) {
        self.pins = [ClaimState::Free; CFG_PIN_COUNT];
    }

    fn slot_mut(&mut self, pin: PinNumber) -> ClaimResult<&mut ClaimState> {
        if (pin as usize) >= CFG_PIN_COUNT {
            return Err(ClaimError::OutOfRange);
        }
        Ok(&mut self.pins[pin as usize])
    }

    /// Claim one pin, optionally persistent from the start
    pub fn claim(&mut self, pin: PinNumber, persistent: bool) -> ClaimResult<()> {
        self.slot_mut(pin)?.try_claim(persistent)
    }

    /// Release one pin
    pub fn release(&mut self, pin: PinNumber) -> ClaimResult<()> {
        self.slot_mut(pin)?.try_release()
    }

    /// Mark a claimed pin as surviving soft-restart sweeps
    pub fn mark_persistent(&mut self, pin: PinNumber) -> ClaimResult<()> {
        self.slot_mut(pin)?.try_mark_persistent()
    }

    /// Clear the persistence of a claimed pin
    pub fn clear_persistent(&mut self, pin: PinNumber) -> ClaimResult<()> {
        self.slot_mut(pin)?.try_clear_persistent()
    }

    /// Get the state of one pin
    pub fn state(&self, pin: PinNumber) -> ClaimResult<ClaimState> {
        if (pin as usize) >= CFG_PIN_COUNT {
            return Err(ClaimError::OutOfRange);
        }
        Ok(self.pins[pin as usize])
    }

    /// Check if a pin is available; out-of-range pins are never free
    pub fn is_free(&self, pin: PinNumber) -> bool {
        self.state(pin).is_ok_and(|s| s.is_free())
    }

    /// Release every non-persistent claim
    pub fn sweep(&mut self) {
        for slot in self.pins.iter_mut() {
            slot.sweep();
        }
    }
}

impl Default for PinClaimTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Global pin claim table
pub(crate) static PIN_CLAIMS: CsCell<PinClaimTable> = CsCell::new(PinClaimTable::new());

// ============ Public API ============

/// Claim a pin in the global table
pub fn claim(pin: PinNumber, persistent: bool) -> ClaimResult<()> {
    critical_section(|cs| PIN_CLAIMS.get(cs).claim(pin, persistent))
}

/// Release a pin in the global table
pub fn release(pin: PinNumber) -> ClaimResult<()> {
    critical_section(|cs| PIN_CLAIMS.get(cs).release(pin))
}

/// Mark a claimed pin as surviving soft-restart sweeps
pub fn mark_persistent(pin: PinNumber) -> ClaimResult<()> {
    critical_section(|cs| PIN_CLAIMS.get(cs).mark_persistent(pin))
}

/// Clear the persistence of a claimed pin
pub fn clear_persistent(pin: PinNumber) -> ClaimResult<()> {
    critical_section(|cs| PIN_CLAIMS.get(cs).clear_persistent(pin))
}

/// Check if a pin is available in the global table
pub fn is_free(pin: PinNumber) -> bool {
    critical_section(|cs| PIN_CLAIMS.get(cs).is_free(pin))
}

/// Get the state of one pin in the global table
pub fn state(pin: PinNumber) -> ClaimResult<ClaimState> {
    critical_section(|cs| PIN_CLAIMS.get(cs).state(pin))
}

/// Soft-restart sweep: release every non-persistent pin claim
pub fn sweep() {
    debug_assert!(!port::is_isr_context());
    critical_section(|cs| PIN_CLAIMS.get(cs).sweep());
}

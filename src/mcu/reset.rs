//! Restart request state machine
//!
//! One consolidated request record decides what the next restart does:
//! come back up normally, come back up in the diagnostic safe mode, or
//! hand the part to its secondary loader. Requests overwrite each other;
//! the request is consumed when the restart executes. Safe mode is the
//! exception: requesting it takes effect immediately and is one-way.

use portable_atomic::{AtomicU8, Ordering};

use crate::mcu::types::{NextReset, RunMode, SafeModeReason};
use crate::port;

// ============ Reset State ============

/// Atomic restart request record
pub struct ResetState {
    next: AtomicU8,
    reason: AtomicU8,
}

impl ResetState {
    const fn new() -> Self {
        Self {
            next: AtomicU8::new(NextReset::Normal as u8),
            reason: AtomicU8::new(SafeModeReason::None as u8),
        }
    }

    pub(crate) fn reset(&self) {
        self.next.store(NextReset::Normal as u8, Ordering::SeqCst);
        self.reason.store(SafeModeReason::None as u8, Ordering::SeqCst);
    }

    /// Get the pending restart request
    #[inline(always)]
    pub fn next(&self) -> NextReset {
        NextReset::from_u8(self.next.load(Ordering::Acquire))
    }

    /// Get the recorded safe-mode reason
    #[inline(always)]
    pub fn reason(&self) -> SafeModeReason {
        SafeModeReason::from_u8(self.reason.load(Ordering::Acquire))
    }

    #[inline(always)]
    pub(crate) fn set_next(&self, next: NextReset) {
        self.next.store(next as u8, Ordering::Release);
    }

    #[inline(always)]
    pub(crate) fn set_reason(&self, reason: SafeModeReason) {
        self.reason.store(reason as u8, Ordering::Release);
    }
}

/// Global restart request instance
pub(crate) static RESET: ResetState = ResetState::new();

// ============ Public API ============

/// Select the mode the device should come up in after the next restart
///
/// Each call overwrites any earlier request, so `Normal` cancels a
/// pending bootloader request. `SafeMode` does not wait for a restart:
/// it transfers into the diagnostic path immediately and never returns
/// to the caller.
pub fn request_reset_mode(mode: RunMode) {
    match mode {
        RunMode::Normal => RESET.set_next(NextReset::Normal),
        RunMode::SafeMode => reset_into_safe_mode(SafeModeReason::Programmatic),
        RunMode::Bootloader => RESET.set_next(NextReset::BootloaderPending),
    }
}

/// Carry out the restart, honoring the pending request
///
/// The request is consumed before control transfers, so a device that
/// comes back through ordinary startup sees `Normal` pending. With
/// `BootloaderPending` control goes to the secondary loader in system
/// memory; every other request ends in a full hardware reset.
pub fn execute_reset() -> ! {
    let pending = RESET.next();
    RESET.set_next(NextReset::Normal);

    match pending {
        NextReset::BootloaderPending => port::enter_bootloader(),
        _ => port::system_reset(),
    }
}

/// Restart straight into safe mode, recording why
///
/// Terminal path for unrecoverable faults: mismatched critical-section
/// exits and the CPU fault handler land here, and the embedding runtime
/// may route its own invariant violations through it. Mainline execution
/// does not continue past this point.
pub fn reset_into_safe_mode(reason: SafeModeReason) -> ! {
    RESET.set_reason(reason);
    RESET.set_next(NextReset::SafeMode);
    port::system_reset()
}

/// Get the pending restart request
#[inline(always)]
pub fn next_reset() -> NextReset {
    RESET.next()
}

/// Get the reason recorded by the last safe-mode entry
#[inline(always)]
pub fn safe_mode_reason() -> SafeModeReason {
    RESET.reason()
}

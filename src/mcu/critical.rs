//! Nesting-safe critical section guard
//!
//! Protects shared state by masking interrupt delivery at the processor.
//! Sections nest: a depth counter tracks outstanding enters, and delivery
//! is only unmasked again when the outermost section exits. An exit with
//! no matching enter is treated as fatal corruption and escalates to a
//! safe-mode restart.

use portable_atomic::{AtomicU32, Ordering};

use crate::mcu::reset;
use crate::mcu::types::{NestingCtr, SafeModeReason};
use crate::port;

// ============ Nesting State ============

/// Atomic nesting depth for the guard
pub struct NestingState {
    depth: AtomicU32,
}

impl NestingState {
    const fn new() -> Self {
        Self {
            depth: AtomicU32::new(0),
        }
    }

    pub(crate) fn reset(&self) {
        self.depth.store(0, Ordering::SeqCst);
    }

    /// Get current nesting depth
    #[inline(always)]
    pub fn depth(&self) -> NestingCtr {
        self.depth.load(Ordering::Relaxed)
    }

    /// Increment depth; interrupts must already be masked
    ///
    /// Plain load/store is enough here: nothing can interleave while
    /// delivery is masked, and it avoids read-modify-write ops that on
    /// some cores would re-enter this module.
    #[inline(always)]
    fn increment(&self) {
        let depth = self.depth.load(Ordering::Relaxed);
        self.depth.store(depth + 1, Ordering::Relaxed);
    }

    /// Decrement depth, returning the new value; interrupts must be masked
    #[inline(always)]
    fn decrement(&self) -> NestingCtr {
        let depth = self.depth.load(Ordering::Relaxed);
        self.depth.store(depth - 1, Ordering::Relaxed);
        depth - 1
    }
}

/// Global nesting state instance
pub(crate) static NESTING: NestingState = NestingState::new();

// ============ Enter / Exit ============

/// Enter a critical section
///
/// Masks interrupt delivery and bumps the nesting depth. Safe to call
/// when already inside a section; the mask instruction is idempotent.
#[inline]
pub fn critical_enter() {
    port::disable_interrupts();
    port::memory_barrier();
    NESTING.increment();
}

/// Exit a critical section
///
/// Drops the nesting depth; only the outermost exit unmasks interrupt
/// delivery. Calling with depth zero means an enter/exit mismatch
/// somewhere in the program, and shared state can no longer be trusted.
/// That case restarts into safe mode and does not return.
#[inline]
pub fn critical_exit() {
    if NESTING.depth() == 0 {
        // Mismatched enter/exit. Continuing would unmask delivery inside
        // someone else's protected region.
        reset::reset_into_safe_mode(SafeModeReason::InterruptError);
    }

    if NESTING.decrement() > 0 {
        return;
    }

    port::memory_barrier();
    unsafe { port::enable_interrupts() };
}

/// Get current nesting depth
///
/// Zero means no section is active and delivery is unmasked (unless
/// masked by other means).
#[inline(always)]
pub fn nesting_depth() -> NestingCtr {
    NESTING.depth()
}

// ============ RAII Guard ============

/// RAII guard for critical sections
///
/// Entering masks interrupt delivery; dropping the guard exits the
/// section, unmasking once the outermost guard goes away. Guards may be
/// nested freely as long as they drop in reverse order of creation,
/// which scoping guarantees.
pub struct CriticalSection {
    _private: (),
}

impl CriticalSection {
    /// Enter a critical section, returning a guard that exits on drop
    #[inline(always)]
    pub fn enter() -> Self {
        critical_enter();
        CriticalSection { _private: () }
    }

    /// Check if any critical section is currently active
    #[inline(always)]
    pub fn is_active() -> bool {
        NESTING.depth() > 0
    }
}

impl Drop for CriticalSection {
    #[inline(always)]
    fn drop(&mut self) {
        critical_exit();
    }
}

/// Execute a closure with interrupt delivery masked
///
/// The closure receives a reference to the guard, which doubles as the
/// access token for [`CsCell`](crate::mcu::cs_cell::CsCell) protected
/// data.
#[inline]
pub fn critical_section<F, R>(f: F) -> R
where
    F: FnOnce(&CriticalSection) -> R,
{
    let cs = CriticalSection::enter();
    f(&cs)
}

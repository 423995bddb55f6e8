//! Guard-gated storage cell
//!
//! Wrapper for shared mutable state that must only be touched with
//! interrupt delivery masked. Access requires a live [`CriticalSection`]
//! token, so the borrow cannot outlive the protected region it was
//! taken in.

use core::cell::UnsafeCell;

use crate::mcu::critical::CriticalSection;

/// A cell whose contents are only reachable inside a critical section.
pub struct CsCell<T>(UnsafeCell<T>);

// Exclusive access is enforced by interrupt masking, not by the type
// system, so cross-"thread" sharing of the cell itself is fine.
unsafe impl<T> Sync for CsCell<T> {}

impl<T> CsCell<T> {
    /// Create a new cell
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self(UnsafeCell::new(value))
    }

    /// Borrow the contents mutably under an active guard
    #[inline(always)]
    pub fn get(&self, _cs: &CriticalSection) -> &mut T {
        unsafe { &mut *self.0.get() }
    }

    /// Borrow the contents without a guard token
    ///
    /// # Safety
    /// Caller must guarantee no interrupt can observe or mutate the cell
    /// for the lifetime of the returned borrow, and that no other borrow
    /// of this cell is live.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self) -> &mut T {
        unsafe { &mut *self.0.get() }
    }
}

//! Port layer - platform primitives consumed by the core
//!
//! Everything that touches the processor directly lives here: interrupt
//! masking, memory barriers, restart entry points, and busy-wait delay.
//! The core never reaches past this boundary.

#[cfg(target_arch = "arm")]
pub mod cortex_m4;

#[cfg(target_arch = "arm")]
pub use cortex_m4::*;

// Stub implementations for non-ARM targets (for testing)
#[cfg(not(target_arch = "arm"))]
pub mod stub {
    use core::sync::atomic::Ordering;

    use portable_atomic::AtomicBool;

    /// Simulated interrupt mask so host tests can observe enter/exit
    /// balance the way target code observes PRIMASK.
    static IRQ_ENABLED: AtomicBool = AtomicBool::new(true);

    pub fn disable_interrupts() {
        IRQ_ENABLED.store(false, Ordering::SeqCst);
    }

    pub unsafe fn enable_interrupts() {
        IRQ_ENABLED.store(true, Ordering::SeqCst);
    }

    pub fn memory_barrier() {
        core::sync::atomic::fence(Ordering::SeqCst);
    }

    pub fn interrupts_enabled() -> bool {
        IRQ_ENABLED.load(Ordering::SeqCst)
    }

    pub fn is_isr_context() -> bool {
        false
    }

    pub fn system_reset() -> ! {
        panic!("system reset is not available on this platform");
    }

    pub fn enter_bootloader() -> ! {
        panic!("bootloader entry is not available on this platform");
    }

    pub fn busy_wait_us(_us: u32) {
        // No-op for testing
    }
}

#[cfg(not(target_arch = "arm"))]
pub use stub::*;

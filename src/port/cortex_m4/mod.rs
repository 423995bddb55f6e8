//! Cortex-M4 port implementation
//!
//! Interrupt masking, barriers, restart entry points, and busy-wait for
//! STM32F4-class parts.

use core::arch::asm;

use cortex_m::peripheral::SCB;

use crate::mcu::config::CFG_SYSCLK_HZ;

/// Base of the ROM bootloader in system memory on STM32F4 parts.
/// Word 0 holds the loader's initial stack pointer, word 1 its entry.
const SYSTEM_MEMORY_BASE: u32 = 0x1FFF_0000;

/// Mask interrupt delivery at the processor (CPSID I)
///
/// Redundant disables are harmless; the hardware instruction is
/// idempotent.
#[inline(always)]
pub fn disable_interrupts() {
    cortex_m::interrupt::disable();
}

/// Unmask interrupt delivery at the processor (CPSIE I)
///
/// # Safety
/// Caller must be leaving the outermost critical section; enabling while
/// a protected region is still active breaks its atomicity.
#[inline(always)]
pub unsafe fn enable_interrupts() {
    unsafe { cortex_m::interrupt::enable() }
}

/// Data memory barrier
///
/// Keeps prior side effects from being reordered past a critical-section
/// boundary.
#[inline(always)]
pub fn memory_barrier() {
    cortex_m::asm::dmb();
}

/// Whether interrupt delivery is currently unmasked (PRIMASK clear)
#[inline(always)]
pub fn interrupts_enabled() -> bool {
    cortex_m::register::primask::read().is_active()
}

/// Check if currently executing in an ISR context
#[inline]
pub fn is_isr_context() -> bool {
    let ipsr: u32;
    unsafe {
        asm!(
            "mrs {}, IPSR",
            out(reg) ipsr,
            options(nomem, nostack, preserves_flags)
        );
    }
    ipsr != 0
}

/// Full hardware system reset, does not return
#[inline]
pub fn system_reset() -> ! {
    SCB::sys_reset()
}

/// Transfer control to the ROM bootloader in system memory
///
/// The loader expects a clean machine: interrupts masked and its own
/// stack pointer installed before the jump.
pub fn enter_bootloader() -> ! {
    cortex_m::interrupt::disable();
    unsafe {
        let stack = core::ptr::read_volatile(SYSTEM_MEMORY_BASE as *const u32);
        let entry = core::ptr::read_volatile((SYSTEM_MEMORY_BASE + 4) as *const u32);
        cortex_m::register::msp::write(stack);
        let loader: extern "C" fn() -> ! = core::mem::transmute(entry);
        loader()
    }
}

/// Busy-wait for at least `us` microseconds
///
/// Cycle-counted against [`CFG_SYSCLK_HZ`]; drivers use this for short
/// setup delays, the core itself never does.
#[inline]
pub fn busy_wait_us(us: u32) {
    cortex_m::asm::delay(us.saturating_mul(CFG_SYSCLK_HZ / 1_000_000));
}

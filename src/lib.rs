//! Hardware-ownership core for an embedded script runtime
//!
//! The low-level layer that decides who owns the hardware:
//! - Nesting-safe critical sections over interrupt masking
//! - Restart requests (normal / safe mode / bootloader) and execution
//! - Build-time sized claim tables for timer channels and pins
//!
//! Everything above this crate (object model, driver bindings, board
//! definitions) goes through these tables instead of touching the
//! peripherals' ownership state directly.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]

// ============ Critical Section Hook ============

// Routes the `critical-section` ecosystem crate through the nesting
// guard, so sections taken by third-party code nest correctly inside
// ours. The restore token is unused; the depth counter carries the
// state.
#[cfg(target_arch = "arm")]
mod cs_impl {
    use critical_section::{set_impl, Impl, RawRestoreState};

    struct NestingGuardCriticalSection;
    set_impl!(NestingGuardCriticalSection);

    unsafe impl Impl for NestingGuardCriticalSection {
        unsafe fn acquire() -> RawRestoreState {
            crate::mcu::critical::critical_enter();
            false
        }

        unsafe fn release(_token: RawRestoreState) {
            crate::mcu::critical::critical_exit();
        }
    }
}

// ============ Modules ============

pub mod log;
mod lang_items;

pub mod claim;
pub mod mcu;
pub mod port;

// ============ Re-exports ============

pub use mcu::config;
pub use mcu::config::*;
pub use mcu::critical;
pub use mcu::critical::{critical_enter, critical_exit, critical_section, nesting_depth, CriticalSection};
pub use mcu::cs_cell::CsCell;
pub use mcu::error;
pub use mcu::error::{ClaimError, ClaimResult};
pub use mcu::init;
pub use mcu::reset;
pub use mcu::reset::{
    execute_reset, next_reset, request_reset_mode, reset_into_safe_mode, safe_mode_reason,
};
pub use mcu::types;
pub use mcu::types::*;

pub use claim::ClaimState;

pub use port::{busy_wait_us, interrupts_enabled, is_isr_context};

#[cfg(feature = "pac")]
pub use stm32_metapac as pac;

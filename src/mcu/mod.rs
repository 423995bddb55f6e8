//! Core hardware-ownership state machines
//!
//! Critical-section guard, restart request state, and their shared
//! support types.

pub mod config;
pub mod critical;
pub mod cs_cell;
pub mod error;
pub mod reset;
pub mod types;

/// Initialize the hardware-ownership core
///
/// Establishes the well-defined baseline all three state machines start
/// from: nesting depth zero, a `Normal` restart request with no recorded
/// safe-mode reason, and every claim slot free. Must run before any
/// interrupt source is unmasked and before any claim is made; it does
/// not serialize against either.
pub fn init() {
    critical::NESTING.reset();
    reset::RESET.reset();
    crate::claim::reset_tables();
}

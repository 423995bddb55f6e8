//! Compile-time configuration for the hardware-ownership core
//!
//! These constants size the claim tables and calibrate the port layer.
//! They describe the board, so integrators tune them per target.

/// Number of timer units tracked by the timer claim table
pub const CFG_TIMER_UNITS: usize = 8;

/// Output channels per timer unit
pub const CFG_TIMER_CHANNELS: usize = 4;

/// Number of package pins tracked by the pin claim table
pub const CFG_PIN_COUNT: usize = 48;

/// Core clock in Hz, used to convert microseconds to busy-wait cycles
///
/// Matches the HSI default; boards that raise the core clock after boot
/// should adjust this or accept proportionally shorter waits.
pub const CFG_SYSCLK_HZ: u32 = 16_000_000;

//! Core type definitions for the hardware-ownership core
//!
//! Strongly-typed restart modes and fault reasons; the dynamic flag pairs
//! of older firmwares collapse into single enums here so contradictory
//! combinations cannot be represented.

/// Critical-section nesting counter
pub type NestingCtr = u32;

/// Package pin number
pub type PinNumber = u8;

/// Timer unit index
pub type UnitIndex = u8;

/// Channel index within a timer unit
pub type ChannelIndex = u8;

/// Behavior requested for the next device restart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RunMode {
    /// Plain restart back into the firmware
    Normal = 0,
    /// Leave normal execution for the diagnostic path right away
    SafeMode = 1,
    /// Restart into the secondary program loader for firmware update
    Bootloader = 2,
}

/// Consolidated pending-restart state
///
/// `SafeMode` is terminal for the current execution; `BootloaderPending`
/// is consumed by the next `execute_reset` call. There is no transition
/// back to `Normal` short of a physical restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NextReset {
    Normal = 0,
    SafeMode = 1,
    BootloaderPending = 2,
}

impl NextReset {
    /// Decode from the atomic storage representation
    #[inline]
    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            1 => NextReset::SafeMode,
            2 => NextReset::BootloaderPending,
            _ => NextReset::Normal,
        }
    }
}

/// Why the system left normal execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SafeModeReason {
    /// Normal execution, no fault recorded
    None = 0,
    /// Unbalanced critical-section exit; some protected region is now
    /// unprotected and the interrupt state can no longer be trusted
    InterruptError = 1,
    /// Explicitly requested through the reset controller
    Programmatic = 2,
    /// CPU hard fault
    HardFault = 3,
}

impl SafeModeReason {
    /// Decode from the atomic storage representation
    #[inline]
    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            1 => SafeModeReason::InterruptError,
            2 => SafeModeReason::Programmatic,
            3 => SafeModeReason::HardFault,
            _ => SafeModeReason::None,
        }
    }
}

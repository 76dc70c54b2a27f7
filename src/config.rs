//! # Configuration
//!
//! Compile-time constants for the target. Nothing here is read or changed
//! at runtime; resource ceilings live with their resource types (see
//! [`crate::resource`]), not in this module.

/// Number of priority bits implemented by the NVIC.
///
/// STM32F4 parts implement the upper 4 bits of each 8-bit priority field,
/// giving 16 hardware levels. Other Cortex-M4 parts use 3 (e.g. some NXP
/// Kinetis) and must change this constant.
pub const NVIC_PRIO_BITS: u8 = 4;

/// Strongest logical level a BASEPRI mask can express.
///
/// Logical `1 << NVIC_PRIO_BITS` would encode to BASEPRI = 0, which the
/// core interprets as "masking disabled", so the usable ceilings stop one
/// below it.
pub const MAX_CEILING: u8 = ((1u16 << NVIC_PRIO_BITS) - 1) as u8;

/// System clock frequency in Hz (STM32F4 at 16 MHz HSI). Demo firmware only.
pub const SYSTEM_CLOCK_HZ: u32 = 16_000_000;

/// SysTick frequency in Hz. Demo firmware only.
pub const TICK_HZ: u32 = 1000;

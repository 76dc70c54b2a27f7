//! # Cortex-M4 Port
//!
//! BASEPRI-backed priority mask for ARMv7E-M.
//!
//! ## Register convention
//!
//! BASEPRI holds an 8-bit priority of which only the top
//! [`NVIC_PRIO_BITS`] are implemented. A *lower* non-zero value is a
//! *stronger* mask; 0 disables masking. [`Priority::to_hw`] and
//! [`Priority::from_hw`] translate to and from the logical levels the rest
//! of the crate uses.
//!
//! ## Instructions
//!
//! | Operation            | Instruction             |
//! |----------------------|-------------------------|
//! | `read`               | `mrs rX, BASEPRI`       |
//! | `raise_to_at_least`  | `msr BASEPRI_MAX, rX`   |
//! | `write_exact`        | `msr BASEPRI, rX`       |
//! | entry barrier        | `dsb; isb`              |
//! | exit barrier         | `dsb`                   |
//!
//! BASEPRI_MAX writes only when the new value is non-zero and stronger than
//! the current one, which is exactly the raise-is-a-maximum rule, in one
//! instruction.
//!
//! ## Exception priorities
//!
//! PRIMASK, FAULTMASK, NMI and HardFault are not affected by BASEPRI. A
//! source configured at a logical level above [`MAX_CEILING`] can never be
//! masked by a lock and must not touch any locked resource.

use cortex_m::asm;
use cortex_m::interrupt::InterruptNumber;
use cortex_m::peripheral::scb::SystemHandler;
use cortex_m::peripheral::{NVIC, SCB};
use cortex_m::register::{basepri, basepri_max};

use crate::barrier::Barrier;
use crate::config::{MAX_CEILING, NVIC_PRIO_BITS};
use crate::mask::PriorityMask;
use crate::priority::Priority;

/// The Cortex-M4 port. Zero-sized; the register it drives is core-wide.
#[derive(Debug, Clone, Copy)]
pub struct CortexM4;

impl PriorityMask for CortexM4 {
    #[inline(always)]
    fn read() -> Priority {
        Priority::from_hw(basepri::read())
    }

    #[inline(always)]
    unsafe fn raise_to_at_least(level: Priority) {
        // BASEPRI_MAX ignores 0, so raising to IDLE is a no-op as required.
        basepri_max::write(level.to_hw());
    }

    #[inline(always)]
    unsafe fn write_exact(level: Priority) {
        basepri::write(level.to_hw());
    }
}

impl Barrier for CortexM4 {
    #[inline(always)]
    fn entry() {
        asm::dsb();
        asm::isb();
    }

    #[inline(always)]
    fn exit() {
        asm::dsb();
    }
}

// ---------------------------------------------------------------------------
// Source priority configuration
// ---------------------------------------------------------------------------

/// Program a device interrupt's priority from a logical level.
///
/// Run during start-up, before the interrupt is unmasked in the NVIC.
///
/// # Safety
/// Changing a priority while a resource it accesses is locked can break
/// the ceiling that lock relies on.
pub unsafe fn set_interrupt_priority<I>(nvic: &mut NVIC, interrupt: I, level: Priority)
where
    I: InterruptNumber,
{
    log::debug!(
        "irq {} -> {} (raw {:#04x}, {} prio bits)",
        interrupt.number(),
        level,
        level.to_hw(),
        NVIC_PRIO_BITS
    );
    nvic.set_priority(interrupt, level.to_hw());
}

/// Program a system exception's priority from a logical level.
///
/// # Safety
/// Same as [`set_interrupt_priority`].
pub unsafe fn set_exception_priority(scb: &mut SCB, handler: SystemHandler, level: Priority) {
    log::debug!("system exception -> {} (raw {:#04x})", level, level.to_hw());
    scb.set_priority(handler, level.to_hw());
}

/// Whether a source at `level` can be held off by some lock.
#[inline]
pub const fn is_maskable(level: Priority) -> bool {
    level.level() >= 1 && level.level() <= MAX_CEILING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_sources_are_not_maskable() {
        assert!(!is_maskable(Priority::IDLE));
        assert!(is_maskable(Priority::new(1)));
        assert!(is_maskable(Priority::MAX));
    }

    #[test]
    fn test_raise_to_idle_encodes_zero() {
        // BASEPRI_MAX discards a zero write, which keeps a raise to IDLE
        // from ever lowering the mask.
        assert_eq!(Priority::IDLE.to_hw(), 0);
    }
}

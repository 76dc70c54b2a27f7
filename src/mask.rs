//! # Priority-Mask Register Interface
//!
//! Abstraction over the core-wide register that masks preemption by
//! priority (BASEPRI on ARMv7-M). There is exactly one such register per
//! core, so the trait is implemented by a zero-sized port type and every
//! operation is an associated function rather than a method on a handle.
//!
//! Each operation must be indivisible with respect to preemption on the
//! same core. On real hardware that holds because each one is a single
//! `mrs`/`msr` instruction.

use crate::priority::Priority;

/// Read / raise / restore access to the preemption mask.
pub trait PriorityMask {
    /// Current mask. No side effects.
    fn read() -> Priority;

    /// Set the mask to `level` only if `level` is stronger than the current
    /// mask; otherwise leave it unchanged.
    ///
    /// The default body is a compare-then-write for hardware without a
    /// native "set if stronger" register. Ports whose hardware has one
    /// (BASEPRI_MAX) override it with the single-instruction form.
    ///
    /// # Safety
    /// Changes core-wide state that outer critical sections rely on. The
    /// caller must restore the previous mask with [`write_exact`] in LIFO
    /// order relative to every other raise on this core.
    ///
    /// [`write_exact`]: PriorityMask::write_exact
    #[inline(always)]
    unsafe fn raise_to_at_least(level: Priority) {
        if level > Self::read() {
            Self::write_exact(level);
        }
    }

    /// Unconditionally set the mask to `level`. Used for restoration only,
    /// never for raising.
    ///
    /// # Safety
    /// Lowering the mask below a level an active critical section depends
    /// on breaks that section's mutual exclusion.
    unsafe fn write_exact(level: Priority);
}

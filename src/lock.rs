//! # Scoped Lock
//!
//! SRP critical sections. Acquiring a lock raises the preemption mask to at
//! least the resource's ceiling; dropping it restores the mask it found.
//!
//! ## Protocol
//!
//! ```text
//! acquire                         release (Drop)
//!   old = mask.read()               barrier.exit()
//!   mask.raise_to_at_least(C)       mask.write_exact(old)
//!   barrier.entry()
//!   ── protected code ──────────────►
//! ```
//!
//! Raising is a maximum, so an inner lock with a weaker ceiling leaves the
//! mask where the outer lock put it, and its release writes back that same
//! value. Restoring the saved value is only correct if locks are released
//! in reverse acquisition order. [`lock`] and [`lock_on`] guarantee that by
//! scoping; [`Lock::acquire`] hands the obligation to the caller.
//!
//! ## Exit paths
//!
//! Release is the guard's `Drop`, so it runs on fall-through, early return,
//! `?` and unwinding. Firmware built with `panic = "abort"` or `panic-halt`
//! never unwinds; a panic there halts with the mask still raised.
//! `core::mem::forget` on a guard skips release and is never allowed.

use core::marker::PhantomData;

use crate::arch::cortex_m4::CortexM4;
use crate::arch::Port;
use crate::priority::Priority;
use crate::resource::Resource;

/// An active critical section over resource `R` on port `P`.
///
/// Holds the mask value observed immediately before acquisition. Neither
/// `Send` nor `Sync`: it must be released by the context that took it.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct Lock<R: Resource, P: Port = CortexM4> {
    old: Priority,
    _marker: PhantomData<(R, P, *const ())>,
}

impl<R: Resource, P: Port> Lock<R, P> {
    /// Raise the mask to at least `R::CEILING` and return the guard.
    ///
    /// Cannot block or fail. Afterwards the mask is the stronger of its
    /// previous value and the ceiling.
    ///
    /// # Safety
    /// Guards must be dropped in exactly the reverse order they were
    /// acquired on this core, and must not be leaked. Dropping an outer
    /// guard first lowers the mask under a still-active inner section.
    #[inline(always)]
    pub unsafe fn acquire() -> Self {
        let old = P::read();
        P::raise_to_at_least(R::CEILING);
        P::entry();
        Lock {
            old,
            _marker: PhantomData,
        }
    }

    /// Ceiling this lock raised toward.
    #[inline(always)]
    pub const fn ceiling(&self) -> Priority {
        R::CEILING
    }

    /// Mask value that will be restored on release.
    #[inline(always)]
    pub const fn saved(&self) -> Priority {
        self.old
    }
}

impl<R: Resource, P: Port> Drop for Lock<R, P> {
    #[inline(always)]
    fn drop(&mut self) {
        P::exit();
        // SAFETY: LIFO release is the acquire contract, so `old` is the
        // mask every enclosing section expects to see again.
        unsafe { P::write_exact(self.old) };
    }
}

/// Run `f` with resource `R` locked on the Cortex-M4 port.
///
/// ```ignore
/// srp_lock::resources! { Uart = 3; }
///
/// let sent = srp_lock::lock::<Uart, _, _>(|| unsafe { TX_RING.push(b'x') });
/// ```
#[inline(always)]
pub fn lock<R, F, T>(f: F) -> T
where
    R: Resource,
    F: FnOnce() -> T,
{
    lock_on::<R, CortexM4, F, T>(f)
}

/// Run `f` with resource `R` locked on port `P`.
#[inline(always)]
pub fn lock_on<R, P, F, T>(f: F) -> T
where
    R: Resource,
    P: Port,
    F: FnOnce() -> T,
{
    // SAFETY: the guard lives exactly as long as this frame, and any lock
    // taken inside `f` is released before `f` returns.
    let _guard = unsafe { Lock::<R, P>::acquire() };
    f()
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------

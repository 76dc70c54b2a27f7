//! # srp-lock Demo Firmware
//!
//! Three contexts share two resources:
//!
//! | Context     | Priority | Touches          |
//! |-------------|----------|------------------|
//! | thread mode | 0        | `Counter`        |
//! | `PendSV`    | 1        | `Counter`, `Stamp` |
//! | `SysTick`   | 2        | `Stamp`          |
//!
//! Ceilings follow from the table: `Counter` = 1, `Stamp` = 2. SysTick
//! stamps the tick count and pends PendSV; PendSV folds the stamp into the
//! counter; thread mode samples the counter between `wfi`s. Thread mode
//! holding `Counter` still lets SysTick in, since SysTick never touches it.

#![no_std]
#![no_main]

use core::cell::UnsafeCell;

use cortex_m::peripheral::scb::SystemHandler;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SCB;
use cortex_m_rt::{entry, exception};
use panic_halt as _;

use srp_lock::arch::cortex_m4::set_exception_priority;
use srp_lock::config::{SYSTEM_CLOCK_HZ, TICK_HZ};
use srp_lock::{lock, resources, Priority};

const PENDSV_PRIORITY: Priority = Priority::new(1);
const SYSTICK_PRIORITY: Priority = Priority::new(2);

resources! {
    /// Events folded in by PendSV, sampled by thread mode.
    Counter = 1;
    /// Last tick seen by SysTick, consumed by PendSV.
    Stamp = 2;
}

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Storage only reachable through a lock on its resource.
struct Shared<T>(UnsafeCell<T>);

// SAFETY: every access below happens under the matching resource lock.
unsafe impl<T> Sync for Shared<T> {}

impl<T> Shared<T> {
    const fn new(value: T) -> Self {
        Shared(UnsafeCell::new(value))
    }
}

static COUNTER: Shared<u32> = Shared::new(0);
static STAMP: Shared<Option<u32>> = Shared::new(None);
static TICKS: Shared<u32> = Shared::new(0);

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[exception]
fn SysTick() {
    // TICKS is only touched here; SysTick cannot preempt itself.
    let now = unsafe {
        let ticks = &mut *TICKS.0.get();
        *ticks = ticks.wrapping_add(1);
        *ticks
    };

    lock::<Stamp, _, _>(|| unsafe { *STAMP.0.get() = Some(now) });
    SCB::set_pendsv();
}

#[exception]
fn PendSV() {
    let stamp = lock::<Stamp, _, _>(|| unsafe { (*STAMP.0.get()).take() });
    if let Some(tick) = stamp {
        lock::<Counter, _, _>(|| unsafe {
            let counter = &mut *COUNTER.0.get();
            *counter = counter.wrapping_add(tick & 1);
        });
    }
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

#[entry]
fn main() -> ! {
    let mut cp = cortex_m::Peripherals::take().expect("core peripherals already taken");

    unsafe {
        set_exception_priority(&mut cp.SCB, SystemHandler::PendSV, PENDSV_PRIORITY);
        set_exception_priority(&mut cp.SCB, SystemHandler::SysTick, SYSTICK_PRIORITY);
    }

    cp.SYST.set_reload(SYSTEM_CLOCK_HZ / TICK_HZ - 1);
    cp.SYST.clear_current();
    cp.SYST.set_clock_source(SystClkSource::Core);
    cp.SYST.enable_counter();
    cp.SYST.enable_interrupt();

    let mut last = 0u32;
    loop {
        let seen = lock::<Counter, _, _>(|| unsafe { *COUNTER.0.get() });
        // PendSV only ever adds, so the sampled value never goes backwards
        // short of wrapping.
        debug_assert!(seen >= last || last - seen > u32::MAX / 2);
        last = seen;
        cortex_m::asm::wfi();
    }
}

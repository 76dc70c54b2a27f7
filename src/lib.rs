//! # srp-lock — Stack Resource Policy locks for Cortex-M4
//!
//! Zero-overhead critical sections for single-core, interrupt-driven
//! firmware. Locking a resource raises the BASEPRI preemption mask to the
//! resource's *ceiling* (the priority of its most urgent accessor), so no
//! handler that could touch the resource can preempt the critical section.
//! Everything is resolved at compile time: no runtime table, no branches
//! on configuration, no allocation.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │            Application tasks and handlers               │
//! ├────────────────────────────────────────────────────────┤
//! │             Scoped Lock (lock.rs)                       │
//! │        lock() · lock_on() · Lock::acquire() · Drop      │
//! ├──────────────────────┬─────────────────────────────────┤
//! │  Ceiling table       │  Port (arch/)                   │
//! │  resource.rs         │  mask.rs     · PriorityMask     │
//! │  ─ Resource::CEILING │  barrier.rs  · Barrier          │
//! │  ─ resources!        │  cortex_m4.rs· BASEPRI, DSB/ISB │
//! ├──────────────────────┴─────────────────────────────────┤
//! │      Priority levels (priority.rs) · config.rs          │
//! ├────────────────────────────────────────────────────────┤
//! │         ARM Cortex-M4 Hardware (Thumb-2)                │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! srp_lock::resources! {
//!     /// Touched by thread mode (P0), UART RX (P2) and DMA done (P3).
//!     TxRing = 3;
//! }
//!
//! fn enqueue(byte: u8) {
//!     srp_lock::lock::<TxRing, _, _>(|| unsafe { TX_RING.push(byte) });
//! }
//! ```
//!
//! ## Rules
//!
//! - Ceilings come from whole-program analysis and are trusted as given.
//! - Locks nest. Raising is a maximum, so a weaker inner ceiling leaves the
//!   mask alone, and each release writes back exactly what it found.
//! - Locks must be released in reverse order. The closure API enforces
//!   this; explicit guards ([`Lock::acquire`]) make it the caller's job.
//! - No allocation, no `std`, no blocking: acquire and release are a
//!   handful of instructions each.

#![no_std]

pub mod arch;
pub mod barrier;
pub mod config;
pub mod lock;
pub mod mask;
pub mod priority;
pub mod resource;

pub use arch::Port;
pub use lock::{lock, lock_on, Lock};
pub use priority::{Priority, PriorityError};
pub use resource::Resource;

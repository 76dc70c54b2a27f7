//! Host-side port for unit tests.
//!
//! Keeps the mask in a thread-local so tests running in parallel do not
//! share it, and journals every register write and barrier so ordering can
//! be asserted. Uses the trait's default compare-then-write raise.

extern crate std;

use std::cell::{Cell, RefCell};
use std::vec::Vec;

use crate::barrier::Barrier;
use crate::mask::PriorityMask;
use crate::priority::Priority;

/// Something the port was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Mask written with this value (raise path or restore path).
    Write(Priority),
    EntryBarrier,
    ExitBarrier,
    /// Marker pushed by test code to locate the protected body.
    Body,
}

std::thread_local! {
    static MASK: Cell<Priority> = const { Cell::new(Priority::IDLE) };
    static JOURNAL: RefCell<Vec<Event>> = const { RefCell::new(Vec::new()) };
}

#[derive(Debug, Clone, Copy)]
pub struct Sim;

impl Sim {
    /// Reset this thread's mask to `level` and clear the journal.
    pub fn reset(level: Priority) {
        MASK.with(|m| m.set(level));
        JOURNAL.with(|j| j.borrow_mut().clear());
    }

    pub fn mark_body() {
        JOURNAL.with(|j| j.borrow_mut().push(Event::Body));
    }

    /// Drain the journal.
    pub fn take_journal() -> Vec<Event> {
        JOURNAL.with(|j| core::mem::take(&mut *j.borrow_mut()))
    }
}

impl PriorityMask for Sim {
    fn read() -> Priority {
        MASK.with(|m| m.get())
    }

    unsafe fn write_exact(level: Priority) {
        MASK.with(|m| m.set(level));
        JOURNAL.with(|j| j.borrow_mut().push(Event::Write(level)));
    }
}

impl Barrier for Sim {
    fn entry() {
        JOURNAL.with(|j| j.borrow_mut().push(Event::EntryBarrier));
    }

    fn exit() {
        JOURNAL.with(|j| j.borrow_mut().push(Event::ExitBarrier));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_is_a_maximum() {
        Sim::reset(Priority::new(5));
        unsafe { Sim::raise_to_at_least(Priority::new(3)) };
        assert_eq!(Sim::read(), Priority::new(5));
        unsafe { Sim::raise_to_at_least(Priority::new(5)) };
        assert_eq!(Sim::read(), Priority::new(5));
        // Neither call was stronger, so nothing was written.
        assert!(Sim::take_journal().is_empty());

        unsafe { Sim::raise_to_at_least(Priority::new(7)) };
        assert_eq!(Sim::read(), Priority::new(7));
        assert_eq!(Sim::take_journal(), [Event::Write(Priority::new(7))]);
    }

    #[test]
    fn test_write_exact_can_lower() {
        Sim::reset(Priority::new(9));
        unsafe { Sim::write_exact(Priority::new(2)) };
        assert_eq!(Sim::read(), Priority::new(2));
    }
}

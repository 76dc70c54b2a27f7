//! # Architecture Ports
//!
//! A port supplies the priority-mask register and the two barriers for a
//! target. The Cortex-M4 port is the default for [`crate::lock::Lock`];
//! other ARMv7-M/ARMv8-M mainline cores can add sibling modules.

use crate::barrier::Barrier;
use crate::mask::PriorityMask;

pub mod cortex_m4;

#[cfg(test)]
pub mod sim;

/// Everything a lock needs from the hardware.
pub trait Port: PriorityMask + Barrier {}

impl<T: PriorityMask + Barrier> Port for T {}

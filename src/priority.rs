//! # Priority Levels
//!
//! Logical preemption levels and their BASEPRI encoding.
//!
//! The NVIC treats a *lower* raw number as a *stronger* priority, and uses
//! the raw value 0 in BASEPRI to mean "nothing masked". Keeping that
//! convention at every call site invites inverted comparisons, so the crate
//! works with logical levels instead:
//!
//! ```text
//!   logical   0      1      2     ...   15
//!   BASEPRI   0x00   0xF0   0xE0  ...   0x10     (NVIC_PRIO_BITS = 4)
//!             idle   ◄─────── stronger ───────►
//! ```
//!
//! A logical level `L` used as a mask blocks every source whose logical
//! priority is `<= L`. Conversion happens only inside the port.

use core::fmt;

use crate::config::{MAX_CEILING, NVIC_PRIO_BITS};

/// A logical preemption level. Larger is stronger; [`Priority::IDLE`] masks
/// nothing.
///
/// `Ord` follows strength, so `a.max(b)` is the stronger of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u8);

/// Rejected runtime priority value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityError {
    /// `level` is above the strongest maskable level `max`.
    OutOfRange { level: u8, max: u8 },
}

impl fmt::Display for PriorityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityError::OutOfRange { level, max } => {
                write!(f, "priority level {} out of range (max {})", level, max)
            }
        }
    }
}

impl Priority {
    /// Mask disabled; any enabled source may preempt.
    pub const IDLE: Priority = Priority(0);

    /// Strongest level BASEPRI can hold.
    pub const MAX: Priority = Priority(MAX_CEILING);

    /// Create a level, panicking if it is above [`Priority::MAX`].
    ///
    /// Use this for constants: in a `const` item the panic becomes a
    /// build error, which is how an impossible ceiling is rejected.
    ///
    /// ```compile_fail
    /// use srp_lock::Priority;
    /// const TOO_HIGH: Priority = Priority::new(200);
    /// ```
    pub const fn new(level: u8) -> Self {
        assert!(level <= MAX_CEILING, "priority level above MAX_CEILING");
        Priority(level)
    }

    /// Checked constructor for values only known at runtime.
    pub const fn try_new(level: u8) -> Result<Self, PriorityError> {
        if level <= MAX_CEILING {
            Ok(Priority(level))
        } else {
            Err(PriorityError::OutOfRange { level, max: MAX_CEILING })
        }
    }

    /// The logical level.
    #[inline(always)]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// The stronger of `self` and `other`.
    #[inline(always)]
    pub const fn stronger(self, other: Priority) -> Priority {
        if other.0 > self.0 {
            other
        } else {
            self
        }
    }

    /// Whether this level masks at least everything `other` masks.
    #[inline(always)]
    pub const fn is_at_least(self, other: Priority) -> bool {
        self.0 >= other.0
    }

    /// Encode as a raw BASEPRI / NVIC priority byte.
    #[inline(always)]
    pub const fn to_hw(self) -> u8 {
        if self.0 == 0 {
            0
        } else {
            (((1u16 << NVIC_PRIO_BITS) - self.0 as u16) << (8 - NVIC_PRIO_BITS)) as u8
        }
    }

    /// Decode a raw BASEPRI byte.
    ///
    /// Unimplemented low bits are ignored, matching what the hardware
    /// stores. A value with no implemented bits set masks nothing.
    #[inline(always)]
    pub const fn from_hw(raw: u8) -> Priority {
        let field = (raw >> (8 - NVIC_PRIO_BITS)) as u16;
        if field == 0 {
            Priority::IDLE
        } else {
            Priority(((1u16 << NVIC_PRIO_BITS) - field) as u8)
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn test_idle_encodes_as_disabled_mask() {
        assert_eq!(Priority::IDLE.to_hw(), 0);
        assert_eq!(Priority::from_hw(0), Priority::IDLE);
    }

    #[test]
    fn test_hw_encoding_is_inverted() {
        // Four implemented bits: logical 1 is the weakest hardware level.
        assert_eq!(Priority::new(1).to_hw(), 0xF0);
        assert_eq!(Priority::new(5).to_hw(), 0xB0);
        assert_eq!(Priority::MAX.to_hw(), 0x10);
        assert!(Priority::new(7).to_hw() < Priority::new(5).to_hw());
    }

    #[test]
    fn test_from_hw_inverts_to_hw() {
        for level in 0..=MAX_CEILING {
            let p = Priority::new(level);
            assert_eq!(Priority::from_hw(p.to_hw()), p);
        }
    }

    #[test]
    fn test_from_hw_ignores_unimplemented_bits() {
        assert_eq!(Priority::from_hw(0xB7), Priority::new(5));
        assert_eq!(Priority::from_hw(0x0F), Priority::IDLE);
    }

    #[test]
    fn test_stronger_is_max() {
        let p3 = Priority::new(3);
        let p5 = Priority::new(5);
        assert_eq!(p3.stronger(p5), p5);
        assert_eq!(p5.stronger(p3), p5);
        assert_eq!(p5.stronger(p5), p5);
        assert_eq!(p3.stronger(p5), p3.max(p5));
        assert!(p5.is_at_least(p3));
        assert!(!p3.is_at_least(p5));
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert_eq!(Priority::try_new(MAX_CEILING), Ok(Priority::MAX));
        let err = Priority::try_new(MAX_CEILING + 1).unwrap_err();
        assert_eq!(
            err,
            PriorityError::OutOfRange { level: MAX_CEILING + 1, max: MAX_CEILING }
        );
        assert_eq!(err.to_string(), "priority level 16 out of range (max 15)");
    }

    #[test]
    #[should_panic]
    fn test_new_panics_out_of_range() {
        let _ = Priority::new(MAX_CEILING + 1);
    }
}

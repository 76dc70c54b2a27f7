//! # Resource Ceiling Table
//!
//! Binds each resource type to its ceiling priority at compile time.
//!
//! Ceilings are produced outside this crate by analysing which tasks and
//! handlers touch which resources; each resource gets the priority of its
//! most urgent accessor. This module only carries the result. There is no
//! runtime table and no default: a type without a [`Resource`] impl cannot
//! be locked, so a missing ceiling is a build error.
//!
//! ```compile_fail
//! use srp_lock::lock;
//!
//! struct Unconfigured;
//!
//! // error[E0277]: the trait bound `Unconfigured: Resource` is not satisfied
//! lock::<Unconfigured, _, _>(|| ());
//! ```

use crate::priority::Priority;

/// A lockable resource identity and its ceiling.
///
/// Implementors are normally zero-sized marker types declared with
/// [`resources!`](crate::resources).
pub trait Resource {
    /// Strongest priority among every context that accesses this resource.
    ///
    /// Assumed correct, not verified. A ceiling below the true maximum lets
    /// an accessor preempt the critical section.
    const CEILING: Priority;
}

/// Ceiling of `R`, resolved at compile time.
#[inline(always)]
pub const fn ceiling<R: Resource>() -> Priority {
    R::CEILING
}

/// Declare resource marker types with their ceilings.
///
/// ```
/// srp_lock::resources! {
///     /// UART transmit ring.
///     pub Uart = 3;
///     Spi = 5;
/// }
///
/// use srp_lock::resource::ceiling;
/// assert_eq!(ceiling::<Uart>().level(), 3);
/// assert_eq!(ceiling::<Spi>().level(), 5);
/// ```
///
/// A ceiling above [`Priority::MAX`] is rejected while compiling:
///
/// ```compile_fail
/// srp_lock::resources! {
///     Dma = 99;
/// }
/// ```
#[macro_export]
macro_rules! resources {
    ($( $(#[$meta:meta])* $vis:vis $name:ident = $ceiling:expr; )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy)]
            $vis struct $name;

            impl $crate::resource::Resource for $name {
                const CEILING: $crate::priority::Priority =
                    $crate::priority::Priority::new($ceiling);
            }

            const _: () = {
                let _ = <$name as $crate::resource::Resource>::CEILING;
            };
        )*
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::resources! {
        Sensor = 2;
        pub(crate) Radio = 6;
        Idle = 0;
    }

    struct Handwritten;

    impl Resource for Handwritten {
        const CEILING: Priority = Priority::new(4);
    }

    #[test]
    fn test_macro_binds_ceilings() {
        assert_eq!(ceiling::<Sensor>(), Priority::new(2));
        assert_eq!(ceiling::<Radio>(), Priority::new(6));
        assert_eq!(ceiling::<Idle>(), Priority::IDLE);
    }

    #[test]
    fn test_manual_impl() {
        assert_eq!(ceiling::<Handwritten>().level(), 4);
    }

    #[test]
    fn test_resources_are_zero_sized() {
        assert_eq!(core::mem::size_of::<Sensor>(), 0);
        assert_eq!(core::mem::size_of::<Radio>(), 0);
    }
}

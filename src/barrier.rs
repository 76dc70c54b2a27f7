//! # Barriers
//!
//! Ordering fences bracketing a critical section. Neither takes arguments
//! or can fail.

/// Entry / exit fences issued by [`crate::lock::Lock`].
pub trait Barrier {
    /// Issued right after the mask is raised. The raised mask must be in
    /// effect before the next instruction executes.
    fn entry();

    /// Issued right before the mask is restored. Every memory access made
    /// inside the critical section must be complete before a newly
    /// unmasked handler can run.
    fn exit();
}

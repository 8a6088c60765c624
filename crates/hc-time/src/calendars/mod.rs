//! Concrete calendar implementations.

/// Mainland China, built from announced holidays.
pub mod china;

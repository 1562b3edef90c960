//! Pure calculation logic with no I/O or side effects.

pub mod pricing;

//! Utility functions shared across the crate.

pub mod safe_cast;

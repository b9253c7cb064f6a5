//! Utility functions shared across fieldmap crates.

pub mod paths;

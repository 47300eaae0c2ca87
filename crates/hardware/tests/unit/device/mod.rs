//! # Device Model Tests

/// Mode register decode.
pub mod mode;

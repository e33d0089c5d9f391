//! Runtime bootstrap shared by the binary and tests.

pub mod error;
pub mod telemetry;

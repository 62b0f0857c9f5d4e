//! Shared value types for oxmon check plugins.

pub mod types;

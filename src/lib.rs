//! ofx-probe — OFX client-settings discovery tool.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod catalog;
pub mod ofx;
pub mod prober;

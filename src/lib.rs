//! Subflag - forced-subtitle flag automation for Matroska files
//!
//! This library crate exposes the core functionality for integration testing.

pub mod batch;
pub mod classifier;
pub mod config;
pub mod logging;
pub mod pipeline;

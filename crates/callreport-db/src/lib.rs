//! CallReport Record Store
//!
//! This crate provides the record sources the report engine reads from:
//!
//! - An in-memory repository holding records in insertion order
//! - A deterministic sample dataset used to seed it

pub mod repositories;
pub mod sample;

pub use repositories::*;
pub use sample::sample_records;

// Re-export commonly used types
pub use callreport_core::{AppError, AppResult};

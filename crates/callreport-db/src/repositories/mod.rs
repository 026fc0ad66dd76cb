//! Repository implementations
//!
//! Concrete implementations of the record repository trait defined in
//! callreport-core.

pub mod record_repo;

pub use record_repo::InMemoryRecordRepository;

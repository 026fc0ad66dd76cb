//! Report engine and services for CallReport
//!
//! This crate contains the query and aggregation logic behind the Call
//! Detail and Summary reports.
//!
//! # Components
//!
//! - [`filter`] - stable conjunctive filtering of call-detail records
//! - [`summary`] - per-dimension grouping with call counts and average duration
//! - [`ReportService`] - loads records from a repository and runs either one
//!
//! `filter_records` and `summarize` are pure functions over their arguments
//! and can be called from any number of threads without coordination.

pub mod filter;
pub mod report_service;
pub mod summary;

pub use filter::{filter_records, FilterCriteria, ANY_LANGUAGE};
pub use report_service::ReportService;
pub use summary::summarize;

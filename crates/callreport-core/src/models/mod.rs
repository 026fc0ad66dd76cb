//! Domain models for CallReport
//!
//! This module contains the call-detail record, the summary group produced by
//! aggregation, and the duration type both of them share.

pub mod duration;
pub mod record;
pub mod summary;

pub use duration::{CallDuration, DurationParseError};
pub use record::{CallDetailRecord, CallStatus, CallType};
pub use summary::{GroupDimension, SummaryGroup, OVERALL_GROUP};

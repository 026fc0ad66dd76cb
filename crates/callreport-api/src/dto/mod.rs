//! Data Transfer Objects (DTOs) for API requests and responses

pub mod common;
pub mod report;

pub use common::*;
pub use report::*;

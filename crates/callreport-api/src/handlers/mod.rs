//! HTTP request handlers

pub mod report;

pub use report::configure as configure_reports;

//! Defines the data structures and models used throughout the application.
//!
//! Includes the static station profiles that configure extraction and the
//! per-request report record the extractor produces.

mod report;
mod station;

pub use report::*;
pub use station::*;

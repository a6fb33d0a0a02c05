//! Core calendar types.
//!
//! This module provides:
//! - `time`: The `Date` type and the calendar arithmetic payment timetables rely on
//! - `error`: Structured error types for date construction, parsing and arithmetic
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`] from `time`
//! - [`DateError`] from `error`

pub mod error;
pub mod time;

pub use error::DateError;
pub use time::Date;

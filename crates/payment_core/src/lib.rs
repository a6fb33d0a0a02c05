//! # payment_core: Calendar Foundation for JCT Payment Schedules
//!
//! ## Foundation Layer Role
//!
//! payment_core is the bottom layer of the workspace, providing:
//! - Time types: `Date` (`types::time`)
//! - Clamped calendar-month addition and signed day offsets
//! - Period labels such as `"Jan 2024"`
//! - Error types: `DateError` (`types::error`)
//!
//! It has no dependencies on other workspace crates, with minimal external dependencies:
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use payment_core::types::Date;
//!
//! let due = Date::parse("2024-03-30").unwrap();
//! let final_date = due.add_days(14).unwrap();
//! assert_eq!(final_date.to_string(), "2024-04-13");
//! assert_eq!(due.period_label(), "Mar 2024");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `Date` (ISO 8601 strings)

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;

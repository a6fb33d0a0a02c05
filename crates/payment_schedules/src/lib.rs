//! # payment_schedules: JCT Interim Payment Schedule Generation
//!
//! Turns a single schedule configuration into a batch of monthly payment
//! cycles under the Housing Grants, Construction and Regeneration Act
//! timetable used by JCT contracts.
//!
//! This crate provides:
//! - Schedule configuration with defaults and validation
//! - Month-end aware recurrence of due dates
//! - Derived application, final payment and pay-less notice dates
//! - Reminder fan-out with batch-unique ids
//! - Reviewer overrides and ordering checks prior to commit
//!
//! ## Design Principles
//!
//! - **Pure generation**: no clock, no I/O, no logging inside the library
//! - **All-or-nothing batches**: a bad anchor or overflow yields no cycles
//! - **Builder pattern** for ergonomic API with sensible defaults
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialisation for configuration and generated cycles

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod schedules;

//! Monthly JCT interim payment schedules.
//!
//! This module provides:
//! - [`ScheduleConfig`]: Anchor date, offsets, recurrence and reminder rules
//! - [`PaymentCycle`]: One monthly payment instance with its four statutory dates
//! - [`PaymentSchedule`]: A generated batch of cycles sharing a [`BatchId`]
//! - [`ReminderRule`] / [`Reminder`]: Reminder templates and their per-cycle copies
//! - [`ScheduleBuilder`]: Builder pattern for constructing schedules
//!
//! # Examples
//!
//! ```
//! use payment_schedules::schedules::{ReminderRule, ScheduleBuilder, TriggerField};
//!
//! let schedule = ScheduleBuilder::new()
//!     .first_due_date("2024-01-31")
//!     .recurrence_months(3)
//!     .reminder(ReminderRule::new("qs@example.com", 3, TriggerField::ApplicationDate))
//!     .build()
//!     .unwrap();
//!
//! let labels: Vec<_> = schedule.iter().map(|c| c.period_label.as_str()).collect();
//! assert_eq!(labels, ["Jan 2024", "Feb 2024", "Mar 2024"]);
//! assert_eq!(schedule.cycles()[1].due_date.to_string(), "2024-02-29");
//! assert_eq!(schedule.reminders().count(), 3);
//! ```

mod config;
mod cycle;
mod error;
mod generator;
mod reminder;
mod schedule;

pub use config::{
    ScheduleConfig, DEFAULT_APPLICATION_OFFSET_DAYS, DEFAULT_MAX_RECURRENCE_MONTHS,
    DEFAULT_PAYMENT_TERMS_DAYS, DEFAULT_PAY_LESS_NOTICE_OFFSET_DAYS, DEFAULT_RECURRENCE_MONTHS,
    DEFAULT_RETENTION_PERCENTAGE,
};
pub use cycle::{CycleOverride, CycleStatus, OrderingViolation, PaymentCycle};
pub use error::ScheduleError;
pub use generator::{generate_schedule, generate_schedule_with_batch};
pub use reminder::{Reminder, ReminderId, ReminderRule, TriggerField};
pub use schedule::{BatchId, PaymentSchedule, ScheduleBuilder};

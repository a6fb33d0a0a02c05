//! PaymentSchedule and ScheduleBuilder implementation.

use payment_core::types::Date;
use std::fmt;
use uuid::Uuid;

use super::config::{
    ScheduleConfig, DEFAULT_APPLICATION_OFFSET_DAYS, DEFAULT_PAYMENT_TERMS_DAYS,
    DEFAULT_PAY_LESS_NOTICE_OFFSET_DAYS, DEFAULT_RECURRENCE_MONTHS, DEFAULT_RETENTION_PERCENTAGE,
};
use super::cycle::{CycleOverride, OrderingViolation, PaymentCycle};
use super::error::ScheduleError;
use super::generator::generate_schedule_with_batch;
use super::reminder::{Reminder, ReminderRule};

/// Identifier shared by every cycle generated in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BatchId(Uuid);

impl BatchId {
    /// Creates a random (v4) batch id.
    pub fn new() -> Self {
        BatchId(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        BatchId(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A generated batch of payment cycles.
///
/// The schedule is the reviewer's working copy: cycles can be hand-edited
/// with [`PaymentSchedule::override_cycle`] and checked with
/// [`PaymentSchedule::ordering_violations`] before being committed.
///
/// # Examples
///
/// ```
/// use payment_schedules::schedules::ScheduleBuilder;
///
/// let schedule = ScheduleBuilder::new()
///     .first_due_date("2024-01-15")
///     .recurrence_months(12)
///     .build()
///     .unwrap();
///
/// assert_eq!(schedule.len(), 12);
/// assert_eq!(schedule.first_due_date().unwrap().to_string(), "2024-01-15");
/// assert_eq!(schedule.last_due_date().unwrap().to_string(), "2024-12-15");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaymentSchedule {
    /// Batch the cycles were generated in.
    batch_id: BatchId,
    /// Cycles in recurrence order.
    cycles: Vec<PaymentCycle>,
}

impl PaymentSchedule {
    /// Creates a schedule from already generated cycles.
    pub fn new(batch_id: BatchId, cycles: Vec<PaymentCycle>) -> Self {
        Self { batch_id, cycles }
    }

    /// Returns the batch id.
    #[inline]
    pub fn batch_id(&self) -> BatchId {
        self.batch_id
    }

    /// Returns the cycles in recurrence order.
    #[inline]
    pub fn cycles(&self) -> &[PaymentCycle] {
        &self.cycles
    }

    /// Returns the cycle at `index`, if any.
    #[inline]
    pub fn cycle(&self, index: usize) -> Option<&PaymentCycle> {
        self.cycles.get(index)
    }

    /// Returns the number of cycles.
    #[inline]
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    /// Returns whether the schedule has no cycles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Returns an iterator over the cycles.
    pub fn iter(&self) -> impl Iterator<Item = &PaymentCycle> {
        self.cycles.iter()
    }

    /// Returns every reminder in the batch, cycle by cycle.
    pub fn reminders(&self) -> impl Iterator<Item = &Reminder> {
        self.cycles.iter().flat_map(|c| c.reminders.iter())
    }

    /// Returns the due date of every cycle.
    pub fn due_dates(&self) -> Vec<Date> {
        self.cycles.iter().map(|c| c.due_date).collect()
    }

    /// Returns the first cycle's due date.
    pub fn first_due_date(&self) -> Option<Date> {
        self.cycles.first().map(|c| c.due_date)
    }

    /// Returns the last cycle's due date.
    pub fn last_due_date(&self) -> Option<Date> {
        self.cycles.last().map(|c| c.due_date)
    }

    /// Applies a reviewer's hand edits to one cycle.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::CycleOutOfRange`] if `index` does not name a
    /// cycle; the schedule is left unchanged.
    pub fn override_cycle(
        &mut self,
        index: usize,
        edit: &CycleOverride,
    ) -> Result<&PaymentCycle, ScheduleError> {
        let len = self.cycles.len();
        let cycle = self
            .cycles
            .get_mut(index)
            .ok_or(ScheduleError::CycleOutOfRange { index, len })?;
        cycle.apply_override(edit);
        Ok(cycle)
    }

    /// Returns every ordering violation in the batch, tagged with its cycle index.
    pub fn ordering_violations(&self) -> Vec<(usize, OrderingViolation)> {
        self.cycles
            .iter()
            .flat_map(|c| {
                c.ordering_violations()
                    .into_iter()
                    .map(move |violation| (c.index, violation))
            })
            .collect()
    }

    /// Consumes the schedule, returning the cycles as independent records.
    pub fn into_cycles(self) -> Vec<PaymentCycle> {
        self.cycles
    }
}

impl<'a> IntoIterator for &'a PaymentSchedule {
    type Item = &'a PaymentCycle;
    type IntoIter = std::slice::Iter<'a, PaymentCycle>;

    fn into_iter(self) -> Self::IntoIter {
        self.cycles.iter()
    }
}

/// Builder for constructing payment schedules with flexible configuration.
///
/// Unset offsets fall back to common JCT defaults (14 day payment terms,
/// 5 day pay-less notice, 7 day application lead, 12 months, 5% retention).
///
/// # Examples
///
/// ```
/// use payment_schedules::schedules::{ReminderRule, ScheduleBuilder, TriggerField};
///
/// let schedule = ScheduleBuilder::new()
///     .first_due_date("2024-03-30")
///     .application_offset_days(7)
///     .payment_terms_days(14)
///     .pay_less_notice_offset_days(5)
///     .recurrence_months(3)
///     .retention_percentage(3.0)
///     .reminder(ReminderRule::new("qs@example.com", 2, TriggerField::ApplicationDate))
///     .build()
///     .unwrap();
///
/// let first = &schedule.cycles()[0];
/// assert_eq!(first.pay_less_notice_date.to_string(), "2024-04-08");
/// assert_eq!(schedule.reminders().count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    first_due_date: Option<String>,
    payment_terms_days: i64,
    pay_less_notice_offset_days: i64,
    application_offset_days: i64,
    recurrence_months: u32,
    retention_percentage: f64,
    reminder_rules: Vec<ReminderRule>,
    batch_id: Option<BatchId>,
}

impl Default for ScheduleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleBuilder {
    /// Creates a new schedule builder with default settings.
    pub fn new() -> Self {
        Self {
            first_due_date: None,
            payment_terms_days: DEFAULT_PAYMENT_TERMS_DAYS,
            pay_less_notice_offset_days: DEFAULT_PAY_LESS_NOTICE_OFFSET_DAYS,
            application_offset_days: DEFAULT_APPLICATION_OFFSET_DAYS,
            recurrence_months: DEFAULT_RECURRENCE_MONTHS,
            retention_percentage: DEFAULT_RETENTION_PERCENTAGE,
            reminder_rules: Vec::new(),
            batch_id: None,
        }
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: ScheduleConfig) -> Self {
        Self {
            first_due_date: Some(config.first_due_date),
            payment_terms_days: config.payment_terms_days,
            pay_less_notice_offset_days: config.pay_less_notice_offset_days,
            application_offset_days: config.application_offset_days,
            recurrence_months: config.recurrence_months,
            retention_percentage: config.retention_percentage,
            reminder_rules: config.reminder_rules,
            batch_id: None,
        }
    }

    /// Sets the first due date (ISO `YYYY-MM-DD`).
    pub fn first_due_date(mut self, date: impl Into<String>) -> Self {
        self.first_due_date = Some(date.into());
        self
    }

    /// Sets the first due date from a parsed date.
    pub fn anchor(self, date: Date) -> Self {
        self.first_due_date(date.to_string())
    }

    /// Sets the days from due date to final date for payment.
    pub fn payment_terms_days(mut self, days: i64) -> Self {
        self.payment_terms_days = days;
        self
    }

    /// Sets the days between pay-less notice deadline and final date.
    pub fn pay_less_notice_offset_days(mut self, days: i64) -> Self {
        self.pay_less_notice_offset_days = days;
        self
    }

    /// Sets the days between application and due date.
    pub fn application_offset_days(mut self, days: i64) -> Self {
        self.application_offset_days = days;
        self
    }

    /// Sets the number of monthly cycles.
    pub fn recurrence_months(mut self, months: u32) -> Self {
        self.recurrence_months = months;
        self
    }

    /// Sets the retention percentage.
    pub fn retention_percentage(mut self, percentage: f64) -> Self {
        self.retention_percentage = percentage;
        self
    }

    /// Adds a reminder rule.
    pub fn reminder(mut self, rule: ReminderRule) -> Self {
        self.reminder_rules.push(rule);
        self
    }

    /// Pins the batch id, making reminder ids reproducible.
    pub fn batch_id(mut self, batch_id: BatchId) -> Self {
        self.batch_id = Some(batch_id);
        self
    }

    /// Returns the configuration this builder would generate from.
    pub fn config(&self) -> ScheduleConfig {
        ScheduleConfig {
            first_due_date: self.first_due_date.clone().unwrap_or_default(),
            payment_terms_days: self.payment_terms_days,
            pay_less_notice_offset_days: self.pay_less_notice_offset_days,
            application_offset_days: self.application_offset_days,
            recurrence_months: self.recurrence_months,
            retention_percentage: self.retention_percentage,
            reminder_rules: self.reminder_rules.clone(),
        }
    }

    /// Builds the schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The first due date is missing or is not a calendar date
    /// - A derived date overflows the calendar range
    pub fn build(self) -> Result<PaymentSchedule, ScheduleError> {
        if self.first_due_date.is_none() {
            return Err(ScheduleError::invalid_configuration(
                "first due date is required",
            ));
        }
        let batch_id = self.batch_id.unwrap_or_default();
        generate_schedule_with_batch(&self.config(), batch_id)
    }
}

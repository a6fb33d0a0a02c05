//! Generator input: contract timing offsets and reminder rules.

use payment_core::types::Date;

use super::error::ScheduleError;
use super::reminder::ReminderRule;

/// Default number of days from due date to final date for payment.
pub const DEFAULT_PAYMENT_TERMS_DAYS: i64 = 14;
/// Default number of days a pay-less notice must precede the final date.
pub const DEFAULT_PAY_LESS_NOTICE_OFFSET_DAYS: i64 = 5;
/// Default number of days the application precedes the due date.
pub const DEFAULT_APPLICATION_OFFSET_DAYS: i64 = 7;
/// Default number of monthly cycles.
pub const DEFAULT_RECURRENCE_MONTHS: u32 = 12;
/// Default retention percentage.
pub const DEFAULT_RETENTION_PERCENTAGE: f64 = 5.0;
/// Upper bound on cycles that presentation layers usually allow.
pub const DEFAULT_MAX_RECURRENCE_MONTHS: u32 = 60;

/// Input to one schedule generation run.
///
/// `first_due_date` is kept as the raw text the caller collected; the
/// generator parses it and rejects the whole run if it is not a calendar
/// date. Offsets are signed and are not range-checked by the generator.
///
/// # Examples
///
/// ```
/// use payment_schedules::schedules::ScheduleConfig;
/// use payment_core::types::Date;
///
/// let today = Date::from_ymd(2024, 5, 1).unwrap();
/// let config = ScheduleConfig::with_defaults(today);
/// assert_eq!(config.first_due_date, "2024-05-01");
/// assert_eq!(config.payment_terms_days, 14);
/// assert!(config.validate(60).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleConfig {
    /// Date the first interim payment becomes due (ISO `YYYY-MM-DD`).
    ///
    /// Missing in a serialised config reads as empty, which the generator
    /// rejects unless the caller fills it in first.
    #[cfg_attr(feature = "serde", serde(alias = "firstDueDate", default))]
    pub first_due_date: String,

    /// Days from due date to final date for payment.
    #[cfg_attr(
        feature = "serde",
        serde(alias = "paymentTermsDays", default = "default_payment_terms_days")
    )]
    pub payment_terms_days: i64,

    /// Days subtracted from the final date to get the pay-less notice deadline.
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "payLessNoticeOffsetDays",
            default = "default_pay_less_notice_offset_days"
        )
    )]
    pub pay_less_notice_offset_days: i64,

    /// Days subtracted from the due date to get the application date.
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "applicationOffsetDays",
            default = "default_application_offset_days"
        )
    )]
    pub application_offset_days: i64,

    /// Number of monthly cycles to generate.
    #[cfg_attr(
        feature = "serde",
        serde(alias = "recurrenceMonths", default = "default_recurrence_months")
    )]
    pub recurrence_months: u32,

    /// Retention percentage (0-100) applied to every cycle.
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "retentionPercentage",
            default = "default_retention_percentage"
        )
    )]
    pub retention_percentage: f64,

    /// Reminder templates copied into every cycle.
    #[cfg_attr(feature = "serde", serde(alias = "reminderRules", default))]
    pub reminder_rules: Vec<ReminderRule>,
}

#[cfg(feature = "serde")]
fn default_payment_terms_days() -> i64 {
    DEFAULT_PAYMENT_TERMS_DAYS
}

#[cfg(feature = "serde")]
fn default_pay_less_notice_offset_days() -> i64 {
    DEFAULT_PAY_LESS_NOTICE_OFFSET_DAYS
}

#[cfg(feature = "serde")]
fn default_application_offset_days() -> i64 {
    DEFAULT_APPLICATION_OFFSET_DAYS
}

#[cfg(feature = "serde")]
fn default_recurrence_months() -> u32 {
    DEFAULT_RECURRENCE_MONTHS
}

#[cfg(feature = "serde")]
fn default_retention_percentage() -> f64 {
    DEFAULT_RETENTION_PERCENTAGE
}

impl ScheduleConfig {
    /// Creates a configuration anchored on `first_due_date` with default offsets.
    pub fn new(first_due_date: impl Into<String>) -> Self {
        Self {
            first_due_date: first_due_date.into(),
            payment_terms_days: DEFAULT_PAYMENT_TERMS_DAYS,
            pay_less_notice_offset_days: DEFAULT_PAY_LESS_NOTICE_OFFSET_DAYS,
            application_offset_days: DEFAULT_APPLICATION_OFFSET_DAYS,
            recurrence_months: DEFAULT_RECURRENCE_MONTHS,
            retention_percentage: DEFAULT_RETENTION_PERCENTAGE,
            reminder_rules: Vec::new(),
        }
    }

    /// Seeds a form with defaults, anchoring the first due date on `today`.
    ///
    /// The current date is a parameter so that generation itself never
    /// depends on the clock.
    pub fn with_defaults(today: Date) -> Self {
        Self::new(today.to_string())
    }

    /// Parses the anchor date.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidConfiguration`] if `first_due_date`
    /// is empty or not an ISO calendar date.
    pub fn anchor_date(&self) -> Result<Date, ScheduleError> {
        Date::parse(&self.first_due_date).map_err(|e| {
            ScheduleError::invalid_configuration(format!("first due date: {}", e))
        })
    }

    /// Runs the caller-side sanity checks the generator does not run.
    ///
    /// Collects every problem rather than stopping at the first:
    /// - the anchor date parses
    /// - every day offset is non-negative
    /// - `recurrence_months` is between 1 and `max_recurrence_months`
    /// - `retention_percentage` is a number between 0 and 100
    /// - every reminder has a plausible recipient and a non-negative lead time
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Validation`] listing each failed check.
    pub fn validate(&self, max_recurrence_months: u32) -> Result<(), ScheduleError> {
        let mut errors = Vec::new();

        if let Err(e) = self.anchor_date() {
            errors.push(e.to_string());
        }

        let offsets = [
            ("payment_terms_days", self.payment_terms_days),
            ("pay_less_notice_offset_days", self.pay_less_notice_offset_days),
            ("application_offset_days", self.application_offset_days),
        ];
        for (name, value) in offsets {
            if value < 0 {
                errors.push(format!("{} must be non-negative, got {}", name, value));
            }
        }

        if self.recurrence_months == 0 {
            errors.push("recurrence_months must be at least 1".to_string());
        }
        if self.recurrence_months > max_recurrence_months {
            errors.push(format!(
                "recurrence_months {} exceeds maximum allowed ({})",
                self.recurrence_months, max_recurrence_months
            ));
        }

        if !(0.0..=100.0).contains(&self.retention_percentage) {
            errors.push(format!(
                "retention_percentage must be between 0 and 100, got {}",
                self.retention_percentage
            ));
        }

        for (i, rule) in self.reminder_rules.iter().enumerate() {
            if !rule.recipient_email.contains('@') {
                errors.push(format!(
                    "reminder rule {}: invalid recipient email '{}'",
                    i, rule.recipient_email
                ));
            }
            if rule.days_before < 0 {
                errors.push(format!(
                    "reminder rule {}: days_before must be non-negative, got {}",
                    i, rule.days_before
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ScheduleError::Validation(errors))
        }
    }
}

//! A single interim payment cycle and its reviewer-facing operations.

use payment_core::types::Date;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::reminder::{Reminder, TriggerField};

/// Where a cycle stands in the application-tracking workflow.
///
/// Generated cycles always start as [`CycleStatus::NotStarted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CycleStatus {
    /// No application has been made yet.
    #[default]
    NotStarted,
    /// The contractor has submitted an application.
    Submitted,
    /// The payment certificate has been issued.
    Certified,
    /// The payer has served a pay-less notice.
    PayLessIssued,
    /// Payment has been made.
    Paid,
}

impl CycleStatus {
    /// Returns the human-readable name for this status.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            CycleStatus::NotStarted => "Not Started",
            CycleStatus::Submitted => "Submitted",
            CycleStatus::Certified => "Certified",
            CycleStatus::PayLessIssued => "Pay Less Issued",
            CycleStatus::Paid => "Paid",
        }
    }
}

impl fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CycleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "notstarted" | "pending" => Ok(CycleStatus::NotStarted),
            "submitted" | "applied" => Ok(CycleStatus::Submitted),
            "certified" => Ok(CycleStatus::Certified),
            "paylessissued" | "payless" => Ok(CycleStatus::PayLessIssued),
            "paid" => Ok(CycleStatus::Paid),
            _ => Err(format!("Unknown cycle status: {}", s)),
        }
    }
}

/// A breach of JCT date ordering within one cycle.
///
/// The generator never produces these as errors; they are reported by
/// [`PaymentCycle::ordering_violations`] for callers that need strict
/// ordering.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OrderingViolation {
    /// The application date is on or after the due date.
    #[error("application date {application} is not before due date {due}")]
    ApplicationNotBeforeDue {
        /// Application date.
        application: Date,
        /// Due date.
        due: Date,
    },

    /// The final date for payment precedes the due date.
    #[error("final date for payment {final_date} is before due date {due}")]
    FinalBeforeDue {
        /// Due date.
        due: Date,
        /// Final date for payment.
        final_date: Date,
    },

    /// The pay-less notice deadline precedes the due date.
    #[error("pay-less notice date {pay_less} is before due date {due}")]
    PayLessBeforeDue {
        /// Pay-less notice deadline.
        pay_less: Date,
        /// Due date.
        due: Date,
    },

    /// The pay-less notice deadline falls after the final date for payment.
    #[error("pay-less notice date {pay_less} is after final date for payment {final_date}")]
    PayLessAfterFinal {
        /// Pay-less notice deadline.
        pay_less: Date,
        /// Final date for payment.
        final_date: Date,
    },
}

/// One monthly interim payment instance.
///
/// Fields are public: cycles are plain records that a reviewer may edit
/// before they are committed, after which they have no link back to the
/// generator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaymentCycle {
    /// 0-based position in the generated batch.
    pub index: usize,
    /// Short month/year label of the due date, e.g. `"Jan 2024"`.
    pub period_label: String,
    /// Date the contractor submits the interim application.
    pub application_date: Date,
    /// Date the interim payment becomes due.
    pub due_date: Date,
    /// Final date for payment.
    pub final_date_for_payment: Date,
    /// Last day on which a pay-less notice may be served.
    pub pay_less_notice_date: Date,
    /// Amount applied for.
    pub applied_amount: f64,
    /// Amount certified.
    pub certified_amount: f64,
    /// Amount retained.
    pub retention_amount: f64,
    /// Amount withheld under a pay-less notice.
    pub pay_less_amount: f64,
    /// Amount actually paid.
    pub amount_paid: f64,
    /// Retention percentage (0-100) carried from the configuration.
    pub retention_percentage: f64,
    /// Workflow status.
    pub status: CycleStatus,
    /// Reminder instances for this cycle.
    pub reminders: Vec<Reminder>,
}

impl PaymentCycle {
    /// Returns the cycle date a reminder trigger refers to.
    #[inline]
    pub fn date_for(&self, trigger: TriggerField) -> Date {
        match trigger {
            TriggerField::ApplicationDate => self.application_date,
            TriggerField::DueDate => self.due_date,
            TriggerField::FinalDateForPayment => self.final_date_for_payment,
        }
    }

    /// Checks the JCT ordering of the four cycle dates.
    ///
    /// Expected order: application < due <= pay-less notice <= final date.
    /// Returns every rule that is broken, in that order; an empty vector
    /// means the cycle is chronologically sound.
    pub fn ordering_violations(&self) -> Vec<OrderingViolation> {
        let mut violations = Vec::new();

        if self.application_date >= self.due_date {
            violations.push(OrderingViolation::ApplicationNotBeforeDue {
                application: self.application_date,
                due: self.due_date,
            });
        }
        if self.final_date_for_payment < self.due_date {
            violations.push(OrderingViolation::FinalBeforeDue {
                due: self.due_date,
                final_date: self.final_date_for_payment,
            });
        }
        if self.pay_less_notice_date < self.due_date {
            violations.push(OrderingViolation::PayLessBeforeDue {
                pay_less: self.pay_less_notice_date,
                due: self.due_date,
            });
        }
        if self.pay_less_notice_date > self.final_date_for_payment {
            violations.push(OrderingViolation::PayLessAfterFinal {
                pay_less: self.pay_less_notice_date,
                final_date: self.final_date_for_payment,
            });
        }

        violations
    }

    /// Returns true if no ordering rule is broken.
    pub fn is_chronological(&self) -> bool {
        self.ordering_violations().is_empty()
    }

    /// Applies a reviewer's hand edits to this cycle.
    ///
    /// Only the fields set on `edit` change. Overriding the due date also
    /// relabels the period unless the edit sets a label explicitly.
    pub fn apply_override(&mut self, edit: &CycleOverride) {
        if let Some(date) = edit.application_date {
            self.application_date = date;
        }
        if let Some(date) = edit.due_date {
            self.due_date = date;
            self.period_label = date.period_label();
        }
        if let Some(date) = edit.final_date_for_payment {
            self.final_date_for_payment = date;
        }
        if let Some(date) = edit.pay_less_notice_date {
            self.pay_less_notice_date = date;
        }
        if let Some(label) = &edit.period_label {
            self.period_label = label.clone();
        }
        if let Some(retention) = edit.retention_percentage {
            self.retention_percentage = retention;
        }
    }
}

/// A set of hand edits to one cycle, applied before the schedule is committed.
///
/// # Examples
///
/// ```
/// use payment_schedules::schedules::CycleOverride;
/// use payment_core::types::Date;
///
/// let edit = CycleOverride::new()
///     .due_date(Date::from_ymd(2024, 12, 20).unwrap())
///     .retention_percentage(2.5);
/// assert!(!edit.is_empty());
/// assert!(CycleOverride::new().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CycleOverride {
    /// Replacement application date.
    pub application_date: Option<Date>,
    /// Replacement due date.
    pub due_date: Option<Date>,
    /// Replacement final date for payment.
    pub final_date_for_payment: Option<Date>,
    /// Replacement pay-less notice deadline.
    pub pay_less_notice_date: Option<Date>,
    /// Replacement period label.
    pub period_label: Option<String>,
    /// Replacement retention percentage.
    pub retention_percentage: Option<f64>,
}

impl CycleOverride {
    /// Creates an empty override.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the application date.
    pub fn application_date(mut self, date: Date) -> Self {
        self.application_date = Some(date);
        self
    }

    /// Sets the due date.
    pub fn due_date(mut self, date: Date) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Sets the final date for payment.
    pub fn final_date_for_payment(mut self, date: Date) -> Self {
        self.final_date_for_payment = Some(date);
        self
    }

    /// Sets the pay-less notice deadline.
    pub fn pay_less_notice_date(mut self, date: Date) -> Self {
        self.pay_less_notice_date = Some(date);
        self
    }

    /// Sets the period label.
    pub fn period_label(mut self, label: impl Into<String>) -> Self {
        self.period_label = Some(label.into());
        self
    }

    /// Sets the retention percentage.
    pub fn retention_percentage(mut self, percentage: f64) -> Self {
        self.retention_percentage = Some(percentage);
        self
    }

    /// Returns true if the override changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

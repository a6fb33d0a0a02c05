//! Reminder rules and their per-cycle instances.

use payment_core::types::Date;
use std::fmt;
use std::str::FromStr;

use super::cycle::PaymentCycle;
use super::error::ScheduleError;
use super::schedule::BatchId;

/// The cycle date a reminder counts back from.
///
/// # Examples
///
/// ```
/// use payment_schedules::schedules::TriggerField;
///
/// let trigger: TriggerField = "finalDateForPayment".parse().unwrap();
/// assert_eq!(trigger, TriggerField::FinalDateForPayment);
/// assert_eq!(trigger.code(), "final_date_for_payment");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerField {
    /// The contractor's application date.
    ApplicationDate,
    /// The contractual due date.
    DueDate,
    /// The final date for payment.
    FinalDateForPayment,
}

impl TriggerField {
    /// All trigger fields, in timetable order.
    pub const ALL: [TriggerField; 3] = [
        TriggerField::ApplicationDate,
        TriggerField::DueDate,
        TriggerField::FinalDateForPayment,
    ];

    /// Returns the human-readable name for this trigger.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            TriggerField::ApplicationDate => "Application Date",
            TriggerField::DueDate => "Due Date",
            TriggerField::FinalDateForPayment => "Final Date for Payment",
        }
    }

    /// Returns the stable snake_case code used in configuration files.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            TriggerField::ApplicationDate => "application_date",
            TriggerField::DueDate => "due_date",
            TriggerField::FinalDateForPayment => "final_date_for_payment",
        }
    }
}

impl fmt::Display for TriggerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TriggerField {
    type Err = String;

    /// Parses a trigger field (case-insensitive).
    ///
    /// Supported formats:
    /// - ApplicationDate: "application_date", "applicationDate", "application"
    /// - DueDate: "due_date", "dueDate", "due"
    /// - FinalDateForPayment: "final_date_for_payment", "finalDateForPayment", "final", "final_date"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "applicationdate" | "application" => Ok(TriggerField::ApplicationDate),
            "duedate" | "due" => Ok(TriggerField::DueDate),
            "finaldateforpayment" | "finaldate" | "final" => Ok(TriggerField::FinalDateForPayment),
            _ => Err(format!("Unknown trigger field: {}", s)),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::TriggerField;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for TriggerField {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.code())
        }
    }

    impl<'de> Deserialize<'de> for TriggerField {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            TriggerField::from_str(&s).map_err(de::Error::custom)
        }
    }
}

/// A reminder template configured once and copied into every cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReminderRule {
    /// Who receives the reminder.
    #[cfg_attr(feature = "serde", serde(alias = "recipientEmail"))]
    pub recipient_email: String,
    /// How many days before the trigger date the reminder is sent.
    #[cfg_attr(feature = "serde", serde(alias = "daysBefore"))]
    pub days_before: i64,
    /// Which cycle date the reminder counts back from.
    #[cfg_attr(feature = "serde", serde(alias = "triggerField"))]
    pub trigger_field: TriggerField,
}

impl ReminderRule {
    /// Creates a new reminder rule.
    pub fn new(recipient_email: impl Into<String>, days_before: i64, trigger_field: TriggerField) -> Self {
        Self {
            recipient_email: recipient_email.into(),
            days_before,
            trigger_field,
        }
    }
}

/// Identifier of a reminder instance, unique within its batch.
///
/// Composed from the batch id, the cycle index and the rule index, so
/// two reminders in the same batch can never share an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ReminderId(String);

impl ReminderId {
    /// Builds the id for rule `rule_index` of cycle `cycle_index`.
    ///
    /// # Examples
    ///
    /// ```
    /// use payment_schedules::schedules::{BatchId, ReminderId};
    /// use uuid::Uuid;
    ///
    /// let batch = BatchId::from_uuid(Uuid::nil());
    /// let id = ReminderId::compose(batch, 2, 1);
    /// assert_eq!(id.as_str(), "00000000-0000-0000-0000-000000000000-c2-r1");
    /// ```
    pub fn compose(batch_id: BatchId, cycle_index: usize, rule_index: usize) -> Self {
        ReminderId(format!("{}-c{}-r{}", batch_id, cycle_index, rule_index))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reminder attached to one payment cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reminder {
    /// Batch-unique identifier.
    pub id: ReminderId,
    /// Who receives the reminder.
    pub recipient_email: String,
    /// How many days before the trigger date the reminder is sent.
    pub days_before: i64,
    /// Which cycle date the reminder counts back from.
    pub trigger_field: TriggerField,
}

impl Reminder {
    /// Instantiates `rule` under the given id.
    pub fn from_rule(rule: &ReminderRule, id: ReminderId) -> Self {
        Self {
            id,
            recipient_email: rule.recipient_email.clone(),
            days_before: rule.days_before,
            trigger_field: rule.trigger_field,
        }
    }

    /// Returns the date this reminder should go out for `cycle`.
    ///
    /// The trigger date is read from the cycle as it stands, so reviewer
    /// overrides are taken into account.
    ///
    /// # Examples
    ///
    /// ```
    /// use payment_schedules::schedules::{ReminderRule, ScheduleBuilder, TriggerField};
    /// use payment_core::types::Date;
    ///
    /// let schedule = ScheduleBuilder::new()
    ///     .first_due_date("2024-03-30")
    ///     .payment_terms_days(14)
    ///     .recurrence_months(1)
    ///     .reminder(ReminderRule::new("qs@example.com", 3, TriggerField::FinalDateForPayment))
    ///     .build()
    ///     .unwrap();
    ///
    /// let cycle = &schedule.cycles()[0];
    /// let send = cycle.reminders[0].send_date(cycle).unwrap();
    /// assert_eq!(send, Date::from_ymd(2024, 4, 10).unwrap());
    /// ```
    pub fn send_date(&self, cycle: &PaymentCycle) -> Result<Date, ScheduleError> {
        Ok(cycle
            .date_for(self.trigger_field)
            .sub_days(self.days_before)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_trigger_name_and_code() {
        assert_eq!(TriggerField::ApplicationDate.name(), "Application Date");
        assert_eq!(TriggerField::DueDate.code(), "due_date");
        assert_eq!(
            TriggerField::FinalDateForPayment.code(),
            "final_date_for_payment"
        );
        assert_eq!(format!("{}", TriggerField::DueDate), "Due Date");
    }

    #[test]
    fn test_trigger_from_str_valid() {
        for trigger in TriggerField::ALL {
            assert_eq!(trigger.code().parse::<TriggerField>().unwrap(), trigger);
        }
        assert_eq!(
            "applicationDate".parse::<TriggerField>().unwrap(),
            TriggerField::ApplicationDate
        );
        assert_eq!("DUE".parse::<TriggerField>().unwrap(), TriggerField::DueDate);
        assert_eq!(
            "final-date".parse::<TriggerField>().unwrap(),
            TriggerField::FinalDateForPayment
        );
    }

    #[test]
    fn test_trigger_from_str_invalid() {
        assert!("pay_less_notice".parse::<TriggerField>().is_err());
        assert!("".parse::<TriggerField>().is_err());
    }

    #[test]
    fn test_reminder_id_compose_is_distinct() {
        let batch = BatchId::from_uuid(Uuid::nil());
        let a = ReminderId::compose(batch, 1, 12);
        let b = ReminderId::compose(batch, 11, 2);
        assert_ne!(a, b);
        assert!(a.as_str().ends_with("-c1-r12"));
        assert_eq!(b.to_string(), format!("{}-c11-r2", batch));
    }

    #[test]
    fn test_reminder_from_rule_copies_fields() {
        let rule = ReminderRule::new("pm@example.com", 2, TriggerField::DueDate);
        let id = ReminderId::compose(BatchId::from_uuid(Uuid::nil()), 0, 0);
        let reminder = Reminder::from_rule(&rule, id.clone());
        assert_eq!(reminder.id, id);
        assert_eq!(reminder.recipient_email, "pm@example.com");
        assert_eq!(reminder.days_before, 2);
        assert_eq!(reminder.trigger_field, TriggerField::DueDate);
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_trigger_serializes_as_code() {
            let json = serde_json::to_string(&TriggerField::FinalDateForPayment).unwrap();
            assert_eq!(json, "\"final_date_for_payment\"");
        }

        #[test]
        fn test_rule_accepts_camel_case_aliases() {
            let json = r#"{"recipientEmail":"qs@example.com","daysBefore":3,"triggerField":"dueDate"}"#;
            let rule: ReminderRule = serde_json::from_str(json).unwrap();
            assert_eq!(rule, ReminderRule::new("qs@example.com", 3, TriggerField::DueDate));
        }
    }
}

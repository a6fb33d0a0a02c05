//! The JCT payment date generator.
//!
//! For cycle `i` (0-based), with `anchor` the parsed first due date:
//!
//! | date | rule |
//! |---|---|
//! | due date | `anchor + i months`, clamped to the target month's last day |
//! | application date | `due - application_offset_days` |
//! | final date for payment | `due + payment_terms_days` |
//! | pay-less notice date | `final - pay_less_notice_offset_days` |
//!
//! Months are always added to the anchor rather than to the previous
//! cycle, so a 31st anchor returns to the 31st after a short month.

use payment_core::types::Date;

use super::config::ScheduleConfig;
use super::cycle::{CycleStatus, PaymentCycle};
use super::error::ScheduleError;
use super::reminder::{Reminder, ReminderId};
use super::schedule::{BatchId, PaymentSchedule};

/// Generates a payment schedule under a fresh batch id.
///
/// Dates, labels and cycle count depend only on `config`; reminder ids
/// additionally embed a random batch id. Use
/// [`generate_schedule_with_batch`] for fully reproducible output.
///
/// # Errors
///
/// - [`ScheduleError::InvalidConfiguration`] if `first_due_date` is not a date
/// - [`ScheduleError::DateOverflow`] if a derived date leaves the calendar range
///
/// Either way no cycles are returned.
///
/// # Examples
///
/// ```
/// use payment_schedules::schedules::{generate_schedule, ScheduleConfig};
///
/// let mut config = ScheduleConfig::new("2024-01-31");
/// config.recurrence_months = 3;
///
/// let schedule = generate_schedule(&config).unwrap();
/// let due: Vec<String> = schedule.due_dates().iter().map(|d| d.to_string()).collect();
/// assert_eq!(due, ["2024-01-31", "2024-02-29", "2024-03-31"]);
/// ```
pub fn generate_schedule(config: &ScheduleConfig) -> Result<PaymentSchedule, ScheduleError> {
    generate_schedule_with_batch(config, BatchId::new())
}

/// Generates a payment schedule under the given batch id.
///
/// Pure function of its arguments.
pub fn generate_schedule_with_batch(
    config: &ScheduleConfig,
    batch_id: BatchId,
) -> Result<PaymentSchedule, ScheduleError> {
    let anchor = config.anchor_date()?;

    let cycles = (0..config.recurrence_months)
        .map(|month_offset| build_cycle(config, anchor, month_offset, batch_id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PaymentSchedule::new(batch_id, cycles))
}

fn build_cycle(
    config: &ScheduleConfig,
    anchor: Date,
    month_offset: u32,
    batch_id: BatchId,
) -> Result<PaymentCycle, ScheduleError> {
    let index = month_offset as usize;

    let due_date = anchor.add_months(month_offset)?;
    let application_date = due_date.sub_days(config.application_offset_days)?;
    let final_date_for_payment = due_date.add_days(config.payment_terms_days)?;
    let pay_less_notice_date = final_date_for_payment.sub_days(config.pay_less_notice_offset_days)?;

    let reminders = config
        .reminder_rules
        .iter()
        .enumerate()
        .map(|(rule_index, rule)| {
            Reminder::from_rule(rule, ReminderId::compose(batch_id, index, rule_index))
        })
        .collect();

    Ok(PaymentCycle {
        index,
        period_label: due_date.period_label(),
        application_date,
        due_date,
        final_date_for_payment,
        pay_less_notice_date,
        applied_amount: 0.0,
        certified_amount: 0.0,
        retention_amount: 0.0,
        pay_less_amount: 0.0,
        amount_paid: 0.0,
        retention_percentage: config.retention_percentage,
        status: CycleStatus::NotStarted,
        reminders,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedules::{ReminderRule, TriggerField};
    use approx::assert_relative_eq;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn config(first_due_date: &str, months: u32) -> ScheduleConfig {
        let mut config = ScheduleConfig::new(first_due_date);
        config.recurrence_months = months;
        config
    }

    #[test]
    fn test_count_matches_recurrence() {
        for months in [1, 2, 12, 60] {
            let schedule = generate_schedule(&config("2024-01-15", months)).unwrap();
            assert_eq!(schedule.len(), months as usize);
        }
    }

    #[test]
    fn test_zero_months_is_empty() {
        let schedule = generate_schedule(&config("2024-01-15", 0)).unwrap();
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_month_end_clamping_leap_year() {
        let schedule = generate_schedule(&config("2024-01-31", 3)).unwrap();
        assert_eq!(
            schedule.due_dates(),
            vec![d(2024, 1, 31), d(2024, 2, 29), d(2024, 3, 31)]
        );
    }

    #[test]
    fn test_month_end_anchor_on_31st_stays_on_month_end() {
        let schedule = generate_schedule(&config("2023-01-31", 14)).unwrap();
        assert!(schedule.iter().all(|c| c.due_date.is_month_end()));
        assert_eq!(schedule.cycles()[1].due_date, d(2023, 2, 28));
        assert_eq!(schedule.cycles()[13].due_date, d(2024, 2, 29));
    }

    #[test]
    fn test_offset_arithmetic() {
        let mut cfg = config("2024-03-30", 1);
        cfg.application_offset_days = 7;
        cfg.payment_terms_days = 14;
        cfg.pay_less_notice_offset_days = 5;

        let schedule = generate_schedule(&cfg).unwrap();
        let cycle = &schedule.cycles()[0];
        assert_eq!(cycle.application_date, d(2024, 3, 23));
        assert_eq!(cycle.due_date, d(2024, 3, 30));
        assert_eq!(cycle.final_date_for_payment, d(2024, 4, 13));
        assert_eq!(cycle.pay_less_notice_date, d(2024, 4, 8));
        assert_eq!(cycle.period_label, "Mar 2024");
    }

    #[test]
    fn test_recurrence_stride() {
        let schedule = generate_schedule(&config("2024-01-15", 12)).unwrap();
        let first = schedule.cycles()[0].due_date;
        assert_eq!(schedule.cycles()[1].due_date, first.add_months(1).unwrap());
        assert_eq!(schedule.cycles()[1].due_date, d(2024, 2, 15));
        assert_eq!(schedule.cycles()[11].due_date, first.add_months(11).unwrap());
        assert_eq!(schedule.cycles()[11].due_date, d(2024, 12, 15));
    }

    #[test]
    fn test_initial_financials_and_status() {
        let mut cfg = config("2024-01-15", 2);
        cfg.retention_percentage = 3.0;
        let schedule = generate_schedule(&cfg).unwrap();
        for (i, cycle) in schedule.iter().enumerate() {
            assert_eq!(cycle.index, i);
            assert_eq!(cycle.status, CycleStatus::NotStarted);
            assert_relative_eq!(cycle.applied_amount, 0.0);
            assert_relative_eq!(cycle.certified_amount, 0.0);
            assert_relative_eq!(cycle.retention_amount, 0.0);
            assert_relative_eq!(cycle.pay_less_amount, 0.0);
            assert_relative_eq!(cycle.amount_paid, 0.0);
            assert_relative_eq!(cycle.retention_percentage, 3.0);
        }
    }

    #[test]
    fn test_reminder_fan_out_and_unique_ids() {
        let mut cfg = config("2024-01-15", 3);
        cfg.reminder_rules = vec![
            ReminderRule::new("qs@example.com", 3, TriggerField::ApplicationDate),
            ReminderRule::new("client@example.com", 1, TriggerField::FinalDateForPayment),
        ];

        let schedule = generate_schedule(&cfg).unwrap();
        let ids: Vec<_> = schedule.reminders().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), 6);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 6);

        for cycle in schedule.iter() {
            assert_eq!(cycle.reminders[0].recipient_email, "qs@example.com");
            assert_eq!(cycle.reminders[1].trigger_field, TriggerField::FinalDateForPayment);
        }
    }

    #[test]
    fn test_period_label_from_due_date() {
        let schedule = generate_schedule(&config("2025-12-29", 2)).unwrap();
        assert_eq!(schedule.cycles()[0].period_label, "Dec 2025");
        assert_eq!(schedule.cycles()[1].period_label, "Jan 2026");
    }

    #[test]
    fn test_invalid_anchor_rejected() {
        for bad in ["", "   ", "31/01/2024", "2024-02-30"] {
            let result = generate_schedule(&config(bad, 3));
            assert!(
                matches!(result, Err(ScheduleError::InvalidConfiguration { .. })),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_degenerate_offsets_are_permitted() {
        let mut cfg = config("2024-03-30", 1);
        cfg.payment_terms_days = 0;
        cfg.pay_less_notice_offset_days = 10;
        cfg.application_offset_days = -2;

        let schedule = generate_schedule(&cfg).unwrap();
        let cycle = &schedule.cycles()[0];
        assert_eq!(cycle.application_date, d(2024, 4, 1));
        assert_eq!(cycle.final_date_for_payment, d(2024, 3, 30));
        assert_eq!(cycle.pay_less_notice_date, d(2024, 3, 20));
        assert!(!cycle.is_chronological());
    }

    #[test]
    fn test_overflow_aborts_batch() {
        let mut cfg = config("2024-01-31", 6);
        cfg.payment_terms_days = i64::MAX;
        let result = generate_schedule(&cfg);
        assert!(matches!(result, Err(ScheduleError::DateOverflow { .. })));
    }

    #[test]
    fn test_deterministic_with_fixed_batch() {
        let mut cfg = config("2024-01-31", 6);
        cfg.reminder_rules = vec![ReminderRule::new("qs@example.com", 3, TriggerField::DueDate)];
        let batch = BatchId::from_uuid(Uuid::nil());

        let a = generate_schedule_with_batch(&cfg, batch).unwrap();
        let b = generate_schedule_with_batch(&cfg, batch).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fresh_batches_share_dates() {
        let cfg = config("2024-01-31", 6);
        let a = generate_schedule(&cfg).unwrap();
        let b = generate_schedule(&cfg).unwrap();
        assert_ne!(a.batch_id(), b.batch_id());
        assert_eq!(a.due_dates(), b.due_dates());
    }
}

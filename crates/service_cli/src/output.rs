//! Schedule rendering: table, JSON and CSV.

use payment_core::types::Date;
use payment_schedules::schedules::{CycleStatus, PaymentCycle, PaymentSchedule};
use serde::Serialize;
use std::io::Write;

use crate::config::OutputFormat;
use crate::Result;

/// Flat per-cycle record used for CSV output.
#[derive(Debug, Serialize)]
pub struct CycleRecord<'a> {
    /// Cycle index.
    pub index: usize,
    /// Period label (`"Jan 2024"`).
    pub period_label: &'a str,
    /// Application date.
    pub application_date: Date,
    /// Due date.
    pub due_date: Date,
    /// Pay-less notice deadline.
    pub pay_less_notice_date: Date,
    /// Final date for payment.
    pub final_date_for_payment: Date,
    /// Retention percentage.
    pub retention_percentage: f64,
    /// Lifecycle status.
    pub status: CycleStatus,
    /// Number of reminders attached to the cycle.
    pub reminders: usize,
}

impl<'a> From<&'a PaymentCycle> for CycleRecord<'a> {
    fn from(cycle: &'a PaymentCycle) -> Self {
        Self {
            index: cycle.index,
            period_label: &cycle.period_label,
            application_date: cycle.application_date,
            due_date: cycle.due_date,
            pay_less_notice_date: cycle.pay_less_notice_date,
            final_date_for_payment: cycle.final_date_for_payment,
            retention_percentage: cycle.retention_percentage,
            status: cycle.status,
            reminders: cycle.reminders.len(),
        }
    }
}

/// Render `schedule` to `out` in the requested format.
pub fn render<W: Write>(schedule: &PaymentSchedule, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Table => render_table(schedule, out),
        OutputFormat::Json => render_json(schedule, out),
        OutputFormat::Csv => render_csv(schedule, out),
    }
}

fn render_json<W: Write>(schedule: &PaymentSchedule, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, schedule)?;
    writeln!(out)?;
    Ok(())
}

fn render_csv<W: Write>(schedule: &PaymentSchedule, out: &mut W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for cycle in schedule.iter() {
        writer.serialize(CycleRecord::from(cycle))?;
    }
    writer.flush()?;
    Ok(())
}

fn render_table<W: Write>(schedule: &PaymentSchedule, out: &mut W) -> Result<()> {
    writeln!(out, "Batch {}", schedule.batch_id())?;
    writeln!(
        out,
        "┌─────┬──────────┬────────────┬────────────┬────────────┬────────────┬───────────┐"
    )?;
    writeln!(
        out,
        "│ #   │ Period   │ Applied by │ Due        │ Pay-less   │ Final      │ Reminders │"
    )?;
    writeln!(
        out,
        "├─────┼──────────┼────────────┼────────────┼────────────┼────────────┼───────────┤"
    )?;

    if schedule.is_empty() {
        writeln!(out, "│ {:<78} │", "(no cycles)")?;
    }

    for cycle in schedule.iter() {
        writeln!(
            out,
            "│ {:<3} │ {:<8} │ {} │ {} │ {} │ {} │ {:>9} │",
            cycle.index + 1,
            cycle.period_label,
            cycle.application_date,
            cycle.due_date,
            cycle.pay_less_notice_date,
            cycle.final_date_for_payment,
            cycle.reminders.len()
        )?;
    }

    writeln!(
        out,
        "└─────┴──────────┴────────────┴────────────┴────────────┴────────────┴───────────┘"
    )?;
    Ok(())
}

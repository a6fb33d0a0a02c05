//! Generate command implementation
//!
//! Builds a payment schedule from the layered configuration and renders it.

use payment_schedules::schedules::{generate_schedule, PaymentSchedule};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::output;
use crate::{CliError, Result};

/// Generate the schedule described by `config`
///
/// Enforces the configured recurrence limit but otherwise generates
/// permissively; ordering problems are logged as warnings.
pub fn build(config: &CliConfig) -> Result<PaymentSchedule> {
    let schedule_config = &config.schedule;

    if schedule_config.recurrence_months > config.max_recurrence_months {
        return Err(CliError::InvalidArgument(format!(
            "recurrence_months {} exceeds maximum allowed ({})",
            schedule_config.recurrence_months, config.max_recurrence_months
        )));
    }

    let schedule = generate_schedule(schedule_config)?;
    info!(
        batch_id = %schedule.batch_id(),
        cycles = schedule.len(),
        reminders = schedule.reminders().count(),
        "Schedule generated"
    );

    for (index, violation) in schedule.ordering_violations() {
        warn!(cycle = index, "{}", violation);
    }

    Ok(schedule)
}

/// Run the generate command
pub fn run(config: &CliConfig, output_path: Option<&Path>) -> Result<()> {
    info!("Generating payment schedule...");
    info!("  First due date: {}", config.schedule.first_due_date);
    info!("  Months: {}", config.schedule.recurrence_months);
    info!("  Output format: {}", config.output_format);

    let schedule = build(config)?;

    match output_path {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            output::render(&schedule, config.output_format, &mut out)?;
            out.flush()?;
            info!("Schedule written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            output::render(&schedule, config.output_format, &mut out)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use payment_schedules::schedules::ScheduleError;

    fn config(first_due_date: &str, months: u32) -> CliConfig {
        let mut config = CliConfig::default();
        config.schedule.first_due_date = first_due_date.to_string();
        config.schedule.recurrence_months = months;
        config
    }

    #[test]
    fn test_build_generates_requested_cycles() {
        let schedule = build(&config("2024-01-15", 12)).unwrap();
        assert_eq!(schedule.len(), 12);
    }

    #[test]
    fn test_build_enforces_recurrence_limit() {
        let mut cfg = config("2024-01-15", 61);
        assert!(matches!(build(&cfg), Err(CliError::InvalidArgument(_))));

        cfg.max_recurrence_months = 120;
        assert_eq!(build(&cfg).unwrap().len(), 61);
    }

    #[test]
    fn test_build_rejects_missing_anchor() {
        let result = build(&config("", 3));
        assert!(matches!(
            result,
            Err(CliError::Schedule(ScheduleError::InvalidConfiguration { .. }))
        ));
    }

    #[test]
    fn test_build_keeps_degenerate_offsets() {
        let mut cfg = config("2024-01-15", 2);
        cfg.schedule.payment_terms_days = 0;
        cfg.schedule.pay_less_notice_offset_days = 3;
        let schedule = build(&cfg).unwrap();
        assert_eq!(schedule.ordering_violations().len(), 2);
    }
}

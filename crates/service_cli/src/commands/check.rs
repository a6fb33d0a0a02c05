//! Check command implementation
//!
//! Validates the configuration and reports date ordering problems in the
//! schedule it would generate.

use payment_schedules::schedules::{generate_schedule, ScheduleError};
use tracing::{error, info, warn};

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Collect every problem with `config`
///
/// Validation failures are listed first. If the configuration can still
/// generate, each ordering violation follows, prefixed by its cycle.
pub fn issues(config: &CliConfig) -> Vec<String> {
    let schedule_config = &config.schedule;
    let mut found = Vec::new();

    match schedule_config.validate(config.max_recurrence_months) {
        Ok(()) => {}
        Err(ScheduleError::Validation(errors)) => found.extend(errors),
        Err(other) => found.push(other.to_string()),
    }

    // Already reported by validation; generating it would be unbounded work.
    if schedule_config.recurrence_months > config.max_recurrence_months {
        return found;
    }

    match generate_schedule(schedule_config) {
        Ok(schedule) => {
            for (index, violation) in schedule.ordering_violations() {
                let label = schedule
                    .cycle(index)
                    .map(|c| c.period_label.as_str())
                    .unwrap_or_default();
                found.push(format!("cycle {} ({}): {}", index + 1, label, violation));
            }
        }
        // Invalid anchors are already reported by validation.
        Err(ScheduleError::InvalidConfiguration { .. }) => {}
        Err(other) => found.push(other.to_string()),
    }

    found
}

/// Collect advisories that do not fail the check
///
/// An anchor on the last day of a month shorter than 31 days keeps its
/// day-of-month in later cycles (30 Apr gives 30 May, not 31 May), so the
/// caller is told the schedule will not track month ends.
pub fn warnings(config: &CliConfig) -> Vec<String> {
    let mut found = Vec::new();

    if let Ok(anchor) = config.schedule.anchor_date() {
        if anchor.is_month_end() && anchor.day() < 31 {
            found.push(format!(
                "first due date {} is a month end but later due dates stay on day {}; \
                 use a 31st anchor to follow month ends",
                anchor,
                anchor.day()
            ));
        }
    }

    found
}

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Checking schedule configuration...");

    for advisory in warnings(config) {
        warn!("{}", advisory);
        println!("! {}", advisory);
    }

    let found = issues(config);
    if found.is_empty() {
        println!("✓ Configuration OK");
        return Ok(());
    }

    for issue in &found {
        error!("{}", issue);
        println!("✗ {}", issue);
    }
    Err(CliError::IssuesFound(found.len()))
}

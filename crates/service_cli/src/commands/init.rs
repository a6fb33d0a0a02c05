//! Init command implementation
//!
//! Writes a starter configuration anchored on a given day.

use payment_core::types::Date;
use payment_schedules::schedules::ScheduleConfig;
use std::path::Path;
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Render the default configuration with its first due date on `today`
pub fn default_config_toml(today: Date) -> Result<String> {
    let config = CliConfig {
        schedule: ScheduleConfig::with_defaults(today),
        ..CliConfig::default()
    };
    Ok(config.to_toml_string()?)
}

/// Run the init command
pub fn run(today: Date, output_path: Option<&Path>) -> Result<()> {
    let text = default_config_toml(today)?;

    match output_path {
        Some(path) => {
            std::fs::write(path, &text)?;
            info!("Configuration written to {}", path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_anchored_on_today() {
        let today = Date::from_ymd(2024, 5, 1).unwrap();
        let text = default_config_toml(today).unwrap();
        assert!(text.contains("first_due_date = \"2024-05-01\""));

        let config = CliConfig::from_toml_str(&text).unwrap();
        assert_eq!(config.schedule, ScheduleConfig::with_defaults(today));
        assert!(config.schedule.validate(config.max_recurrence_months).is_ok());
    }
}

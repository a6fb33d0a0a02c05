//! JCT Payment Schedule CLI
//!
//! Command line entry point for generating JCT interim payment schedules.
//!
//! # Commands
//!
//! - `jct-schedule generate` - Generate and render a payment schedule
//! - `jct-schedule check` - Validate a configuration file
//! - `jct-schedule init` - Print a starter configuration
//!
//! # Configuration
//!
//! Settings are layered: defaults, then the TOML file given by `--config`,
//! then `JCT_*` environment variables, then command line flags.

use clap::{Parser, Subcommand};
use payment_core::types::Date;
use service_cli::commands;
use service_cli::config::{build_config, CliArgs};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// JCT interim payment schedule generator
#[derive(Parser, Debug)]
#[command(name = "jct-schedule")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE", env = "JCT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a payment schedule
    Generate {
        /// First due date (YYYY-MM-DD)
        #[arg(short = 'd', long)]
        first_due_date: Option<String>,

        /// Number of monthly cycles
        #[arg(short, long)]
        months: Option<u32>,

        /// Output format (table, json, csv)
        #[arg(short, long)]
        format: Option<String>,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Validate the configuration and report date ordering problems
    Check,

    /// Print a starter configuration
    Init {
        /// Date to anchor the first due date on (defaults to the local date)
        #[arg(short, long)]
        today: Option<String>,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let mut args = CliArgs {
            log_level: self.log_level.clone(),
            ..Default::default()
        };

        match &self.command {
            Commands::Generate {
                first_due_date,
                months,
                format,
                ..
            } => {
                args.config_file = self.config.clone();
                args.first_due_date = first_due_date.clone();
                args.recurrence_months = *months;
                args.output_format = format.clone();
            }
            Commands::Check => args.config_file = self.config.clone(),
            // init writes a fresh file and never reads one.
            Commands::Init { .. } => {}
        }

        args
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args())?;

    init_tracing(config.log_level.as_filter_str());
    debug!(
        log_level = %config.log_level,
        output_format = %config.output_format,
        max_recurrence_months = config.max_recurrence_months,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Generate { output, .. } => commands::generate::run(&config, output.as_deref())?,
        Commands::Check => commands::check::run(&config)?,
        Commands::Init { today, output } => {
            let today = match today {
                Some(text) => Date::parse(&text)?,
                None => Date::from(chrono::Local::now().date_naive()),
            };
            info!("Anchoring starter configuration on {}", today);
            commands::init::run(today, output.as_deref())?
        }
    }

    Ok(())
}

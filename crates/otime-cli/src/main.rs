use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use otime_cli::commands::{check, courses, results};
use otime_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Results {
            input,
            format,
            courses,
            lap_control,
            all_matches,
            json,
        }) => {
            let config = Config::load_from(cli.config.as_deref())
                .context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");
            results::run(
                &config,
                input,
                *format,
                courses.as_deref(),
                lap_control.as_deref(),
                *all_matches,
                *json,
            )?;
        }
        Some(Commands::Courses { json }) => {
            let config = Config::load_from(cli.config.as_deref())
                .context("failed to load configuration")?;
            courses::run(&config, *json)?;
        }
        Some(Commands::Check) => {
            let config = Config::load_from(cli.config.as_deref())
                .context("failed to load configuration")?;
            check::run(&config)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}

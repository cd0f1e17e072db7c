use crate::app::demo;
use crate::cli::commands::{Cli, Commands, ConfigCommands};
use anyhow::{Result, bail};
use attr_tracers::TracerConfig;
use attr_tracers::config::LogConfig;
use attr_tracers::observability::init_logging;
use attr_tracers::trace::TracedClass;
use attr_tracers::ui::apply_color_choice;
use rand::Rng;
use std::path::Path;
use std::process::ExitCode;
use tracing::info;

fn run_demo(config: &TracerConfig, value: Option<i64>) -> Result<ExitCode> {
    let last = value.unwrap_or_else(|| rand::rng().random_range(0..=10));
    let mut class = TracedClass::from_config("Widget", config);

    match demo::run(&mut class, last) {
        Ok(attr) => {
            println!("attr = {attr}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_abort() => {
            info!(error = %e, exit_code = config.abort.exit_code, "demo aborted");
            Ok(ExitCode::from(config.abort.exit_code))
        }
        Err(e) => Err(e.into()),
    }
}

fn init_config(explicit: Option<&Path>, force: bool) -> Result<()> {
    let path = TracerConfig::resolve_path(explicit)?;
    if path.exists() && !force {
        bail!(
            "Config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }
    TracerConfig::default().save(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

pub fn dispatch(cli: Cli) -> Result<ExitCode> {
    // Init writes the file `load` would otherwise fail to find.
    if let Commands::Config {
        config_command: ConfigCommands::Init { force },
    } = &cli.command
    {
        init_logging(&LogConfig::default())?;
        init_config(cli.config.as_deref(), *force)?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = TracerConfig::load(cli.config.as_deref())?;
    init_logging(&config.log)?;
    apply_color_choice(config.prompt.color);

    match cli.command {
        Commands::Demo { value } => run_demo(&config, value),
        Commands::Config {
            config_command: ConfigCommands::Show,
        } => {
            print!("{}", config.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config {
            config_command: ConfigCommands::Init { .. },
        } => Ok(ExitCode::SUCCESS),
    }
}

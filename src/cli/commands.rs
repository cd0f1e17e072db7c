use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `attr-tracers` - interactively approve, drop or abort attribute writes.
#[derive(Parser, Debug)]
#[command(name = "attr-tracers")]
#[command(author = "BcZsalba")]
#[command(version = "1.0.0")]
#[command(about = "Trace and gate attribute writes while debugging.", long_about = None)]
pub struct Cli {
    /// Config file (default: $ATTR_TRACERS_CONFIG or ~/.attr-tracers/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the showcase: a widget whose `attr` is traced through three writes
    Demo {
        /// Value written by the last write (random 0..=10 when omitted)
        #[arg(long)]
        value: Option<i64>,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        config_command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective config as TOML
    Show,
    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use clap::Parser;
use std::io::Write as _;
use std::path::PathBuf;

mod io;
pub use io::*;

mod commands;
pub use commands::*;

mod config;
pub use config::{AppConfig, OutputConfig};

mod render;
pub use render::OutputFormat;

/// The top-level arguments: an optional config file and the subcommand to execute
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "APP_CONFIG")]
    pub config: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    /// Load the layered configuration and run the requested subcommand
    pub fn evaluate(self) -> anyhow::Result<()> {
        let AppConfig { mut output } = AppConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Demo { format } => {
                if let Some(format) = format {
                    output.format = format;
                }
                let mut out = std::io::stdout().lock();
                demo::run(&output, &mut out)?;
            }
            Commands::Replay { io, format } => {
                if let Some(format) = format {
                    output.format = format;
                }
                let ops = replay::read_script(io.read()?)?;
                let mut out = io.write()?;
                replay::replay(ops, &output, &mut out)?;
                out.flush()?;
            }
        }

        Ok(())
    }
}

/// Failure modes of the command-line driver itself
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// The config file passed on the command line does not exist
    #[error("Config file {0} does not exist")]
    MissingConfig(PathBuf),
    /// The update script could not be parsed
    #[error("Invalid update script: {0}")]
    Script(#[from] serde_json::Error),
}

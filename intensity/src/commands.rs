use super::{IOArgs, OutputFormat};
use clap::Subcommand;

pub mod demo;
pub mod replay;

/// The available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the reference sequence of updates and print each state
    Demo {
        /// Override the configured output format
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Replay a JSON script of updates against an empty map
    Replay {
        #[command(flatten)]
        io: IOArgs,

        /// Override the configured output format
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },
}

//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bringup")]
#[command(author, version, about = "Board bring-up: discover, flash, and run-control development boards", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Board to operate on, with optional overrides
    /// (e.g. "nucleo-l433" or "nucleo-l433:baud=57600")
    #[arg(short, long, global = true, default_value = "nucleo-l433")]
    pub board: String,

    /// Board profile file, or a directory of .ron profiles
    #[arg(long, global = true)]
    pub board_db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Port selection shared across commands
#[derive(clap::Args, Debug, Clone)]
pub struct PortArg {
    /// Serial device path; defaults to the first discovered device
    #[arg(short, long)]
    pub port: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List attached board device nodes
    List,

    /// Check that a board answers on its serial port
    Probe {
        #[command(flatten)]
        port: PortArg,
    },

    /// Write a firmware image via the external programmer tool
    Flash {
        #[command(flatten)]
        port: PortArg,

        /// Target address (e.g. 0x08000000)
        #[arg(short, long)]
        address: String,

        /// Firmware image file
        #[arg(short, long)]
        image: PathBuf,
    },

    /// Erase the target's program memory
    Erase {
        #[command(flatten)]
        port: PortArg,
    },

    /// Pulse the reset line, leaving the target running
    Reset {
        #[command(flatten)]
        port: PortArg,
    },

    /// Hold the target in reset
    Stop {
        #[command(flatten)]
        port: PortArg,
    },

    /// Release a held target
    Start {
        #[command(flatten)]
        port: PortArg,
    },
}

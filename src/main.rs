//! bringup - board bring-up utility
//!
//! Discovers development boards attached over serial/USB, writes firmware
//! images through the external programmer tool, and drives run-control
//! (reset, stop, start) by toggling the RTS line.
//!
//! Every operation reports the legacy outcome contract on stdout - the
//! literal string `success` or `fail` - with the exit code matching, so
//! CI rigs can gate on either. Diagnostic detail goes to the log.

mod cli;
mod commands;

use clap::Parser;

use bringup_board::open_board;
use bringup_core::board::BoardDatabase;
use bringup_core::control::ControlOp;
use bringup_core::{Outcome, Result};

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Log level from verbosity, unless RUST_LOG overrides
    let default_filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut db = BoardDatabase::builtin();
    if let Some(path) = &cli.board_db {
        let loaded: Result<()> = if path.is_dir() {
            db.load_dir(path).map(|count| {
                log::debug!("loaded {} board profiles from {}", count, path.display());
            })
        } else {
            db.load_file(path)
        };
        if let Err(e) = loaded {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }

    let board = match open_board(&cli.board, &db) {
        Ok(board) => board,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::List => {
            commands::list::run(&board);
            return;
        }
        Commands::Probe { port } => commands::control::probe(&board, port.port),
        Commands::Flash {
            port,
            address,
            image,
        } => commands::flash::run(&board, port.port, &address, &image),
        Commands::Erase { port } => commands::control::erase(&board, port.port),
        Commands::Reset { port } => commands::control::run(&board, port.port, ControlOp::Reset),
        Commands::Stop { port } => commands::control::run(&board, port.port, ControlOp::Stop),
        Commands::Start { port } => commands::control::run(&board, port.port, ControlOp::Start),
    };

    if let Err(e) = &result {
        log::error!("{}", e);
    }

    let outcome = Outcome::of(&result);
    println!("{}", outcome);
    if outcome == Outcome::Fail {
        std::process::exit(1);
    }
}

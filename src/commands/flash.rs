//! Flash command: program a firmware image through the external tool

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use bringup_board::Board;
use bringup_core::Result;

pub fn run(board: &Board, port: Option<String>, address: &str, image: &Path) -> Result<()> {
    let port = super::resolve_port(board, port)?;
    let policy = &board.profile().flash;

    if !board.tool_available() {
        log::warn!(
            "'{}' not found on PATH; flash attempts will fail",
            board.profile().flash_tool
        );
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!(
        "Flashing {} at {} (up to {} attempts)",
        image.display(),
        address,
        policy.attempts
    ));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = board.program(&port, address, image);

    match &result {
        Ok(()) => pb.finish_with_message("Flash complete"),
        Err(_) => pb.abandon_with_message("Flash failed"),
    }
    result
}

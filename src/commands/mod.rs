//! CLI command implementations

use bringup_board::Board;
use bringup_core::Result;

pub mod control;
pub mod flash;
pub mod list;

/// Use the given port, or fall back to the first discovered device.
pub(crate) fn resolve_port(board: &Board, port: Option<String>) -> Result<String> {
    match port {
        Some(port) => Ok(port),
        None => {
            let port = board.first_device()?;
            log::info!("using discovered device {}", port);
            Ok(port)
        }
    }
}

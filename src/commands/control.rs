//! Run-control and probe commands

use bringup_board::Board;
use bringup_core::control::ControlOp;
use bringup_core::Result;

pub fn run(board: &Board, port: Option<String>, op: ControlOp) -> Result<()> {
    let port = super::resolve_port(board, port)?;
    log::debug!("{} on {}", op.as_str(), port);
    board.control(&port, op)
}

pub fn probe(board: &Board, port: Option<String>) -> Result<()> {
    let port = super::resolve_port(board, port)?;
    board.probe(&port)?;
    log::info!("{} answered", port);
    Ok(())
}

pub fn erase(board: &Board, port: Option<String>) -> Result<()> {
    let port = super::resolve_port(board, port)?;
    board.erase(&port)
}

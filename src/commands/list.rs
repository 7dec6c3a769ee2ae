//! List command: print discovered device nodes

use bringup_board::Board;

pub fn run(board: &Board) {
    let devices = board.discover();
    if devices.is_empty() {
        log::info!("no devices matching {}", board.profile().device_pattern);
    }
    for device in devices {
        println!("{}", device);
    }
}

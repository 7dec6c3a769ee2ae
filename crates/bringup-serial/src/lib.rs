//! bringup-serial - Serial transport for board bring-up
//!
//! Opens real serial devices with the parameters the boards expect
//! (8-N-1, RTS as the only control signal) and scans the OS device
//! namespace for attached boards. Two open modes exist: a short-timeout
//! passive mode for presence probing and a control mode for run-control
//! operations.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod error;
mod link;
mod scan;

pub use link::{SerialLink, CONTROL_TIMEOUT};
pub use scan::DevScan;

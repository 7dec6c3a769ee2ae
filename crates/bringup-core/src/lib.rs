//! bringup-core - Core library for board bring-up
//!
//! This crate provides the device-independent half of the bring-up tool:
//! the error taxonomy, the run-control state machine, the flash retry
//! policy, and the board profile database. Hardware access, subprocess
//! invocation, and the live device namespace sit behind small traits
//! (`ControlLine`, `FlashTool`, `DeviceSource`) so the algorithms can be
//! exercised against fakes.
//!
//! # Example
//!
//! ```ignore
//! use bringup_core::control::{self, ControlLine, ControlOp};
//!
//! fn reset_target<L: ControlLine>(line: &mut L) {
//!     let timing = Default::default();
//!     match control::run(line, ControlOp::Reset, &timing) {
//!         Ok(()) => println!("target restarted"),
//!         Err(e) => println!("reset failed: {}", e),
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod board;
pub mod control;
pub mod discovery;
pub mod error;
pub mod flashloop;

pub use error::{Error, Outcome, Result};

//! Run-control state machine.
//!
//! The target's hardware reset is wired to the RTS line of its serial
//! port: asserting the line holds the target in reset, deasserting it
//! lets the target run. The three logical operations are sequences of
//! line transitions:
//!
//! - `reset` - assert, hold for the pulse width, deassert
//! - `stop`  - assert and leave asserted
//! - `start` - deassert
//!
//! A `reset` always ends with the line deasserted; if the deassert itself
//! fails, one more deassert is attempted so the target is not left latched
//! in reset, and the original error still propagates.
//!
//! The machine holds no state between calls. Each invocation operates on a
//! freshly opened line supplied by the caller, which also owns closing it.

use std::str::FromStr;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default width of the reset pulse in milliseconds.
pub const DEFAULT_RESET_PULSE_MS: u64 = 100;

/// A hardware control line (RTS) on an open serial device.
///
/// Implemented by the real serial link and by test fakes.
pub trait ControlLine {
    /// Assert (`true`) or deassert (`false`) the line.
    fn set_rts(&mut self, level: bool) -> Result<()>;
}

/// Logical run-control operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOp {
    /// Pulse reset and release the target to run.
    Reset,
    /// Hold the target in reset.
    Stop,
    /// Release a previously held target.
    Start,
}

impl ControlOp {
    /// Command word for this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlOp::Reset => "reset",
            ControlOp::Stop => "stop",
            ControlOp::Start => "start",
        }
    }
}

impl FromStr for ControlOp {
    type Err = Error;

    /// Parse a command word. Anything but the three known operations is
    /// rejected before any line is touched.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "reset" => Ok(ControlOp::Reset),
            "stop" => Ok(ControlOp::Stop),
            "start" => Ok(ControlOp::Start),
            other => Err(Error::UnsupportedOperation(other.to_string())),
        }
    }
}

/// Timing of the reset pulse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetTiming {
    /// Width of the assert-to-deassert pulse in milliseconds.
    pub pulse_ms: u64,
}

impl Default for ResetTiming {
    fn default() -> Self {
        Self {
            pulse_ms: DEFAULT_RESET_PULSE_MS,
        }
    }
}

impl ResetTiming {
    /// Pulse width as a [`Duration`].
    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }
}

/// Drive one operation over `line`.
///
/// Blocks for the pulse width on `reset`. The caller owns the line's
/// lifecycle; this function only sequences transitions.
pub fn run<L: ControlLine + ?Sized>(
    line: &mut L,
    op: ControlOp,
    timing: &ResetTiming,
) -> Result<()> {
    log::debug!("run-control: {}", op.as_str());
    match op {
        ControlOp::Reset => {
            line.set_rts(true)?;
            thread::sleep(timing.pulse());
            if let Err(e) = line.set_rts(false) {
                // Do not leave the target latched in reset.
                let _ = line.set_rts(false);
                return Err(e);
            }
            Ok(())
        }
        ControlOp::Stop => line.set_rts(true),
        ControlOp::Start => line.set_rts(false),
    }
}

//! bringup-dummy - In-memory fakes for testing
//!
//! Stand-ins for the three trait seams of the core crate: a control line
//! that records RTS transitions (with optional fault injection), a flash
//! tool that replays scripted outcomes, and a device source with a fixed
//! inventory. Useful for exercising the bring-up logic without hardware.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use bringup_core::control::ControlLine;
use bringup_core::discovery::DeviceSource;
use bringup_core::flashloop::FlashTool;
use bringup_core::{Error, Result};

/// Control line that records every applied RTS transition.
#[derive(Debug, Default)]
pub struct FakeLine {
    transitions: Vec<bool>,
    fail_at: Option<usize>,
    calls: usize,
}

impl FakeLine {
    /// A line that accepts every transition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject a single failure on the n-th `set_rts` call (0-based).
    /// The line recovers on subsequent calls.
    pub fn fail_at(mut self, call: usize) -> Self {
        self.fail_at = Some(call);
        self
    }

    /// Transitions that were actually applied, in order.
    pub fn transitions(&self) -> &[bool] {
        &self.transitions
    }

    /// Final line level, if any transition was applied.
    pub fn level(&self) -> Option<bool> {
        self.transitions.last().copied()
    }
}

impl ControlLine for FakeLine {
    fn set_rts(&mut self, level: bool) -> Result<()> {
        let call = self.calls;
        self.calls += 1;
        if self.fail_at == Some(call) {
            return Err(Error::Line {
                port: "fake".to_string(),
                detail: "injected failure".to_string(),
            });
        }
        self.transitions.push(level);
        Ok(())
    }
}

/// One scripted tool invocation result.
#[derive(Debug, Clone, Copy)]
pub enum ToolScript {
    /// The tool ran and exited with this status.
    Exit(i32),
    /// The tool could not be started.
    LaunchFail,
}

/// Flash tool that replays a scripted sequence of outcomes and records
/// the arguments of every invocation.
#[derive(Debug, Default)]
pub struct ScriptedTool {
    script: VecDeque<ToolScript>,
    calls: Vec<(PathBuf, String)>,
}

impl ScriptedTool {
    /// Tool that replays `script` in order, then succeeds once exhausted.
    pub fn new(script: impl IntoIterator<Item = ToolScript>) -> Self {
        Self {
            script: script.into_iter().collect(),
            calls: Vec::new(),
        }
    }

    /// `(image, address)` argument pairs of every invocation so far.
    pub fn calls(&self) -> &[(PathBuf, String)] {
        &self.calls
    }
}

impl FlashTool for ScriptedTool {
    fn name(&self) -> &str {
        "scripted"
    }

    fn write(&mut self, image: &Path, address: &str) -> Result<i32> {
        self.calls.push((image.to_path_buf(), address.to_string()));
        match self.script.pop_front() {
            Some(ToolScript::Exit(status)) => Ok(status),
            Some(ToolScript::LaunchFail) => Err(Error::ToolLaunch {
                tool: "scripted".to_string(),
                detail: "injected launch failure".to_string(),
            }),
            None => Ok(0),
        }
    }
}

/// Device source with a fixed inventory; the pattern is ignored.
#[derive(Debug, Clone)]
pub struct FixedDevices(
    /// Device paths to report.
    pub Vec<String>,
);

impl DeviceSource for FixedDevices {
    fn list_devices(&self, _pattern: &str) -> Vec<String> {
        self.0.clone()
    }
}

//! bringup-stlink - External ST-Link programmer driver
//!
//! Writes firmware by spawning the `st-flash` utility from the stlink
//! tools package. The tool owns the programming link for the duration of
//! the run; no serial connection is held while it executes. The contract
//! with the tool is positional: `st-flash write <image> <address>`,
//! success is exit status 0.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

use std::path::Path;
use std::process::Command;

use bringup_core::flashloop::FlashTool;
use bringup_core::{Error, Result};

/// Default programmer executable.
pub const DEFAULT_TOOL: &str = "st-flash";

/// Driver for the `st-flash` command-line programmer.
pub struct StFlash {
    tool: String,
}

impl StFlash {
    /// Driver for the default `st-flash` executable on `PATH`.
    pub fn new() -> Self {
        Self::with_tool(DEFAULT_TOOL)
    }

    /// Driver for a specific executable name or path.
    pub fn with_tool(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    /// Best-effort check that the tool can be started at all.
    ///
    /// Diagnostics only; a missing tool still just consumes retries when
    /// programming is attempted.
    pub fn locate(&self) -> bool {
        Command::new(&self.tool)
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }
}

impl Default for StFlash {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashTool for StFlash {
    fn name(&self) -> &str {
        &self.tool
    }

    fn write(&mut self, image: &Path, address: &str) -> Result<i32> {
        log::debug!("{} write {} {}", self.tool, image.display(), address);

        let status = Command::new(&self.tool)
            .arg("write")
            .arg(image)
            .arg(address)
            .status()
            .map_err(|e| Error::ToolLaunch {
                tool: self.tool.clone(),
                detail: e.to_string(),
            })?;

        // A signal-killed tool reports no exit code; count it as a failed run.
        Ok(status.code().unwrap_or(-1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_exit_status_passes_through() {
        // `true` ignores its arguments and exits 0.
        let mut tool = StFlash::with_tool("true");
        let status = tool.write(Path::new("fw.bin"), "0x08000000").unwrap();
        assert_eq!(status, 0);
    }

    #[test]
    fn nonzero_exit_status_passes_through() {
        let mut tool = StFlash::with_tool("false");
        let status = tool.write(Path::new("fw.bin"), "0x08000000").unwrap();
        assert_ne!(status, 0);
    }

    #[test]
    fn missing_tool_is_launch_error() {
        let mut tool = StFlash::with_tool("bringup-test-no-such-tool");
        let err = tool.write(Path::new("fw.bin"), "0x08000000").unwrap_err();
        assert!(matches!(err, Error::ToolLaunch { .. }));
    }

    #[test]
    fn locate_reports_missing_tool() {
        assert!(!StFlash::with_tool("bringup-test-no-such-tool").locate());
    }
}

//! The board handle.

use std::path::Path;

use bringup_core::board::BoardProfile;
use bringup_core::control::{self, ControlOp};
use bringup_core::discovery::DeviceSource;
use bringup_core::flashloop::{self, FlashJob, FlashTool};
use bringup_core::{Error, Result};
use bringup_serial::{DevScan, SerialLink};
use bringup_stlink::StFlash;

/// One board family, ready to operate on.
///
/// Every operation acquires its own connection (or subprocess) and
/// releases it before returning; the handle itself holds no open
/// resources between calls.
#[derive(Debug)]
pub struct Board {
    profile: BoardProfile,
}

impl Board {
    /// Handle for the given profile.
    pub fn new(profile: BoardProfile) -> Self {
        Self { profile }
    }

    /// The profile this handle operates with.
    pub fn profile(&self) -> &BoardProfile {
        &self.profile
    }

    /// Enumerate attached device nodes, sorted.
    ///
    /// Re-scans the device namespace on every call; results are not
    /// cached because boards come and go with hot-plug events.
    pub fn discover(&self) -> Vec<String> {
        DevScan.list_devices(&self.profile.device_pattern)
    }

    /// First discovered device, or `DeviceNotFound`.
    pub fn first_device(&self) -> Result<String> {
        self.discover()
            .into_iter()
            .next()
            .ok_or_else(|| Error::DeviceNotFound(self.profile.device_pattern.clone()))
    }

    /// Presence probe: short-timeout open with RTS left deasserted.
    pub fn probe(&self, port: &str) -> Result<()> {
        let link = SerialLink::open_probe(port, self.profile.baud, self.profile.probe_timeout())?;
        log::debug!("probe: {} answered", link.path());
        Ok(())
    }

    /// Write `image` to `address` through the external programmer.
    ///
    /// The serial port is not touched while flashing; the external tool
    /// owns the programming link for the duration of the run.
    pub fn program(&self, port: &str, address: &str, image: &Path) -> Result<()> {
        log::info!(
            "programming {} at {} from {}",
            port,
            address,
            image.display()
        );
        let mut tool = StFlash::with_tool(self.profile.flash_tool.clone());
        self.program_with(&mut tool, address, image)
    }

    /// Like [`Board::program`], with a caller-supplied tool.
    pub fn program_with(
        &self,
        tool: &mut dyn FlashTool,
        address: &str,
        image: &Path,
    ) -> Result<()> {
        let job = FlashJob {
            address: address.to_string(),
            image: image.to_path_buf(),
        };
        flashloop::program(tool, &job, &self.profile.flash)
    }

    /// Best-effort check that the profile's programmer tool is runnable.
    ///
    /// Diagnostics only; a missing tool still just consumes retries when
    /// programming is attempted.
    pub fn tool_available(&self) -> bool {
        StFlash::with_tool(self.profile.flash_tool.clone()).locate()
    }

    /// Erase the target's program memory. Not supported on this board
    /// family; the programmer tool erases pages as part of a write.
    pub fn erase(&self, _port: &str) -> Result<()> {
        Err(Error::UnsupportedOperation("erase".to_string()))
    }

    /// Run one control operation: open, transition, close.
    ///
    /// If the open fails no transition is attempted. The connection is
    /// dropped (closed) on success and error paths alike.
    pub fn control(&self, port: &str, op: ControlOp) -> Result<()> {
        let mut link = SerialLink::open_control(port, self.profile.baud)?;
        control::run(&mut link, op, &self.profile.reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bringup_dummy::{ScriptedTool, ToolScript};
    use bringup_core::flashloop::FlashPolicy;
    use std::fs;

    fn test_board(pattern: &str) -> Board {
        let mut profile = BoardProfile::nucleo_l433();
        profile.device_pattern = pattern.to_string();
        profile.flash = FlashPolicy {
            attempts: 3,
            backoff_ms: 0,
        };
        Board::new(profile)
    }

    #[test]
    fn discover_finds_matching_nodes() {
        let dir = tempfile::tempdir().unwrap();
        fs::File::create(dir.path().join("nucleo-l433-0")).unwrap();
        fs::File::create(dir.path().join("unrelated")).unwrap();

        let pattern = dir.path().join("nucleo-l433-*");
        let board = test_board(pattern.to_str().unwrap());
        let devices = board.discover();
        assert_eq!(devices.len(), 1);
        assert!(devices[0].ends_with("nucleo-l433-0"));
        assert_eq!(board.first_device().unwrap(), devices[0]);
    }

    #[test]
    fn first_device_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = dir.path().join("nucleo-l433-*");
        let board = test_board(pattern.to_str().unwrap());
        let err = board.first_device().unwrap_err();
        assert!(matches!(err, Error::DeviceNotFound(_)));
    }

    #[test]
    fn program_with_retries_through_scripted_tool() {
        let board = test_board("/dev/nucleo-l433-*");
        let mut tool = ScriptedTool::new([
            ToolScript::Exit(1),
            ToolScript::Exit(1),
            ToolScript::Exit(0),
        ]);
        board
            .program_with(&mut tool, "0x08000000", Path::new("fw.bin"))
            .unwrap();
        assert_eq!(tool.calls().len(), 3);
    }

    #[test]
    fn erase_is_unsupported() {
        let board = test_board("/dev/nucleo-l433-*");
        let err = board.erase("/dev/nucleo-l433-0").unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation(ref op) if op == "erase"));
    }

    #[test]
    fn control_on_missing_port_fails_before_any_transition() {
        let board = test_board("/dev/nucleo-l433-*");
        let err = board
            .control("/dev/bringup-test-no-such-port", ControlOp::Reset)
            .unwrap_err();
        assert!(matches!(err, Error::DeviceNotFound(_)));
    }
}

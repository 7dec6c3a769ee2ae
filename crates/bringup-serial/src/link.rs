//! Serial link with RTS control.

use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use bringup_core::control::ControlLine;
use bringup_core::Result;

use crate::error;

/// Read timeout applied to control-mode opens.
///
/// The underlying crate has no infinite-timeout mode. Control operations
/// only toggle RTS and never block on reads, so the value is inert in
/// practice.
pub const CONTROL_TIMEOUT: Duration = Duration::from_secs(5);

/// An open serial device.
///
/// The OS handle is released when the link drops, so every exit path -
/// success or error - closes the port.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
    path: String,
}

impl std::fmt::Debug for SerialLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialLink")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SerialLink {
    /// Open in passive probe mode: short read timeout, RTS deasserted so
    /// the probe does not hold the target in reset.
    pub fn open_probe(path: &str, baud: u32, timeout: Duration) -> Result<Self> {
        let mut link = Self::open(path, baud, timeout)?;
        link.set_rts(false)?;
        Ok(link)
    }

    /// Open in control mode for run-control operations.
    pub fn open_control(path: &str, baud: u32) -> Result<Self> {
        Self::open(path, baud, CONTROL_TIMEOUT)
    }

    fn open(path: &str, baud: u32, timeout: Duration) -> Result<Self> {
        let port = serialport::new(path, baud)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(timeout)
            .open()
            .map_err(|e| error::open_error(path, e))?;

        log::debug!("opened {} at {} baud", path, baud);

        Ok(Self {
            port,
            path: path.to_string(),
        })
    }

    /// Device path this link was opened on.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl ControlLine for SerialLink {
    fn set_rts(&mut self, level: bool) -> Result<()> {
        self.port
            .write_request_to_send(level)
            .map_err(|e| error::line_error(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bringup_core::Error;

    #[test]
    fn open_nonexistent_port_is_device_not_found() {
        let err =
            SerialLink::open_probe("/dev/bringup-test-no-such-port", 115_200, Duration::from_millis(20))
                .unwrap_err();
        assert!(matches!(err, Error::DeviceNotFound(_)));
    }

    #[test]
    fn control_open_nonexistent_port_is_device_not_found() {
        let err = SerialLink::open_control("/dev/bringup-test-no-such-port", 115_200).unwrap_err();
        assert!(matches!(err, Error::DeviceNotFound(_)));
    }
}

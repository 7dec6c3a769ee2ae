//! Mapping transport failures onto the core taxonomy.
//!
//! Open failures split into two causes callers need to tell apart: the
//! device is simply absent (`DeviceNotFound`) versus present but
//! unusable - permissions, busy port (`OpenError`).

use bringup_core::Error;

pub(crate) fn open_error(port: &str, e: serialport::Error) -> Error {
    match e.kind() {
        serialport::ErrorKind::NoDevice => Error::DeviceNotFound(port.to_string()),
        serialport::ErrorKind::Io(std::io::ErrorKind::NotFound) => {
            Error::DeviceNotFound(port.to_string())
        }
        _ => Error::OpenError {
            port: port.to_string(),
            detail: e.to_string(),
        },
    }
}

pub(crate) fn line_error(port: &str, e: serialport::Error) -> Error {
    Error::Line {
        port: port.to_string(),
        detail: e.to_string(),
    }
}

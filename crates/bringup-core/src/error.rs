//! Error types and the legacy outcome vocabulary.
//!
//! Every failure in this crate is one of the named categories below; the
//! coarse two-valued [`Outcome`] exists only for the outer boundary, where
//! automation rigs match on the literal strings `success` / `fail`.

use std::fmt;

use thiserror::Error;

/// Failure categories for bring-up operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No matching device node, or the device vanished before open.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// Device present but the transport could not be configured.
    #[error("failed to open {port}: {detail}")]
    OpenError {
        /// Device path that was being opened
        port: String,
        /// Transport-level description of the failure
        detail: String,
    },

    /// Transient I/O error while toggling a control line.
    #[error("control line error on {port}: {detail}")]
    Line {
        /// Device path the line belongs to
        port: String,
        /// Transport-level description of the failure
        detail: String,
    },

    /// The external flashing tool could not be started.
    #[error("failed to launch '{tool}': {detail}")]
    ToolLaunch {
        /// Tool executable that was being spawned
        tool: String,
        /// OS-level description of the failure
        detail: String,
    },

    /// The external flashing tool ran and reported failure.
    #[error("flash tool exited with status {status}")]
    ToolFailure {
        /// Raw exit status (-1 if the tool was killed by a signal)
        status: i32,
    },

    /// Terminal flash failure after the retry budget was spent.
    #[error("flash failed after {attempts} attempts")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
    },

    /// An operation this board family does not support.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Board profile missing or malformed.
    #[error("board profile error: {0}")]
    Profile(String),
}

/// Result type alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;

/// Two-valued operation result exposed to automation callers.
///
/// Displays as the literal strings `success` / `fail`. Rich errors are
/// flattened to this only at the outermost boundary; everything below it
/// keeps the typed [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Operation completed.
    Success,
    /// Operation failed, for any of the [`Error`] reasons.
    Fail,
}

impl Outcome {
    /// Legacy string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Fail => "fail",
        }
    }

    /// Flatten a typed result to the legacy outcome.
    pub fn of<T>(result: &Result<T>) -> Outcome {
        match result {
            Ok(_) => Outcome::Success,
            Err(_) => Outcome::Fail,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_strings() {
        assert_eq!(Outcome::Success.to_string(), "success");
        assert_eq!(Outcome::Fail.to_string(), "fail");
    }

    #[test]
    fn outcome_of_result() {
        assert_eq!(Outcome::of(&Ok(())), Outcome::Success);
        let err: Result<()> = Err(Error::UnsupportedOperation("erase".into()));
        assert_eq!(Outcome::of(&err), Outcome::Fail);
    }

    #[test]
    fn error_display() {
        let e = Error::DeviceNotFound("/dev/nucleo-l433-0".into());
        assert_eq!(e.to_string(), "device not found: /dev/nucleo-l433-0");

        let e = Error::ToolFailure { status: 1 };
        assert_eq!(e.to_string(), "flash tool exited with status 1");

        let e = Error::RetriesExhausted { attempts: 3 };
        assert_eq!(e.to_string(), "flash failed after 3 attempts");
    }
}

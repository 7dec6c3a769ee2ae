//! Flash programming through an external tool, with retries.
//!
//! The board is programmed by a vendor utility that owns the programming
//! link itself; this module only decides how often to invoke it and how to
//! interpret what comes back. Exit status 0 is success and short-circuits
//! the remaining budget. A non-zero status and a failed launch both consume
//! one retry - the invocation is the unit of failure, not the tool's
//! internals. A fixed backoff separates attempts; the tool needs host
//! settle time between runs, so the delay is flat rather than exponential.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of tool invocations per job.
pub const DEFAULT_ATTEMPTS: u32 = 3;

/// Default delay between failed attempts in milliseconds.
pub const DEFAULT_BACKOFF_MS: u64 = 4000;

/// External programmer invocation: image and target address in, exit
/// status out.
///
/// Implementations do not validate the image or address; a bad argument is
/// the tool's concern and surfaces as its exit status.
pub trait FlashTool {
    /// Tool name, for diagnostics.
    fn name(&self) -> &str;

    /// Run one `write` invocation to completion and return the tool's exit
    /// status. `Err` means the tool could not be started at all.
    fn write(&mut self, image: &Path, address: &str) -> Result<i32>;
}

/// One flash request. Created per call, consumed by one [`program`] run.
#[derive(Debug, Clone)]
pub struct FlashJob {
    /// Target address, passed through verbatim (e.g. `0x08000000`).
    pub address: String,
    /// Firmware image file.
    pub image: PathBuf,
}

/// Retry policy for a flash job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashPolicy {
    /// Maximum tool invocations.
    pub attempts: u32,
    /// Delay between failed attempts in milliseconds.
    pub backoff_ms: u64,
}

impl Default for FlashPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            backoff_ms: DEFAULT_BACKOFF_MS,
        }
    }
}

impl FlashPolicy {
    /// Backoff as a [`Duration`].
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

/// Run `job` through `tool` under `policy`.
///
/// Invokes the tool up to `policy.attempts` times, sleeping the backoff
/// between attempts. Returns on the first zero exit status; once the
/// budget is spent the terminal error is [`Error::RetriesExhausted`], with
/// each attempt's own failure category logged along the way.
pub fn program<T: FlashTool + ?Sized>(
    tool: &mut T,
    job: &FlashJob,
    policy: &FlashPolicy,
) -> Result<()> {
    for attempt in 1..=policy.attempts {
        match tool.write(&job.image, &job.address) {
            Ok(0) => {
                log::info!(
                    "{}: wrote {} at {} (attempt {}/{})",
                    tool.name(),
                    job.image.display(),
                    job.address,
                    attempt,
                    policy.attempts
                );
                return Ok(());
            }
            Ok(status) => {
                log::warn!(
                    "{}: attempt {}/{}: {}",
                    tool.name(),
                    attempt,
                    policy.attempts,
                    Error::ToolFailure { status }
                );
            }
            Err(e) => {
                log::warn!(
                    "{}: attempt {}/{}: {}",
                    tool.name(),
                    attempt,
                    policy.attempts,
                    e
                );
            }
        }
        if attempt < policy.attempts {
            thread::sleep(policy.backoff());
        }
    }
    Err(Error::RetriesExhausted {
        attempts: policy.attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy() {
        let policy = FlashPolicy::default();
        assert_eq!(policy.attempts, 3);
        assert_eq!(policy.backoff(), Duration::from_millis(4000));
    }

    #[test]
    fn zero_attempts_is_exhausted() {
        struct NeverTool;
        impl FlashTool for NeverTool {
            fn name(&self) -> &str {
                "never"
            }
            fn write(&mut self, _image: &Path, _address: &str) -> Result<i32> {
                panic!("tool must not be invoked with an empty budget");
            }
        }

        let job = FlashJob {
            address: "0x08000000".into(),
            image: "fw.bin".into(),
        };
        let policy = FlashPolicy {
            attempts: 0,
            backoff_ms: 0,
        };
        let err = program(&mut NeverTool, &job, &policy).unwrap_err();
        assert!(matches!(err, Error::RetriesExhausted { attempts: 0 }));
    }
}

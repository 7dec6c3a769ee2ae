//! Board profiles and the profile database.
//!
//! A profile bundles everything the tool needs to know about one board
//! family: how its device nodes are named, serial parameters, which
//! external programmer writes its flash, and the timing/retry knobs.
//! Profiles are RON files; the database ships a built-in entry for the
//! Nucleo-L433 and can load additional profiles from a file or directory.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::control::ResetTiming;
use crate::error::{Error, Result};
use crate::flashloop::FlashPolicy;

/// Default serial baud rate.
pub const DEFAULT_BAUD: u32 = 115_200;

/// Default read timeout for presence probing, in milliseconds.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 20;

fn default_baud() -> u32 {
    DEFAULT_BAUD
}

fn default_probe_timeout_ms() -> u64 {
    DEFAULT_PROBE_TIMEOUT_MS
}

fn default_flash_tool() -> String {
    "st-flash".to_string()
}

/// Everything known about one board family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardProfile {
    /// Profile name, used to select the board on the command line.
    pub name: String,
    /// Glob-style pattern for the board's device nodes.
    pub device_pattern: String,
    /// Serial baud rate.
    #[serde(default = "default_baud")]
    pub baud: u32,
    /// Read timeout for presence probing, in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    /// External programmer executable.
    #[serde(default = "default_flash_tool")]
    pub flash_tool: String,
    /// Flash retry policy.
    #[serde(default)]
    pub flash: FlashPolicy,
    /// Reset pulse timing.
    #[serde(default)]
    pub reset: ResetTiming,
}

impl BoardProfile {
    /// Built-in profile for the ST Nucleo-L433 rack boards.
    pub fn nucleo_l433() -> Self {
        Self {
            name: "nucleo-l433".to_string(),
            device_pattern: "/dev/nucleo-l433-*".to_string(),
            baud: DEFAULT_BAUD,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            flash_tool: default_flash_tool(),
            flash: FlashPolicy::default(),
            reset: ResetTiming::default(),
        }
    }

    /// Probe timeout as a [`Duration`].
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

/// Collection of board profiles, keyed by name.
#[derive(Debug, Default)]
pub struct BoardDatabase {
    boards: HashMap<String, BoardProfile>,
}

impl BoardDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Database pre-populated with the built-in profiles.
    pub fn builtin() -> Self {
        let mut db = Self::new();
        db.insert(BoardProfile::nucleo_l433());
        db
    }

    /// Add or replace a profile.
    pub fn insert(&mut self, profile: BoardProfile) {
        self.boards.insert(profile.name.clone(), profile);
    }

    /// Look up a profile by name.
    pub fn get(&self, name: &str) -> Option<&BoardProfile> {
        self.boards.get(name)
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Whether the database is empty.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Profile names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.boards.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Load one RON profile file.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Profile(format!("cannot read {}: {}", path.display(), e)))?;
        let profile: BoardProfile = ron::from_str(&text)
            .map_err(|e| Error::Profile(format!("cannot parse {}: {}", path.display(), e)))?;
        log::debug!("loaded board profile '{}' from {}", profile.name, path.display());
        self.insert(profile);
        Ok(())
    }

    /// Load every `.ron` file in a directory. Returns the number loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let entries = fs::read_dir(dir)
            .map_err(|e| Error::Profile(format!("cannot read {}: {}", dir.display(), e)))?;

        let mut count = 0;
        for entry in entries {
            let entry =
                entry.map_err(|e| Error::Profile(format!("cannot read {}: {}", dir.display(), e)))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("ron") {
                self.load_file(&path)?;
                count += 1;
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_nucleo_defaults() {
        let db = BoardDatabase::builtin();
        let profile = db.get("nucleo-l433").unwrap();
        assert_eq!(profile.device_pattern, "/dev/nucleo-l433-*");
        assert_eq!(profile.baud, 115_200);
        assert_eq!(profile.probe_timeout(), Duration::from_millis(20));
        assert_eq!(profile.flash_tool, "st-flash");
        assert_eq!(profile.flash.attempts, 3);
        assert_eq!(profile.flash.backoff_ms, 4000);
        assert_eq!(profile.reset.pulse_ms, 100);
    }

    #[test]
    fn parse_profile_with_defaults() {
        let text = r#"
            BoardProfile(
                name: "widget",
                device_pattern: "/dev/widget-*",
            )
        "#;
        let profile: BoardProfile = ron::from_str(text).unwrap();
        assert_eq!(profile.name, "widget");
        assert_eq!(profile.baud, 115_200);
        assert_eq!(profile.flash.attempts, 3);
        assert_eq!(profile.reset.pulse_ms, 100);
    }

    #[test]
    fn parse_profile_with_overrides() {
        let text = r#"
            BoardProfile(
                name: "widget",
                device_pattern: "/dev/widget-*",
                baud: 57600,
                flash_tool: "widget-flash",
                flash: FlashPolicy(attempts: 5, backoff_ms: 100),
                reset: ResetTiming(pulse_ms: 10),
            )
        "#;
        let profile: BoardProfile = ron::from_str(text).unwrap();
        assert_eq!(profile.baud, 57600);
        assert_eq!(profile.flash_tool, "widget-flash");
        assert_eq!(profile.flash.attempts, 5);
        assert_eq!(profile.reset.pulse_ms, 10);
    }

    #[test]
    fn load_dir_picks_up_ron_files() {
        let dir = tempfile::tempdir().unwrap();

        let mut f = fs::File::create(dir.path().join("widget.ron")).unwrap();
        writeln!(
            f,
            r#"BoardProfile(name: "widget", device_pattern: "/dev/widget-*")"#
        )
        .unwrap();
        fs::File::create(dir.path().join("notes.txt")).unwrap();

        let mut db = BoardDatabase::builtin();
        let count = db.load_dir(dir.path()).unwrap();
        assert_eq!(count, 1);
        assert_eq!(db.len(), 2);
        assert!(db.get("widget").is_some());
    }

    #[test]
    fn load_missing_file_is_profile_error() {
        let mut db = BoardDatabase::new();
        let err = db.load_file(Path::new("/no/such/profile.ron")).unwrap_err();
        assert!(matches!(err, Error::Profile(_)));
    }
}

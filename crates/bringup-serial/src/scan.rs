//! Filesystem scan for board device nodes.

use std::fs;
use std::path::Path;

use bringup_core::discovery::DeviceSource;

/// Scans the OS device directory for nodes matching a glob-style pattern
/// such as `/dev/nucleo-l433-*`.
pub struct DevScan;

impl DeviceSource for DevScan {
    fn list_devices(&self, pattern: &str) -> Vec<String> {
        scan(pattern)
    }
}

fn scan(pattern: &str) -> Vec<String> {
    let path = Path::new(pattern);

    // A literal path (no wildcard) is just an existence check.
    if !pattern.contains('*') {
        return if path.exists() {
            vec![pattern.to_string()]
        } else {
            Vec::new()
        };
    }

    let Some(dir) = path.parent() else {
        return Vec::new();
    };
    let Some(name_pattern) = path.file_name().and_then(|n| n.to_str()) else {
        return Vec::new();
    };

    let mut matches = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if wildcard_match(name_pattern, name) {
                matches.push(dir.join(name).to_string_lossy().into_owned());
            }
        }
    }
    matches.sort_unstable();
    matches
}

/// Match `name` against a pattern where `*` matches any run of characters.
fn wildcard_match(pattern: &str, name: &str) -> bool {
    let mut parts = pattern.split('*');

    // Leading literal must anchor at the start.
    let first = parts.next().unwrap_or("");
    if !name.starts_with(first) {
        return false;
    }
    let mut rest = &name[first.len()..];

    let mut segments: Vec<&str> = parts.collect();
    if segments.is_empty() {
        // No wildcard at all: the whole name must be consumed.
        return rest.is_empty();
    }

    // Trailing literal must anchor at the end.
    let last = segments.pop().unwrap_or("");
    for segment in segments {
        if segment.is_empty() {
            continue;
        }
        match rest.find(segment) {
            Some(i) => rest = &rest[i + segment.len()..],
            None => return false,
        }
    }
    rest.ends_with(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_basics() {
        assert!(wildcard_match("nucleo-l433-*", "nucleo-l433-0"));
        assert!(wildcard_match("nucleo-l433-*", "nucleo-l433-"));
        assert!(!wildcard_match("nucleo-l433-*", "nucleo-l432-0"));
        assert!(wildcard_match("*.bin", "fw.bin"));
        assert!(!wildcard_match("*.bin", "fw.hex"));
        assert!(wildcard_match("ttyUSB*", "ttyUSB12"));
        assert!(wildcard_match("exact", "exact"));
        assert!(!wildcard_match("exact", "exactly"));
    }

    #[test]
    fn scan_finds_sorted_matches() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["nucleo-l433-1", "nucleo-l433-0", "ttyUSB0"] {
            fs::File::create(dir.path().join(name)).unwrap();
        }

        let pattern = dir.path().join("nucleo-l433-*");
        let found = DevScan.list_devices(pattern.to_str().unwrap());
        assert_eq!(
            found,
            vec![
                dir.path().join("nucleo-l433-0").to_string_lossy().into_owned(),
                dir.path().join("nucleo-l433-1").to_string_lossy().into_owned(),
            ]
        );
    }

    #[test]
    fn scan_empty_when_nothing_matches() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = dir.path().join("nucleo-l433-*");
        assert!(DevScan.list_devices(pattern.to_str().unwrap()).is_empty());
    }

    #[test]
    fn scan_empty_for_missing_directory() {
        assert!(DevScan
            .list_devices("/no/such/directory/nucleo-l433-*")
            .is_empty());
    }
}

//! Opening boards by name.

use bringup_core::board::BoardDatabase;
use bringup_core::{Error, Result};

use crate::Board;

/// Open a board from a specification string.
///
/// Format: `"name"` or `"name:key1=value1,key2=value2"`. Recognized
/// override keys: `baud`, `tool` (programmer executable), `pattern`
/// (device glob).
///
/// # Example
/// ```ignore
/// let board = open_board("nucleo-l433:baud=57600", &db)?;
/// ```
pub fn open_board(s: &str, db: &BoardDatabase) -> Result<Board> {
    let (name, opts) = s.split_once(':').unwrap_or((s, ""));

    let mut profile = db
        .get(name)
        .cloned()
        .ok_or_else(|| {
            Error::Profile(format!(
                "unknown board '{}' (available: {})",
                name,
                db.names().join(", ")
            ))
        })?;

    if !opts.is_empty() {
        for opt in opts.split(',') {
            let (key, value) = opt.split_once('=').ok_or_else(|| {
                Error::Profile(format!("invalid parameter '{}' (expected key=value)", opt))
            })?;
            match key {
                "baud" => {
                    profile.baud = value
                        .parse()
                        .map_err(|_| Error::Profile(format!("invalid baud '{}'", value)))?;
                }
                "tool" => profile.flash_tool = value.to_string(),
                "pattern" => profile.device_pattern = value.to_string(),
                _ => return Err(Error::Profile(format!("unknown parameter '{}'", key))),
            }
        }
    }

    Ok(Board::new(profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_builtin_board() {
        let db = BoardDatabase::builtin();
        let board = open_board("nucleo-l433", &db).unwrap();
        assert_eq!(board.profile().baud, 115_200);
    }

    #[test]
    fn open_with_overrides() {
        let db = BoardDatabase::builtin();
        let board = open_board("nucleo-l433:baud=57600,tool=st-flash-v2", &db).unwrap();
        assert_eq!(board.profile().baud, 57600);
        assert_eq!(board.profile().flash_tool, "st-flash-v2");
    }

    #[test]
    fn unknown_board_is_profile_error() {
        let db = BoardDatabase::builtin();
        let err = open_board("widget", &db).unwrap_err();
        assert!(matches!(err, Error::Profile(_)));
    }

    #[test]
    fn malformed_parameter_is_profile_error() {
        let db = BoardDatabase::builtin();
        assert!(open_board("nucleo-l433:baud", &db).is_err());
        assert!(open_board("nucleo-l433:baud=fast", &db).is_err());
        assert!(open_board("nucleo-l433:color=red", &db).is_err());
    }
}

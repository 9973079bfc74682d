//! Persisted calibration document.
//!
//! On disk it is a single JSON object with exactly three entries, one per dial.
//! Each entry maps a reference value (decimal string key) to a duty-cycle:
//!
//! ```json
//! {
//!   "seconds": { "0": 1000, "30": 2200, "60": 3400 },
//!   "minutes": { "0": 1100, "60": 3300 },
//!   "hours":   { "0": 900, "12": 3100 }
//! }
//! ```
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Raw anchor tables as stored. Keys are ordered numerically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalibrationFile {
    pub seconds: BTreeMap<u32, u16>,
    pub minutes: BTreeMap<u32, u16>,
    pub hours: BTreeMap<u32, u16>,
}

#[derive(Debug, Error)]
pub enum CalibrationFileError {
    #[error("calibration file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("calibration file {} is malformed: {msg}", .path.display())]
    Malformed { path: PathBuf, msg: String },
    #[error("calibration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse a calibration document from text. `origin` only labels errors.
pub fn parse_calibration_json(
    text: &str,
    origin: &Path,
) -> Result<CalibrationFile, CalibrationFileError> {
    serde_json::from_str::<CalibrationFile>(text).map_err(|e| CalibrationFileError::Malformed {
        path: origin.to_path_buf(),
        msg: e.to_string(),
    })
}

pub fn load_calibration_json(path: &Path) -> Result<CalibrationFile, CalibrationFileError> {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CalibrationFileError::NotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(CalibrationFileError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    parse_calibration_json(&text, path)
}

/// Overwrite `path` with `file`.
///
/// The document is written next to the target and renamed over it, so a
/// reader never observes a half-written file.
pub fn save_calibration_json(
    path: &Path,
    file: &CalibrationFile,
) -> Result<(), CalibrationFileError> {
    let io_err = |source: std::io::Error| CalibrationFileError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut text = serde_json::to_string_pretty(file).map_err(|e| io_err(e.into()))?;
    text.push('\n');

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    std::fs::write(&tmp, text).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        io_err(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_serialize_as_decimal_strings_in_numeric_order() {
        let mut f = CalibrationFile::default();
        f.hours.insert(10, 3000);
        f.hours.insert(2, 1200);
        let text = serde_json::to_string(&f).unwrap();
        assert_eq!(
            text,
            r#"{"seconds":{},"minutes":{},"hours":{"2":1200,"10":3000}}"#
        );
    }
}

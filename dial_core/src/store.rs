//! Calibration persistence.
//!
//! `CalibrationStore` owns the domain-level contract (missing vs. malformed,
//! overwrite on save); the raw storage sits behind [`CalibrationBackend`].

use std::path::{Path, PathBuf};

use dial_config::{CalibrationFile, CalibrationFileError};
use tracing::{debug, info};

use crate::calibration::CalibrationMap;
use crate::error::{DialError, Result};

pub trait CalibrationBackend {
    /// `Ok(None)` when nothing has been persisted yet.
    fn read(&self) -> std::result::Result<Option<CalibrationFile>, DialError>;
    /// Replace whatever is stored with `file`.
    fn write(&mut self, file: &CalibrationFile) -> std::result::Result<(), DialError>;
    /// Human-readable location for diagnostics.
    fn describe(&self) -> String;
}

/// JSON document on the local filesystem.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn map_file_error(e: CalibrationFileError) -> DialError {
    match e {
        CalibrationFileError::NotFound(p) => DialError::ConfigurationMissing(p.display().to_string()),
        e @ CalibrationFileError::Malformed { .. } => DialError::ConfigurationMalformed(e.to_string()),
        e @ CalibrationFileError::Io { .. } => DialError::Io(e.to_string()),
    }
}

impl CalibrationBackend for JsonFileBackend {
    fn read(&self) -> std::result::Result<Option<CalibrationFile>, DialError> {
        match dial_config::load_calibration_json(&self.path) {
            Ok(f) => Ok(Some(f)),
            Err(CalibrationFileError::NotFound(_)) => Ok(None),
            Err(e) => Err(map_file_error(e)),
        }
    }

    fn write(&mut self, file: &CalibrationFile) -> std::result::Result<(), DialError> {
        dial_config::save_calibration_json(&self.path, file).map_err(map_file_error)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct CalibrationStore<B> {
    backend: B,
}

impl<B: CalibrationBackend> CalibrationStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Persisted map, or `None` if nothing was saved yet.
    pub fn load(&self) -> Result<Option<CalibrationMap>> {
        let file = self.backend.read()?;
        debug!(location = %self.backend.describe(), found = file.is_some(), "calibration load");
        Ok(file.as_ref().map(CalibrationMap::from))
    }

    /// Run mode: a missing map is `ConfigurationMissing`.
    pub fn load_required(&self) -> Result<CalibrationMap> {
        self.load()?
            .ok_or_else(|| DialError::ConfigurationMissing(self.backend.describe()).into())
    }

    /// Calibration mode: a missing map starts out empty.
    pub fn load_or_empty(&self) -> Result<CalibrationMap> {
        Ok(self.load()?.unwrap_or_else(|| {
            info!(location = %self.backend.describe(), "no calibration yet; starting empty");
            CalibrationMap::empty()
        }))
    }

    /// Overwrite the persisted map with `map`.
    pub fn save(&mut self, map: &CalibrationMap) -> Result<()> {
        self.backend.write(&CalibrationFile::from(map))?;
        info!(location = %self.backend.describe(), "calibration saved");
        Ok(())
    }
}

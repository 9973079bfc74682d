//! Error kinds shared by calibration mode and clock mode.

use thiserror::Error;

use crate::calibration::Dial;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DialError {
    #[error("calibration data missing: {0}")]
    ConfigurationMissing(String),
    #[error("calibration data malformed: {0}")]
    ConfigurationMalformed(String),
    #[error("no anchors recorded for the {0} dial")]
    EmptyAnchorTable(Dial),
    #[error("hardware error: {0}")]
    Hardware(String),
    #[error("key input error: {0}")]
    Input(String),
    #[error("interrupted")]
    Interrupted,
    #[error("io error: {0}")]
    Io(String),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;

//! Maps `Box<dyn Error>` from trait boundaries to typed `DialError`.
//!
//! The traits in `dial_traits` use `Box<dyn Error + Send + Sync>` so any
//! backend can plug in; this module converts those to our typed error enum,
//! with an optional feature-gated path for `dial_hardware::HwError`.

use crate::error::DialError;

/// Map an error returned by a `PwmChannel`.
pub fn map_hw_error(e: &(dyn std::error::Error + 'static)) -> DialError {
    #[cfg(feature = "hardware-errors")]
    {
        if let Some(hw) = e.downcast_ref::<dial_hardware::error::HwError>() {
            return from_hw(hw);
        }
    }
    DialError::Hardware(e.to_string())
}

/// Map an error returned by a `KeyInput`.
pub fn map_input_error(e: &(dyn std::error::Error + 'static)) -> DialError {
    #[cfg(feature = "hardware-errors")]
    {
        if let Some(hw) = e.downcast_ref::<dial_hardware::error::HwError>() {
            return from_hw(hw);
        }
    }
    DialError::Input(e.to_string())
}

#[cfg(feature = "hardware-errors")]
fn from_hw(hw: &dial_hardware::error::HwError) -> DialError {
    use dial_hardware::error::HwError;
    match hw {
        HwError::Terminal(_) | HwError::InputClosed => DialError::Input(hw.to_string()),
        HwError::Io(_) => DialError::Io(hw.to_string()),
        HwError::I2c(_) | HwError::InvalidChannel(_) | HwError::InvalidFrequency(_) => {
            DialError::Hardware(hw.to_string())
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HwError {
    #[error("i2c error: {0}")]
    I2c(String),
    #[error("invalid pwm channel {0} (expected 0..=15)")]
    InvalidChannel(u8),
    #[error("pwm frequency {0} Hz is outside the controller range")]
    InvalidFrequency(u32),
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("key input closed")]
    InputClosed,
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HwError>;

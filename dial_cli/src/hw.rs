//! Hardware assembly: PWM channels for the three hands and the key source.

use dial_config::Config;
use dial_core::Hands;
use dial_traits::KeyInput;

#[cfg(not(all(feature = "hardware", target_os = "linux")))]
pub type Channel = dial_hardware::SimulatedChannel;
#[cfg(all(feature = "hardware", target_os = "linux"))]
pub type Channel = dial_hardware::Pca9685Channel;

#[cfg(not(all(feature = "hardware", target_os = "linux")))]
pub fn open_hands(cfg: &Config) -> eyre::Result<Hands<Channel>> {
    use dial_hardware::SimulatedChannel;
    tracing::info!(
        seconds = cfg.channels.seconds,
        minutes = cfg.channels.minutes,
        hours = cfg.channels.hours,
        "using simulated channels"
    );
    Ok(Hands::new(
        SimulatedChannel::new("seconds"),
        SimulatedChannel::new("minutes"),
        SimulatedChannel::new("hours"),
    ))
}

#[cfg(all(feature = "hardware", target_os = "linux"))]
pub fn open_hands(cfg: &Config) -> eyre::Result<Hands<Channel>> {
    use dial_hardware::{Pca9685, Pca9685Channel};

    let hw = |e: dial_hardware::error::HwError| dial_core::DialError::Hardware(e.to_string());
    let mut dev = Pca9685::open(cfg.pwm.i2c_bus, cfg.pwm.address).map_err(hw)?;
    dev.set_frequency(cfg.pwm.frequency_hz).map_err(hw)?;
    tracing::info!(
        bus = cfg.pwm.i2c_bus,
        address = cfg.pwm.address,
        hz = cfg.pwm.frequency_hz,
        "pca9685 ready"
    );
    let dev = dev.into_shared();
    Ok(Hands::new(
        Pca9685Channel::new(dev.clone(), cfg.channels.seconds).map_err(hw)?,
        Pca9685Channel::new(dev.clone(), cfg.channels.minutes).map_err(hw)?,
        Pca9685Channel::new(dev, cfg.channels.hours).map_err(hw)?,
    ))
}

#[cfg(unix)]
pub fn open_keys() -> eyre::Result<Box<dyn KeyInput>> {
    let keys = dial_hardware::TerminalKeys::stdin()
        .map_err(|e| dial_core::DialError::Input(format!("stdin: {e}")))?;
    if !keys.is_tty() {
        tracing::info!("stdin is not a terminal; reading keystrokes as piped");
    }
    Ok(Box::new(keys))
}

#[cfg(not(unix))]
pub fn open_keys() -> eyre::Result<Box<dyn KeyInput>> {
    Err(dial_core::DialError::Input("calibration needs a unix terminal".into()).into())
}

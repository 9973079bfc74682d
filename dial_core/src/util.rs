//! Duty-cycle arithmetic helpers.

/// Largest duty-cycle value.
pub const DUTY_MAX: u16 = u16::MAX;

/// Clamp a real-valued duty-cycle into `[0, 65535]`. NaN maps to 0.
#[inline]
pub fn clamp_duty(x: f64) -> u16 {
    if x.is_nan() {
        return 0;
    }
    x.clamp(0.0, f64::from(DUTY_MAX)) as u16
}

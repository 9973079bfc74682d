//! Human-readable error descriptions and structured JSON error formatting.

use dial_core::DialError;

/// Stable name for the JSON `reason` field.
pub fn reason_name(e: &DialError) -> &'static str {
    match e {
        DialError::ConfigurationMissing(_) => "ConfigurationMissing",
        DialError::ConfigurationMalformed(_) => "ConfigurationMalformed",
        DialError::EmptyAnchorTable(_) => "EmptyAnchorTable",
        DialError::Hardware(_) => "Hardware",
        DialError::Input(_) => "Input",
        DialError::Interrupted => "Interrupted",
        DialError::Io(_) => "Io",
    }
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    if let Some(de) = err.downcast_ref::<DialError>() {
        return match de {
            DialError::ConfigurationMissing(path) => format!(
                "What happened: No calibration data found at {path}.\nLikely causes: The clock has not been calibrated yet, or --calibration points at the wrong file.\nHow to fix: Run `dial_cli --calibrate` to record the anchors, then start the clock again."
            ),
            DialError::ConfigurationMalformed(msg) => format!(
                "What happened: Configuration could not be used ({msg}).\nLikely causes: A hand-edited or truncated calibration JSON, or an out-of-range value in the TOML.\nHow to fix: Fix the file, or delete the calibration JSON and rerun with --calibrate."
            ),
            DialError::EmptyAnchorTable(dial) => format!(
                "What happened: The {dial} dial has no calibration anchors.\nLikely causes: Every {dial} checkpoint was skipped during calibration.\nHow to fix: Run `dial_cli --calibrate` and confirm at least one {dial} checkpoint."
            ),
            DialError::Hardware(msg) => format!(
                "What happened: Writing to the PWM controller failed ({msg}).\nLikely causes: Wrong I2C bus or address, missing power, or the channel number is out of range.\nHow to fix: Check [pwm] and [channels] in the config and the controller wiring."
            ),
            DialError::Input(msg) => format!(
                "What happened: Reading operator keys failed ({msg}).\nLikely causes: stdin was closed before the session finished, or the terminal could not be configured.\nHow to fix: Run the calibration from an interactive terminal, or pipe enough keystrokes to reach the last checkpoint."
            ),
            DialError::Interrupted => {
                "What happened: Stopped by signal.\nLikely causes: Ctrl-C or a termination request.\nHow to fix: Nothing was saved; rerun when ready.".to_string()
            }
            DialError::Io(msg) => format!(
                "What happened: A file operation failed ({msg}).\nLikely causes: Missing directory or insufficient permissions.\nHow to fix: Check the calibration path and its permissions."
            ),
        };
    }

    // Generic fallback
    let msg = err.to_string();
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable process exit codes per error kind; unknown errors exit with 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match err.downcast_ref::<DialError>() {
        Some(DialError::ConfigurationMissing(_)) | Some(DialError::Io(_)) | None => 1,
        Some(DialError::ConfigurationMalformed(_)) => 3,
        Some(DialError::EmptyAnchorTable(_)) => 4,
        Some(DialError::Hardware(_)) => 5,
        Some(DialError::Input(_)) => 6,
        Some(DialError::Interrupted) => 130,
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let reason = err
        .downcast_ref::<DialError>()
        .map_or("Error", reason_name);
    json!({ "reason": reason, "message": humanize(err) }).to_string()
}

pub use kurbo::Point;

/// Convert a millisecond duration to seconds.
pub fn ms_to_secs(ms: f64) -> f64 {
    ms / 1000.0
}

/// Convert seconds to milliseconds.
pub fn secs_to_ms(secs: f64) -> f64 {
    secs * 1000.0
}

/// Clamp a normalized progress value into `[0, 1]`; NaN maps to 0.
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}

/// Format seconds as an `mm:ss` clock string.
///
/// Seconds are floored; negative or non-finite input renders as `00:00`. Minutes are not
/// wrapped at 60, so long timelines read `75:03`.
pub fn format_clock(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

use web_time::Duration;

/// Converts seconds from preferences to a duration. Negative, infinite, and
/// NaN values become zero.
pub(crate) fn duration_from_secs(secs: f32) -> Duration {
    Duration::try_from_secs_f32(secs).unwrap_or(Duration::ZERO)
}

//! Display formatting for route durations and distances.

/// Distances strictly above this many meters are shown in kilometers.
pub const KILOMETER_THRESHOLD_METERS: f64 = 999.0;

/// Format a whole number of seconds as `"{h}h {m}m"` or `"{m}m"`.
///
/// Hours appear only when at least one full hour has elapsed. Leftover seconds
/// are dropped, so anything under a minute renders as `"0m"`.
///
/// ```
/// use postdist_lib::format_duration;
///
/// assert_eq!(format_duration(0), "0m");
/// assert_eq!(format_duration(61), "1m");
/// assert_eq!(format_duration(3661), "1h 1m");
/// ```
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Format a distance in meters, switching to kilometers above 999 m.
pub fn format_distance(meters: f64) -> String {
    let meters = if meters.is_finite() { meters.max(0.0) } else { 0.0 };

    if meters > KILOMETER_THRESHOLD_METERS {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{} m", meters.round() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_zero_is_non_empty() {
        assert_eq!(format_duration(0), "0m");
    }

    #[test]
    fn duration_under_an_hour_has_no_hour_component() {
        assert_eq!(format_duration(59), "0m");
        assert_eq!(format_duration(61), "1m");
        assert_eq!(format_duration(3599), "59m");
    }

    #[test]
    fn duration_keeps_hour_component_once_present() {
        assert_eq!(format_duration(3600), "1h 0m");
        assert_eq!(format_duration(3661), "1h 1m");
        assert_ne!(format_duration(3661), format_duration(61));
    }

    #[test]
    fn duration_beyond_a_day_stays_in_hours() {
        assert_eq!(format_duration(90_000), "25h 0m");
        assert_eq!(format_duration(u64::MAX), "5124095576030431h 0m");
    }

    #[test]
    fn distance_threshold_is_above_999() {
        assert_eq!(format_distance(999.0), "999 m");
        assert_eq!(format_distance(1000.0), "1.00 km");
    }

    #[test]
    fn distance_small_values_are_whole_meters() {
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(532.4), "532 m");
    }

    #[test]
    fn distance_kilometers_have_two_decimals() {
        assert_eq!(format_distance(1234.0), "1.23 km");
        assert_eq!(format_distance(402_336.7), "402.34 km");
    }

    #[test]
    fn distance_rejects_nonsense_input() {
        assert_eq!(format_distance(-12.0), "0 m");
        assert_eq!(format_distance(f64::NAN), "0 m");
    }
}

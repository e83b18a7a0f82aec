//! Pure conversions into the tracker's expected formats.

use chrono::{DateTime, Utc};

/// Formats total minutes as a Jira workload string.
///
/// Returns `"Xh Ym"` when at least an hour, `"Ym"` below that; fractional
/// minutes are truncated. Negative totals render as `"0m"` rather than the
/// nonsense a per-component truncation would produce.
pub fn minutes_to_workload(total_minutes: f64) -> String {
    if total_minutes <= 0.0 || !total_minutes.is_finite() {
        return "0m".to_string();
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "truncation toward zero is the specified rounding"
    )]
    let total = total_minutes as i64;
    let hours = total / 60;
    let minutes = total % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Formats a UTC timestamp in Jira's offset notation.
///
/// Millisecond precision with a literal `+0000` offset instead of `Z`; no
/// timezone conversion takes place.
pub fn jira_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S%.3f%z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_minutes_is_0m() {
        assert_eq!(minutes_to_workload(0.0), "0m");
    }

    #[test]
    fn sub_hour_totals_have_no_hour_part() {
        assert_eq!(minutes_to_workload(45.0), "45m");
    }

    #[test]
    fn hour_and_minutes() {
        assert_eq!(minutes_to_workload(90.0), "1h 30m");
    }

    #[test]
    fn fractional_minutes_truncate() {
        assert_eq!(minutes_to_workload(125.7), "2h 5m");
    }

    #[test]
    fn exact_hours_keep_zero_minutes() {
        assert_eq!(minutes_to_workload(120.0), "2h 0m");
    }

    #[test]
    fn negative_totals_clamp_to_0m() {
        assert_eq!(minutes_to_workload(-30.0), "0m");
        assert_eq!(minutes_to_workload(-0.5), "0m");
    }

    #[test]
    fn non_finite_totals_clamp_to_0m() {
        assert_eq!(minutes_to_workload(f64::NAN), "0m");
        assert_eq!(minutes_to_workload(f64::INFINITY), "0m");
    }

    #[test]
    fn jira_timestamp_replaces_z_with_offset() {
        let ts = DateTime::parse_from_rfc3339("2023-01-01T10:00:00.000Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(jira_timestamp(ts), "2023-01-01T10:00:00.000+0000");
    }

    #[test]
    fn jira_timestamp_keeps_millisecond_precision() {
        let ts = DateTime::parse_from_rfc3339("2023-06-15T23:59:59.123Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(jira_timestamp(ts), "2023-06-15T23:59:59.123+0000");
    }
}

//! time.rs
//!
//! Coarse relative-time formatting for "Updated ..." badges:
//!     "just now", "5m ago", "3h ago", "2d ago", "4mo ago", "1y ago"
//!
//! Elapsed time is bucketed by cascading rounding. Each coarser count is
//! the rounding of the previous (already rounded) finer count:
//!   • seconds → minutes → hours → days → months (30 days) → years (12 months)
//!   • a bucket is chosen when its count stays under the next unit's size
//!   • boundary values (exactly 60s, 24h, 30d) land in the coarser bucket
//!
//! Everything here is a pure function of `(timestamp, now)`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wording used for a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phrasing {
    /// `"5m ago"`, `"2d ago"`.
    Compact,
    /// English "auto" phrasing: `"5 minutes ago"`, `"yesterday"`, `"last month"`.
    #[default]
    Natural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl Unit {
    fn suffix(self) -> &'static str {
        match self {
            Unit::Minute => "m",
            Unit::Hour => "h",
            Unit::Day => "d",
            Unit::Month => "mo",
            Unit::Year => "y",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::Day => "day",
            Unit::Month => "month",
            Unit::Year => "year",
        }
    }
}

/// Bucketed age of a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elapsed {
    JustNow,
    Ago(i64, Unit),
}

impl Elapsed {
    /// Bucket the time between `timestamp` and `now`.
    pub fn between(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let millis = now.signed_duration_since(timestamp).num_milliseconds();

        let secs = round_div(millis as f64, 1000.0);
        if secs < 60 {
            return Elapsed::JustNow;
        }

        let mins = round_div(secs as f64, 60.0);
        if mins < 60 {
            return Elapsed::Ago(mins, Unit::Minute);
        }

        let hours = round_div(mins as f64, 60.0);
        if hours < 24 {
            return Elapsed::Ago(hours, Unit::Hour);
        }

        let days = round_div(hours as f64, 24.0);
        if days < 30 {
            return Elapsed::Ago(days, Unit::Day);
        }

        let months = round_div(days as f64, 30.0);
        if months < 12 {
            return Elapsed::Ago(months, Unit::Month);
        }

        Elapsed::Ago(round_div(months as f64, 12.0), Unit::Year)
    }

    pub fn phrase(self, phrasing: Phrasing) -> String {
        match (self, phrasing) {
            (Elapsed::JustNow, _) => "just now".to_string(),
            (Elapsed::Ago(n, unit), Phrasing::Compact) => format!("{n}{} ago", unit.suffix()),
            (Elapsed::Ago(1, Unit::Day), Phrasing::Natural) => "yesterday".to_string(),
            (Elapsed::Ago(1, unit @ (Unit::Month | Unit::Year)), Phrasing::Natural) => {
                format!("last {}", unit.name())
            }
            (Elapsed::Ago(n, unit), Phrasing::Natural) => {
                format!("{n} {}{} ago", unit.name(), plural(n))
            }
        }
    }
}

/// Compact relative time, e.g. `"3h ago"`.
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    relative_time_with(timestamp, now, Phrasing::Compact)
}

/// Relative time in the requested phrasing.
pub fn relative_time_with(
    timestamp: DateTime<Utc>,
    now: DateTime<Utc>,
    phrasing: Phrasing,
) -> String {
    Elapsed::between(timestamp, now).phrase(phrasing)
}

fn round_div(value: f64, unit: f64) -> i64 {
    (value / unit).round() as i64
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn compact(age: Duration) -> String {
        relative_time(now() - age, now())
    }

    fn natural(age: Duration) -> String {
        relative_time_with(now() - age, now(), Phrasing::Natural)
    }

    #[test]
    fn test_compact_buckets() {
        assert_eq!(compact(Duration::seconds(0)), "just now");
        assert_eq!(compact(Duration::seconds(59)), "just now");
        assert_eq!(compact(Duration::minutes(5)), "5m ago");
        assert_eq!(compact(Duration::minutes(59)), "59m ago");
        assert_eq!(compact(Duration::hours(3)), "3h ago");
        assert_eq!(compact(Duration::hours(23)), "23h ago");
        assert_eq!(compact(Duration::days(2)), "2d ago");
        assert_eq!(compact(Duration::days(29)), "29d ago");
        assert_eq!(compact(Duration::days(90)), "3mo ago");
        assert_eq!(compact(Duration::days(330)), "11mo ago");
        assert_eq!(compact(Duration::days(730)), "2y ago");
    }

    #[test]
    fn test_boundaries_move_to_coarser_bucket() {
        assert_eq!(compact(Duration::seconds(60)), "1m ago");
        assert_eq!(compact(Duration::minutes(60)), "1h ago");
        assert_eq!(compact(Duration::hours(24)), "1d ago");
        assert_eq!(compact(Duration::days(30)), "1mo ago");
        assert_eq!(compact(Duration::days(360)), "1y ago");
    }

    #[test]
    fn test_rounding_cascades() {
        // 59.5 minutes rounds up to 60 and becomes an hour.
        assert_eq!(compact(Duration::seconds(3570)), "1h ago");
        // 89.5s -> 90s -> 1.5min -> 2min.
        assert_eq!(compact(Duration::milliseconds(89_500)), "2m ago");
        // 400 days -> 13 months -> 1 year.
        assert_eq!(compact(Duration::days(400)), "1y ago");
    }

    #[test]
    fn test_future_timestamp_is_just_now() {
        assert_eq!(relative_time(now() + Duration::hours(5), now()), "just now");
    }

    #[test]
    fn test_natural_phrasing() {
        assert_eq!(natural(Duration::seconds(10)), "just now");
        assert_eq!(natural(Duration::minutes(1)), "1 minute ago");
        assert_eq!(natural(Duration::minutes(42)), "42 minutes ago");
        assert_eq!(natural(Duration::hours(1)), "1 hour ago");
        assert_eq!(natural(Duration::days(1)), "yesterday");
        assert_eq!(natural(Duration::days(6)), "6 days ago");
        assert_eq!(natural(Duration::days(30)), "last month");
        assert_eq!(natural(Duration::days(150)), "5 months ago");
        assert_eq!(natural(Duration::days(365)), "last year");
        assert_eq!(natural(Duration::days(1100)), "3 years ago");
    }

    #[test]
    fn test_bucket_is_independent_of_phrasing() {
        for days in [1, 7, 29, 30, 31, 344, 345, 360] {
            let elapsed = Elapsed::between(now() - Duration::days(days), now());
            let unit = match elapsed {
                Elapsed::Ago(_, unit) => unit,
                Elapsed::JustNow => panic!("{days} days should not be just now"),
            };
            let expected = match days {
                0..=29 => Unit::Day,
                30..=344 => Unit::Month,
                _ => Unit::Year,
            };
            assert_eq!(unit, expected, "{days} days");
        }
    }
}

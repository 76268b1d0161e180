use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

/// Whole days since the epoch (the earliest creation instant of a dataset).
pub type DayOffset = i64;

/// A timestamp as found in the input, with or without a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// Carries an explicit offset (RFC 3339 and friends).
    Offset(DateTime<FixedOffset>),
    /// No offset information.
    Naive(NaiveDateTime),
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an input timestamp.
///
/// Accepted forms, tried in order: RFC 3339 (`2021-03-01T10:00:00Z`), an
/// ISO 8601 datetime with a `+hhmm` offset, a naive datetime with `T` or a
/// space separator and optional fractional seconds, and a bare `YYYY-MM-DD`
/// date (midnight). Returns `None` when nothing matches.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(Timestamp::Offset(dt));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(Timestamp::Offset(dt));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(n) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Timestamp::Naive(n));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(Timestamp::Naive)
}

/// How instants are mapped onto calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayBoundary {
    /// Drop any UTC offset and count days on the timestamp's own wall clock.
    #[default]
    Wall,
    /// Convert every instant into this timezone before counting days.
    /// Naive timestamps are taken to be UTC.
    Zone(Tz),
}

impl DayBoundary {
    /// Wall-clock datetime of `ts` under this boundary mode.
    #[must_use]
    pub fn wall_clock(self, ts: Timestamp) -> NaiveDateTime {
        match (self, ts) {
            (Self::Wall, Timestamp::Offset(dt)) => dt.naive_local(),
            (Self::Wall, Timestamp::Naive(n)) => n,
            (Self::Zone(tz), Timestamp::Offset(dt)) => dt.with_timezone(&tz).naive_local(),
            (Self::Zone(tz), Timestamp::Naive(n)) => {
                Utc.from_utc_datetime(&n).with_timezone(&tz).naive_local()
            }
        }
    }

    /// Wall-clock datetime of the as-of instant under this boundary mode.
    #[must_use]
    pub fn wall_clock_utc(self, at: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Wall => at.naive_utc(),
            Self::Zone(tz) => at.with_timezone(&tz).naive_local(),
        }
    }
}

/// Whole days from `epoch` to `t`, rounded toward negative infinity.
#[must_use]
pub fn days_between(epoch: NaiveDateTime, t: NaiveDateTime) -> DayOffset {
    let delta = t - epoch;
    let days = delta.num_days();
    if delta < TimeDelta::days(days) {
        days - 1
    } else {
        days
    }
}

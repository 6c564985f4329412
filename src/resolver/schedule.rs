use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

/// A point on the recurring annual schedule: month, day and time of day in UTC.
///
/// Upstream timestamps are stamped with an arbitrary year, so only these
/// components are kept. Legs are assumed never to cross 31 December; a leg
/// spanning the new year normalizes both ends into the same year and will
/// compare out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleTime {
    month: u32,
    day: u32,
    time: NaiveTime,
}

impl ScheduleTime {
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self {
            month: dt.month(),
            day: dt.day(),
            time: dt.time(),
        }
    }

    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self::from_datetime)
    }

    /// Absolute instant of this schedule point in `year`.
    /// `None` when the date does not exist that year (29 February).
    pub fn at_year(&self, year: i32) -> Option<DateTime<Utc>> {
        NaiveDate::from_ymd_opt(year, self.month, self.day).map(|d| d.and_time(self.time).and_utc())
    }
}

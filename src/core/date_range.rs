use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Closed range of calendar days.
///
/// `start <= end_inclusive` is maintained by construction: [`DateRange::new`]
/// orders its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end_inclusive: NaiveDate,
}

impl DateRange {
    #[must_use]
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            start: a.min(b),
            end_inclusive: a.max(b),
        }
    }

    #[must_use]
    pub fn start(self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end_inclusive(self) -> NaiveDate {
        self.end_inclusive
    }

    /// Number of days covered, always >= 1.
    #[must_use]
    pub fn num_days(self) -> i64 {
        (self.end_inclusive - self.start).num_days() + 1
    }

    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end_inclusive
    }

    /// Smallest range covering both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end_inclusive: self.end_inclusive.max(other.end_inclusive),
        }
    }

    /// Extends the range outward by `ceil(num_days * fraction)` days on each side.
    ///
    /// Extension saturates at the calendar bounds.
    #[must_use]
    pub fn with_margin(self, start_fraction: f64, end_fraction: f64) -> Self {
        let size = self.num_days() as f64;
        let before = (size * start_fraction).ceil().max(0.0) as u64;
        let after = (size * end_fraction).ceil().max(0.0) as u64;
        Self {
            start: self
                .start
                .checked_sub_days(Days::new(before))
                .unwrap_or(NaiveDate::MIN),
            end_inclusive: self
                .end_inclusive
                .checked_add_days(Days::new(after))
                .unwrap_or(NaiveDate::MAX),
        }
    }

    /// Converts to a half-open range in fractional epoch-day space.
    ///
    /// The exclusive end is the epoch day *after* `end_inclusive`, so a single
    /// day maps to a span of size 1.
    #[must_use]
    pub fn to_fractional(self) -> FractionalDayRange {
        FractionalDayRange {
            start: epoch_day(self.start),
            end: epoch_day(self.end_inclusive) + 1.0,
        }
    }
}

fn epoch_day(date: NaiveDate) -> f64 {
    (date - NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()).num_days() as f64
}

/// Half-open interval in fractional epoch-day space.
///
/// This is the continuous form of a [`DateRange`] handed to the rendering
/// layer during in-flight transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractionalDayRange {
    pub start: f64,
    pub end: f64,
}

impl FractionalDayRange {
    #[must_use]
    pub fn size(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn center(self) -> f64 {
        (self.start + self.end) / 2.0
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Per-endpoint linear interpolation toward `other` at `t` in `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            start: self.start + (other.start - self.start) * t,
            end: self.end + (other.end - self.end) * t,
        }
    }
}

use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::core::date_range::DateRange;
use crate::error::{OrganizerError, OrganizerResult};

/// A calendar grouping granularity.
///
/// Units are ordered finest to coarsest; [`TimeUnit::reference_size`] is the
/// approximate span in days used for that ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeUnit {
    Day,
    Week,
    Month,
}

impl TimeUnit {
    /// Approximate span in days, used only for coarse comparison and sorting.
    #[must_use]
    pub fn reference_size(self) -> f64 {
        match self {
            Self::Day => 1.0,
            Self::Week => 7.0,
            Self::Month => 30.5,
        }
    }

    /// The instance of this unit that contains `date`.
    #[must_use]
    pub fn instance_from(self, date: NaiveDate) -> TimeUnitInstance {
        match self {
            Self::Day => TimeUnitInstance::Day(Day::from_date(date)),
            Self::Week => TimeUnitInstance::Week(Week::from_date(date)),
            Self::Month => TimeUnitInstance::Month(Month::from_date(date)),
        }
    }
}

/// A named, orderable range of calendar days.
pub trait TimeBlock {
    fn start(&self) -> NaiveDate;
    fn end_inclusive(&self) -> NaiveDate;

    /// Human-readable label for headers and block captions.
    fn display_name(&self) -> String;

    fn date_range(&self) -> DateRange {
        DateRange::new(self.start(), self.end_inclusive())
    }

    /// The days contained in this block, in order.
    fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_inclusive();
        self.start().iter_days().take_while(move |day| *day <= end)
    }
}

/// A single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Day {
    date: NaiveDate,
}

impl Day {
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from_date)
    }

    #[must_use]
    pub fn date(self) -> NaiveDate {
        self.date
    }

    pub fn checked_add(self, amount: i64) -> Option<Self> {
        let delta = TimeDelta::try_days(amount)?;
        self.date.checked_add_signed(delta).map(Self::from_date)
    }
}

impl TimeBlock for Day {
    fn start(&self) -> NaiveDate {
        self.date
    }

    fn end_inclusive(&self) -> NaiveDate {
        self.date
    }

    fn display_name(&self) -> String {
        self.date.to_string()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date)
    }
}

/// An ISO week, keyed by its Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Week {
    monday: NaiveDate,
}

impl Week {
    /// The week containing `date`, clamped at the calendar edge where the
    /// enclosing Monday is not representable.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        let offset = u64::from(date.weekday().num_days_from_monday());
        let monday = date
            .checked_sub_days(Days::new(offset))
            .unwrap_or(NaiveDate::MIN);
        Self { monday }
    }

    /// Builds a week from an ISO week-based year and week number.
    pub fn new(iso_year: i32, week: u32) -> Option<Self> {
        NaiveDate::from_isoywd_opt(iso_year, week, chrono::Weekday::Mon)
            .map(|monday| Self { monday })
    }

    #[must_use]
    pub fn iso_year(self) -> i32 {
        self.monday.iso_week().year()
    }

    #[must_use]
    pub fn week(self) -> u32 {
        self.monday.iso_week().week()
    }

    pub fn checked_add(self, amount: i64) -> Option<Self> {
        let delta = TimeDelta::try_days(amount.checked_mul(7)?)?;
        self.monday
            .checked_add_signed(delta)
            .map(|monday| Self { monday })
    }
}

impl TimeBlock for Week {
    fn start(&self) -> NaiveDate {
        self.monday
    }

    fn end_inclusive(&self) -> NaiveDate {
        self.monday
            .checked_add_days(Days::new(6))
            .unwrap_or(NaiveDate::MAX)
    }

    fn display_name(&self) -> String {
        format!("{} \u{2013} {}", self.start(), self.end_inclusive())
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.iso_year(), self.week())
    }
}

/// A calendar month, keyed by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Month {
    first_day: NaiveDate,
}

impl Month {
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        // `with_day(1)` cannot fail for an already-valid date.
        let first_day = date.with_day(1).unwrap_or(date);
        Self { first_day }
    }

    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.first_day.year()
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.first_day.month()
    }

    pub fn checked_add(self, amount: i64) -> Option<Self> {
        let months = i64::from(self.first_day.year())
            .checked_mul(12)?
            .checked_add(i64::from(self.first_day.month0()))?
            .checked_add(amount)?;
        let year = i32::try_from(months.div_euclid(12)).ok()?;
        let month = months.rem_euclid(12) as u32 + 1;
        Self::new(year, month)
    }
}

impl TimeBlock for Month {
    fn start(&self) -> NaiveDate {
        self.first_day
    }

    fn end_inclusive(&self) -> NaiveDate {
        self.first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    fn display_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year(), self.month())
    }
}

/// A concrete instance of a [`TimeUnit`], e.g. the week 2024-W11.
///
/// Instances are comparable and offsettable within their own kind only;
/// cross-kind comparison is a programming error surfaced by
/// [`TimeUnitInstance::try_cmp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnitInstance {
    Day(Day),
    Week(Week),
    Month(Month),
}

impl TimeUnitInstance {
    #[must_use]
    pub fn unit(self) -> TimeUnit {
        match self {
            Self::Day(_) => TimeUnit::Day,
            Self::Week(_) => TimeUnit::Week,
            Self::Month(_) => TimeUnit::Month,
        }
    }

    /// Shifts by `amount` units of the same kind.
    ///
    /// Returns `None` past the representable calendar.
    pub fn checked_add(self, amount: i64) -> Option<Self> {
        match self {
            Self::Day(day) => day.checked_add(amount).map(Self::Day),
            Self::Week(week) => week.checked_add(amount).map(Self::Week),
            Self::Month(month) => month.checked_add(amount).map(Self::Month),
        }
    }

    pub fn checked_sub(self, amount: i64) -> Option<Self> {
        self.checked_add(amount.checked_neg()?)
    }

    pub fn next(self) -> Option<Self> {
        self.checked_add(1)
    }

    pub fn previous(self) -> Option<Self> {
        self.checked_sub(1)
    }

    /// Compares two instances of the same kind.
    ///
    /// Fails with [`OrganizerError::InvalidComparison`] on a kind mismatch
    /// instead of inventing an ordering.
    pub fn try_cmp(self, other: Self) -> OrganizerResult<Ordering> {
        match (self, other) {
            (Self::Day(a), Self::Day(b)) => Ok(a.date().cmp(&b.date())),
            (Self::Week(a), Self::Week(b)) => Ok(a.start().cmp(&b.start())),
            (Self::Month(a), Self::Month(b)) => Ok(a.start().cmp(&b.start())),
            _ => Err(OrganizerError::InvalidComparison {
                left: self.unit(),
                right: other.unit(),
            }),
        }
    }

    /// Closed range from `self` to `end_inclusive` in unit steps.
    ///
    /// Fails with [`OrganizerError::InvalidRange`] when the kinds differ.
    pub fn range_to(self, end_inclusive: Self) -> OrganizerResult<TimeUnitInstanceRange> {
        if self.unit() != end_inclusive.unit() {
            return Err(OrganizerError::InvalidRange {
                start: self.unit(),
                end: end_inclusive.unit(),
            });
        }
        Ok(TimeUnitInstanceRange {
            start: self,
            end_inclusive,
        })
    }
}

impl PartialOrd for TimeUnitInstance {
    /// `None` for instances of different kinds; prefer [`TimeUnitInstance::try_cmp`]
    /// where a mismatch should fail loudly.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(*other).ok()
    }
}

impl TimeBlock for TimeUnitInstance {
    fn start(&self) -> NaiveDate {
        match self {
            Self::Day(day) => day.start(),
            Self::Week(week) => week.start(),
            Self::Month(month) => month.start(),
        }
    }

    fn end_inclusive(&self) -> NaiveDate {
        match self {
            Self::Day(day) => day.end_inclusive(),
            Self::Week(week) => week.end_inclusive(),
            Self::Month(month) => month.end_inclusive(),
        }
    }

    fn display_name(&self) -> String {
        match self {
            Self::Day(day) => day.display_name(),
            Self::Week(week) => week.display_name(),
            Self::Month(month) => month.display_name(),
        }
    }
}

impl fmt::Display for TimeUnitInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(day) => day.fmt(f),
            Self::Week(week) => week.fmt(f),
            Self::Month(month) => month.fmt(f),
        }
    }
}

/// Closed, same-kind range of [`TimeUnitInstance`]s.
///
/// Iteration is lazy, finite and restartable; the range is empty when
/// `start > end_inclusive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnitInstanceRange {
    start: TimeUnitInstance,
    end_inclusive: TimeUnitInstance,
}

impl TimeUnitInstanceRange {
    #[must_use]
    pub fn start(self) -> TimeUnitInstance {
        self.start
    }

    #[must_use]
    pub fn end_inclusive(self) -> TimeUnitInstance {
        self.end_inclusive
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        // Same kind by construction, so the comparison cannot fail.
        self.start.try_cmp(self.end_inclusive) == Ok(Ordering::Greater)
    }

    #[must_use]
    pub fn iter(self) -> TimeUnitInstanceIter {
        TimeUnitInstanceIter {
            next: (!self.is_empty()).then_some(self.start),
            end_inclusive: self.end_inclusive,
        }
    }
}

impl IntoIterator for TimeUnitInstanceRange {
    type Item = TimeUnitInstance;
    type IntoIter = TimeUnitInstanceIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &TimeUnitInstanceRange {
    type Item = TimeUnitInstance;
    type IntoIter = TimeUnitInstanceIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct TimeUnitInstanceIter {
    next: Option<TimeUnitInstance>,
    end_inclusive: TimeUnitInstance,
}

impl Iterator for TimeUnitInstanceIter {
    type Item = TimeUnitInstance;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current == self.end_inclusive {
            None
        } else {
            current.next()
        };
        Some(current)
    }
}

//! Time units, calendar fields and local-time arithmetic.
//!
//! All arithmetic happens on [`ZonedTime`] values. Instant-based steps
//! (milliseconds through hours) move along the UTC timeline; calendar steps
//! (days, months, years) move the local date-time and then resolve it back
//! into the zone, keeping the current offset across overlaps and sliding
//! forward across gaps.

use std::fmt;

use chrono::{
    DateTime, Datelike, LocalResult, Months, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Timelike,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// An instant paired with an IANA zone.
pub type ZonedTime = DateTime<Tz>;

/// Days between 0001-01-01 and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Unit of time used to lay out bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Nanos,
    Micros,
    Millis,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Nanos => "nanos",
            TimeUnit::Micros => "micros",
            TimeUnit::Millis => "millis",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
            TimeUnit::Weeks => "weeks",
            TimeUnit::Months => "months",
            TimeUnit::Years => "years",
        }
    }

    /// Whether one step of this unit moves the local calendar date rather
    /// than the instant.
    pub fn is_calendar_based(&self) -> bool {
        matches!(self, TimeUnit::Days | TimeUnit::Months | TimeUnit::Years)
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar field whose value change marks a bin boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeField {
    MilliOfSecond,
    SecondOfMinute,
    SecondOfDay,
    MinuteOfHour,
    MinuteOfDay,
    HourOfDay,
    DayOfWeek,
    DayOfMonth,
    DayOfYear,
    EpochDay,
    MonthOfYear,
    ProlepticMonth,
    Year,
}

impl TimeField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeField::MilliOfSecond => "milli_of_second",
            TimeField::SecondOfMinute => "second_of_minute",
            TimeField::SecondOfDay => "second_of_day",
            TimeField::MinuteOfHour => "minute_of_hour",
            TimeField::MinuteOfDay => "minute_of_day",
            TimeField::HourOfDay => "hour_of_day",
            TimeField::DayOfWeek => "day_of_week",
            TimeField::DayOfMonth => "day_of_month",
            TimeField::DayOfYear => "day_of_year",
            TimeField::EpochDay => "epoch_day",
            TimeField::MonthOfYear => "month_of_year",
            TimeField::ProlepticMonth => "proleptic_month",
            TimeField::Year => "year",
        }
    }

    /// Value of this field in the local calendar of `at`.
    pub fn value_of(&self, at: &ZonedTime) -> i64 {
        match self {
            TimeField::MilliOfSecond => i64::from(at.nanosecond() % 1_000_000_000 / 1_000_000),
            TimeField::SecondOfMinute => i64::from(at.second()),
            TimeField::SecondOfDay => i64::from(at.num_seconds_from_midnight()),
            TimeField::MinuteOfHour => i64::from(at.minute()),
            TimeField::MinuteOfDay => i64::from(at.hour() * 60 + at.minute()),
            TimeField::HourOfDay => i64::from(at.hour()),
            TimeField::DayOfWeek => i64::from(at.weekday().number_from_monday()),
            TimeField::DayOfMonth => i64::from(at.day()),
            TimeField::DayOfYear => i64::from(at.ordinal()),
            TimeField::EpochDay => {
                i64::from(at.date_naive().num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
            }
            TimeField::MonthOfYear => i64::from(at.month()),
            TimeField::ProlepticMonth => i64::from(at.year()) * 12 + i64::from(at.month0()),
            TimeField::Year => i64::from(at.year()),
        }
    }

    /// Whether the field is derived from the local date alone.
    pub fn is_date_based(&self) -> bool {
        matches!(
            self,
            TimeField::DayOfWeek
                | TimeField::DayOfMonth
                | TimeField::DayOfYear
                | TimeField::EpochDay
                | TimeField::MonthOfYear
                | TimeField::ProlepticMonth
                | TimeField::Year
        )
    }

    /// Whether repeated calendar steps of `unit`, starting from a truncated
    /// start point, eventually change this field's value.
    pub fn advances_with(&self, unit: TimeUnit) -> bool {
        if !self.is_date_based() {
            return false;
        }
        match unit {
            TimeUnit::Days => true,
            TimeUnit::Months => !matches!(self, TimeField::DayOfMonth),
            TimeUnit::Years => !matches!(
                self,
                TimeField::DayOfMonth | TimeField::DayOfYear | TimeField::MonthOfYear
            ),
            _ => false,
        }
    }
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert epoch milliseconds to a zoned timestamp.
pub fn zoned_from_millis(epoch_ms: i64, tz: Tz) -> Result<ZonedTime> {
    match tz.timestamp_millis_opt(epoch_ms) {
        LocalResult::Single(at) => Ok(at),
        _ => Err(Error::TimestampOutOfRange(epoch_ms)),
    }
}

/// Map a local date-time back into `tz`.
///
/// In an overlap the offset `preferred` is kept when it is one of the two
/// candidates, otherwise the earlier offset wins. In a gap the local time is
/// moved later by the length of the gap.
pub fn resolve_local(tz: Tz, local: NaiveDateTime, preferred: chrono::FixedOffset) -> ZonedTime {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(at) => at,
        LocalResult::Ambiguous(earliest, latest) => {
            if latest.offset().fix() == preferred {
                latest
            } else {
                earliest
            }
        }
        LocalResult::None => {
            let before = tz
                .offset_from_utc_datetime(&(local - TimeDelta::days(1)))
                .fix();
            let utc = local - TimeDelta::seconds(i64::from(before.local_minus_utc()));
            tz.from_utc_datetime(&utc)
        }
    }
}

/// Truncate `at` to the start of its `unit` in local time.
///
/// Months and years truncate to midnight of the first day of the month or
/// year. Weeks have no truncation rule.
pub fn truncate(at: &ZonedTime, unit: TimeUnit) -> Result<ZonedTime> {
    let local = at.naive_local();
    let time = local.time();
    let nanos = i64::from(time.nanosecond());
    let seconds_of_day = i64::from(time.num_seconds_from_midnight());

    let truncated = match unit {
        TimeUnit::Nanos => return Ok(*at),
        TimeUnit::Micros => local - TimeDelta::nanoseconds(nanos % 1_000),
        TimeUnit::Millis => local - TimeDelta::nanoseconds(nanos % 1_000_000),
        TimeUnit::Seconds => local - TimeDelta::nanoseconds(nanos),
        TimeUnit::Minutes => {
            local - TimeDelta::seconds(seconds_of_day % 60) - TimeDelta::nanoseconds(nanos)
        }
        TimeUnit::Hours => {
            local - TimeDelta::seconds(seconds_of_day % 3_600) - TimeDelta::nanoseconds(nanos)
        }
        TimeUnit::Days => local.date().and_time(NaiveTime::MIN),
        TimeUnit::Months => {
            let date = local.date();
            (date - TimeDelta::days(i64::from(date.day0()))).and_time(NaiveTime::MIN)
        }
        TimeUnit::Years => {
            let date = local.date();
            (date - TimeDelta::days(i64::from(date.ordinal0()))).and_time(NaiveTime::MIN)
        }
        TimeUnit::Weeks => return Err(Error::UnsupportedUnit(unit)),
    };

    Ok(resolve_local(at.timezone(), truncated, at.offset().fix()))
}

/// Move `at` forward by `delta` along the instant timeline.
pub(crate) fn step_instant(at: &ZonedTime, delta: TimeDelta) -> Result<ZonedTime> {
    at.checked_add_signed(delta)
        .ok_or(Error::TimestampOutOfRange(at.timestamp_millis()))
}

/// Move `at` forward by one calendar `unit` in local time.
pub(crate) fn step_calendar(at: &ZonedTime, unit: TimeUnit) -> Result<ZonedTime> {
    let local = at.naive_local();
    let next = match unit {
        TimeUnit::Days => local.checked_add_signed(TimeDelta::days(1)),
        TimeUnit::Months => local.checked_add_months(Months::new(1)),
        TimeUnit::Years => local.checked_add_months(Months::new(12)),
        _ => return Err(Error::UnsupportedUnit(unit)),
    }
    .ok_or(Error::TimestampOutOfRange(at.timestamp_millis()))?;

    Ok(resolve_local(at.timezone(), next, at.offset().fix()))
}

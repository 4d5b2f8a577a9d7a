//! Next temporal boundary.
//!
//! A boundary is the earliest instant after a start point at which either the
//! compared calendar field or the zone's UTC offset changes. Checking the
//! offset as well as the field catches shifts that do not roll the field,
//! such as the 45 minute transitions in `Pacific/Chatham` or a fall-back hour
//! that repeats the same hour-of-day value.
//!
//! | Unit    | Step                | Start point                 |
//! |---------|---------------------|-----------------------------|
//! | millis  | 1 ms                | as given                    |
//! | seconds | 1 s                 | truncated to the second     |
//! | minutes | 1 min               | truncated to the minute     |
//! | hours   | 15 min              | as given                    |
//! | days    | 1 day (local)       | local midnight              |
//! | months  | 1 month (local)     | first of the month          |
//! | years   | 1 year (local)      | first of the year           |

use chrono::{Offset, TimeDelta};

use crate::core::unit::{step_calendar, step_instant};
use crate::core::{truncate, Error, Result, TimeField, TimeUnit, ZonedTime};

/// Step used for hours. Smaller than the unit so that sub-hour offset
/// transitions are seen.
const HOUR_STEP_MINUTES: i64 = 15;

/// Compute the next boundary of `unit` after `at`.
///
/// Sub-day units compare their own field (milli-of-second, second-of-minute,
/// minute-of-hour, hour-of-day) and ignore `field`. Days, months and years
/// compare `field`, which must advance under repeated steps of the unit.
///
/// The result is always strictly later than `at`.
pub fn next_boundary(unit: TimeUnit, field: TimeField, at: &ZonedTime) -> Result<ZonedTime> {
    let next = match unit {
        TimeUnit::Millis => step_until_change(
            *at,
            at,
            TimeField::MilliOfSecond,
            TimeDelta::milliseconds(1),
        )?,
        TimeUnit::Seconds => step_until_change(
            truncate(at, TimeUnit::Seconds)?,
            at,
            TimeField::SecondOfMinute,
            TimeDelta::seconds(1),
        )?,
        TimeUnit::Minutes => step_until_change(
            truncate(at, TimeUnit::Minutes)?,
            at,
            TimeField::MinuteOfHour,
            TimeDelta::minutes(1),
        )?,
        TimeUnit::Hours => step_until_change(
            *at,
            at,
            TimeField::HourOfDay,
            TimeDelta::minutes(HOUR_STEP_MINUTES),
        )?,
        TimeUnit::Days | TimeUnit::Months | TimeUnit::Years => {
            calendar_boundary(unit, field, at)?
        }
        TimeUnit::Nanos | TimeUnit::Micros | TimeUnit::Weeks => {
            return Err(Error::UnsupportedUnit(unit))
        }
    };

    log::trace!("next {unit} boundary after {at} is {next}");
    Ok(next)
}

/// Step along the instant timeline from `start` until `field` or the offset
/// differs from their values at `at`.
fn step_until_change(
    start: ZonedTime,
    at: &ZonedTime,
    field: TimeField,
    step: TimeDelta,
) -> Result<ZonedTime> {
    let initial_value = field.value_of(at);
    let initial_offset = at.offset().fix();

    let mut next = start;
    while field.value_of(&next) == initial_value && next.offset().fix() == initial_offset {
        next = step_instant(&next, step)?;
    }
    Ok(next)
}

fn calendar_boundary(unit: TimeUnit, field: TimeField, at: &ZonedTime) -> Result<ZonedTime> {
    if !field.advances_with(unit) {
        return Err(Error::IncompatibleField { unit, field });
    }

    let start = truncate(at, unit)?;
    let initial_value = field.value_of(&start);
    let initial_offset = start.offset().fix();

    let mut next = start;
    while field.value_of(&next) == initial_value && next.offset().fix() == initial_offset {
        next = step_calendar(&next, unit)?;
    }
    Ok(next)
}

/// Start of the next local year.
pub fn next_year(at: &ZonedTime) -> Result<ZonedTime> {
    next_boundary(TimeUnit::Years, TimeField::Year, at)
}

/// Start of the next local month.
pub fn next_month(at: &ZonedTime) -> Result<ZonedTime> {
    next_boundary(TimeUnit::Months, TimeField::MonthOfYear, at)
}

/// Start of the next local day.
pub fn next_day(at: &ZonedTime) -> Result<ZonedTime> {
    next_boundary(TimeUnit::Days, TimeField::EpochDay, at)
}

pub fn next_hour(at: &ZonedTime) -> Result<ZonedTime> {
    next_boundary(TimeUnit::Hours, TimeField::HourOfDay, at)
}

pub fn next_minute(at: &ZonedTime) -> Result<ZonedTime> {
    next_boundary(TimeUnit::Minutes, TimeField::MinuteOfHour, at)
}

pub fn next_second(at: &ZonedTime) -> Result<ZonedTime> {
    next_boundary(TimeUnit::Seconds, TimeField::SecondOfMinute, at)
}

pub fn next_millisecond(at: &ZonedTime) -> Result<ZonedTime> {
    next_boundary(TimeUnit::Millis, TimeField::MilliOfSecond, at)
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Proleptic Revised Julian calendar date-time.
//!
//! [`CalendarDate`] uses astronomical year numbering (year 0 exists, year −1
//! is 2 BCE) and nanosecond resolution. It is only built through validating
//! constructors and never mutated afterwards.
//!
//! The Revised Julian and proleptic Gregorian calendars name the same days
//! between 1600-03-01 and 2800-02-28. Outside that window they drift apart,
//! so the `chrono` UTC helpers below translate through the day count
//! instead of copying fields.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};

use crate::error::{CalendarError, Result};
use crate::fraction::{TimeOfDay, NANOS_PER_SECOND};
use crate::jdn::{self, JulianDayNumber};
use crate::leap::is_leap_year;
use crate::ordinal::{days_before_month, days_in_month, OrdinalDate};

/// A date and time of day in the proleptic Revised Julian calendar.
///
/// Ordering is chronological, except that a leap second (`second == 60`)
/// sorts before the following minute it is equivalent to.
///
/// # Examples
///
/// ```
/// use revjul::CalendarDate;
///
/// let date = CalendarDate::new(2000, 1, 1, 12, 0, 0, 0).unwrap();
/// let jdn = date.to_julian_day_number().unwrap();
/// assert_eq!(jdn.day(), 2_451_545);
/// assert_eq!(CalendarDate::from_julian_day_number(&jdn).unwrap(), date);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CalendarDateFields"))]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
}

impl CalendarDate {
    // ── constructors ──────────────────────────────────────────────────

    /// Builds a date-time, validating every component.
    ///
    /// `second` may be 60 (leap second). A `23:59:60` value is accepted here
    /// but cannot be converted to a Julian Day Number.
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
    ) -> Result<Self> {
        let time = TimeOfDay::new(hour, minute, second, nanosecond)?;
        Self::from_ymd(year, month, day).map(|date| date.with_time(time))
    }

    /// Midnight at the start of `year-month-day`.
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self> {
        let leap_year = is_leap_year(year);
        if day == 0 || day > days_in_month(month, leap_year)? {
            return Err(CalendarError::InvalidDay {
                month,
                day,
                leap_year,
            });
        }
        Ok(Self::from_parts(year, month, day, TimeOfDay::MIDNIGHT))
    }

    /// Midnight at the start of an ordinal date.
    #[inline]
    pub fn from_ordinal(date: OrdinalDate) -> Self {
        date.to_calendar_date()
    }

    /// Assembles a date whose components were already validated.
    pub(crate) const fn from_parts(year: i32, month: u8, day: u8, time: TimeOfDay) -> Self {
        Self {
            year,
            month,
            day,
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
            nanosecond: time.nanosecond(),
        }
    }

    /// January 1 of `year` at midnight.
    pub(crate) const fn year_opening(year: i32) -> Self {
        Self::from_parts(year, 1, 1, TimeOfDay::MIDNIGHT)
    }

    /// The last representable instant of `year`.
    pub(crate) const fn year_closing(year: i32) -> Self {
        Self::from_parts(year, 12, 31, TimeOfDay::LAST_INSTANT)
    }

    /// The same day at another time of day.
    #[inline]
    pub const fn with_time(self, time: TimeOfDay) -> Self {
        Self::from_parts(self.year, self.month, self.day, time)
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    #[inline]
    pub const fn second(&self) -> u8 {
        self.second
    }

    #[inline]
    pub const fn nanosecond(&self) -> u32 {
        self.nanosecond
    }

    #[inline]
    pub const fn time(&self) -> TimeOfDay {
        TimeOfDay::from_parts(self.hour, self.minute, self.second, self.nanosecond)
    }

    #[inline]
    pub const fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    /// 1-based day of the year.
    #[inline]
    pub const fn ordinal(&self) -> u16 {
        days_before_month(self.month, self.is_leap_year()) + self.day as u16
    }

    #[inline]
    pub const fn ordinal_date(&self) -> OrdinalDate {
        OrdinalDate::from_parts(self.year, self.ordinal())
    }

    // ── Julian Day Number ─────────────────────────────────────────────

    /// See [`to_julian_day_number`](crate::to_julian_day_number).
    #[inline]
    pub fn to_julian_day_number(&self) -> Result<JulianDayNumber> {
        jdn::to_julian_day_number(self)
    }

    /// See [`from_julian_day_number`](crate::from_julian_day_number).
    #[inline]
    pub fn from_julian_day_number(jdn: &JulianDayNumber) -> Result<Self> {
        jdn::from_julian_day_number(jdn)
    }

    // ── chrono interop ────────────────────────────────────────────────

    /// Reads a `chrono` date-time (proleptic Gregorian) as a Revised Julian date.
    ///
    /// The day is matched through its day count; the time of day is carried
    /// over unchanged. chrono's leap-second encoding (nanoseconds past one
    /// second) becomes `second == 60`.
    pub(crate) fn from_gregorian(datetime: NaiveDateTime) -> Result<Self> {
        let days = i64::from(datetime.date().num_days_from_ce()) - 1;
        let (year, ordinal) = jdn::calendar_day_from_epoch_days(days)?;
        let (month, day) = OrdinalDate::new(year, ordinal)?.month_day();

        let (mut second, mut nanosecond) = (datetime.second() as u8, datetime.nanosecond());
        if u64::from(nanosecond) >= NANOS_PER_SECOND {
            second += 1;
            nanosecond -= NANOS_PER_SECOND as u32;
        }
        Self::new(
            year,
            month,
            day,
            datetime.hour() as u8,
            datetime.minute() as u8,
            second,
            nanosecond,
        )
    }

    /// The `chrono` reading of this date, or `None` outside chrono's range.
    pub(crate) fn to_gregorian(&self) -> Option<NaiveDateTime> {
        let days = jdn::days_since_epoch(self.year, self.ordinal()).ok()?;
        let date = NaiveDate::from_num_days_from_ce_opt(i32::try_from(days + 1).ok()?)?;
        let (second, nanosecond) = if self.second == 60 {
            (59, self.nanosecond + NANOS_PER_SECOND as u32)
        } else {
            (self.second, self.nanosecond)
        };
        date.and_hms_nano_opt(
            self.hour.into(),
            self.minute.into(),
            second.into(),
            nanosecond,
        )
    }

    /// Build a date from a `chrono::DateTime<Utc>`.
    ///
    /// Dates outside 1600-03-01..=2800-02-28 carry different labels in the
    /// two calendars; the instant is preserved, not the label.
    #[inline]
    pub fn from_utc(datetime: DateTime<Utc>) -> Result<Self> {
        Self::from_gregorian(datetime.naive_utc())
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if the value falls outside chrono's representable range.
    #[inline]
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        self.to_gregorian()
            .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
    }
}

/// Writes a year with at least four digits, signed outside `0..=9999`.
pub(crate) fn write_year(f: &mut fmt::Formatter<'_>, year: i32) -> fmt::Result {
    if (0..=9999).contains(&year) {
        write!(f, "{year:04}")
    } else {
        write!(f, "{year:+05}")
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.year)?;
        write!(
            f,
            "-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}",
            self.month, self.day, self.hour, self.minute, self.second, self.nanosecond
        )
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CalendarDateFields {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<CalendarDateFields> for CalendarDate {
    type Error = CalendarError;

    fn try_from(fields: CalendarDateFields) -> Result<Self> {
        Self::new(
            fields.year,
            fields.month,
            fields.day,
            fields.hour,
            fields.minute,
            fields.second,
            fields.nanosecond,
        )
    }
}

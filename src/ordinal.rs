// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Month/day ⇄ ordinal day-of-year translation.
//!
//! The month tables are immutable constants; leap years shift every month
//! after February by one day.

use std::fmt;

use crate::date::{write_year, CalendarDate};
use crate::error::{CalendarError, Result};
use crate::fraction::TimeOfDay;
use crate::leap::{days_in_year, is_leap_year};

/// Days elapsed in a common year before the first of each month.
const DAYS_BEFORE_MONTH: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Month lengths in a common year.
const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

#[inline]
const fn leap_offset(month: u8, is_leap_year: bool) -> u16 {
    if is_leap_year && month > 2 {
        1
    } else {
        0
    }
}

#[inline]
fn month_index(month: u8) -> Result<usize> {
    if (1..=12).contains(&month) {
        Ok(usize::from(month - 1))
    } else {
        Err(CalendarError::InvalidMonth { month })
    }
}

/// Days before the first of `month`; `month` must already be in `1..=12`.
#[inline]
pub(crate) const fn days_before_month(month: u8, is_leap_year: bool) -> u16 {
    DAYS_BEFORE_MONTH[(month - 1) as usize] + leap_offset(month, is_leap_year)
}

/// Splits a validated ordinal (`1..=days_in_year`) into month and day.
fn split_ordinal(ordinal: u16, is_leap_year: bool) -> (u8, u8) {
    for month in (2..=12u8).rev() {
        let threshold = days_before_month(month, is_leap_year);
        if threshold < ordinal {
            return (month, (ordinal - threshold) as u8);
        }
    }
    (1, ordinal as u8)
}

/// Length of `month` for a year with the given leap status.
pub fn days_in_month(month: u8, is_leap_year: bool) -> Result<u8> {
    let index = month_index(month)?;
    let days = DAYS_IN_MONTH[index];
    Ok(if month == 2 && is_leap_year {
        days + 1
    } else {
        days
    })
}

/// Ordinal day (1-based) of `month`/`day` in a year with the given leap status.
///
/// # Errors
/// [`CalendarError::InvalidMonth`] if `month` is outside `1..=12`, and
/// [`CalendarError::InvalidDay`] if `day` is zero or past the end of the month.
pub fn ordinal_day_number(is_leap_year: bool, month: u8, day: u8) -> Result<u16> {
    let length = days_in_month(month, is_leap_year)?;
    if day == 0 || day > length {
        return Err(CalendarError::InvalidDay {
            month,
            day,
            leap_year: is_leap_year,
        });
    }
    Ok(days_before_month(month, is_leap_year) + u16::from(day))
}

/// Month and day for an ordinal day number.
///
/// Ordinal `0` is the day before January 1 and resolves to `(12, 31)`;
/// moving to the previous year is left to the caller.
///
/// # Errors
/// [`CalendarError::InvalidOrdinalDay`] if `ordinal` is past the last day
/// of the year (365, or 366 in a leap year).
pub fn month_day_from_ordinal(ordinal: u16, is_leap_year: bool) -> Result<(u8, u8)> {
    let last = if is_leap_year { 366 } else { 365 };
    if ordinal > last {
        return Err(CalendarError::InvalidOrdinalDay {
            ordinal,
            leap_year: is_leap_year,
        });
    }
    if ordinal == 0 {
        return Ok((12, 31));
    }
    Ok(split_ordinal(ordinal, is_leap_year))
}

// ═══════════════════════════════════════════════════════════════════════════
// OrdinalDate
// ═══════════════════════════════════════════════════════════════════════════

/// A year together with a 1-based day of that year.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "OrdinalDateFields"))]
pub struct OrdinalDate {
    year: i32,
    ordinal: u16,
}

impl OrdinalDate {
    /// Builds an ordinal date, checking `ordinal` against the year's length.
    pub fn new(year: i32, ordinal: u16) -> Result<Self> {
        if ordinal == 0 || ordinal > days_in_year(year) {
            return Err(CalendarError::InvalidOrdinalDay {
                ordinal,
                leap_year: is_leap_year(year),
            });
        }
        Ok(Self { year, ordinal })
    }

    /// Pairs a year with an ordinal that was already checked against it.
    pub(crate) const fn from_parts(year: i32, ordinal: u16) -> Self {
        Self { year, ordinal }
    }

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn ordinal(&self) -> u16 {
        self.ordinal
    }

    #[inline]
    pub const fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    /// Month and day of this ordinal date.
    pub fn month_day(&self) -> (u8, u8) {
        split_ordinal(self.ordinal, self.is_leap_year())
    }

    /// The calendar date at midnight on this day.
    pub fn to_calendar_date(&self) -> CalendarDate {
        let (month, day) = self.month_day();
        CalendarDate::from_parts(self.year, month, day, TimeOfDay::MIDNIGHT)
    }
}

impl fmt::Display for OrdinalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.year)?;
        write!(f, "-{:03}", self.ordinal)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct OrdinalDateFields {
    year: i32,
    ordinal: u16,
}

#[cfg(feature = "serde")]
impl TryFrom<OrdinalDateFields> for OrdinalDate {
    type Error = CalendarError;

    fn try_from(fields: OrdinalDateFields) -> Result<Self> {
        Self::new(fields.year, fields.ordinal)
    }
}

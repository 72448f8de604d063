// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Whole-year day counting and complete-year classification.
//!
//! The Revised Julian leap pattern repeats every [`CYCLE_YEARS`] years,
//! spanning [`CYCLE_DAYS`] days. Inside a cycle that starts at a year
//! `≡ 1 (mod 900)` the two surviving century leap days fall at fixed
//! offsets (200 and 600), which is what makes [`days_for_years`] a closed
//! form. It has to be re-derived if [`is_leap_year`](crate::is_leap_year)
//! ever changes.

use crate::date::CalendarDate;
use crate::error::Result;
use crate::fraction::NANOS_PER_DAY;

/// Length of the Revised Julian leap cycle, in years.
pub const CYCLE_YEARS: u64 = 900;

/// Days in one full leap cycle: `900 × 365 + 218` leap days.
pub const CYCLE_DAYS: u64 = 328_718;

/// Time of day (24 h minus one nanosecond) from which December 31 closes its year.
const YEAR_CLOSING_NANOS: u64 = NANOS_PER_DAY - 1;

/// Total days spanned by `years` consecutive complete years, counted from a
/// year `≡ 1 (mod 900)`.
///
/// The count is unsigned; callers walking backwards apply the sign.
#[inline]
pub const fn days_for_years(years: u64) -> u64 {
    let cycles = years / CYCLE_YEARS;
    let rest = years % CYCLE_YEARS;
    let mut days = cycles * CYCLE_DAYS + rest * 365 + rest / 4 - rest / 100;
    if rest >= 200 {
        days += 1;
    }
    if rest >= 600 {
        days += 1;
    }
    days
}

/// Number of calendar years lying entirely inside the span between `base`
/// and `target`.
///
/// A complete year runs from January 1 at midnight through the last
/// nanosecond of December 31. Only the earlier instant can open a year and
/// only the later one can close it; the argument order does not matter.
///
/// # Errors
/// [`CalendarError::InvalidTimeOfDay`](crate::CalendarError::InvalidTimeOfDay)
/// if either time of day reaches 24 h (a `23:59:60` leap second).
pub fn complete_year_interval(base: &CalendarDate, target: &CalendarDate) -> Result<u64> {
    let (earlier, later) = if base <= target {
        (base, target)
    } else {
        (target, base)
    };
    let earlier_nanos = earlier.time().nanos_since_midnight()?;
    let later_nanos = later.time().nanos_since_midnight()?;
    let opens = earlier.month() == 1 && earlier.day() == 1 && earlier_nanos == 0;
    let closes = later.month() == 12 && later.day() == 31 && later_nanos >= YEAR_CLOSING_NANOS;

    let span = u64::from(earlier.year().abs_diff(later.year()));
    if span == 0 {
        return Ok(u64::from(opens && closes));
    }
    Ok(span - 1 + u64::from(opens) + u64::from(closes))
}

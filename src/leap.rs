// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Revised Julian leap-year rule.
//!
//! A year is a leap year when it is divisible by 4, except century years,
//! which are leap years only when `year mod 900` is 200 or 600. Seven of
//! every nine centuries skip the leap day, so the pattern repeats exactly
//! every 900 years.

/// Returns `true` if `year` (astronomical numbering) is a leap year.
///
/// Negative years are reduced with a Euclidean remainder, so
/// `is_leap_year(y) == is_leap_year(y + 900)` holds for every `y`.
#[inline]
pub const fn is_leap_year(year: i32) -> bool {
    if year % 4 != 0 {
        return false;
    }
    if year % 100 != 0 {
        return true;
    }
    matches!(year.rem_euclid(900), 200 | 600)
}

/// Number of days in `year`: 366 for leap years, 365 otherwise.
#[inline]
pub const fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

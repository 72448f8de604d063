// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every calendar and day-count conversion.

use num_rational::BigRational;

/// Failure returned by the conversions in this crate.
///
/// Every component reports malformed input to its caller instead of
/// correcting it; the encoder and decoder forward these values unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The month is outside `1..=12`.
    #[error("month must be in 1..=12, got {month}")]
    InvalidMonth {
        /// The rejected month.
        month: u8,
    },

    /// The day does not exist in the given month.
    #[error("day {day} does not exist in month {month} (leap year: {leap_year})")]
    InvalidDay {
        /// Month the day was checked against.
        month: u8,
        /// The rejected day.
        day: u8,
        /// Leap status used for the check.
        leap_year: bool,
    },

    /// The ordinal day does not exist in a year of the given leap status.
    #[error("ordinal day {ordinal} is out of range (leap year: {leap_year})")]
    InvalidOrdinalDay {
        /// The rejected ordinal.
        ordinal: u16,
        /// Leap status used for the check.
        leap_year: bool,
    },

    /// A time-of-day component is out of range, or the total reaches 24 h.
    #[error(
        "invalid time of day {hour:02}:{minute:02}:{second:02}.{nanosecond:09}"
    )]
    InvalidTimeOfDay {
        /// The rejected hour.
        hour: u8,
        /// The rejected minute.
        minute: u8,
        /// The rejected second.
        second: u8,
        /// The rejected nanosecond.
        nanosecond: u32,
    },

    /// A day fraction outside `[0, 1)`.
    #[error("day fraction {fraction} is outside [0, 1)")]
    InvalidFraction {
        /// The rejected fraction.
        fraction: BigRational,
    },

    /// The day count cannot be mapped onto a representable calendar year.
    #[error("day count does not map onto a representable calendar year")]
    ConversionOverflow,
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, CalendarError>;

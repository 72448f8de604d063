// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Revised Julian calendar ⇄ Julian Day Number
//!
//! This crate converts proleptic Revised Julian calendar dates with
//! nanosecond resolution into Julian Day Numbers and back, exactly.
//!
//! # Core types
//!
//! - [`CalendarDate`] — validated date and time of day (astronomical year numbering).
//! - [`JulianDayNumber`] — integer Julian day plus an exact fraction since noon.
//! - [`OrdinalDate`] — year plus 1-based day of the year.
//! - [`TimeOfDay`] — civil time of day, leap second tolerant.
//!
//! # Building blocks
//!
//! | Function | Role |
//! |----------|------|
//! | [`is_leap_year`] | Revised Julian leap rule (900-year cycle) |
//! | [`ordinal_day_number`] / [`month_day_from_ordinal`] | month/day ⇄ day of year |
//! | [`days_for_years`] | days in N whole years, closed form per cycle |
//! | [`complete_year_interval`] | whole calendar years inside a span |
//! | [`day_fraction`] / [`time_of_day_from_fraction`] | time of day ⇄ noon-based fraction |
//! | [`to_julian_day_number`] / [`from_julian_day_number`] | date ⇄ JDN |
//!
//! Day fractions are [`BigRational`](num_rational::BigRational) values, so a
//! date survives any number of round trips unchanged.
//!
//! ```
//! use revjul::{from_julian_day_number, to_julian_day_number, CalendarDate};
//!
//! let date = CalendarDate::new(-4712, 3, 14, 6, 30, 0, 250).unwrap();
//! let jdn = to_julian_day_number(&date).unwrap();
//! assert_eq!(from_julian_day_number(&jdn).unwrap(), date);
//! ```
//!
//! # Features
//!
//! - `serde` — `Serialize`/`Deserialize` for the date and day-count types.
//!   Deserialization re-validates every field.
//! - `log` — trace records from the encoder and decoder through the `log` crate.

// Logging hooks; without the `log` feature they expand to nothing.
macro_rules! log_trace {
    ($($args:tt)+) => {
        #[cfg(feature = "log")]
        log::trace!($($args)+);
    };
}

macro_rules! log_error {
    ($($args:tt)+) => {
        #[cfg(feature = "log")]
        log::error!($($args)+);
    };
}

mod date;
mod error;
mod fraction;
mod jdn;
mod leap;
mod ordinal;
mod years;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use date::CalendarDate;
pub use error::{CalendarError, Result};
pub use fraction::{
    day_fraction, time_of_day_from_fraction, NoonFraction, TimeOfDay, NANOS_PER_DAY,
    NANOS_PER_SECOND,
};
pub use jdn::{from_julian_day_number, to_julian_day_number, JulianDayNumber, EPOCH_JDN};
pub use leap::{days_in_year, is_leap_year};
pub use ordinal::{days_in_month, month_day_from_ordinal, ordinal_day_number, OrdinalDate};
pub use years::{complete_year_interval, days_for_years, CYCLE_DAYS, CYCLE_YEARS};

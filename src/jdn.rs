// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Day Number encoding and decoding.
//!
//! A [`JulianDayNumber`] is an integer day count plus an exact fraction of a
//! day elapsed since the preceding noon. The count is anchored on the start
//! of the proleptic year 1: `0001-01-01T00:00:00` is JDN 1 721 425.5.
//!
//! Encoding walks the date down to whole elapsed years (900-year cycles in
//! closed form), the ordinal day within the year, and the noon-based day
//! fraction. Decoding runs the same steps backwards.

use std::fmt;
use std::ops::Sub;

use chrono::Weekday;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};
use qtty::Days;

use crate::date::CalendarDate;
use crate::error::{CalendarError, Result};
use crate::fraction::{day_fraction, half_day, is_unit_fraction, time_of_day_from_fraction};
use crate::leap::{days_in_year, is_leap_year};
use crate::ordinal::{month_day_from_ordinal, ordinal_day_number};
use crate::years::{complete_year_interval, days_for_years, CYCLE_DAYS, CYCLE_YEARS};

/// Integer part of the Julian Day Number at `0001-01-01T00:00:00`
/// (JDN 1 721 425.5).
pub const EPOCH_JDN: i64 = 1_721_425;

/// Julian Day Number at noon on `0001-01-01`.
const EPOCH_NOON_JDN: i64 = EPOCH_JDN + 1;

/// J2000.0: `2000-01-01T12:00:00`.
const J2000_JDN: i64 = 2_451_545;

/// Integer part of the Modified Julian Date offset (`JD − 2 400 000.5`).
const MJD_OFFSET_DAYS: i64 = 2_400_000;

/// Upper bound on single-year steps once the closed-form estimate is taken.
/// The estimate trails the true year by at most three.
const MAX_YEAR_STEPS: u32 = 8;

/// A Julian Day Number with an exact sub-day fraction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "JulianDayNumberFields"))]
pub struct JulianDayNumber {
    day: i64,
    fraction: BigRational,
}

impl JulianDayNumber {
    // ── constructors ──────────────────────────────────────────────────

    /// Builds a Julian Day Number from its integer day and a fraction in `[0, 1)`.
    pub fn new(day: i64, fraction: BigRational) -> Result<Self> {
        if !is_unit_fraction(&fraction) {
            return Err(CalendarError::InvalidFraction { fraction });
        }
        Ok(Self { day, fraction })
    }

    /// Noon of the given Julian day.
    pub fn from_day(day: i64) -> Self {
        Self {
            day,
            fraction: BigRational::zero(),
        }
    }

    /// `0001-01-01T00:00:00`, the origin of the day count.
    pub fn epoch() -> Self {
        Self {
            day: EPOCH_JDN,
            fraction: half_day(),
        }
    }

    /// J2000.0 epoch: `2000-01-01T12:00:00` (JDN 2 451 545.0).
    pub fn j2000() -> Self {
        Self::from_day(J2000_JDN)
    }

    /// Exact conversion of a floating-point Julian Date.
    ///
    /// # Errors
    /// [`CalendarError::ConversionOverflow`] for non-finite values or values
    /// whose integer part does not fit an `i64`.
    pub fn from_days(days: Days) -> Result<Self> {
        let value = BigRational::from_float(days.value()).ok_or(CalendarError::ConversionOverflow)?;
        let whole = value.floor();
        let day = whole
            .to_integer()
            .to_i64()
            .ok_or(CalendarError::ConversionOverflow)?;
        Self::new(day, value - whole)
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The integer Julian day (the day whose noon precedes this instant).
    #[inline]
    pub const fn day(&self) -> i64 {
        self.day
    }

    /// Time since the preceding noon, as a fraction of a day.
    #[inline]
    pub fn fraction(&self) -> &BigRational {
        &self.fraction
    }

    /// The exact value `day + fraction`.
    pub fn to_rational(&self) -> BigRational {
        BigRational::from_integer(BigInt::from(self.day)) + &self.fraction
    }

    /// Julian Date as a floating-point quantity. Lossy beyond ~15 digits.
    pub fn to_days(&self) -> Days {
        let fraction = self.fraction.to_f64().unwrap_or(0.0);
        Days::new(self.day as f64 + fraction)
    }

    /// Modified Julian Date (`JD − 2 400 000.5`) as a floating-point quantity.
    pub fn modified(&self) -> Days {
        let offset = BigRational::from_integer(BigInt::from(MJD_OFFSET_DAYS)) + half_day();
        let mjd = self.to_rational() - offset;
        Days::new(mjd.to_f64().unwrap_or(f64::NAN))
    }

    /// Day of the week of the civil date this instant falls on.
    pub fn weekday(&self) -> Weekday {
        // JDN 0 was a Monday; past midnight the civil date is the next day.
        let past_midnight = self.fraction >= half_day();
        match (self.day.rem_euclid(7) + i64::from(past_midnight)) % 7 {
            0 => Weekday::Mon,
            1 => Weekday::Tue,
            2 => Weekday::Wed,
            3 => Weekday::Thu,
            4 => Weekday::Fri,
            5 => Weekday::Sat,
            _ => Weekday::Sun,
        }
    }

    /// See [`from_julian_day_number`].
    #[inline]
    pub fn to_calendar_date(&self) -> Result<CalendarDate> {
        from_julian_day_number(self)
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl fmt::Display for JulianDayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JDN {} + {}", self.day, self.fraction)
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl JulianDayNumber {
    /// Shifts the instant by `days` whole days.
    ///
    /// # Errors
    /// [`CalendarError::ConversionOverflow`] if the day count leaves `i64`.
    pub fn checked_add_days(&self, days: i64) -> Result<Self> {
        let day = self
            .day
            .checked_add(days)
            .ok_or(CalendarError::ConversionOverflow)?;
        Ok(Self {
            day,
            fraction: self.fraction.clone(),
        })
    }

    /// Shifts the instant back by `days` whole days.
    ///
    /// # Errors
    /// [`CalendarError::ConversionOverflow`] if the day count leaves `i64`.
    pub fn checked_sub_days(&self, days: i64) -> Result<Self> {
        let day = self
            .day
            .checked_sub(days)
            .ok_or(CalendarError::ConversionOverflow)?;
        Ok(Self {
            day,
            fraction: self.fraction.clone(),
        })
    }
}

/// Exact difference in days.
impl Sub for &JulianDayNumber {
    type Output = BigRational;
    fn sub(self, rhs: Self) -> Self::Output {
        let days = BigInt::from(self.day) - BigInt::from(rhs.day);
        BigRational::from_integer(days) + &self.fraction - &rhs.fraction
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct JulianDayNumberFields {
    day: i64,
    fraction: BigRational,
}

#[cfg(feature = "serde")]
impl TryFrom<JulianDayNumberFields> for JulianDayNumber {
    type Error = CalendarError;

    fn try_from(fields: JulianDayNumberFields) -> Result<Self> {
        Self::new(fields.day, fields.fraction)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Encoder
// ═══════════════════════════════════════════════════════════════════════════

/// Converts a calendar date-time into its Julian Day Number.
///
/// # Errors
/// [`CalendarError::InvalidTimeOfDay`] for a `23:59:60` leap second, and
/// [`CalendarError::ConversionOverflow`] for years so close to `i32::MIN`
/// that no 900-year anchor precedes them.
pub fn to_julian_day_number(date: &CalendarDate) -> Result<JulianDayNumber> {
    let ordinal = ordinal_day_number(is_leap_year(date.year()), date.month(), date.day())?;
    let days = days_since_epoch(date.year(), ordinal)?;
    let noon = day_fraction(date.hour(), date.minute(), date.second(), date.nanosecond())?;
    let day = EPOCH_NOON_JDN + days + noon.day_adjustment;
    log_trace!(
        "encoded {date}: {days} days since epoch, adjustment {}, JDN {day}",
        noon.day_adjustment
    );
    Ok(JulianDayNumber {
        day,
        fraction: noon.fraction,
    })
}

/// Whole days from `0001-01-01` to the start of day `ordinal` of `year`;
/// negative before the epoch.
pub(crate) fn days_since_epoch(year: i32, ordinal: u16) -> Result<i64> {
    let cycle_years = CYCLE_YEARS as i64;
    let target = i64::from(year);
    // Count forwards from a cycle start (≡ 1 mod 900) at or before `year`.
    let cycles_back = if target >= 1 {
        0
    } else {
        (1 - target + cycle_years - 1) / cycle_years
    };
    let anchor = 1 - cycles_back * cycle_years;

    let whole_years = if target > anchor {
        let anchor = i32::try_from(anchor).map_err(|_| CalendarError::ConversionOverflow)?;
        let opening = CalendarDate::year_opening(anchor);
        let closing = CalendarDate::year_closing(year - 1);
        complete_year_interval(&opening, &closing)?
    } else {
        0
    };
    let elapsed = days_for_years(whole_years) as i64 - cycles_back * CYCLE_DAYS as i64;
    Ok(elapsed + i64::from(ordinal) - 1)
}

// ═══════════════════════════════════════════════════════════════════════════
// Decoder
// ═══════════════════════════════════════════════════════════════════════════

/// Converts a Julian Day Number back into a calendar date-time.
///
/// The fraction is truncated to whole nanoseconds.
///
/// # Errors
/// [`CalendarError::InvalidFraction`] if the fraction is outside `[0, 1)`,
/// and [`CalendarError::ConversionOverflow`] if the day count lands outside
/// the `i32` year range.
pub fn from_julian_day_number(jdn: &JulianDayNumber) -> Result<CalendarDate> {
    let (time, offset) = time_of_day_from_fraction(&jdn.fraction)?;
    let days = jdn
        .day
        .checked_sub(EPOCH_NOON_JDN)
        .and_then(|days| days.checked_add(offset))
        .ok_or(CalendarError::ConversionOverflow)?;
    let (year, ordinal) = calendar_day_from_epoch_days(days)?;
    let (month, day) = month_day_from_ordinal(ordinal, is_leap_year(year))?;
    log_trace!("decoded {jdn}: {days} days since epoch, year {year}, ordinal {ordinal}");
    Ok(CalendarDate::from_parts(year, month, day, time))
}

/// Year and ordinal day of the civil day `days` after `0001-01-01`.
pub(crate) fn calendar_day_from_epoch_days(days: i64) -> Result<(i32, u16)> {
    let cycle_days = CYCLE_DAYS as i64;
    let cycles = days.div_euclid(cycle_days);
    let mut remaining = days.rem_euclid(cycle_days) as u64;

    // No year is longer than 366 days, so this never overshoots.
    let estimate = remaining / 366;
    remaining -= days_for_years(estimate);
    let mut year = 1 + cycles * CYCLE_YEARS as i64 + estimate as i64;

    let mut steps = 0;
    loop {
        let current = i32::try_from(year).map_err(|_| CalendarError::ConversionOverflow)?;
        let length = u64::from(days_in_year(current));
        if remaining < length {
            return Ok((current, remaining as u16 + 1));
        }
        if steps == MAX_YEAR_STEPS {
            log_error!("year search did not settle after {steps} steps for day {days}");
            return Err(CalendarError::ConversionOverflow);
        }
        remaining -= length;
        year += 1;
        steps += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    fn date(y: i32, mo: u8, d: u8, h: u8, mi: u8, s: u8, ns: u32) -> CalendarDate {
        CalendarDate::new(y, mo, d, h, mi, s, ns).unwrap()
    }

    #[test]
    fn epoch_is_the_start_of_year_one() {
        let jdn = to_julian_day_number(&date(1, 1, 1, 0, 0, 0, 0)).unwrap();
        assert_eq!(jdn, JulianDayNumber::epoch());
        assert_eq!(jdn.day(), 1_721_425);
        assert_eq!(jdn.fraction(), &ratio(1, 2));
    }

    #[test]
    fn j2000() {
        let jdn = to_julian_day_number(&date(2000, 1, 1, 12, 0, 0, 0)).unwrap();
        assert_eq!(jdn, JulianDayNumber::j2000());
        assert_eq!(from_julian_day_number(&jdn).unwrap(), date(2000, 1, 1, 12, 0, 0, 0));
    }

    #[test]
    fn unix_epoch() {
        let jdn = to_julian_day_number(&date(1970, 1, 1, 0, 0, 0, 0)).unwrap();
        assert_eq!(jdn.day(), 2_440_587);
        assert_eq!(jdn.fraction(), &ratio(1, 2));
        assert_eq!(jdn.modified(), Days::new(40_587.0));
    }

    #[test]
    fn evening_keeps_the_same_integer_day() {
        let jdn = to_julian_day_number(&date(2000, 1, 1, 18, 0, 0, 0)).unwrap();
        assert_eq!(jdn.day(), 2_451_545);
        assert_eq!(jdn.fraction(), &ratio(1, 4));
        let morning = to_julian_day_number(&date(2000, 1, 2, 6, 0, 0, 0)).unwrap();
        assert_eq!(morning.day(), 2_451_545);
        assert_eq!(morning.fraction(), &ratio(3, 4));
    }

    #[test]
    fn day_before_the_epoch() {
        assert_eq!(days_since_epoch(0, 365), Ok(-1));
        assert_eq!(calendar_day_from_epoch_days(-1), Ok((0, 365)));
        assert_eq!(days_since_epoch(0, 1), Ok(-365));
        assert_eq!(days_since_epoch(-899, 1), Ok(-(CYCLE_DAYS as i64)));
        assert_eq!(days_since_epoch(-900, 365), Ok(-(CYCLE_DAYS as i64) - 1));
    }

    #[test]
    fn epoch_days_roundtrip_day_by_day() {
        for days in -800_000..800_000 {
            let (year, ordinal) = calendar_day_from_epoch_days(days).unwrap();
            assert!(ordinal >= 1 && ordinal <= days_in_year(year));
            assert_eq!(days_since_epoch(year, ordinal), Ok(days), "day {days}");
        }
    }

    #[test]
    fn consecutive_days_are_consecutive_dates() {
        let mut previous = calendar_day_from_epoch_days(-400_000).unwrap();
        for days in -399_999..400_000 {
            let current = calendar_day_from_epoch_days(days).unwrap();
            if current.0 == previous.0 {
                assert_eq!(current.1, previous.1 + 1);
            } else {
                assert_eq!(current, (previous.0 + 1, 1));
                assert_eq!(previous.1, days_in_year(previous.0));
            }
            previous = current;
        }
    }

    #[test]
    fn decoder_rejects_bad_fractions() {
        let jdn = JulianDayNumber {
            day: 2_451_545,
            fraction: ratio(3, 2),
        };
        assert!(matches!(
            from_julian_day_number(&jdn),
            Err(CalendarError::InvalidFraction { .. })
        ));
        assert!(JulianDayNumber::new(0, ratio(-1, 3)).is_err());
        assert!(JulianDayNumber::new(0, ratio(0, 1)).is_ok());
    }

    #[test]
    fn decoder_reports_overflow() {
        let far = JulianDayNumber::from_day(i64::MAX);
        assert_eq!(
            from_julian_day_number(&far),
            Err(CalendarError::ConversionOverflow)
        );
        let early = JulianDayNumber::from_day(i64::MIN);
        assert_eq!(
            from_julian_day_number(&early),
            Err(CalendarError::ConversionOverflow)
        );
    }

    #[test]
    fn extreme_years() {
        let last = date(i32::MAX, 12, 31, 23, 59, 59, 999_999_999);
        let jdn = to_julian_day_number(&last).unwrap();
        assert_eq!(from_julian_day_number(&jdn).unwrap(), last);
        assert_eq!(
            from_julian_day_number(&jdn.checked_add_days(1).unwrap()),
            Err(CalendarError::ConversionOverflow)
        );

        assert_eq!(
            to_julian_day_number(&date(i32::MIN, 1, 1, 0, 0, 0, 0)),
            Err(CalendarError::ConversionOverflow)
        );
    }

    #[test]
    fn float_interop() {
        let jdn = JulianDayNumber::from_days(Days::new(2_451_545.25)).unwrap();
        assert_eq!(jdn.day(), 2_451_545);
        assert_eq!(jdn.fraction(), &ratio(1, 4));
        assert_eq!(jdn.to_days(), Days::new(2_451_545.25));
        assert_eq!(
            JulianDayNumber::from_days(Days::new(f64::NAN)),
            Err(CalendarError::ConversionOverflow)
        );
        let negative = JulianDayNumber::from_days(Days::new(-0.5)).unwrap();
        assert_eq!(negative.day(), -1);
        assert_eq!(negative.fraction(), &ratio(1, 2));
    }

    #[test]
    fn weekdays() {
        // 2000-01-01 was a Saturday.
        assert_eq!(JulianDayNumber::j2000().weekday(), Weekday::Sat);
        let midnight = to_julian_day_number(&date(2000, 1, 1, 0, 0, 0, 0)).unwrap();
        assert_eq!(midnight.weekday(), Weekday::Sat);
        let late = to_julian_day_number(&date(2000, 1, 1, 23, 0, 0, 0)).unwrap();
        assert_eq!(late.weekday(), Weekday::Sat);
        let next = to_julian_day_number(&date(2000, 1, 2, 0, 0, 0, 0)).unwrap();
        assert_eq!(next.weekday(), Weekday::Sun);
    }

    #[test]
    fn day_count_limits_do_not_overflow() {
        let last = JulianDayNumber::new(i64::MAX, ratio(3, 4)).unwrap();
        let first = JulianDayNumber::new(i64::MIN, ratio(1, 4)).unwrap();

        // i64::MAX ≡ 0 (mod 7) and i64::MIN ≡ 6 (mod 7).
        assert_eq!(last.weekday(), Weekday::Tue);
        assert_eq!(first.weekday(), Weekday::Sun);

        assert_eq!(
            last.checked_add_days(1),
            Err(CalendarError::ConversionOverflow)
        );
        assert_eq!(
            first.checked_sub_days(1),
            Err(CalendarError::ConversionOverflow)
        );
        assert_eq!(last.checked_sub_days(0).unwrap(), last);

        let span = &last - &first;
        let expected = BigRational::from_integer(BigInt::from(u64::MAX)) + ratio(1, 2);
        assert_eq!(span, expected);
        assert_eq!(&first - &last, -expected);
    }

    #[test]
    fn arithmetic_and_display() {
        let a = JulianDayNumber::j2000();
        let b = to_julian_day_number(&date(2000, 1, 3, 0, 0, 0, 0)).unwrap();
        assert_eq!(&b - &a, ratio(3, 2));
        assert_eq!(&a - &b, ratio(-3, 2));
        assert_eq!(a.checked_add_days(10).unwrap().day(), 2_451_555);
        assert_eq!(a.checked_sub_days(10).unwrap().day(), 2_451_535);
        assert_eq!(b.to_string(), "JDN 2451546 + 1/2");
        assert!(a < b);
    }
}

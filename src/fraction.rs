// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time of day ⇄ fraction of a Julian day.
//!
//! Julian days start at noon, so a civil time of day is re-based before it
//! becomes a day fraction:
//!
//! | Civil time | Fraction | Day adjustment |
//! |------------|----------|----------------|
//! | 00:00 ≤ t < 12:00 | `(t + 12 h) / 24 h` | −1 |
//! | 12:00 | 0 | 0 |
//! | 12:00 < t < 24:00 | `(t − 12 h) / 24 h` | 0 |
//!
//! Fractions are exact [`BigRational`] values over nanoseconds, so repeated
//! composition never drifts the way binary floating point does.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive};

use crate::error::{CalendarError, Result};

pub const NANOS_PER_SECOND: u64 = 1_000_000_000;
pub const NANOS_PER_DAY: u64 = 86_400 * NANOS_PER_SECOND;
const NANOS_PER_HALF_DAY: u64 = NANOS_PER_DAY / 2;

/// A civil time of day with nanosecond resolution.
///
/// `second` may be 60 to spell a leap second. Component ranges are checked
/// on construction; whether the total stays below 24 h is checked where the
/// time is converted ([`day_fraction`], the year-interval classifier).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self::from_nanos(0);
    pub const NOON: Self = Self::from_nanos(NANOS_PER_HALF_DAY);
    /// The last representable instant of a day, 23:59:59.999999999.
    pub const LAST_INSTANT: Self = Self::from_nanos(NANOS_PER_DAY - 1);

    /// Builds a time of day, rejecting out-of-range components.
    pub fn new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Result<Self> {
        if hour > 23 || minute > 59 || second > 60 || u64::from(nanosecond) >= NANOS_PER_SECOND {
            return Err(CalendarError::InvalidTimeOfDay {
                hour,
                minute,
                second,
                nanosecond,
            });
        }
        Ok(Self {
            hour,
            minute,
            second,
            nanosecond,
        })
    }

    /// Assembles components that were already range-checked.
    pub(crate) const fn from_parts(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            nanosecond,
        }
    }

    /// Time of day `nanos` nanoseconds after midnight; `nanos` must be below one day.
    pub(crate) const fn from_nanos(nanos: u64) -> Self {
        let seconds = nanos / NANOS_PER_SECOND;
        Self {
            hour: (seconds / 3_600) as u8,
            minute: (seconds / 60 % 60) as u8,
            second: (seconds % 60) as u8,
            nanosecond: (nanos % NANOS_PER_SECOND) as u32,
        }
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

    /// Nanoseconds since midnight.
    ///
    /// # Errors
    /// [`CalendarError::InvalidTimeOfDay`] if the total reaches 24 h, which
    /// only happens for a leap second spelled `23:59:60`.
    pub fn nanos_since_midnight(&self) -> Result<u64> {
        nanos_since_midnight(self.hour, self.minute, self.second, self.nanosecond)
    }
}

/// Validates the components and returns nanoseconds since midnight.
pub(crate) fn nanos_since_midnight(
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
) -> Result<u64> {
    let time = TimeOfDay::new(hour, minute, second, nanosecond)?;
    let seconds = (u64::from(time.hour) * 60 + u64::from(time.minute)) * 60 + u64::from(time.second);
    let nanos = seconds * NANOS_PER_SECOND + u64::from(time.nanosecond);
    if nanos >= NANOS_PER_DAY {
        return Err(CalendarError::InvalidTimeOfDay {
            hour,
            minute,
            second,
            nanosecond,
        });
    }
    Ok(nanos)
}

fn nanos_to_fraction(nanos: u64) -> BigRational {
    BigRational::new(BigInt::from(nanos), BigInt::from(NANOS_PER_DAY))
}

/// A day fraction measured from noon, plus the shift it implies on the
/// integer day count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoonFraction {
    /// Time since the preceding noon, in days, within `[0, 1)`.
    pub fraction: BigRational,
    /// `-1` when the time falls before noon and so belongs to the previous
    /// integer Julian day, `0` otherwise.
    pub day_adjustment: i64,
}

/// Converts a time of day into a fraction of a Julian day.
///
/// # Errors
/// [`CalendarError::InvalidTimeOfDay`] if a component is out of range or the
/// total reaches 24 h.
pub fn day_fraction(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Result<NoonFraction> {
    let nanos = nanos_since_midnight(hour, minute, second, nanosecond)?;
    let (since_noon, day_adjustment) = match nanos.cmp(&NANOS_PER_HALF_DAY) {
        Ordering::Less => (nanos + NANOS_PER_HALF_DAY, -1),
        Ordering::Equal => (0, 0),
        Ordering::Greater => (nanos - NANOS_PER_HALF_DAY, 0),
    };
    Ok(NoonFraction {
        fraction: nanos_to_fraction(since_noon),
        day_adjustment,
    })
}

/// Inverse of [`day_fraction`].
///
/// Truncates `fraction` to whole nanoseconds and returns the civil time of
/// day together with the day offset from the integer Julian day: `0` while
/// the instant is between noon and midnight, `1` once midnight has passed.
///
/// # Errors
/// [`CalendarError::InvalidFraction`] if `fraction` is outside `[0, 1)`.
pub fn time_of_day_from_fraction(fraction: &BigRational) -> Result<(TimeOfDay, i64)> {
    let invalid = || CalendarError::InvalidFraction {
        fraction: fraction.clone(),
    };
    if !is_unit_fraction(fraction) {
        return Err(invalid());
    }
    let nanos_per_day = BigRational::from_integer(BigInt::from(NANOS_PER_DAY));
    let since_noon = (fraction * &nanos_per_day)
        .floor()
        .to_integer()
        .to_u64()
        .ok_or_else(invalid)?;
    Ok(if since_noon < NANOS_PER_HALF_DAY {
        (TimeOfDay::from_nanos(since_noon + NANOS_PER_HALF_DAY), 0)
    } else {
        (TimeOfDay::from_nanos(since_noon - NANOS_PER_HALF_DAY), 1)
    })
}

/// Returns `true` if `fraction` lies in `[0, 1)`.
#[inline]
pub(crate) fn is_unit_fraction(fraction: &BigRational) -> bool {
    !fraction.is_negative() && *fraction < BigRational::one()
}

/// Half a day, the fraction of a Julian day at civil midnight.
#[inline]
pub(crate) fn half_day() -> BigRational {
    BigRational::new(BigInt::one(), BigInt::from(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    fn ratio(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    #[test]
    fn noon_is_the_start_of_the_day() {
        let noon = day_fraction(12, 0, 0, 0).unwrap();
        assert_eq!(noon.fraction, BigRational::zero());
        assert_eq!(noon.day_adjustment, 0);
    }

    #[test]
    fn midnight_belongs_to_the_previous_day() {
        let midnight = day_fraction(0, 0, 0, 0).unwrap();
        assert_eq!(midnight.fraction, ratio(1, 2));
        assert_eq!(midnight.day_adjustment, -1);
    }

    #[test]
    fn afternoon_and_morning() {
        let evening = day_fraction(18, 0, 0, 0).unwrap();
        assert_eq!(evening.fraction, ratio(1, 4));
        assert_eq!(evening.day_adjustment, 0);

        let morning = day_fraction(6, 0, 0, 0).unwrap();
        assert_eq!(morning.fraction, ratio(3, 4));
        assert_eq!(morning.day_adjustment, -1);
    }

    #[test]
    fn nanosecond_resolution_is_exact() {
        let tick = day_fraction(12, 0, 0, 1).unwrap();
        assert_eq!(tick.fraction, ratio(1, 86_400_000_000_000));

        let last = day_fraction(11, 59, 59, 999_999_999).unwrap();
        assert_eq!(last.fraction, ratio(86_399_999_999_999, 86_400_000_000_000));
        assert_eq!(last.day_adjustment, -1);
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!(matches!(
            day_fraction(24, 0, 0, 0),
            Err(CalendarError::InvalidTimeOfDay { hour: 24, .. })
        ));
        assert!(day_fraction(0, 60, 0, 0).is_err());
        assert!(day_fraction(0, 0, 61, 0).is_err());
        assert!(day_fraction(0, 0, 0, 1_000_000_000).is_err());
        // A leap second that would end the day.
        assert_eq!(
            day_fraction(23, 59, 60, 7),
            Err(CalendarError::InvalidTimeOfDay {
                hour: 23,
                minute: 59,
                second: 60,
                nanosecond: 7,
            })
        );
    }

    #[test]
    fn mid_day_leap_second_equals_next_minute() {
        let leap = day_fraction(10, 59, 60, 0).unwrap();
        let next = day_fraction(11, 0, 0, 0).unwrap();
        assert_eq!(leap, next);
    }

    #[test]
    fn inverse_restores_the_time() {
        for (h, m, s, ns) in [
            (0, 0, 0, 0),
            (6, 30, 15, 123_456_789),
            (11, 59, 59, 999_999_999),
            (12, 0, 0, 0),
            (12, 0, 0, 1),
            (23, 59, 59, 999_999_999),
        ] {
            let noon = day_fraction(h, m, s, ns).unwrap();
            let (time, offset) = time_of_day_from_fraction(&noon.fraction).unwrap();
            assert_eq!(time, TimeOfDay::new(h, m, s, ns).unwrap());
            assert_eq!(offset, -noon.day_adjustment);
        }
    }

    #[test]
    fn inverse_truncates_sub_nanosecond_fractions() {
        let fraction = ratio(1, 3);
        let (time, offset) = time_of_day_from_fraction(&fraction).unwrap();
        assert_eq!(offset, 0);
        assert_eq!(time, TimeOfDay::new(20, 0, 0, 0).unwrap());

        let tiny = ratio(1, 10 * 86_400_000_000_000);
        let (time, _) = time_of_day_from_fraction(&tiny).unwrap();
        assert_eq!(time, TimeOfDay::NOON);
    }

    #[test]
    fn inverse_rejects_fractions_outside_the_unit_interval() {
        assert!(matches!(
            time_of_day_from_fraction(&BigRational::one()),
            Err(CalendarError::InvalidFraction { .. })
        ));
        assert!(time_of_day_from_fraction(&ratio(-1, 2)).is_err());
    }

    #[test]
    fn time_of_day_constants() {
        assert_eq!(TimeOfDay::MIDNIGHT.nanos_since_midnight(), Ok(0));
        assert_eq!(TimeOfDay::NOON.hour(), 12);
        let last = TimeOfDay::LAST_INSTANT;
        assert_eq!(
            (last.hour(), last.minute(), last.second(), last.nanosecond()),
            (23, 59, 59, 999_999_999)
        );
    }
}

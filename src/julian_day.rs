// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian day numbers over the proleptic Gregorian calendar.
//!
//! Every calendar in the crate converts to and from the integer **Julian day
//! number** (JDN) defined here. The functions use astronomical year numbering
//! (year 0 is 1 BC) and exact integer arithmetic, so they round-trip for any
//! year an `i32` can hold without drifting.
//!
//! The JDN of a civil day is the Julian Date of its noon: 2000-01-01 is
//! JDN 2 451 545, and its midnight is JD 2 451 544.5. [`julian_date`] and
//! [`split_julian_date`] bridge the two conventions using `qtty::Days`.

use qtty::{Day, Days, Seconds};

/// Julian day number of 0001-01-03 in the proleptic Julian calendar.
const GREGORIAN_EPOCH: i64 = 1_721_426;

/// Julian day number of 1970-01-01.
pub const UNIX_EPOCH_JULIAN_DAY: i64 = 2_440_588;

/// Julian day number of 2000-01-01 (the civil day of J2000.0).
pub const J2000_JULIAN_DAY: i64 = 2_451_545;

/// Milliseconds in a civil day without transitions.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Gregorian leap-year rule on an astronomical year.
#[inline]
pub fn is_gregorian_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Converts a proleptic Gregorian date (astronomical year) to a Julian day number.
///
/// `day` is linear: values outside the month simply move the result by that
/// many days, which the arithmetic engine relies on.
pub fn date_to_julian_day(year: i32, month: i32, day: i32) -> i64 {
    let y1 = i64::from(year) - 1;
    let month = i64::from(month);
    let month_offset = if month <= 2 {
        0
    } else if is_gregorian_leap_year(year) {
        -1
    } else {
        -2
    };

    GREGORIAN_EPOCH - 1
        + 365 * y1
        + y1.div_euclid(4)
        - y1.div_euclid(100)
        + y1.div_euclid(400)
        + (367 * month - 362).div_euclid(12)
        + month_offset
        + i64::from(day)
}

/// Converts a Julian day number to a proleptic Gregorian `(year, month, day)`
/// with astronomical year numbering.
pub fn julian_day_to_date(jd: i64) -> (i32, i32, i32) {
    let depoch = jd - GREGORIAN_EPOCH;
    let quadricent = depoch.div_euclid(146_097);
    let dqc = depoch.rem_euclid(146_097);
    let cent = dqc.div_euclid(36_524);
    let dcent = dqc.rem_euclid(36_524);
    let quad = dcent.div_euclid(1_461);
    let dquad = dcent.rem_euclid(1_461);
    let yindex = dquad.div_euclid(365);

    let mut year = quadricent * 400 + cent * 100 + quad * 4 + yindex;
    if cent != 4 && yindex != 4 {
        year += 1;
    }
    let year = clamp_i32(year);

    let year_day = jd - date_to_julian_day(year, 1, 1);
    let leap_adjust = if jd < date_to_julian_day(year, 3, 1) {
        0
    } else if is_gregorian_leap_year(year) {
        1
    } else {
        2
    };
    let month = ((year_day + leap_adjust) * 12 + 373).div_euclid(367);
    let month = month as i32;
    let day = (jd - date_to_julian_day(year, month, 1) + 1) as i32;
    (year, month, day)
}

/// Day of the week of a Julian day number, `0` = Sunday … `6` = Saturday.
///
/// JDN 0 is a Monday.
#[inline]
pub fn day_of_week_from_sunday(jd: i64) -> u32 {
    (jd + 1).rem_euclid(7) as u32
}

/// Astronomical Julian Date of `millis_of_day` into the civil day `jd`.
///
/// Midnight maps to `jd − 0.5`.
pub fn julian_date(jd: i64, millis_of_day: i64) -> Days {
    let fraction = Seconds::new(millis_of_day as f64 / 1_000.0).to::<Day>();
    Days::new(jd as f64 - 0.5) + fraction
}

/// Splits an astronomical Julian Date into a civil day number and the
/// milliseconds elapsed since its midnight (rounded to the nearest millisecond).
pub fn split_julian_date(value: Days) -> (i64, i64) {
    let shifted = value.value() + 0.5;
    let mut day = shifted.floor() as i64;
    let mut millis = ((shifted - shifted.floor()) * MILLIS_PER_DAY as f64).round() as i64;
    if millis >= MILLIS_PER_DAY {
        day += 1;
        millis -= MILLIS_PER_DAY;
    }
    (day, millis)
}

/// Milliseconds since the Unix epoch of a wall-clock instant.
#[inline]
pub(crate) fn epoch_milliseconds(jd: i64, millis_of_day: i64) -> i64 {
    (jd - UNIX_EPOCH_JULIAN_DAY) * MILLIS_PER_DAY + millis_of_day
}

/// Inverse of [`epoch_milliseconds`].
#[inline]
pub(crate) fn from_epoch_milliseconds(ms: i64) -> (i64, i64) {
    (
        ms.div_euclid(MILLIS_PER_DAY) + UNIX_EPOCH_JULIAN_DAY,
        ms.rem_euclid(MILLIS_PER_DAY),
    )
}

#[inline]
pub(crate) fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_epochs() {
        assert_eq!(date_to_julian_day(2000, 1, 1), J2000_JULIAN_DAY);
        assert_eq!(date_to_julian_day(1970, 1, 1), UNIX_EPOCH_JULIAN_DAY);
        assert_eq!(julian_day_to_date(J2000_JULIAN_DAY), (2000, 1, 1));
    }

    #[test]
    fn leap_years() {
        assert!(is_gregorian_leap_year(2000));
        assert!(is_gregorian_leap_year(2024));
        assert!(!is_gregorian_leap_year(1900));
        assert!(!is_gregorian_leap_year(2023));
        assert!(is_gregorian_leap_year(0));
        assert!(is_gregorian_leap_year(-4));
    }

    #[test]
    fn february_boundaries() {
        let feb_29 = date_to_julian_day(2024, 2, 29);
        assert_eq!(julian_day_to_date(feb_29), (2024, 2, 29));
        assert_eq!(julian_day_to_date(feb_29 + 1), (2024, 3, 1));
        let feb_28 = date_to_julian_day(2023, 2, 28);
        assert_eq!(julian_day_to_date(feb_28 + 1), (2023, 3, 1));
    }

    #[test]
    fn round_trips_across_millennia() {
        let start = date_to_julian_day(-4000, 1, 1);
        let end = date_to_julian_day(10_000, 12, 31);
        let mut jd = start;
        while jd <= end {
            let (y, m, d) = julian_day_to_date(jd);
            assert_eq!(date_to_julian_day(y, m, d), jd, "jd {jd} -> {y}-{m}-{d}");
            jd += 97;
        }
    }

    #[test]
    fn linear_day_overflow() {
        assert_eq!(
            date_to_julian_day(2019, 6, 35),
            date_to_julian_day(2019, 7, 5)
        );
        assert_eq!(
            date_to_julian_day(2019, 3, 0),
            date_to_julian_day(2019, 2, 28)
        );
    }

    #[test]
    fn weekday_of_known_days() {
        // 2000-01-01 was a Saturday, 2019-06-05 a Wednesday.
        assert_eq!(day_of_week_from_sunday(J2000_JULIAN_DAY), 6);
        assert_eq!(day_of_week_from_sunday(date_to_julian_day(2019, 6, 5)), 3);
        assert_eq!(day_of_week_from_sunday(-1), 0);
    }

    #[test]
    fn julian_date_of_noon_and_midnight() {
        assert_eq!(julian_date(J2000_JULIAN_DAY, 43_200_000), Days::new(2_451_545.0));
        assert_eq!(julian_date(J2000_JULIAN_DAY, 0), Days::new(2_451_544.5));
    }

    #[test]
    fn split_julian_date_recovers_parts() {
        assert_eq!(
            split_julian_date(Days::new(2_451_545.0)),
            (J2000_JULIAN_DAY, 43_200_000)
        );
        assert_eq!(split_julian_date(Days::new(2_451_544.5)), (J2000_JULIAN_DAY, 0));
        let (day, millis) = split_julian_date(julian_date(2_459_000, 3_600_000));
        assert_eq!(day, 2_459_000);
        assert!((millis - 3_600_000).abs() <= 1);
    }

    #[test]
    fn epoch_millisecond_helpers() {
        assert_eq!(epoch_milliseconds(UNIX_EPOCH_JULIAN_DAY, 0), 0);
        assert_eq!(from_epoch_milliseconds(-1), (UNIX_EPOCH_JULIAN_DAY - 1, MILLIS_PER_DAY - 1));
        let ms = epoch_milliseconds(J2000_JULIAN_DAY, 12_345);
        assert_eq!(from_epoch_milliseconds(ms), (J2000_JULIAN_DAY, 12_345));
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The Hebrew calendar.
//!
//! Lunisolar: seven years in every nineteen are leap years with a thirteenth
//! month (Adar I, month 6). The start of each year is computed from the
//! mean conjunction (molad) in *parts* of an hour (1 080 parts per hour),
//! then postponed by the dehiyyot rules. Months are numbered from Tishrei,
//! so Nisan is month 7 in a common year and month 8 in a leap year.

use crate::calendar::{Calendar, EraDate};

const HEBREW_EPOCH: i64 = 347_997;

const HOUR_PARTS: i64 = 1080;
const DAY_PARTS: i64 = 24 * HOUR_PARTS;
const MONTH_DAYS: i64 = 29;
const MONTH_FRACTION: i64 = 12 * HOUR_PARTS + 793;
const MONTH_PARTS: i64 = MONTH_DAYS * DAY_PARTS + MONTH_FRACTION;

const ERAS: &[&str] = &["AM"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YearType {
    Deficient,
    Regular,
    Complete,
}

#[inline]
fn is_leap_year(year: i32) -> bool {
    (7 * i64::from(year) + 1).rem_euclid(19) < 7
}

/// Day of the molad of Tishrei, with the first postponement applied.
fn delay_1(year: i64) -> i64 {
    let months = (235 * year - 234).div_euclid(19);
    let parts = 12_084 + 13_753 * months;
    let mut day = months * 29 + parts.div_euclid(25_920);
    if (3 * (day + 1)).rem_euclid(7) < 3 {
        day += 1;
    }
    day
}

/// Further postponement keeping year lengths within 353..=355 / 383..=385.
fn delay_2(year: i64) -> i64 {
    let last = delay_1(year - 1);
    let present = delay_1(year);
    let next = delay_1(year + 1);
    if next - present == 356 {
        2
    } else if present - last == 382 {
        1
    } else {
        0
    }
}

#[inline]
fn start_of_year(year: i64) -> i64 {
    delay_1(year) + delay_2(year)
}

#[inline]
fn days_in_year(year: i32) -> i64 {
    let year = i64::from(year);
    start_of_year(year + 1) - start_of_year(year)
}

fn year_type(year: i32) -> YearType {
    let mut length = days_in_year(year);
    if length > 380 {
        length -= 30;
    }
    match length {
        353 => YearType::Deficient,
        355 => YearType::Complete,
        _ => YearType::Regular,
    }
}

fn days_in_month(year: i32, month: i32) -> i32 {
    let leap = is_leap_year(year);
    // Common years skip Adar I; renumber so month 6 is always Adar I.
    let month = if month >= 6 && !leap { month + 1 } else { month };
    match month {
        4 | 7 | 9 | 11 | 13 => 29,
        2 if year_type(year) == YearType::Complete => 30,
        2 => 29,
        3 if year_type(year) == YearType::Deficient => 29,
        6 if !leap => 0,
        _ => 30,
    }
}

/// The Hebrew calendar (`"hebrew"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HebrewCalendar;

impl Calendar for HebrewCalendar {
    fn identifier(&self) -> &str {
        "hebrew"
    }

    fn from_julian_day(&self, jd: i64) -> EraDate {
        let d = jd - HEBREW_EPOCH;
        let mut year = (19 * d * DAY_PARTS + 234 * MONTH_PARTS).div_euclid(235 * MONTH_PARTS) + 1;
        let mut day_of_year = d - start_of_year(year);
        while day_of_year < 1 {
            year -= 1;
            day_of_year = d - start_of_year(year);
        }
        let year = crate::julian_day::clamp_i32(year);

        let mut month = 1;
        let mut month_start = 0i64;
        while month_start < day_of_year {
            month_start += i64::from(days_in_month(year, month));
            month += 1;
        }
        month -= 1;
        month_start -= i64::from(days_in_month(year, month));
        EraDate::new("AM", year, month, (day_of_year - month_start) as i32)
    }

    fn to_julian_day(&self, date: &EraDate) -> i64 {
        let months: i64 = (1..date.month)
            .map(|month| i64::from(days_in_month(date.year, month)))
            .sum();
        start_of_year(i64::from(date.year)) + months + i64::from(date.day) + HEBREW_EPOCH
    }

    fn days_in_month(&self, date: &EraDate) -> i32 {
        days_in_month(date.year, date.month)
    }

    fn months_in_year(&self, date: &EraDate) -> i32 {
        if is_leap_year(date.year) {
            13
        } else {
            12
        }
    }

    fn years_in_era(&self, _date: &EraDate) -> i32 {
        9999
    }

    fn eras(&self) -> &'static [&'static str] {
        ERAS
    }

    fn days_in_year(&self, date: &EraDate) -> i32 {
        days_in_year(date.year) as i32
    }

    fn balance_year_month(&self, date: &mut EraDate, previous: &EraDate) {
        // Keep Nisan as Nisan when moving between leap and common years.
        if previous.year != date.year && previous.month > 6 {
            match (is_leap_year(previous.year), is_leap_year(date.year)) {
                (true, false) => date.month -= 1,
                (false, true) => date.month += 1,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::julian_day::date_to_julian_day;

    #[test]
    fn rosh_hashanah_5784() {
        let cal = HebrewCalendar;
        let jd = date_to_julian_day(2023, 9, 16);
        assert_eq!(cal.from_julian_day(jd), EraDate::new("AM", 5784, 1, 1));
        assert_eq!(cal.to_julian_day(&EraDate::new("AM", 5784, 1, 1)), jd);
    }

    #[test]
    fn nisan_in_leap_year_is_month_eight() {
        let cal = HebrewCalendar;
        assert!(is_leap_year(5784));
        assert_eq!(
            cal.from_julian_day(date_to_julian_day(2024, 4, 9)),
            EraDate::new("AM", 5784, 8, 1)
        );
        assert_eq!(cal.months_in_year(&EraDate::new("AM", 5784, 1, 1)), 13);
        assert_eq!(cal.months_in_year(&EraDate::new("AM", 5783, 1, 1)), 12);
    }

    #[test]
    fn year_lengths_are_legal() {
        for year in 5700..5900 {
            let length = days_in_year(year);
            let legal = if is_leap_year(year) {
                383..=385
            } else {
                353..=355
            };
            assert!(legal.contains(&length), "year {year} has {length} days");
        }
    }

    #[test]
    fn balance_keeps_month_identity() {
        let cal = HebrewCalendar;
        let previous = EraDate::new("AM", 5784, 8, 1);
        let mut date = EraDate::new("AM", 5785, 8, 1);
        cal.balance_year_month(&mut date, &previous);
        assert_eq!(date.month, 7);

        let previous = EraDate::new("AM", 5783, 7, 1);
        let mut date = EraDate::new("AM", 5784, 7, 1);
        cal.balance_year_month(&mut date, &previous);
        assert_eq!(date.month, 8);
    }

    #[test]
    fn round_trip() {
        let cal = HebrewCalendar;
        let start = date_to_julian_day(1, 1, 1);
        for jd in (start..start + 1_000_000).step_by(7) {
            let date = cal.from_julian_day(jd);
            assert_eq!(cal.to_julian_day(&date), jd, "{date}");
            assert!(date.day >= 1 && date.day <= cal.days_in_month(&date));
        }
    }
}

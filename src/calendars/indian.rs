// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The Indian national (Saka) calendar.
//!
//! Years begin on Gregorian March 22, or March 21 in Gregorian leap years.
//! Chaitra has 30 days (31 in those leap years), the next five months 31
//! and the remaining six 30.

use crate::calendar::{Calendar, EraDate};
use crate::julian_day::{date_to_julian_day, is_gregorian_leap_year, julian_day_to_date};

/// Gregorian year in which Saka year 0 began.
const INDIAN_ERA_START: i32 = 78;
/// Day of the Gregorian year on which the Saka year starts (0-based).
const INDIAN_YEAR_START: i64 = 80;
const ERAS: &[&str] = &["saka"];

/// The Indian calendar (`"indian"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndianCalendar;

impl Calendar for IndianCalendar {
    fn identifier(&self) -> &str {
        "indian"
    }

    fn from_julian_day(&self, jd: i64) -> EraDate {
        let (gregorian_year, _, _) = julian_day_to_date(jd);
        let mut year = gregorian_year - INDIAN_ERA_START;
        let mut day_of_year = jd - date_to_julian_day(gregorian_year, 1, 1);

        let chaitra;
        if day_of_year < INDIAN_YEAR_START {
            year -= 1;
            chaitra = if is_gregorian_leap_year(gregorian_year - 1) { 31 } else { 30 };
            day_of_year += chaitra + 31 * 5 + 30 * 3 + 10;
        } else {
            chaitra = if is_gregorian_leap_year(gregorian_year) { 31 } else { 30 };
            day_of_year -= INDIAN_YEAR_START;
        }

        let (month, day) = if day_of_year < chaitra {
            (1, day_of_year + 1)
        } else {
            let rest = day_of_year - chaitra;
            if rest < 31 * 5 {
                (rest / 31 + 2, rest % 31 + 1)
            } else {
                let rest = rest - 31 * 5;
                (rest / 30 + 7, rest % 30 + 1)
            }
        };
        EraDate::new("saka", year, month as i32, day as i32)
    }

    fn to_julian_day(&self, date: &EraDate) -> i64 {
        let gregorian_year = date.year + INDIAN_ERA_START;
        let (chaitra, mut jd) = if is_gregorian_leap_year(gregorian_year) {
            (31, date_to_julian_day(gregorian_year, 3, 21))
        } else {
            (30, date_to_julian_day(gregorian_year, 3, 22))
        };
        let day = i64::from(date.day) - 1;
        if date.month == 1 {
            return jd + day;
        }
        let month = i64::from(date.month);
        jd += chaitra + (month - 2).min(5) * 31;
        if month >= 8 {
            jd += (month - 7) * 30;
        }
        jd + day
    }

    fn days_in_month(&self, date: &EraDate) -> i32 {
        match date.month {
            1 if is_gregorian_leap_year(date.year + INDIAN_ERA_START) => 31,
            2..=6 => 31,
            _ => 30,
        }
    }

    fn months_in_year(&self, _date: &EraDate) -> i32 {
        12
    }

    fn years_in_era(&self, _date: &EraDate) -> i32 {
        9919
    }

    fn eras(&self) -> &'static [&'static str] {
        ERAS
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The proleptic Gregorian calendar with BC/AD eras.
//!
//! This is the reference calendar of the crate: several other calendars
//! (Japanese, Buddhist, Taiwanese, Indian, fiscal) are Gregorian months with
//! different year numbering and delegate their month lengths here.

use crate::calendar::{Calendar, EraDate};
use crate::julian_day::{date_to_julian_day, is_gregorian_leap_year, julian_day_to_date};

const ERAS: &[&str] = &["BC", "AD"];

/// Astronomical year of an era/year pair (1 BC is year 0).
#[inline]
pub(crate) fn extended_year(era: &str, year: i32) -> i32 {
    if era == "BC" {
        1 - year
    } else {
        year
    }
}

/// Splits an astronomical year into a Gregorian era and year of era.
#[inline]
pub(crate) fn from_extended_year(year: i32) -> (&'static str, i32) {
    if year <= 0 {
        ("BC", 1 - year)
    } else {
        ("AD", year)
    }
}

/// Gregorian month length in an astronomical year.
#[inline]
pub(crate) fn gregorian_days_in_month(year: i32, month: i32) -> i32 {
    match month {
        2 if is_gregorian_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Builds the Gregorian `EraDate` for an astronomical year.
#[inline]
pub(crate) fn gregorian_date(year: i32, month: i32, day: i32) -> EraDate {
    let (era, year) = from_extended_year(year);
    EraDate::new(era, year, month, day)
}

/// The proleptic Gregorian calendar (`"gregory"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GregorianCalendar;

impl Calendar for GregorianCalendar {
    fn identifier(&self) -> &str {
        "gregory"
    }

    fn from_julian_day(&self, jd: i64) -> EraDate {
        let (year, month, day) = julian_day_to_date(jd);
        gregorian_date(year, month, day)
    }

    fn to_julian_day(&self, date: &EraDate) -> i64 {
        date_to_julian_day(extended_year(date.era, date.year), date.month, date.day)
    }

    fn days_in_month(&self, date: &EraDate) -> i32 {
        gregorian_days_in_month(extended_year(date.era, date.year), date.month)
    }

    fn months_in_year(&self, _date: &EraDate) -> i32 {
        12
    }

    fn years_in_era(&self, _date: &EraDate) -> i32 {
        9999
    }

    fn eras(&self) -> &'static [&'static str] {
        ERAS
    }

    fn days_in_year(&self, date: &EraDate) -> i32 {
        if is_gregorian_leap_year(extended_year(date.era, date.year)) {
            366
        } else {
            365
        }
    }

    fn balance_date(&self, date: &mut EraDate) {
        if date.year <= 0 {
            date.era = if date.era == "BC" { "AD" } else { "BC" };
            date.year = 1 - date.year;
        }
    }

    fn is_inverse_era(&self, date: &EraDate) -> bool {
        date.era == "BC"
    }
}

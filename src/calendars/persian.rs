// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The Persian (Solar Hijri) calendar, arithmetic 33-year cycle.
//!
//! The first six months have 31 days, the next five 30, and Esfand has 29
//! days (30 in leap years).

use crate::calendar::{Calendar, EraDate};

const PERSIAN_EPOCH: i64 = 1_948_320;
const ERAS: &[&str] = &["AP"];

/// Days from 1 Farvardin to the first day of `month`.
#[inline]
fn month_start(month: i32) -> i64 {
    let m = i64::from(month) - 1;
    if month <= 7 {
        31 * m
    } else {
        30 * m + 6
    }
}

#[inline]
fn is_leap_year(year: i32) -> bool {
    (25 * i64::from(year) + 11).rem_euclid(33) < 8
}

/// Days from the epoch to 1 Farvardin of `year`.
#[inline]
fn year_start(year: i64) -> i64 {
    365 * (year - 1) + (8 * year + 21).div_euclid(33)
}

/// The Persian calendar (`"persian"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersianCalendar;

impl Calendar for PersianCalendar {
    fn identifier(&self) -> &str {
        "persian"
    }

    fn from_julian_day(&self, jd: i64) -> EraDate {
        let days = jd - PERSIAN_EPOCH;
        let year = 1 + (33 * days + 3).div_euclid(12_053);
        let day_of_year = days - year_start(year);
        let month_index = if day_of_year < 216 {
            day_of_year.div_euclid(31)
        } else {
            (day_of_year - 6).div_euclid(30)
        };
        let month = month_index as i32 + 1;
        let day = (day_of_year - month_start(month) + 1) as i32;
        EraDate::new("AP", crate::julian_day::clamp_i32(year), month, day)
    }

    fn to_julian_day(&self, date: &EraDate) -> i64 {
        PERSIAN_EPOCH - 1
            + year_start(i64::from(date.year))
            + month_start(date.month)
            + i64::from(date.day)
    }

    fn days_in_month(&self, date: &EraDate) -> i32 {
        match date.month {
            1..=6 => 31,
            7..=11 => 30,
            _ if is_leap_year(date.year) => 30,
            _ => 29,
        }
    }

    fn months_in_year(&self, _date: &EraDate) -> i32 {
        12
    }

    fn years_in_era(&self, _date: &EraDate) -> i32 {
        9377
    }

    fn eras(&self) -> &'static [&'static str] {
        ERAS
    }
}

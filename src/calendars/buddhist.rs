// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The Thai Buddhist calendar: Gregorian months, years counted from 544 BC.

use super::gregorian::gregorian_days_in_month;
use crate::calendar::{Calendar, EraDate};
use crate::julian_day::{date_to_julian_day, is_gregorian_leap_year, julian_day_to_date};

const BUDDHIST_ERA_START: i32 = -543;
const ERAS: &[&str] = &["BE"];

#[inline]
fn gregorian_year(date: &EraDate) -> i32 {
    date.year + BUDDHIST_ERA_START
}

/// The Buddhist calendar (`"buddhist"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuddhistCalendar;

impl Calendar for BuddhistCalendar {
    fn identifier(&self) -> &str {
        "buddhist"
    }

    fn from_julian_day(&self, jd: i64) -> EraDate {
        let (year, month, day) = julian_day_to_date(jd);
        EraDate::new("BE", year - BUDDHIST_ERA_START, month, day)
    }

    fn to_julian_day(&self, date: &EraDate) -> i64 {
        date_to_julian_day(gregorian_year(date), date.month, date.day)
    }

    fn days_in_month(&self, date: &EraDate) -> i32 {
        gregorian_days_in_month(gregorian_year(date), date.month)
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
        if is_gregorian_leap_year(gregorian_year(date)) {
            366
        } else {
            365
        }
    }
}

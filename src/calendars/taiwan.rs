// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The Republic of China (Minguo) calendar.
//!
//! Gregorian months with years counted from 1912. Years before 1912 belong
//! to the `before_minguo` era and count backwards.

use super::gregorian::gregorian_days_in_month;
use crate::calendar::{Calendar, EraDate};
use crate::julian_day::{date_to_julian_day, is_gregorian_leap_year, julian_day_to_date};

const TAIWAN_ERA_START: i32 = 1911;
const ERAS: &[&str] = &["before_minguo", "minguo"];

#[inline]
fn gregorian_year(date: &EraDate) -> i32 {
    if date.era == "minguo" {
        date.year + TAIWAN_ERA_START
    } else {
        1 - date.year + TAIWAN_ERA_START
    }
}

fn from_gregorian_year(year: i32) -> (&'static str, i32) {
    let y = year - TAIWAN_ERA_START;
    if y > 0 {
        ("minguo", y)
    } else {
        ("before_minguo", 1 - y)
    }
}

/// The Taiwanese calendar (`"roc"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaiwanCalendar;

impl Calendar for TaiwanCalendar {
    fn identifier(&self) -> &str {
        "roc"
    }

    fn from_julian_day(&self, jd: i64) -> EraDate {
        let (year, month, day) = julian_day_to_date(jd);
        let (era, year) = from_gregorian_year(year);
        EraDate::new(era, year, month, day)
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

    fn years_in_era(&self, date: &EraDate) -> i32 {
        if date.era == "before_minguo" {
            9999
        } else {
            9999 - TAIWAN_ERA_START
        }
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

    fn balance_date(&self, date: &mut EraDate) {
        let (era, year) = from_gregorian_year(gregorian_year(date));
        date.era = era;
        date.year = year;
    }

    fn is_inverse_era(&self, date: &EraDate) -> bool {
        date.era == "before_minguo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minguo_years() {
        let cal = TaiwanCalendar;
        let jd = date_to_julian_day(2024, 10, 10);
        assert_eq!(cal.from_julian_day(jd), EraDate::new("minguo", 113, 10, 10));
        let first = date_to_julian_day(1912, 1, 1);
        assert_eq!(cal.from_julian_day(first), EraDate::new("minguo", 1, 1, 1));
        assert_eq!(
            cal.from_julian_day(first - 1),
            EraDate::new("before_minguo", 1, 12, 31)
        );
    }

    #[test]
    fn balance_crosses_era_boundary() {
        let cal = TaiwanCalendar;
        let mut date = EraDate::new("minguo", 0, 6, 1);
        cal.balance_date(&mut date);
        assert_eq!(date, EraDate::new("before_minguo", 1, 6, 1));
        assert!(cal.is_inverse_era(&date));
    }

    #[test]
    fn round_trip() {
        let cal = TaiwanCalendar;
        let start = date_to_julian_day(1800, 1, 1);
        for jd in (start..start + 90_000).step_by(13) {
            assert_eq!(cal.to_julian_day(&cal.from_julian_day(jd)), jd);
        }
    }
}

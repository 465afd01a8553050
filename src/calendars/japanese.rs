// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The Japanese imperial calendar.
//!
//! Gregorian months and days, with years counted from the start of each
//! imperial era. Eras begin mid-year, so the first year of an era has a
//! minimum month (and, in that month, a minimum day) above 1, and the last
//! year of an era ends early. Dates before Meiji are expressed as Meiji
//! years ≤ 0 and clamped to Meiji 1 by `constrain_date`.

use super::gregorian::gregorian_days_in_month;
use crate::calendar::{era_index, Calendar, EraDate};
use crate::julian_day::{date_to_julian_day, is_gregorian_leap_year, julian_day_to_date};

/// Era names, oldest first.
const ERA_NAMES: &[&str] = &["meiji", "taisho", "showa", "heisei", "reiwa"];

/// Gregorian `(year, month, day)` on which each era starts.
const ERA_START_DATES: [(i32, i32, i32); 5] = [
    (1868, 9, 8),
    (1912, 7, 30),
    (1926, 12, 25),
    (1989, 1, 8),
    (2019, 5, 1),
];

/// Last Gregorian day of each era that has ended.
const ERA_END_DATES: [(i32, i32, i32); 4] = [
    (1912, 7, 29),
    (1926, 12, 24),
    (1989, 1, 7),
    (2019, 4, 30),
];

/// Offset between era years and Gregorian years.
const ERA_ADDENDS: [i32; 5] = [1867, 1911, 1925, 1988, 2018];

/// Index of the era containing a Gregorian date; dates before Meiji map to Meiji.
fn find_era(year: i32, month: i32, day: i32) -> usize {
    let first_after = ERA_START_DATES
        .iter()
        .position(|&start| (year, month, day) < start);
    match first_after {
        None => ERA_START_DATES.len() - 1,
        Some(0) => 0,
        Some(idx) => idx - 1,
    }
}

fn index_of(date: &EraDate) -> usize {
    ERA_NAMES.iter().position(|e| *e == date.era).unwrap_or(0)
}

/// Gregorian astronomical year of a Japanese date.
#[inline]
fn gregorian_year(date: &EraDate) -> i32 {
    date.year + ERA_ADDENDS[index_of(date)]
}

/// The Japanese imperial calendar (`"japanese"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JapaneseCalendar;

impl JapaneseCalendar {
    fn era_start(date: &EraDate) -> Option<(i32, i32, i32)> {
        if date.year == 1 {
            Some(ERA_START_DATES[index_of(date)])
        } else {
            None
        }
    }
}

impl Calendar for JapaneseCalendar {
    fn identifier(&self) -> &str {
        "japanese"
    }

    fn from_julian_day(&self, jd: i64) -> EraDate {
        let (year, month, day) = julian_day_to_date(jd);
        let era = find_era(year, month, day);
        EraDate::new(ERA_NAMES[era], year - ERA_ADDENDS[era], month, day)
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
        let idx = index_of(date);
        let current = ERA_START_DATES[idx];
        match ERA_START_DATES.get(idx + 1) {
            None => 9999 - current.0 + 1,
            Some(&(next_year, next_month, next_day)) => {
                let mut years = next_year - current.0;
                if (date.month, date.day) < (next_month, next_day) {
                    years += 1;
                }
                years
            }
        }
    }

    fn eras(&self) -> &'static [&'static str] {
        ERA_NAMES
    }

    fn days_in_year(&self, date: &EraDate) -> i32 {
        if is_gregorian_leap_year(gregorian_year(date)) {
            366
        } else {
            365
        }
    }

    fn minimum_month_in_year(&self, date: &EraDate) -> i32 {
        Self::era_start(date).map_or(1, |(_, month, _)| month)
    }

    fn minimum_day_in_month(&self, date: &EraDate) -> i32 {
        match Self::era_start(date) {
            Some((_, month, day)) if date.month == month => day,
            _ => 1,
        }
    }

    fn balance_date(&self, date: &mut EraDate) {
        let year = gregorian_year(date);
        let era = find_era(year, date.month, date.day);
        if ERA_NAMES[era] != date.era {
            date.era = ERA_NAMES[era];
            date.year = year - ERA_ADDENDS[era];
        }
        // Dates before Meiji clamp to its first day.
        self.constrain_date(date);
    }

    fn constrain_date(&self, date: &mut EraDate) {
        let idx = era_index(self, date.era).unwrap_or(0);
        if let Some(&(end_year, end_month, end_day)) = ERA_END_DATES.get(idx) {
            let max_year = end_year - ERA_ADDENDS[idx];
            date.year = date.year.clamp(1, max_year);
            if date.year == max_year {
                date.month = date.month.min(end_month);
                if date.month == end_month {
                    date.day = date.day.min(end_day);
                }
            }
        }

        if date.year == 1 {
            let (_, start_month, start_day) = ERA_START_DATES[idx];
            date.month = date.month.max(start_month);
            if date.month == start_month {
                date.day = date.day.max(start_day);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_transition_2019() {
        let cal = JapaneseCalendar;
        let last_heisei = date_to_julian_day(2019, 4, 30);
        assert_eq!(
            cal.from_julian_day(last_heisei),
            EraDate::new("heisei", 31, 4, 30)
        );
        assert_eq!(
            cal.from_julian_day(last_heisei + 1),
            EraDate::new("reiwa", 1, 5, 1)
        );
    }

    #[test]
    fn round_trip() {
        let cal = JapaneseCalendar;
        let start = date_to_julian_day(1868, 9, 8);
        for jd in (start..start + 60_000).step_by(7) {
            let date = cal.from_julian_day(jd);
            assert_eq!(cal.to_julian_day(&date), jd, "{date}");
        }
    }

    #[test]
    fn constrain_clamps_to_era_bounds() {
        let cal = JapaneseCalendar;
        let mut date = EraDate::new("heisei", 40, 6, 1);
        cal.constrain_date(&mut date);
        assert_eq!(date, EraDate::new("heisei", 31, 4, 1));

        let mut date = EraDate::new("reiwa", 1, 2, 1);
        cal.constrain_date(&mut date);
        assert_eq!(date, EraDate::new("reiwa", 1, 5, 1));
    }

    #[test]
    fn minimums_in_first_era_year() {
        let cal = JapaneseCalendar;
        let first = EraDate::new("heisei", 1, 1, 10);
        assert_eq!(cal.minimum_month_in_year(&first), 1);
        assert_eq!(cal.minimum_day_in_month(&first), 8);
        let later = EraDate::new("heisei", 2, 1, 10);
        assert_eq!(cal.minimum_day_in_month(&later), 1);
    }

    #[test]
    fn years_in_era_depends_on_day_of_year() {
        let cal = JapaneseCalendar;
        assert_eq!(cal.years_in_era(&EraDate::new("heisei", 5, 3, 1)), 31);
        assert_eq!(cal.years_in_era(&EraDate::new("heisei", 5, 6, 1)), 30);
        assert_eq!(cal.years_in_era(&EraDate::new("reiwa", 5, 6, 1)), 7981);
    }

    #[test]
    fn balance_moves_into_next_era() {
        let cal = JapaneseCalendar;
        let mut date = EraDate::new("heisei", 31, 5, 1);
        cal.balance_date(&mut date);
        assert_eq!(date, EraDate::new("reiwa", 1, 5, 1));
    }
}

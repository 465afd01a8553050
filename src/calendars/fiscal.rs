// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Retail fiscal calendars built from a table of week-aligned periods.
//!
//! A [`FiscalCalendar`] keeps Gregorian fields but measures months by the
//! fiscal period that contains a date: a 5-week period is a 35-day month,
//! and the start and end of a month are the period's first and last days.
//! Dates outside the table fall back to plain Gregorian behaviour.
//!
//! The fields themselves stay Gregorian. A day past the end of its Gregorian
//! month reports the Gregorian length, so overflow carries into the next
//! real month, and `balance_date` renormalizes through the Julian day.

use super::gregorian::GregorianCalendar;
use crate::calendar::{Calendar, EraDate};
use crate::julian_day::date_to_julian_day;
use chrono::Weekday;

/// One fiscal period: an inclusive range of Julian day numbers and its
/// length in weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiscalPeriod {
    start: i64,
    end: i64,
    weeks: u32,
}

impl FiscalPeriod {
    /// Builds a period from inclusive Gregorian `(year, month, day)` bounds.
    pub fn new(start: (i32, i32, i32), end: (i32, i32, i32), weeks: u32) -> Self {
        Self {
            start: date_to_julian_day(start.0, start.1, start.2),
            end: date_to_julian_day(end.0, end.1, end.2),
            weeks,
        }
    }

    /// Julian day number of the first day.
    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Julian day number of the last day.
    #[inline]
    pub fn end(&self) -> i64 {
        self.end
    }

    #[inline]
    pub fn weeks(&self) -> u32 {
        self.weeks
    }

    #[inline]
    pub fn contains(&self, jd: i64) -> bool {
        (self.start..=self.end).contains(&jd)
    }
}

/// A Gregorian-based calendar whose months follow a fiscal period table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiscalCalendar {
    identifier: String,
    periods: Vec<FiscalPeriod>,
    epoch_offset: i64,
}

impl FiscalCalendar {
    /// Creates a calendar from periods sorted in chronological order.
    pub fn new(identifier: impl Into<String>, periods: Vec<FiscalPeriod>) -> Self {
        Self {
            identifier: identifier.into(),
            periods,
            epoch_offset: 0,
        }
    }

    /// The 4-5-4 retail year running from 2015-02-01 to 2016-01-30,
    /// identified as `"custom-454"`.
    pub fn retail_2015() -> Self {
        let periods = vec![
            FiscalPeriod::new((2015, 2, 1), (2015, 2, 28), 4),
            FiscalPeriod::new((2015, 3, 1), (2015, 4, 4), 5),
            FiscalPeriod::new((2015, 4, 5), (2015, 5, 2), 4),
            FiscalPeriod::new((2015, 5, 3), (2015, 5, 30), 4),
            FiscalPeriod::new((2015, 5, 31), (2015, 7, 4), 5),
            FiscalPeriod::new((2015, 7, 5), (2015, 8, 1), 4),
            FiscalPeriod::new((2015, 8, 2), (2015, 8, 29), 4),
            FiscalPeriod::new((2015, 8, 30), (2015, 10, 3), 5),
            FiscalPeriod::new((2015, 10, 4), (2015, 10, 31), 4),
            FiscalPeriod::new((2015, 11, 1), (2015, 11, 28), 4),
            FiscalPeriod::new((2015, 11, 29), (2016, 1, 2), 5),
            FiscalPeriod::new((2016, 1, 3), (2016, 1, 30), 4),
        ];
        Self::new("custom-454", periods)
    }

    /// Shifts the mapping between fields and Julian days by `days`.
    ///
    /// `from_julian_day(jd)` reads the Gregorian fields of `jd + days` and
    /// `to_julian_day` subtracts the same amount, so conversions still
    /// round-trip.
    pub fn with_epoch_offset(mut self, days: i64) -> Self {
        self.epoch_offset = days;
        self
    }

    pub fn periods(&self) -> &[FiscalPeriod] {
        &self.periods
    }

    fn period_of(&self, date: &EraDate) -> Option<&FiscalPeriod> {
        let jd = self.to_julian_day(date);
        self.periods.iter().find(|p| p.contains(jd))
    }
}

impl Calendar for FiscalCalendar {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn from_julian_day(&self, jd: i64) -> EraDate {
        GregorianCalendar.from_julian_day(jd + self.epoch_offset)
    }

    fn to_julian_day(&self, date: &EraDate) -> i64 {
        GregorianCalendar.to_julian_day(date) - self.epoch_offset
    }

    fn days_in_month(&self, date: &EraDate) -> i32 {
        let gregorian = GregorianCalendar.days_in_month(date);
        if !(1..=gregorian).contains(&date.day) {
            return gregorian;
        }
        match self.period_of(date) {
            Some(period) => period.weeks as i32 * 7,
            None => gregorian,
        }
    }

    fn months_in_year(&self, date: &EraDate) -> i32 {
        GregorianCalendar.months_in_year(date)
    }

    fn years_in_era(&self, date: &EraDate) -> i32 {
        GregorianCalendar.years_in_era(date)
    }

    fn eras(&self) -> &'static [&'static str] {
        GregorianCalendar.eras()
    }

    fn first_day_of_week(&self) -> Option<Weekday> {
        Some(Weekday::Sun)
    }

    fn start_of_month(&self, date: &EraDate) -> Option<i64> {
        self.period_of(date).map(FiscalPeriod::start)
    }

    fn end_of_month(&self, date: &EraDate) -> Option<i64> {
        self.period_of(date).map(FiscalPeriod::end)
    }

    fn start_of_year(&self, date: &EraDate) -> Option<i64> {
        self.period_of(date)?;
        self.periods.first().map(FiscalPeriod::start)
    }

    fn end_of_year(&self, date: &EraDate) -> Option<i64> {
        self.period_of(date)?;
        self.periods.last().map(FiscalPeriod::end)
    }

    fn balance_date(&self, date: &mut EraDate) {
        *date = self.from_julian_day(self.to_julian_day(date));
    }

    fn is_inverse_era(&self, date: &EraDate) -> bool {
        GregorianCalendar.is_inverse_era(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_week_period_has_35_days() {
        let cal = FiscalCalendar::retail_2015();
        assert_eq!(cal.days_in_month(&EraDate::new("AD", 2015, 3, 15)), 35);
        assert_eq!(cal.days_in_month(&EraDate::new("AD", 2015, 2, 10)), 28);
        // Outside the table: Gregorian lengths.
        assert_eq!(cal.days_in_month(&EraDate::new("AD", 2017, 3, 15)), 31);
    }

    #[test]
    fn period_bounds() {
        let cal = FiscalCalendar::retail_2015();
        let date = EraDate::new("AD", 2015, 3, 15);
        assert_eq!(cal.start_of_month(&date), Some(2_457_083));
        assert_eq!(cal.end_of_month(&date), Some(date_to_julian_day(2015, 4, 4)));
        assert_eq!(cal.start_of_year(&date), Some(2_457_055));
        assert_eq!(cal.end_of_year(&date), Some(2_457_418));
        assert_eq!(cal.start_of_month(&EraDate::new("AD", 2014, 3, 15)), None);
    }

    #[test]
    fn overflowing_days_report_gregorian_length() {
        let cal = FiscalCalendar::retail_2015();
        assert_eq!(cal.days_in_month(&EraDate::new("AD", 2015, 3, 31)), 35);
        assert_eq!(cal.days_in_month(&EraDate::new("AD", 2015, 3, 32)), 31);
        assert_eq!(cal.days_in_month(&EraDate::new("AD", 2015, 3, 0)), 31);
    }

    #[test]
    fn balance_normalizes_through_julian_day() {
        let cal = FiscalCalendar::retail_2015();
        let mut date = EraDate::new("AD", 2015, 3, 34);
        cal.balance_date(&mut date);
        assert_eq!(date, EraDate::new("AD", 2015, 4, 3));

        let mut date = EraDate::new("AD", 0, 12, 31);
        cal.balance_date(&mut date);
        assert_eq!(date, EraDate::new("BC", 1, 12, 31));
    }

    #[test]
    fn arithmetic_inside_the_table_stays_on_real_days() {
        use crate::{AnyCalendarDate, CalendarDate, DateDuration, DateFields};
        use std::sync::Arc;

        let cal: crate::CalendarRef = Arc::new(FiscalCalendar::retail_2015());
        let end_of_march = CalendarDate::new(cal.clone(), 2015, 3, 31);
        let next = end_of_march.add(DateDuration::days(1));
        assert_eq!((next.month(), next.day()), (4, 1));

        let mid = CalendarDate::new(cal.clone(), 2015, 3, 15);
        let later = mid.add(DateDuration::days(30));
        assert_eq!((later.month(), later.day()), (4, 14));
        assert_eq!(later.subtract(DateDuration::days(30)), mid);
        assert_eq!(later.to_julian_day() - mid.to_julian_day(), 30);

        let built = CalendarDate::new(cal.clone(), 2015, 3, 34);
        assert_eq!((built.month(), built.day()), (3, 31));
        let set = mid.set(DateFields::new().day(35)).unwrap();
        assert_eq!((set.month(), set.day()), (3, 31));
    }

    #[test]
    fn week_starts_on_sunday() {
        assert_eq!(
            FiscalCalendar::retail_2015().first_day_of_week(),
            Some(Weekday::Sun)
        );
    }

    #[test]
    fn epoch_offset_round_trips() {
        let cal = FiscalCalendar::retail_2015().with_epoch_offset(3);
        let jd = date_to_julian_day(2015, 3, 15);
        let date = cal.from_julian_day(jd);
        assert_eq!(date, EraDate::new("AD", 2015, 3, 18));
        assert_eq!(cal.to_julian_day(&date), jd);
    }

    #[test]
    fn periods_tile_the_year() {
        let cal = FiscalCalendar::retail_2015();
        for pair in cal.periods().windows(2) {
            assert_eq!(pair[0].end() + 1, pair[1].start());
        }
        for period in cal.periods() {
            assert_eq!(period.end() - period.start() + 1, i64::from(period.weeks()) * 7);
        }
    }
}

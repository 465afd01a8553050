// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The calendar abstraction.
//!
//! A [`Calendar`] describes how days, months, years and eras are organised in
//! one civil calendar system, and how a date in that system maps onto the
//! calendar-independent Julian day number (see [`crate::julian_day`]).
//!
//! Calendars are stateless after construction and are shared between every
//! date that uses them through a [`CalendarRef`] (`Arc<dyn Calendar>`).
//!
//! # Required and optional capabilities
//!
//! Implementors must provide the Julian-day mapping and the month/year/era
//! metadata. Everything else has a default implementation that encodes the
//! generic behaviour, so a calendar only overrides what it does differently:
//!
//! | Method | Default |
//! |--------|---------|
//! | [`first_day_of_week`](Calendar::first_day_of_week) | `None` (the region decides) |
//! | [`start_of_month`](Calendar::start_of_month) … [`end_of_year`](Calendar::end_of_year) | `None` (first/last day of the period) |
//! | [`minimum_month_in_year`](Calendar::minimum_month_in_year) | `1` |
//! | [`minimum_day_in_month`](Calendar::minimum_day_in_month) | `1` |
//! | [`days_in_year`](Calendar::days_in_year) | sum of the month lengths |
//! | [`balance_date`](Calendar::balance_date), [`balance_year_month`](Calendar::balance_year_month), [`constrain_date`](Calendar::constrain_date) | no-op |
//! | [`is_inverse_era`](Calendar::is_inverse_era) | `false` |
//!
//! The `balance_*`, `constrain_date` and `is_inverse_era` hooks are called
//! only by the arithmetic engine in [`crate::manipulation`].

use chrono::Weekday;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a calendar. Many dates point at one instance.
pub type CalendarRef = Arc<dyn Calendar>;

/// Calendar-less date fields.
///
/// This is the record a [`Calendar`] reads and, in its balancing hooks,
/// rewrites. Fields are signed so that the engine can hold overflowed values
/// (`month = 13`, `day = 0`) while it normalises them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EraDate {
    pub era: &'static str,
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

impl EraDate {
    #[inline]
    pub const fn new(era: &'static str, year: i32, month: i32, day: i32) -> Self {
        Self {
            era,
            year,
            month,
            day,
        }
    }
}

impl fmt::Display for EraDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:04}-{:02}-{:02}",
            self.era, self.year, self.month, self.day
        )
    }
}

/// A calendar system.
///
/// See the [module documentation](self) for which methods are required.
pub trait Calendar: fmt::Debug + Send + Sync {
    /// CLDR identifier, e.g. `"gregory"` or `"islamic-civil"`.
    fn identifier(&self) -> &str;

    /// Fields of the date that falls on Julian day number `jd`.
    fn from_julian_day(&self, jd: i64) -> EraDate;

    /// Julian day number of `date`.
    fn to_julian_day(&self, date: &EraDate) -> i64;

    /// Number of days in the month of `date`.
    fn days_in_month(&self, date: &EraDate) -> i32;

    /// Number of months in the year of `date`.
    fn months_in_year(&self, date: &EraDate) -> i32;

    /// Number of years in the era of `date`.
    fn years_in_era(&self, date: &EraDate) -> i32;

    /// Era identifiers in chronological order.
    fn eras(&self) -> &'static [&'static str];

    /// Number of days in the year of `date`.
    fn days_in_year(&self, date: &EraDate) -> i32 {
        let mut probe = *date;
        (1..=self.months_in_year(date))
            .map(|month| {
                probe.month = month;
                self.days_in_month(&probe)
            })
            .sum()
    }

    /// First day of the calendar week, when the calendar fixes one.
    fn first_day_of_week(&self) -> Option<Weekday> {
        None
    }

    /// Julian day of the first day of the month containing `date`, for
    /// calendars whose months do not start on day 1.
    fn start_of_month(&self, _date: &EraDate) -> Option<i64> {
        None
    }

    /// Julian day of the last day of the month containing `date`.
    fn end_of_month(&self, _date: &EraDate) -> Option<i64> {
        None
    }

    /// Julian day of the first day of the year containing `date`.
    fn start_of_year(&self, _date: &EraDate) -> Option<i64> {
        None
    }

    /// Julian day of the last day of the year containing `date`.
    fn end_of_year(&self, _date: &EraDate) -> Option<i64> {
        None
    }

    /// Smallest valid month in the year of `date`. Eras that begin mid-year
    /// raise this above 1 in their first year.
    fn minimum_month_in_year(&self, _date: &EraDate) -> i32 {
        1
    }

    /// Smallest valid day in the month of `date`.
    fn minimum_day_in_month(&self, _date: &EraDate) -> i32 {
        1
    }

    /// Engine hook: fix up era/year after the generic day balancing.
    fn balance_date(&self, _date: &mut EraDate) {}

    /// Engine hook: adjust the month after the year changed from `previous`.
    fn balance_year_month(&self, _date: &mut EraDate, _previous: &EraDate) {}

    /// Engine hook: clamp calendar-specific constraints before generic clamping.
    fn constrain_date(&self, _date: &mut EraDate) {}

    /// Engine hook: `true` when years in the era of `date` count backwards.
    fn is_inverse_era(&self, _date: &EraDate) -> bool {
        false
    }

    /// Whether `other` is the same calendar system.
    fn is_equal(&self, other: &dyn Calendar) -> bool {
        self.identifier() == other.identifier()
    }
}

/// Returns the index of `era` in the calendar's era list.
pub(crate) fn era_index(calendar: &dyn Calendar, era: &str) -> Option<usize> {
    calendar.eras().iter().position(|e| *e == era)
}

/// Resolves a caller-supplied era name to the calendar's own `'static` string.
pub(crate) fn resolve_era(calendar: &dyn Calendar, era: &str) -> crate::Result<&'static str> {
    calendar
        .eras()
        .iter()
        .copied()
        .find(|e| *e == era)
        .ok_or_else(|| crate::CalendarError::InvalidEra {
            era: era.to_owned(),
            calendar: calendar.identifier().to_owned(),
        })
}

/// The era new dates get when the caller names none: the most recent one.
pub(crate) fn default_era(calendar: &dyn Calendar) -> &'static str {
    calendar.eras().last().copied().unwrap_or("")
}

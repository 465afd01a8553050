// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Comparison and query helpers.
//!
//! Everything here is a free function over the value traits in
//! [`crate::date`], so the same query works on plain dates, date-times and
//! zoned date-times in any calendar. Cross-calendar questions are answered by
//! converting through Julian day numbers.
//!
//! Week-based queries need to know which weekday starts the week. It is
//! resolved in this order:
//!
//! 1. an explicit `first_day_of_week` argument,
//! 2. the calendar's own [`Calendar::first_day_of_week`],
//! 3. CLDR week data for the region of a locale tag such as `"de-DE"`, or a
//!    bare region such as `"GB"`. A tag without a region (`"fr"`) gives none.
//!
//! When none of those applies the query fails with
//! [`CalendarError::Unsupported`].

use crate::calendar::{Calendar, EraDate};
use crate::date::{AnyCalendarDate, AnyTime, CalendarDate, DateValue};
use crate::duration::DateDuration;
use crate::julian_day::{clamp_i32, day_of_week_from_sunday};
use crate::zoned::{TimeZone, ZonedDateTime};
use crate::{CalendarError, Result};
use chrono::{DateTime, Utc, Weekday};

// ── Comparison ────────────────────────────────────────────────────────────

/// Days from `b` to `a` (positive when `a` is later). Works across calendars.
pub fn compare_date(a: &impl AnyCalendarDate, b: &impl AnyCalendarDate) -> i64 {
    a.to_julian_day() - b.to_julian_day()
}

/// Milliseconds from `b` to `a` within a day.
pub fn compare_time(a: &impl AnyTime, b: &impl AnyTime) -> i64 {
    a.time().millis_of_day() - b.time().millis_of_day()
}

/// `b`'s fields as seen in `a`'s calendar.
fn in_calendar_of(a: &impl AnyCalendarDate, b: &impl AnyCalendarDate) -> EraDate {
    if a.calendar().is_equal(b.calendar().as_ref()) {
        b.era_date()
    } else {
        a.calendar().from_julian_day(b.to_julian_day())
    }
}

/// Whether both values fall on the same day, in any calendars.
pub fn is_same_day(a: &impl AnyCalendarDate, b: &impl AnyCalendarDate) -> bool {
    compare_date(a, b) == 0
}

/// Whether both values fall in the same month of `a`'s calendar.
pub fn is_same_month(a: &impl AnyCalendarDate, b: &impl AnyCalendarDate) -> bool {
    let calendar = a.calendar().as_ref();
    month_start(calendar, &a.era_date()) == month_start(calendar, &in_calendar_of(a, b))
}

/// Whether both values fall in the same year of `a`'s calendar.
pub fn is_same_year(a: &impl AnyCalendarDate, b: &impl AnyCalendarDate) -> bool {
    let calendar = a.calendar().as_ref();
    year_start(calendar, &a.era_date()) == year_start(calendar, &in_calendar_of(a, b))
}

/// Same day and same calendar system.
pub fn is_equal_day(a: &impl AnyCalendarDate, b: &impl AnyCalendarDate) -> bool {
    is_equal_calendar(a.calendar().as_ref(), b.calendar().as_ref()) && is_same_day(a, b)
}

/// Same month and same calendar system.
pub fn is_equal_month(a: &impl AnyCalendarDate, b: &impl AnyCalendarDate) -> bool {
    is_equal_calendar(a.calendar().as_ref(), b.calendar().as_ref()) && is_same_month(a, b)
}

/// Same year and same calendar system.
pub fn is_equal_year(a: &impl AnyCalendarDate, b: &impl AnyCalendarDate) -> bool {
    is_equal_calendar(a.calendar().as_ref(), b.calendar().as_ref()) && is_same_year(a, b)
}

#[inline]
pub fn is_equal_calendar(a: &dyn Calendar, b: &dyn Calendar) -> bool {
    a.is_equal(b)
}

/// The earlier of two optional values; `None` only when both are.
pub fn min_date<T: DateValue>(a: Option<T>, b: Option<T>) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if b.timeline_milliseconds() < a.timeline_milliseconds() { b } else { a }),
        (a, b) => a.or(b),
    }
}

/// The later of two optional values; `None` only when both are.
pub fn max_date<T: DateValue>(a: Option<T>, b: Option<T>) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if b.timeline_milliseconds() > a.timeline_milliseconds() { b } else { a }),
        (a, b) => a.or(b),
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────

/// Source of the current instant.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_milliseconds(&self) -> i64;
}

/// Reads the system clock through `chrono::Utc::now`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_milliseconds(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl FixedClock {
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self(datetime.timestamp_millis())
    }
}

impl Clock for FixedClock {
    fn now_milliseconds(&self) -> i64 {
        self.0
    }
}

/// The current instant in `time_zone`, in the Gregorian calendar.
pub fn now(time_zone: &TimeZone, clock: &impl Clock) -> ZonedDateTime {
    ZonedDateTime::from_absolute(clock.now_milliseconds(), time_zone)
}

/// Today's Gregorian date in `time_zone`.
pub fn today(time_zone: &TimeZone, clock: &impl Clock) -> CalendarDate {
    now(time_zone, clock).to_calendar_date()
}

/// Whether `date` is today in `time_zone`.
pub fn is_today(date: &impl AnyCalendarDate, time_zone: &TimeZone, clock: &impl Clock) -> bool {
    is_same_day(date, &today(time_zone, clock))
}

// ── Periods ───────────────────────────────────────────────────────────────

/// Months and years that open mid-way (a new Japanese era) start at the
/// calendar's minimum month and day rather than at 1.
fn month_start(calendar: &dyn Calendar, date: &EraDate) -> i64 {
    calendar.start_of_month(date).unwrap_or_else(|| {
        let first = calendar.minimum_day_in_month(date);
        calendar.to_julian_day(date) - i64::from(date.day - first)
    })
}

fn month_end(calendar: &dyn Calendar, date: &EraDate) -> i64 {
    calendar.end_of_month(date).unwrap_or_else(|| {
        calendar.to_julian_day(date) + i64::from(calendar.days_in_month(date) - date.day)
    })
}

fn year_start(calendar: &dyn Calendar, date: &EraDate) -> i64 {
    calendar.start_of_year(date).unwrap_or_else(|| {
        let mut first = EraDate {
            month: calendar.minimum_month_in_year(date),
            day: 1,
            ..*date
        };
        first.day = calendar.minimum_day_in_month(&first);
        calendar.to_julian_day(&first)
    })
}

fn year_end(calendar: &dyn Calendar, date: &EraDate) -> i64 {
    calendar.end_of_year(date).unwrap_or_else(|| {
        let mut last = EraDate { month: calendar.months_in_year(date), day: 1, ..*date };
        last.day = calendar.days_in_month(&last);
        calendar.to_julian_day(&last)
    })
}

/// Moves `value` to Julian day `target`, keeping its time of day.
fn move_to<T: DateValue>(value: &T, target: i64) -> T {
    let delta = target - value.to_julian_day();
    if delta == 0 {
        return value.clone();
    }
    value.add_date_duration(DateDuration::days(clamp_i32(delta)))
}

/// First day of the month containing `value`.
pub fn start_of_month<T: DateValue>(value: &T) -> T {
    move_to(value, month_start(value.calendar().as_ref(), &value.era_date()))
}

/// Last day of the month containing `value`.
pub fn end_of_month<T: DateValue>(value: &T) -> T {
    move_to(value, month_end(value.calendar().as_ref(), &value.era_date()))
}

/// First day of the year containing `value`.
pub fn start_of_year<T: DateValue>(value: &T) -> T {
    move_to(value, year_start(value.calendar().as_ref(), &value.era_date()))
}

/// Last day of the year containing `value`.
pub fn end_of_year<T: DateValue>(value: &T) -> T {
    move_to(value, year_end(value.calendar().as_ref(), &value.era_date()))
}

pub fn minimum_month_in_year(date: &impl AnyCalendarDate) -> i32 {
    date.calendar().minimum_month_in_year(&date.era_date())
}

pub fn minimum_day_in_month(date: &impl AnyCalendarDate) -> i32 {
    date.calendar().minimum_day_in_month(&date.era_date())
}

/// Length of the day of `date` in `time_zone`, in hours (23 or 25 across a
/// DST transition).
pub fn hours_in_day(date: &CalendarDate, time_zone: &TimeZone) -> f64 {
    let start = date.to_zoned(time_zone).to_absolute();
    let end = date.add(DateDuration::days(1)).to_zoned(time_zone).to_absolute();
    (end - start) as f64 / 3_600_000.0
}

// ── Weeks ─────────────────────────────────────────────────────────────────

/// Region subtag of a BCP 47 locale tag: the first subtag after the language
/// that is two letters or three digits. A bare two-letter tag is a region.
pub fn region_of(locale: &str) -> Option<String> {
    let mut parts = locale.split(['-', '_']);
    let first = parts.next()?;
    let is_region = |s: &str| {
        (s.len() == 2 && s.bytes().all(|b| b.is_ascii_alphabetic()))
            || (s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit()))
    };
    if locale.len() == 2 && first.bytes().all(|b| b.is_ascii_uppercase()) {
        return Some(first.to_owned());
    }
    parts.find(|s| is_region(*s)).map(str::to_ascii_uppercase)
}

const SATURDAY_START: &[&str] = &[
    "AE", "AF", "BH", "DJ", "DZ", "EG", "IQ", "IR", "JO", "KW", "LY", "OM", "QA", "SD", "SY",
];

const MONDAY_START: &[&str] = &[
    "001", "AD", "AI", "AL", "AM", "AN", "AR", "AT", "AU", "AX", "AZ", "BA", "BE", "BG", "BM",
    "BN", "BY", "CH", "CL", "CM", "CN", "CR", "CY", "CZ", "DE", "DK", "EC", "EE", "ES", "FI",
    "FJ", "FO", "FR", "GB", "GE", "GF", "GP", "GR", "HR", "HU", "IE", "IS", "IT", "KG", "KZ",
    "LB", "LI", "LK", "LT", "LU", "LV", "MC", "MD", "ME", "MK", "MN", "MQ", "MY", "NL", "NO",
    "NZ", "PL", "RE", "RO", "RS", "RU", "SE", "SI", "SK", "SM", "TJ", "TM", "TR", "UA", "UY",
    "UZ", "VA", "VN", "XK",
];

/// CLDR first day of the week for a region; Sunday when the region is not listed.
pub fn region_week_start(region: &str) -> Weekday {
    if MONDAY_START.contains(&region) {
        Weekday::Mon
    } else if SATURDAY_START.contains(&region) {
        Weekday::Sat
    } else if region == "MV" {
        Weekday::Fri
    } else {
        Weekday::Sun
    }
}

/// First day of the week for `calendar` in `locale`.
///
/// # Errors
///
/// [`CalendarError::Unsupported`] when neither the override, the calendar
/// nor a region in `locale` decides.
pub fn resolve_first_day_of_week(
    calendar: &dyn Calendar,
    locale: Option<&str>,
    first_day_of_week: Option<Weekday>,
) -> Result<Weekday> {
    if let Some(day) = first_day_of_week.or_else(|| calendar.first_day_of_week()) {
        return Ok(day);
    }
    locale
        .and_then(region_of)
        .map(|region| region_week_start(&region))
        .ok_or(CalendarError::Unsupported(
            "first day of the week needs a locale with a region",
        ))
}

/// Day of the week counted from the first day of the week (`0..=6`).
///
/// # Errors
///
/// See [`resolve_first_day_of_week`].
pub fn day_of_week(
    date: &impl AnyCalendarDate,
    locale: Option<&str>,
    first_day_of_week: Option<Weekday>,
) -> Result<u32> {
    let first = resolve_first_day_of_week(date.calendar().as_ref(), locale, first_day_of_week)?;
    let from_sunday = day_of_week_from_sunday(date.to_julian_day());
    Ok((from_sunday + 7 - first.num_days_from_sunday()) % 7)
}

/// First day of the week containing `value`.
///
/// # Errors
///
/// See [`resolve_first_day_of_week`].
pub fn start_of_week<T: DateValue>(
    value: &T,
    locale: Option<&str>,
    first_day_of_week: Option<Weekday>,
) -> Result<T> {
    let offset = day_of_week(value, locale, first_day_of_week)?;
    Ok(move_to(value, value.to_julian_day() - i64::from(offset)))
}

/// Last day of the week containing `value`.
///
/// # Errors
///
/// See [`resolve_first_day_of_week`].
pub fn end_of_week<T: DateValue>(
    value: &T,
    locale: Option<&str>,
    first_day_of_week: Option<Weekday>,
) -> Result<T> {
    let offset = day_of_week(value, locale, first_day_of_week)?;
    Ok(move_to(value, value.to_julian_day() + 6 - i64::from(offset)))
}

/// Number of (partial) weeks the month of `date` spans.
///
/// # Errors
///
/// See [`resolve_first_day_of_week`].
pub fn weeks_in_month(
    date: &impl AnyCalendarDate,
    locale: Option<&str>,
    first_day_of_week: Option<Weekday>,
) -> Result<u32> {
    let calendar = date.calendar();
    let fields = date.era_date();
    let start = month_start(calendar.as_ref(), &fields);
    let days = month_end(calendar.as_ref(), &fields) - start + 1;
    let first = CalendarDate::from_julian_day(calendar.clone(), start);
    let offset = i64::from(day_of_week(&first, locale, first_day_of_week)?);
    Ok(((offset + days + 6) / 7) as u32)
}

// ── Weekends ──────────────────────────────────────────────────────────────

/// Weekend as `(first, last)` day for a region, both counted from Sunday.
fn weekend_of(region: &str) -> (u32, u32) {
    const FRIDAY_SATURDAY: &[&str] = &[
        "AE", "BH", "DZ", "EG", "IL", "IQ", "JO", "KW", "LY", "OM", "QA", "SA", "SD", "SY", "YE",
    ];
    match region {
        "AF" => (4, 5),
        "IR" => (5, 5),
        r if FRIDAY_SATURDAY.contains(&r) => (5, 6),
        _ => (6, 0),
    }
}

/// Whether `date` falls on a weekend in the region of `locale`
/// (Saturday and Sunday when the region is unknown).
pub fn is_weekend(date: &impl AnyCalendarDate, locale: &str) -> bool {
    let (start, end) = region_of(locale).map_or((6, 0), |region| weekend_of(&region));
    let day = day_of_week_from_sunday(date.to_julian_day());
    if end < start {
        day >= start || day <= end
    } else {
        day >= start && day <= end
    }
}

#[inline]
pub fn is_weekday(date: &impl AnyCalendarDate, locale: &str) -> bool {
    !is_weekend(date, locale)
}

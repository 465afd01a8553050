// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The arithmetic engine.
//!
//! Every `add`, `subtract`, `set` and `cycle` on the value types lands here.
//! The engine works on an [`EraDate`] draft and asks the date's [`Calendar`]
//! for month lengths, era limits and its private balancing hooks, so the
//! same code serves every calendar system.
//!
//! # Ordering of `add`
//!
//! 1. Time fields, carrying whole days.
//! 2. Years (negated in inverse eras such as BC), then the calendar's
//!    `balance_year_month` hook.
//! 3. Months, with year carry, then the day is clamped into the new month.
//! 4. Weeks and days, balanced month by month.
//! 5. The calendar's `balance_date` hook and a final range clamp.
//!
//! Clamping after step 3 is what makes `Jan 31 + 1 month` land on the last
//! day of February instead of rolling into March.

use crate::calendar::{era_index, resolve_era, Calendar, EraDate};
use crate::date::{AnyTime, Time};
use crate::duration::{DateDuration, TimeDuration};
use crate::julian_day::clamp_i32;
use crate::Result;

// ── Field records ─────────────────────────────────────────────────────────

/// Date fields to overwrite with `set`. `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFields<'a> {
    pub era: Option<&'a str>,
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub day: Option<i32>,
}

impl<'a> DateFields<'a> {
    pub const fn new() -> Self {
        Self {
            era: None,
            year: None,
            month: None,
            day: None,
        }
    }

    pub const fn era(mut self, era: &'a str) -> Self {
        self.era = Some(era);
        self
    }

    pub const fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub const fn month(mut self, month: i32) -> Self {
        self.month = Some(month);
        self
    }

    pub const fn day(mut self, day: i32) -> Self {
        self.day = Some(day);
        self
    }

    pub const fn is_empty(&self) -> bool {
        self.era.is_none() && self.year.is_none() && self.month.is_none() && self.day.is_none()
    }
}

/// Time fields to overwrite with `set`. Values are clamped into range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeFields {
    pub hour: Option<i32>,
    pub minute: Option<i32>,
    pub second: Option<i32>,
    pub millisecond: Option<i32>,
}

impl TimeFields {
    pub const fn new() -> Self {
        Self {
            hour: None,
            minute: None,
            second: None,
            millisecond: None,
        }
    }

    pub const fn hour(mut self, hour: i32) -> Self {
        self.hour = Some(hour);
        self
    }

    pub const fn minute(mut self, minute: i32) -> Self {
        self.minute = Some(minute);
        self
    }

    pub const fn second(mut self, second: i32) -> Self {
        self.second = Some(second);
        self
    }

    pub const fn millisecond(mut self, millisecond: i32) -> Self {
        self.millisecond = Some(millisecond);
        self
    }

    pub const fn is_empty(&self) -> bool {
        self.hour.is_none()
            && self.minute.is_none()
            && self.second.is_none()
            && self.millisecond.is_none()
    }
}

/// A date field for `cycle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Era,
    Year,
    Month,
    Day,
}

/// A time field for `cycle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    Hour,
    Minute,
    Second,
    Millisecond,
}

/// Any field of a date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Date(DateField),
    Time(TimeField),
}

impl From<DateField> for Field {
    fn from(field: DateField) -> Self {
        Field::Date(field)
    }
}

impl From<TimeField> for Field {
    fn from(field: TimeField) -> Self {
        Field::Time(field)
    }
}

/// Hour range used when cycling the hour field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HourCycle {
    /// Hours stay within the current half of the day (0-11 or 12-23).
    H12,
    #[default]
    H24,
}

/// Options for `cycle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CycleOptions {
    /// Snap the result to a multiple of the step.
    pub round: bool,
    pub hour_cycle: HourCycle,
}

impl CycleOptions {
    pub const fn rounded() -> Self {
        Self {
            round: true,
            hour_cycle: HourCycle::H24,
        }
    }

    pub const fn with_hour_cycle(mut self, hour_cycle: HourCycle) -> Self {
        self.hour_cycle = hour_cycle;
        self
    }
}

// ── Date engine ───────────────────────────────────────────────────────────

fn add_years(calendar: &dyn Calendar, date: &mut EraDate, years: i32) {
    let years = if calendar.is_inverse_era(date) {
        -years
    } else {
        years
    };
    date.year = date.year.saturating_add(years);
}

/// Carries month overflow into years.
fn balance_year_month(calendar: &dyn Calendar, date: &mut EraDate) {
    while date.month < 1 {
        add_years(calendar, date, -1);
        date.month += calendar.months_in_year(date);
    }
    loop {
        let months = calendar.months_in_year(date);
        if date.month <= months {
            break;
        }
        date.month -= months;
        add_years(calendar, date, 1);
    }
}

/// Carries day overflow into months, one month at a time.
fn balance_day(calendar: &dyn Calendar, date: &mut EraDate) {
    while date.day < 1 {
        date.month -= 1;
        balance_year_month(calendar, date);
        date.day += calendar.days_in_month(date);
    }
    loop {
        let days = calendar.days_in_month(date);
        if date.day <= days {
            break;
        }
        date.day -= days;
        date.month += 1;
        balance_year_month(calendar, date);
    }
}

fn clamp_month_day(calendar: &dyn Calendar, date: &mut EraDate) {
    date.month = date.month.min(calendar.months_in_year(date)).max(1);
    date.day = date.day.min(calendar.days_in_month(date)).max(1);
}

/// Clamps every field into the calendar's valid range.
pub(crate) fn constrain(calendar: &dyn Calendar, date: &mut EraDate) {
    calendar.constrain_date(date);
    date.year = date.year.min(calendar.years_in_era(date)).max(1);
    date.month = date
        .month
        .min(calendar.months_in_year(date))
        .max(calendar.minimum_month_in_year(date));
    date.day = date
        .day
        .min(calendar.days_in_month(date))
        .max(calendar.minimum_day_in_month(date));
}

/// Adds `duration` plus `extra_days` (a carry from time arithmetic).
pub(crate) fn add_date(
    calendar: &dyn Calendar,
    date: &EraDate,
    duration: &DateDuration,
    extra_days: i64,
) -> EraDate {
    let mut draft = *date;
    add_years(calendar, &mut draft, duration.years);
    calendar.balance_year_month(&mut draft, date);

    draft.month = draft.month.saturating_add(duration.months);
    balance_year_month(calendar, &mut draft);
    clamp_month_day(calendar, &mut draft);

    let days = i64::from(duration.weeks) * 7 + i64::from(duration.days) + extra_days;
    draft.day = clamp_i32(i64::from(draft.day) + days);
    balance_day(calendar, &mut draft);
    calendar.balance_date(&mut draft);

    if draft.year < 1 {
        draft.year = 1;
        draft.month = 1;
        draft.day = 1;
    }

    let max_year = calendar.years_in_era(&draft);
    if draft.year > max_year {
        let inverse = calendar.is_inverse_era(&draft);
        draft.year = max_year;
        draft.month = if inverse {
            1
        } else {
            calendar.months_in_year(&draft)
        };
        draft.day = if inverse {
            1
        } else {
            calendar.days_in_month(&draft)
        };
    }

    if draft.month < 1 {
        draft.month = 1;
        draft.day = 1;
    }
    let max_month = calendar.months_in_year(&draft);
    if draft.month > max_month {
        draft.month = max_month;
        draft.day = calendar.days_in_month(&draft);
    }
    draft.day = draft.day.min(calendar.days_in_month(&draft)).max(1);
    draft
}

/// Overwrites the supplied fields, then constrains.
pub(crate) fn set_date(
    calendar: &dyn Calendar,
    date: &EraDate,
    fields: &DateFields<'_>,
) -> Result<EraDate> {
    let mut draft = *date;
    if let Some(era) = fields.era {
        draft.era = resolve_era(calendar, era)?;
    }
    if let Some(year) = fields.year {
        draft.year = year;
    }
    if let Some(month) = fields.month {
        draft.month = month;
    }
    if let Some(day) = fields.day {
        draft.day = day;
    }
    constrain(calendar, &mut draft);
    Ok(draft)
}

/// Steps `value` by `amount` inside `min..=max`, wrapping at the ends.
///
/// With `round`, the result snaps to a multiple of `|amount|` in the
/// direction of travel.
pub(crate) fn cycle_value(value: i64, amount: i64, min: i64, max: i64, round: bool) -> i64 {
    if amount == 0 || max < min {
        return value;
    }
    if round {
        let mut value = value + amount.signum();
        if value < min {
            value = max;
        }
        let step = amount.abs();
        value = if amount > 0 {
            -(-value).div_euclid(step) * step
        } else {
            value.div_euclid(step) * step
        };
        if value > max {
            value = min;
        }
        value.max(min)
    } else {
        min + (value + amount - min).rem_euclid(max - min + 1)
    }
}

/// Year stepping has no lower wrap; past 9999 it restarts at 1.
fn cycle_year(year: i64, amount: i64, round: bool) -> i64 {
    let stepped = if round && amount != 0 {
        let value = year + amount.signum();
        let step = amount.abs();
        if amount > 0 {
            -(-value).div_euclid(step) * step
        } else {
            value.div_euclid(step) * step
        }
    } else {
        year + amount
    };
    if stepped > 9999 {
        1
    } else {
        stepped
    }
}

pub(crate) fn cycle_date(
    calendar: &dyn Calendar,
    date: &EraDate,
    field: DateField,
    amount: i64,
    options: CycleOptions,
) -> EraDate {
    let mut draft = *date;
    match field {
        DateField::Era => {
            let eras = calendar.eras();
            if let Some(index) = era_index(calendar, date.era) {
                let last = eras.len() as i64 - 1;
                let next = cycle_value(index as i64, amount, 0, last, false);
                draft.era = eras[next as usize];
            }
            constrain(calendar, &mut draft);
        }
        DateField::Year => {
            let amount = if calendar.is_inverse_era(date) {
                -amount
            } else {
                amount
            };
            draft.year = clamp_i32(cycle_year(i64::from(date.year), amount, options.round));
            calendar.balance_year_month(&mut draft, date);
        }
        DateField::Month => {
            let months = i64::from(calendar.months_in_year(date));
            draft.month = cycle_value(i64::from(date.month), amount, 1, months, options.round) as i32;
        }
        DateField::Day => {
            let days = i64::from(calendar.days_in_month(date));
            draft.day = cycle_value(i64::from(date.day), amount, 1, days, options.round) as i32;
        }
    }
    calendar.balance_date(&mut draft);
    constrain(calendar, &mut draft);
    draft
}

// ── Time engine ───────────────────────────────────────────────────────────

/// Adds `duration` to a wall-clock time. Returns the balanced time and the
/// number of whole days carried out of it.
pub(crate) fn add_time(time: Time, duration: &TimeDuration) -> (Time, i64) {
    let millisecond = i64::from(time.millisecond()) + duration.milliseconds;
    let second = i64::from(time.second()) + duration.seconds + millisecond.div_euclid(1_000);
    let minute = i64::from(time.minute()) + duration.minutes + second.div_euclid(60);
    let hour = i64::from(time.hour()) + duration.hours + minute.div_euclid(60);
    let days = hour.div_euclid(24);
    let balanced = Time::from_parts(
        hour.rem_euclid(24) as u32,
        minute.rem_euclid(60) as u32,
        second.rem_euclid(60) as u32,
        millisecond.rem_euclid(1_000) as u32,
    );
    (balanced, days)
}

#[inline]
fn clamp_field(value: Option<i32>, current: u32, max: u32) -> u32 {
    match value {
        Some(v) => v.clamp(0, max as i32) as u32,
        None => current,
    }
}

pub(crate) fn set_time(time: Time, fields: &TimeFields) -> Time {
    Time::from_parts(
        clamp_field(fields.hour, time.hour(), 23),
        clamp_field(fields.minute, time.minute(), 59),
        clamp_field(fields.second, time.second(), 59),
        clamp_field(fields.millisecond, time.millisecond(), 999),
    )
}

/// Hour bounds for cycling under `hour_cycle`.
pub(crate) fn hour_bounds(hour: u32, hour_cycle: HourCycle) -> (u32, u32) {
    match hour_cycle {
        HourCycle::H24 => (0, 23),
        HourCycle::H12 if hour >= 12 => (12, 23),
        HourCycle::H12 => (0, 11),
    }
}

pub(crate) fn cycle_time(time: Time, field: TimeField, amount: i64, options: CycleOptions) -> Time {
    let cycle = |value: u32, min: u32, max: u32| {
        cycle_value(
            i64::from(value),
            amount,
            i64::from(min),
            i64::from(max),
            options.round,
        ) as u32
    };
    let (hour, minute, second, millisecond) =
        (time.hour(), time.minute(), time.second(), time.millisecond());
    match field {
        TimeField::Hour => {
            let (min, max) = hour_bounds(hour, options.hour_cycle);
            Time::from_parts(cycle(hour, min, max), minute, second, millisecond)
        }
        TimeField::Minute => Time::from_parts(hour, cycle(minute, 0, 59), second, millisecond),
        TimeField::Second => Time::from_parts(hour, minute, cycle(second, 0, 59), millisecond),
        TimeField::Millisecond => {
            Time::from_parts(hour, minute, second, cycle(millisecond, 0, 999))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{GregorianCalendar, HebrewCalendar, JapaneseCalendar};

    fn ad(year: i32, month: i32, day: i32) -> EraDate {
        EraDate::new("AD", year, month, day)
    }

    #[test]
    fn add_days_across_month_end() {
        let out = add_date(&GregorianCalendar, &ad(2019, 6, 5), &DateDuration::days(30), 0);
        assert_eq!(out, ad(2019, 7, 5));
    }

    #[test]
    fn add_month_clamps_day() {
        let out = add_date(&GregorianCalendar, &ad(2020, 1, 31), &DateDuration::months(1), 0);
        assert_eq!(out, ad(2020, 2, 29));
        let out = add_date(&GregorianCalendar, &ad(2021, 1, 31), &DateDuration::months(1), 0);
        assert_eq!(out, ad(2021, 2, 28));
    }

    #[test]
    fn subtract_crosses_into_bc() {
        let out = add_date(&GregorianCalendar, &ad(1, 1, 1), &DateDuration::days(-1), 0);
        assert_eq!(out, EraDate::new("BC", 1, 12, 31));
        let out = add_date(&GregorianCalendar, &out, &DateDuration::years(-1), 0);
        assert_eq!(out, EraDate::new("BC", 2, 12, 31));
    }

    #[test]
    fn add_past_era_end_clamps_to_last_day() {
        let out = add_date(&GregorianCalendar, &ad(9999, 12, 1), &DateDuration::months(2), 0);
        assert_eq!(out, ad(9999, 12, 31));
    }

    #[test]
    fn japanese_year_subtraction_changes_era() {
        let out = add_date(
            &JapaneseCalendar,
            &EraDate::new("reiwa", 2, 3, 1),
            &DateDuration::years(-1),
            0,
        );
        assert_eq!(out, EraDate::new("heisei", 31, 3, 1));
    }

    #[test]
    fn hebrew_year_keeps_month_name() {
        // Nisan 5784 (leap, month 8) + 1 year is Nisan 5785 (month 7).
        let out = add_date(
            &HebrewCalendar,
            &EraDate::new("AM", 5784, 8, 1),
            &DateDuration::years(1),
            0,
        );
        assert_eq!(out, EraDate::new("AM", 5785, 7, 1));
    }

    #[test]
    fn constrain_clamps_day_to_month() {
        let out = set_date(
            &GregorianCalendar,
            &ad(2021, 4, 1),
            &DateFields::new().day(31),
        )
        .unwrap();
        assert_eq!(out, ad(2021, 4, 30));
    }

    #[test]
    fn set_rejects_unknown_era() {
        let err = set_date(
            &GregorianCalendar,
            &ad(2021, 4, 1),
            &DateFields::new().era("CE"),
        );
        assert!(err.is_err());
    }

    #[test]
    fn cycle_value_wraps_and_rounds() {
        assert_eq!(cycle_value(12, 1, 1, 12, false), 1);
        assert_eq!(cycle_value(1, -1, 1, 12, false), 12);
        assert_eq!(cycle_value(5, 30, 1, 12, false), 11);
        assert_eq!(cycle_value(1, 15, 1, 31, true), 15);
        assert_eq!(cycle_value(30, 15, 1, 31, true), 1);
        assert_eq!(cycle_value(1, -15, 1, 31, true), 30);
        assert_eq!(cycle_value(7, 5, 0, 59, true), 10);
        assert_eq!(cycle_value(7, -5, 0, 59, true), 5);
    }

    #[test]
    fn cycle_month_stays_in_year() {
        let out = cycle_date(
            &GregorianCalendar,
            &ad(2020, 12, 15),
            DateField::Month,
            1,
            CycleOptions::default(),
        );
        assert_eq!(out, ad(2020, 1, 15));
    }

    #[test]
    fn cycle_year_wraps_past_9999() {
        let out = cycle_date(
            &GregorianCalendar,
            &ad(9999, 6, 1),
            DateField::Year,
            1,
            CycleOptions::default(),
        );
        assert_eq!(out, ad(1, 6, 1));
    }

    #[test]
    fn cycle_era_constrains() {
        let out = cycle_date(
            &JapaneseCalendar,
            &EraDate::new("heisei", 20, 6, 1),
            DateField::Era,
            -1,
            CycleOptions::default(),
        );
        assert_eq!(out, EraDate::new("showa", 20, 6, 1));
    }

    #[test]
    fn add_time_carries_days() {
        let (time, days) = add_time(Time::from_parts(23, 30, 0, 0), &TimeDuration::hours(25));
        assert_eq!(time, Time::from_parts(0, 30, 0, 0));
        assert_eq!(days, 2);
        let (time, days) = add_time(Time::from_parts(0, 0, 0, 0), &TimeDuration::milliseconds(-1));
        assert_eq!(time, Time::from_parts(23, 59, 59, 999));
        assert_eq!(days, -1);
    }

    #[test]
    fn cycle_hour_in_twelve_hour_clock() {
        let options = CycleOptions::default().with_hour_cycle(HourCycle::H12);
        let pm = Time::from_parts(23, 0, 0, 0);
        assert_eq!(cycle_time(pm, TimeField::Hour, 1, options).hour(), 12);
        let am = Time::from_parts(0, 0, 0, 0);
        assert_eq!(cycle_time(am, TimeField::Hour, -1, options).hour(), 11);
        assert_eq!(
            cycle_time(am, TimeField::Hour, -1, CycleOptions::default()).hour(),
            23
        );
    }

    #[test]
    fn set_time_clamps() {
        let out = set_time(
            Time::from_parts(1, 2, 3, 4),
            &TimeFields::new().minute(75).millisecond(-3),
        );
        assert_eq!(out, Time::from_parts(1, 59, 3, 0));
    }
}

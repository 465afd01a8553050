// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Plain date and time values.
//!
//! - [`CalendarDate`]: a day in some calendar.
//! - [`Time`]: a wall-clock time of day.
//! - [`CalendarDateTime`]: both, without a time zone.
//!
//! All values are immutable; every operation returns a new value. Field
//! getters live on the [`AnyCalendarDate`] and [`AnyTime`] traits, in the
//! manner of `chrono::Datelike`/`Timelike`.

use crate::calendar::{default_era, resolve_era, CalendarRef, EraDate};
use crate::duration::{DateDuration, DateTimeDuration, TimeDuration};
use crate::error::FieldName;
use crate::julian_day::{epoch_milliseconds, julian_date, MILLIS_PER_DAY};
use crate::manipulation::{self, CycleOptions, DateField, DateFields, Field, TimeField, TimeFields};
use crate::zoned::{Disambiguation, TimeZone, ZonedDateTime};
use crate::{registry, CalendarError, Result};
use qtty::Days;
use std::hash::{Hash, Hasher};

// ── Traits ────────────────────────────────────────────────────────────────

/// Anything with calendar date fields.
pub trait AnyCalendarDate {
    fn calendar(&self) -> &CalendarRef;

    /// The raw field record.
    fn era_date(&self) -> EraDate;

    #[inline]
    fn era(&self) -> &'static str {
        self.era_date().era
    }

    #[inline]
    fn year(&self) -> i32 {
        self.era_date().year
    }

    #[inline]
    fn month(&self) -> i32 {
        self.era_date().month
    }

    #[inline]
    fn day(&self) -> i32 {
        self.era_date().day
    }

    /// Julian day number of the date.
    #[inline]
    fn to_julian_day(&self) -> i64 {
        self.calendar().to_julian_day(&self.era_date())
    }
}

/// Anything with wall-clock time fields.
pub trait AnyTime {
    fn time(&self) -> Time;

    #[inline]
    fn hour(&self) -> u32 {
        self.time().hour
    }

    #[inline]
    fn minute(&self) -> u32 {
        self.time().minute
    }

    #[inline]
    fn second(&self) -> u32 {
        self.time().second
    }

    #[inline]
    fn millisecond(&self) -> u32 {
        self.time().millisecond
    }
}

/// The date-carrying values: [`CalendarDate`], [`CalendarDateTime`] and
/// [`ZonedDateTime`].
pub trait DateValue: AnyCalendarDate + Clone {
    /// Wall-clock time; midnight for a [`CalendarDate`].
    fn wall_time(&self) -> Time;

    /// Position on the value's timeline in milliseconds since 1970-01-01.
    /// Plain values use wall-clock time; zoned values use the absolute instant.
    fn timeline_milliseconds(&self) -> i64;

    /// Adds a date-only duration, keeping the wall-clock time.
    fn add_date_duration(&self, duration: DateDuration) -> Self;

    /// Astronomical Julian Date of the value's wall-clock time.
    #[inline]
    fn to_julian_date(&self) -> Days {
        julian_date(self.to_julian_day(), self.wall_time().millis_of_day())
    }
}

// ── Time ──────────────────────────────────────────────────────────────────

/// A time of day with millisecond precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: u32,
}

impl Time {
    pub const MIDNIGHT: Time = Time::from_parts(0, 0, 0, 0);

    /// Creates a time, clamping each field into range.
    pub fn new(hour: u32, minute: u32, second: u32, millisecond: u32) -> Self {
        Self::from_parts(hour.min(23), minute.min(59), second.min(59), millisecond.min(999))
    }

    /// Creates a time, rejecting out-of-range fields.
    pub fn try_new(hour: u32, minute: u32, second: u32, millisecond: u32) -> Result<Self> {
        check(FieldName::Hour, i64::from(hour), 0, 23)?;
        check(FieldName::Minute, i64::from(minute), 0, 59)?;
        check(FieldName::Second, i64::from(second), 0, 59)?;
        check(FieldName::Millisecond, i64::from(millisecond), 0, 999)?;
        Ok(Self::from_parts(hour, minute, second, millisecond))
    }

    #[inline]
    pub(crate) const fn from_parts(hour: u32, minute: u32, second: u32, millisecond: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
        }
    }

    #[inline]
    pub(crate) fn from_millis_of_day(ms: i64) -> Self {
        let ms = ms.rem_euclid(MILLIS_PER_DAY);
        Self::from_parts(
            (ms / 3_600_000) as u32,
            (ms / 60_000 % 60) as u32,
            (ms / 1_000 % 60) as u32,
            (ms % 1_000) as u32,
        )
    }

    /// Milliseconds since midnight.
    #[inline]
    pub fn millis_of_day(&self) -> i64 {
        ((i64::from(self.hour) * 60 + i64::from(self.minute)) * 60 + i64::from(self.second))
            * 1_000
            + i64::from(self.millisecond)
    }

    /// Adds a duration, wrapping around midnight.
    pub fn add(&self, duration: TimeDuration) -> Self {
        manipulation::add_time(*self, &duration).0
    }

    pub fn subtract(&self, duration: TimeDuration) -> Self {
        self.add(-duration)
    }

    pub fn set(&self, fields: TimeFields) -> Self {
        manipulation::set_time(*self, &fields)
    }

    pub fn cycle(&self, field: TimeField, amount: i64, options: CycleOptions) -> Self {
        manipulation::cycle_time(*self, field, amount, options)
    }

    /// Difference in milliseconds, positive when `self` is later.
    pub fn compare(&self, other: &impl AnyTime) -> i64 {
        self.millis_of_day() - other.time().millis_of_day()
    }
}

impl AnyTime for Time {
    #[inline]
    fn time(&self) -> Time {
        *self
    }
}

fn check(field: FieldName, value: i64, min: i64, max: i64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CalendarError::InvalidField {
            field,
            value,
            min,
            max,
        })
    }
}

// ── CalendarDate ──────────────────────────────────────────────────────────

/// A date in a specific calendar system.
#[derive(Debug, Clone)]
pub struct CalendarDate {
    calendar: CalendarRef,
    fields: EraDate,
}

impl CalendarDate {
    /// Creates a date in the calendar's current era, constraining fields
    /// into range.
    pub fn new(calendar: CalendarRef, year: i32, month: i32, day: i32) -> Self {
        let fields = EraDate::new(default_era(calendar.as_ref()), year, month, day);
        Self::constrained(calendar, fields)
    }

    /// Creates a date in a named era.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidEra`] when the calendar has no such era.
    pub fn with_era(calendar: CalendarRef, era: &str, year: i32, month: i32, day: i32) -> Result<Self> {
        let era = resolve_era(calendar.as_ref(), era)?;
        Ok(Self::constrained(calendar, EraDate::new(era, year, month, day)))
    }

    /// Creates a Gregorian (AD) date.
    pub fn from_ymd(year: i32, month: i32, day: i32) -> Self {
        Self::new(registry::gregorian(), year, month, day)
    }

    /// The date falling on Julian day number `jd` in `calendar`.
    pub fn from_julian_day(calendar: CalendarRef, jd: i64) -> Self {
        let fields = calendar.from_julian_day(jd);
        Self { calendar, fields }
    }

    /// Starts a builder with an explicit overflow policy.
    pub fn builder(calendar: CalendarRef) -> DateBuilder {
        DateBuilder::new(calendar)
    }

    fn constrained(calendar: CalendarRef, mut fields: EraDate) -> Self {
        manipulation::constrain(calendar.as_ref(), &mut fields);
        Self { calendar, fields }
    }

    #[inline]
    pub(crate) fn from_parts(calendar: CalendarRef, fields: EraDate) -> Self {
        Self { calendar, fields }
    }

    pub fn add(&self, duration: DateDuration) -> Self {
        let fields = manipulation::add_date(self.calendar.as_ref(), &self.fields, &duration, 0);
        Self::from_parts(self.calendar.clone(), fields)
    }

    pub fn subtract(&self, duration: DateDuration) -> Self {
        self.add(-duration)
    }

    /// Overwrites fields, then constrains.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidEra`] when `fields.era` is not an era of the calendar.
    pub fn set(&self, fields: DateFields<'_>) -> Result<Self> {
        let fields = manipulation::set_date(self.calendar.as_ref(), &self.fields, &fields)?;
        Ok(Self::from_parts(self.calendar.clone(), fields))
    }

    /// Steps one field, wrapping within its range without touching the others.
    pub fn cycle(&self, field: DateField, amount: i64, options: CycleOptions) -> Self {
        let fields =
            manipulation::cycle_date(self.calendar.as_ref(), &self.fields, field, amount, options);
        Self::from_parts(self.calendar.clone(), fields)
    }

    /// Days from `other` to `self`; works across calendars.
    pub fn compare(&self, other: &impl AnyCalendarDate) -> i64 {
        crate::queries::compare_date(self, other)
    }

    /// The same day in another calendar.
    pub fn to_calendar(&self, calendar: &CalendarRef) -> Self {
        if self.calendar.is_equal(calendar.as_ref()) {
            return self.clone();
        }
        let mut fields = calendar.from_julian_day(self.to_julian_day());
        manipulation::constrain(calendar.as_ref(), &mut fields);
        Self::from_parts(calendar.clone(), fields)
    }

    /// This date at `time`.
    pub fn at(&self, time: Time) -> CalendarDateTime {
        CalendarDateTime::new(self.clone(), time)
    }

    /// Midnight of this date.
    pub fn to_calendar_date_time(&self) -> CalendarDateTime {
        self.at(Time::MIDNIGHT)
    }

    /// Midnight of this date in `time_zone`, resolved compatibly.
    pub fn to_zoned(&self, time_zone: &TimeZone) -> ZonedDateTime {
        self.to_calendar_date_time().to_zoned(time_zone)
    }
}

impl PartialEq for CalendarDate {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields && self.calendar.identifier() == other.calendar.identifier()
    }
}

impl Eq for CalendarDate {}

impl Hash for CalendarDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.calendar.identifier().hash(state);
        self.fields.hash(state);
    }
}

impl AnyCalendarDate for CalendarDate {
    #[inline]
    fn calendar(&self) -> &CalendarRef {
        &self.calendar
    }

    #[inline]
    fn era_date(&self) -> EraDate {
        self.fields
    }
}

impl DateValue for CalendarDate {
    #[inline]
    fn wall_time(&self) -> Time {
        Time::MIDNIGHT
    }

    fn timeline_milliseconds(&self) -> i64 {
        epoch_milliseconds(self.to_julian_day(), 0)
    }

    fn add_date_duration(&self, duration: DateDuration) -> Self {
        self.add(duration)
    }
}

// ── CalendarDateTime ──────────────────────────────────────────────────────

/// A date and wall-clock time without a time zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CalendarDateTime {
    date: CalendarDate,
    time: Time,
}

impl CalendarDateTime {
    pub fn new(date: CalendarDate, time: Time) -> Self {
        Self { date, time }
    }

    /// Creates a Gregorian date-time; fields are clamped into range.
    pub fn from_ymd_hms(year: i32, month: i32, day: i32, hour: u32, minute: u32, second: u32) -> Self {
        Self::new(
            CalendarDate::from_ymd(year, month, day),
            Time::new(hour, minute, second, 0),
        )
    }

    /// Adds a date, time or combined duration. Time carries into days.
    pub fn add(&self, duration: impl Into<DateTimeDuration>) -> Self {
        let duration = duration.into();
        let (time, carry) = manipulation::add_time(self.time, &duration.time);
        let calendar = self.date.calendar.clone();
        let fields =
            manipulation::add_date(calendar.as_ref(), &self.date.fields, &duration.date, carry);
        Self::new(CalendarDate::from_parts(calendar, fields), time)
    }

    pub fn subtract(&self, duration: impl Into<DateTimeDuration>) -> Self {
        self.add(-duration.into())
    }

    /// Overwrites date and time fields; date fields are constrained and time
    /// fields clamped.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidEra`] for an unknown era.
    pub fn set(&self, date: DateFields<'_>, time: TimeFields) -> Result<Self> {
        Ok(Self::new(self.date.set(date)?, self.time.set(time)))
    }

    /// Steps one field. Time fields wrap within the day without carrying.
    pub fn cycle(&self, field: impl Into<Field>, amount: i64, options: CycleOptions) -> Self {
        match field.into() {
            Field::Date(field) => Self::new(self.date.cycle(field, amount, options), self.time),
            Field::Time(field) => Self::new(self.date.clone(), self.time.cycle(field, amount, options)),
        }
    }

    /// Compares dates by Julian day, then times of day in milliseconds.
    pub fn compare(&self, other: &impl DateValue) -> i64 {
        match crate::queries::compare_date(self, other) {
            0 => self.time.compare(&other.wall_time()),
            days => days,
        }
    }

    pub fn to_calendar(&self, calendar: &CalendarRef) -> Self {
        Self::new(self.date.to_calendar(calendar), self.time)
    }

    pub fn to_calendar_date(&self) -> CalendarDate {
        self.date.clone()
    }

    pub fn to_time(&self) -> Time {
        self.time
    }

    /// Resolves this wall-clock time in `time_zone` with
    /// [`Disambiguation::Compatible`], which never fails.
    pub fn to_zoned(&self, time_zone: &TimeZone) -> ZonedDateTime {
        ZonedDateTime::from_wall_time_compatible(self, time_zone)
    }

    /// Resolves this wall-clock time in `time_zone`.
    ///
    /// # Errors
    ///
    /// [`CalendarError::AmbiguousTime`] or [`CalendarError::NonexistentTime`]
    /// with [`Disambiguation::Reject`].
    pub fn to_zoned_with(&self, time_zone: &TimeZone, disambiguation: Disambiguation) -> Result<ZonedDateTime> {
        ZonedDateTime::from_wall_time(self, time_zone, disambiguation)
    }

    /// Milliseconds since 1970-01-01T00:00 of this wall-clock time, as if it were UTC.
    #[inline]
    pub(crate) fn wall_milliseconds(&self) -> i64 {
        epoch_milliseconds(self.date.to_julian_day(), self.time.millis_of_day())
    }
}

impl AnyCalendarDate for CalendarDateTime {
    #[inline]
    fn calendar(&self) -> &CalendarRef {
        &self.date.calendar
    }

    #[inline]
    fn era_date(&self) -> EraDate {
        self.date.fields
    }
}

impl AnyTime for CalendarDateTime {
    #[inline]
    fn time(&self) -> Time {
        self.time
    }
}

impl DateValue for CalendarDateTime {
    #[inline]
    fn wall_time(&self) -> Time {
        self.time
    }

    fn timeline_milliseconds(&self) -> i64 {
        self.wall_milliseconds()
    }

    fn add_date_duration(&self, duration: DateDuration) -> Self {
        self.add(duration)
    }
}

// ── Builder ───────────────────────────────────────────────────────────────

/// What construction does with out-of-range fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Overflow {
    /// Clamp into range.
    #[default]
    Constrain,
    /// Fail with [`CalendarError::InvalidField`].
    Reject,
}

/// Field-by-field construction of a [`CalendarDate`] or [`CalendarDateTime`].
///
/// ```
/// use kalendae::{create_calendar, CalendarDate, Overflow};
///
/// let gregory = create_calendar("gregory").unwrap();
/// let err = CalendarDate::builder(gregory)
///     .year(2023)
///     .month(2)
///     .day(29)
///     .overflow(Overflow::Reject)
///     .build();
/// assert!(err.is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DateBuilder {
    calendar: CalendarRef,
    era: Option<String>,
    year: i32,
    month: i32,
    day: i32,
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: u32,
    overflow: Overflow,
}

impl DateBuilder {
    fn new(calendar: CalendarRef) -> Self {
        Self {
            calendar,
            era: None,
            year: 1,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
            overflow: Overflow::Constrain,
        }
    }

    pub fn era(mut self, era: impl Into<String>) -> Self {
        self.era = Some(era.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn month(mut self, month: i32) -> Self {
        self.month = month;
        self
    }

    pub fn day(mut self, day: i32) -> Self {
        self.day = day;
        self
    }

    pub fn hour(mut self, hour: u32) -> Self {
        self.hour = hour;
        self
    }

    pub fn minute(mut self, minute: u32) -> Self {
        self.minute = minute;
        self
    }

    pub fn second(mut self, second: u32) -> Self {
        self.second = second;
        self
    }

    pub fn millisecond(mut self, millisecond: u32) -> Self {
        self.millisecond = millisecond;
        self
    }

    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// # Errors
    ///
    /// [`CalendarError::InvalidEra`] for an unknown era, and
    /// [`CalendarError::InvalidField`] for out-of-range fields under
    /// [`Overflow::Reject`].
    pub fn build(&self) -> Result<CalendarDate> {
        let calendar = self.calendar.as_ref();
        let era = match &self.era {
            Some(era) => resolve_era(calendar, era)?,
            None => default_era(calendar),
        };
        let fields = EraDate::new(era, self.year, self.month, self.day);
        if self.overflow == Overflow::Reject {
            check(
                FieldName::Year,
                i64::from(fields.year),
                1,
                i64::from(calendar.years_in_era(&fields)),
            )?;
            check(
                FieldName::Month,
                i64::from(fields.month),
                i64::from(calendar.minimum_month_in_year(&fields)),
                i64::from(calendar.months_in_year(&fields)),
            )?;
            check(
                FieldName::Day,
                i64::from(fields.day),
                i64::from(calendar.minimum_day_in_month(&fields)),
                i64::from(calendar.days_in_month(&fields)),
            )?;
        }
        Ok(CalendarDate::constrained(self.calendar.clone(), fields))
    }

    /// # Errors
    ///
    /// As [`build`](Self::build), plus time fields under [`Overflow::Reject`].
    pub fn build_date_time(&self) -> Result<CalendarDateTime> {
        let date = self.build()?;
        let time = match self.overflow {
            Overflow::Reject => Time::try_new(self.hour, self.minute, self.second, self.millisecond)?,
            Overflow::Constrain => Time::new(self.hour, self.minute, self.second, self.millisecond),
        };
        Ok(CalendarDateTime::new(date, time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{FiscalCalendar, JapaneseCalendar};
    use crate::create_calendar;
    use std::sync::Arc;

    #[test]
    fn construction_constrains() {
        let date = CalendarDate::from_ymd(2023, 2, 30);
        assert_eq!((date.year(), date.month(), date.day()), (2023, 2, 28));
        assert_eq!(date.era(), "AD");
        let date = CalendarDate::from_ymd(2023, 14, 1);
        assert_eq!(date.month(), 12);
    }

    #[test]
    fn with_era_validates() {
        let gregory = create_calendar("gregory").unwrap();
        let bc = CalendarDate::with_era(gregory.clone(), "BC", 44, 3, 15).unwrap();
        assert_eq!(bc.era(), "BC");
        assert!(CalendarDate::with_era(gregory, "reiwa", 1, 1, 1).is_err());
    }

    #[test]
    fn builder_rejects_overflow() {
        let gregory = create_calendar("gregory").unwrap();
        let err = CalendarDate::builder(gregory.clone())
            .year(2023)
            .month(2)
            .day(29)
            .overflow(Overflow::Reject)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CalendarError::InvalidField {
                field: FieldName::Day,
                value: 29,
                min: 1,
                max: 28
            }
        );
        let clamped = CalendarDate::builder(gregory).year(2023).month(2).day(29).build().unwrap();
        assert_eq!(clamped.day(), 28);
    }

    #[test]
    fn builder_rejects_japanese_pre_era_month() {
        let japanese: CalendarRef = Arc::new(JapaneseCalendar);
        let result = CalendarDate::builder(japanese)
            .era("reiwa")
            .year(1)
            .month(3)
            .day(1)
            .overflow(Overflow::Reject)
            .build();
        assert!(matches!(
            result,
            Err(CalendarError::InvalidField {
                field: FieldName::Month,
                ..
            })
        ));
    }

    #[test]
    fn builder_rejects_bad_time() {
        let gregory = create_calendar("gregory").unwrap();
        let result = CalendarDate::builder(gregory)
            .year(2020)
            .hour(24)
            .overflow(Overflow::Reject)
            .build_date_time();
        assert!(result.is_err());
    }

    #[test]
    fn add_and_subtract() {
        let date = CalendarDate::from_ymd(2019, 6, 5);
        assert_eq!(date.add(DateDuration::days(30)), CalendarDate::from_ymd(2019, 7, 5));
        assert_eq!(
            CalendarDate::from_ymd(2020, 1, 31).add(DateDuration::months(1)),
            CalendarDate::from_ymd(2020, 2, 29)
        );
        assert_eq!(date.add(DateDuration::weeks(2)).subtract(DateDuration::weeks(2)), date);
    }

    #[test]
    fn to_calendar_preserves_julian_day() {
        let date = CalendarDate::from_ymd(2023, 9, 16);
        let hebrew = create_calendar("hebrew").unwrap();
        let converted = date.to_calendar(&hebrew);
        assert_eq!((converted.year(), converted.month(), converted.day()), (5784, 1, 1));
        assert_eq!(converted.to_julian_day(), date.to_julian_day());
        assert_eq!(converted.compare(&date), 0);
        assert_ne!(converted, date);
    }

    #[test]
    fn date_time_carries_hours() {
        let dt = CalendarDateTime::from_ymd_hms(2020, 12, 31, 23, 0, 0);
        let next = dt.add(TimeDuration::hours(2));
        assert_eq!((next.year(), next.month(), next.day(), next.hour()), (2021, 1, 1, 1));
        assert_eq!(next.subtract(TimeDuration::hours(2)), dt);
    }

    #[test]
    fn date_time_compare() {
        let a = CalendarDateTime::from_ymd_hms(2020, 1, 1, 10, 0, 0);
        let b = CalendarDateTime::from_ymd_hms(2020, 1, 1, 9, 0, 0);
        assert_eq!(a.compare(&b), 3_600_000);
        assert_eq!(a.compare(&CalendarDate::from_ymd(2019, 12, 31)), 1);
    }

    #[test]
    fn date_time_cycle_does_not_carry() {
        let dt = CalendarDateTime::from_ymd_hms(2020, 1, 1, 23, 0, 0);
        let cycled = dt.cycle(TimeField::Hour, 1, CycleOptions::default());
        assert_eq!((cycled.day(), cycled.hour()), (1, 0));
        let cycled = dt.cycle(DateField::Day, -1, CycleOptions::default());
        assert_eq!(cycled.day(), 31);
        assert_eq!(cycled.month(), 1);
    }

    #[test]
    fn time_values() {
        let t = Time::new(25, 61, 0, 5_000);
        assert_eq!(t, Time::new(23, 59, 0, 999));
        assert_eq!(Time::new(1, 0, 0, 0).subtract(TimeDuration::hours(2)).hour(), 23);
        assert_eq!(Time::from_millis_of_day(3_723_004), Time::new(1, 2, 3, 4));
        assert!(Time::try_new(12, 60, 0, 0).is_err());
    }

    #[test]
    fn julian_date_of_wall_time() {
        let dt = CalendarDateTime::from_ymd_hms(2000, 1, 1, 12, 0, 0);
        assert_eq!(dt.to_julian_date(), Days::new(2_451_545.0));
        assert_eq!(CalendarDate::from_ymd(2000, 1, 1).to_julian_date(), Days::new(2_451_544.5));
    }

    #[test]
    fn fiscal_month_length_through_values() {
        let fiscal: CalendarRef = Arc::new(FiscalCalendar::retail_2015());
        let date = CalendarDate::new(fiscal, 2015, 3, 15);
        assert_eq!(date.calendar().days_in_month(&date.era_date()), 35);
    }
}

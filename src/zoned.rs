// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time zones and zoned date-times.
//!
//! A [`ZonedDateTime`] is a wall-clock [`CalendarDateTime`] pinned to an
//! absolute instant by a [`TimeZone`] and the UTC offset in effect there.
//! The offset is resolved once, on construction, and cached.
//!
//! Around a transition a wall-clock time can match two instants (the clock
//! falls back) or none (the clock springs forward). [`Disambiguation`]
//! picks one. Candidates come from the zone's offsets one day before and
//! one day after the wall time; a candidate is kept when converting it back
//! reproduces the wall time.

use crate::calendar::{CalendarRef, EraDate};
use crate::date::{AnyCalendarDate, AnyTime, CalendarDate, CalendarDateTime, DateValue, Time};
use crate::duration::{DateDuration, DateTimeDuration};
use crate::julian_day::{from_epoch_milliseconds, MILLIS_PER_DAY};
use crate::manipulation::{self, CycleOptions, DateFields, Field, TimeField, TimeFields};
use crate::{CalendarError, Result};
use chrono::{DateTime, Offset, Utc};
use std::fmt;
use std::str::FromStr;

const MILLIS_PER_HOUR: i64 = 3_600_000;

// ── TimeZone ──────────────────────────────────────────────────────────────

/// A time zone: UTC, a fixed offset, or an IANA zone from the tz database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeZone {
    Utc,
    Fixed { offset_ms: i64 },
    Iana(chrono_tz::Tz),
}

impl TimeZone {
    /// A fixed offset east of UTC.
    pub const fn fixed(offset_ms: i64) -> Self {
        TimeZone::Fixed { offset_ms }
    }

    /// UTC offset in milliseconds at the instant `epoch_ms`.
    pub fn offset_at(&self, epoch_ms: i64) -> i64 {
        match self {
            TimeZone::Utc => 0,
            TimeZone::Fixed { offset_ms } => *offset_ms,
            TimeZone::Iana(tz) => DateTime::<Utc>::from_timestamp_millis(epoch_ms)
                .map(|utc| {
                    i64::from(utc.with_timezone(tz).offset().fix().local_minus_utc()) * 1_000
                })
                .unwrap_or(0),
        }
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZone::Utc => f.write_str("UTC"),
            TimeZone::Fixed { offset_ms } => f.write_str(&crate::string::offset_to_string(*offset_ms)),
            TimeZone::Iana(tz) => f.write_str(tz.name()),
        }
    }
}

impl FromStr for TimeZone {
    type Err = CalendarError;

    /// Accepts `UTC`, `Etc/UTC`, `±HH:MM`/`±HHMM`/`±HH`, or an IANA name.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "UTC" | "Etc/UTC" | "Z" => return Ok(TimeZone::Utc),
            _ => {}
        }
        if s.starts_with('+') || s.starts_with('-') {
            return crate::string::parse_offset(s)
                .map(TimeZone::fixed)
                .ok_or_else(|| CalendarError::UnknownTimeZone(s.to_owned()));
        }
        s.parse::<chrono_tz::Tz>()
            .map(TimeZone::Iana)
            .map_err(|_| CalendarError::UnknownTimeZone(s.to_owned()))
    }
}

/// How to pick an instant for a wall-clock time that occurs twice or never.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Disambiguation {
    /// Earlier instant in an overlap; later instant in a gap (the time is
    /// read with the offset in effect before the transition).
    #[default]
    Compatible,
    Earlier,
    Later,
    /// Fail with [`CalendarError::AmbiguousTime`] or
    /// [`CalendarError::NonexistentTime`].
    Reject,
}

// ── Wall-time resolution ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Exact(i64),
    Ambiguous { earlier: i64, later: i64 },
    Gap { earlier: i64, later: i64 },
}

impl Resolution {
    fn pick(self, disambiguation: Disambiguation) -> Option<i64> {
        match (self, disambiguation) {
            (Resolution::Exact(ms), _) => Some(ms),
            (_, Disambiguation::Reject) => None,
            (Resolution::Ambiguous { earlier, .. }, Disambiguation::Compatible) => Some(earlier),
            (Resolution::Gap { later, .. }, Disambiguation::Compatible) => Some(later),
            (Resolution::Ambiguous { earlier, .. } | Resolution::Gap { earlier, .. }, Disambiguation::Earlier) => {
                Some(earlier)
            }
            (Resolution::Ambiguous { later, .. } | Resolution::Gap { later, .. }, Disambiguation::Later) => {
                Some(later)
            }
        }
    }
}

/// Candidate instants for `wall_ms` (wall-clock milliseconds since the epoch).
fn resolve_wall(wall_ms: i64, time_zone: &TimeZone) -> Resolution {
    let before = wall_ms - time_zone.offset_at(wall_ms - MILLIS_PER_DAY);
    let after = wall_ms - time_zone.offset_at(wall_ms + MILLIS_PER_DAY);
    let matches = |ms: i64| ms + time_zone.offset_at(ms) == wall_ms;
    let (earlier, later) = (before.min(after), before.max(after));

    if earlier == later {
        return Resolution::Exact(earlier);
    }
    match (matches(earlier), matches(later)) {
        (true, true) => Resolution::Ambiguous { earlier, later },
        (true, false) => Resolution::Exact(earlier),
        (false, true) => Resolution::Exact(later),
        (false, false) => Resolution::Gap { earlier, later },
    }
}

/// Every instant whose wall time in `time_zone` is `wall_ms`.
pub(crate) fn valid_instants(wall_ms: i64, time_zone: &TimeZone) -> Vec<i64> {
    match resolve_wall(wall_ms, time_zone) {
        Resolution::Exact(ms) => vec![ms],
        Resolution::Ambiguous { earlier, later } => vec![earlier, later],
        Resolution::Gap { .. } => Vec::new(),
    }
}

fn resolve_compatible(wall_ms: i64, time_zone: &TimeZone) -> i64 {
    match resolve_wall(wall_ms, time_zone) {
        Resolution::Exact(ms) | Resolution::Ambiguous { earlier: ms, .. } => ms,
        Resolution::Gap { later, .. } => later,
    }
}

/// Epoch milliseconds of `wall` in `time_zone`.
pub(crate) fn to_absolute(
    wall: &CalendarDateTime,
    time_zone: &TimeZone,
    disambiguation: Disambiguation,
) -> Result<i64> {
    let resolution = resolve_wall(wall.wall_milliseconds(), time_zone);
    tracing::trace!(%time_zone, ?resolution, ?disambiguation, "resolving wall-clock time");
    resolution.pick(disambiguation).ok_or_else(|| {
        let date_time = wall.to_string();
        let time_zone = time_zone.to_string();
        match resolution {
            Resolution::Ambiguous { .. } => CalendarError::AmbiguousTime { date_time, time_zone },
            _ => CalendarError::NonexistentTime { date_time, time_zone },
        }
    })
}

// ── ZonedDateTime ─────────────────────────────────────────────────────────

/// A date and time in a time zone, with its resolved UTC offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonedDateTime {
    date_time: CalendarDateTime,
    time_zone: TimeZone,
    offset_ms: i64,
}

impl ZonedDateTime {
    /// Resolves a wall-clock time in `time_zone`.
    ///
    /// # Errors
    ///
    /// With [`Disambiguation::Reject`], [`CalendarError::AmbiguousTime`] for
    /// a repeated wall time and [`CalendarError::NonexistentTime`] for a
    /// skipped one. Other policies never fail.
    pub fn from_wall_time(
        wall: &CalendarDateTime,
        time_zone: &TimeZone,
        disambiguation: Disambiguation,
    ) -> Result<Self> {
        let ms = to_absolute(wall, time_zone, disambiguation)?;
        Ok(Self::from_absolute_in(ms, time_zone, wall.calendar()))
    }

    pub(crate) fn from_wall_time_compatible(wall: &CalendarDateTime, time_zone: &TimeZone) -> Self {
        let ms = resolve_compatible(wall.wall_milliseconds(), time_zone);
        Self::from_absolute_in(ms, time_zone, wall.calendar())
    }

    /// The Gregorian date-time of instant `epoch_ms` in `time_zone`.
    pub fn from_absolute(epoch_ms: i64, time_zone: &TimeZone) -> Self {
        Self::from_absolute_in(epoch_ms, time_zone, &crate::registry::gregorian())
    }

    /// The date-time of instant `epoch_ms` in `time_zone`, in `calendar`.
    pub fn from_absolute_in(epoch_ms: i64, time_zone: &TimeZone, calendar: &CalendarRef) -> Self {
        let offset_ms = time_zone.offset_at(epoch_ms);
        let (jd, millis) = from_epoch_milliseconds(epoch_ms + offset_ms);
        let date = CalendarDate::from_julian_day(calendar.clone(), jd);
        Self {
            date_time: CalendarDateTime::new(date, Time::from_millis_of_day(millis)),
            time_zone: *time_zone,
            offset_ms,
        }
    }

    /// The instant `datetime` viewed in `time_zone`.
    pub fn from_utc(datetime: DateTime<Utc>, time_zone: &TimeZone) -> Self {
        Self::from_absolute(datetime.timestamp_millis(), time_zone)
    }

    #[inline]
    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// UTC offset in milliseconds.
    #[inline]
    pub fn offset_ms(&self) -> i64 {
        self.offset_ms
    }

    /// Milliseconds since the Unix epoch.
    #[inline]
    pub fn to_absolute(&self) -> i64 {
        self.date_time.wall_milliseconds() - self.offset_ms
    }

    /// `None` when the instant is outside chrono's range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.to_absolute())
    }

    /// Adds a duration. Date parts move the wall-clock date and are
    /// re-resolved; time parts move the absolute instant, so adding 24 hours
    /// across a transition differs from adding one day.
    pub fn add(&self, duration: impl Into<DateTimeDuration>) -> Self {
        let duration = duration.into();
        let mut ms = if duration.date.is_zero() {
            self.to_absolute()
        } else {
            let wall = self.date_time.add(duration.date);
            resolve_compatible(wall.wall_milliseconds(), &self.time_zone)
        };
        ms += duration.time.total_milliseconds();
        Self::from_absolute_in(ms, &self.time_zone, self.calendar())
    }

    pub fn subtract(&self, duration: impl Into<DateTimeDuration>) -> Self {
        self.add(-duration.into())
    }

    /// Overwrites wall-clock fields and re-resolves the offset.
    /// Returns `self` unchanged when the fields already match.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidEra`] for an unknown era, and the
    /// disambiguation errors of [`from_wall_time`](Self::from_wall_time).
    pub fn set(
        &self,
        date: DateFields<'_>,
        time: TimeFields,
        disambiguation: Disambiguation,
    ) -> Result<Self> {
        let wall = self.date_time.set(date, time)?;
        if wall == self.date_time {
            return Ok(self.clone());
        }
        Self::from_wall_time(&wall, &self.time_zone, disambiguation)
    }

    /// Steps one field.
    ///
    /// Hours cycle on the absolute timeline between the first and last
    /// instants of the day, so a repeated hour is visited twice and a skipped
    /// hour not at all.
    pub fn cycle(&self, field: impl Into<Field>, amount: i64, options: CycleOptions) -> Self {
        match field.into() {
            Field::Time(TimeField::Hour) => self.cycle_hour(amount, options),
            Field::Time(field) => {
                let wall = self.date_time.cycle(field, amount, options);
                let kept = wall.wall_milliseconds() - self.offset_ms;
                let ms = if self.time_zone.offset_at(kept) == self.offset_ms {
                    kept
                } else {
                    resolve_compatible(wall.wall_milliseconds(), &self.time_zone)
                };
                Self::from_absolute_in(ms, &self.time_zone, self.calendar())
            }
            Field::Date(field) => {
                let wall = self.date_time.cycle(field, amount, options);
                Self::from_wall_time_compatible(&wall, &self.time_zone)
            }
        }
    }

    fn cycle_hour(&self, amount: i64, options: CycleOptions) -> Self {
        let (min, max) = manipulation::hour_bounds(self.hour(), options.hour_cycle);
        let day = self.to_julian_day();
        let local_day = |ms: i64| (ms + self.time_zone.offset_at(ms)).div_euclid(MILLIS_PER_DAY);
        let bound = |hour: u32| {
            let wall = CalendarDateTime::new(
                self.to_calendar_date(),
                Time::from_parts(hour, 0, 0, 0),
            );
            match resolve_wall(wall.wall_milliseconds(), &self.time_zone) {
                Resolution::Exact(ms) => (ms, ms),
                Resolution::Ambiguous { earlier, later } | Resolution::Gap { earlier, later } => {
                    (earlier, later)
                }
            }
        };
        let unix_day = day - crate::julian_day::UNIX_EPOCH_JULIAN_DAY;

        let (first_earlier, first_later) = bound(min);
        let min_ms = [first_earlier, first_later]
            .into_iter()
            .find(|ms| local_day(*ms) == unix_day)
            .unwrap_or(first_later);
        let (last_earlier, last_later) = bound(max);
        let max_ms = [last_earlier, last_later]
            .into_iter()
            .rev()
            .find(|ms| local_day(*ms) == unix_day)
            .unwrap_or(last_earlier);

        let ms = self.to_absolute();
        let hours = manipulation::cycle_value(
            ms.div_euclid(MILLIS_PER_HOUR),
            amount,
            min_ms.div_euclid(MILLIS_PER_HOUR),
            max_ms.div_euclid(MILLIS_PER_HOUR),
            options.round,
        );
        let ms = hours * MILLIS_PER_HOUR + ms.rem_euclid(MILLIS_PER_HOUR);
        Self::from_absolute_in(ms, &self.time_zone, self.calendar())
    }

    /// Difference of the absolute instants in milliseconds.
    pub fn compare(&self, other: &ZonedDateTime) -> i64 {
        self.to_absolute() - other.to_absolute()
    }

    pub fn to_calendar(&self, calendar: &CalendarRef) -> Self {
        Self {
            date_time: self.date_time.to_calendar(calendar),
            time_zone: self.time_zone,
            offset_ms: self.offset_ms,
        }
    }

    /// The same instant in another zone.
    pub fn to_time_zone(&self, time_zone: &TimeZone) -> Self {
        Self::from_absolute_in(self.to_absolute(), time_zone, self.calendar())
    }

    pub fn to_calendar_date(&self) -> CalendarDate {
        self.date_time.to_calendar_date()
    }

    pub fn to_calendar_date_time(&self) -> CalendarDateTime {
        self.date_time.clone()
    }

    pub fn to_time(&self) -> Time {
        self.date_time.to_time()
    }
}

impl AnyCalendarDate for ZonedDateTime {
    #[inline]
    fn calendar(&self) -> &CalendarRef {
        self.date_time.calendar()
    }

    #[inline]
    fn era_date(&self) -> EraDate {
        self.date_time.era_date()
    }
}

impl AnyTime for ZonedDateTime {
    #[inline]
    fn time(&self) -> Time {
        self.date_time.to_time()
    }
}

impl DateValue for ZonedDateTime {
    #[inline]
    fn wall_time(&self) -> Time {
        self.date_time.to_time()
    }

    fn timeline_milliseconds(&self) -> i64 {
        self.to_absolute()
    }

    fn add_date_duration(&self, duration: DateDuration) -> Self {
        self.add(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::TimeDuration;

    fn new_york() -> TimeZone {
        "America/New_York".parse().unwrap()
    }

    fn wall(y: i32, m: i32, d: i32, h: u32, min: u32) -> CalendarDateTime {
        CalendarDateTime::from_ymd_hms(y, m, d, h, min, 0)
    }

    #[test]
    fn parses_zone_identifiers() {
        assert_eq!("UTC".parse::<TimeZone>().unwrap(), TimeZone::Utc);
        assert_eq!(
            "+05:30".parse::<TimeZone>().unwrap(),
            TimeZone::fixed(19_800_000)
        );
        assert!(matches!(new_york(), TimeZone::Iana(_)));
        assert_eq!(
            "Mars/Olympus".parse::<TimeZone>().unwrap_err(),
            CalendarError::UnknownTimeZone("Mars/Olympus".into())
        );
    }

    #[test]
    fn offsets_follow_dst() {
        let tz = new_york();
        let winter = ZonedDateTime::from_wall_time(&wall(2021, 1, 10, 12, 0), &tz, Disambiguation::Reject).unwrap();
        assert_eq!(winter.offset_ms(), -5 * MILLIS_PER_HOUR);
        let summer = ZonedDateTime::from_wall_time(&wall(2021, 7, 10, 12, 0), &tz, Disambiguation::Reject).unwrap();
        assert_eq!(summer.offset_ms(), -4 * MILLIS_PER_HOUR);
    }

    #[test]
    fn spring_forward_gap() {
        let tz = new_york();
        let gap = wall(2021, 3, 14, 2, 30);
        let err = ZonedDateTime::from_wall_time(&gap, &tz, Disambiguation::Reject).unwrap_err();
        assert!(matches!(err, CalendarError::NonexistentTime { .. }));

        let compatible = ZonedDateTime::from_wall_time(&gap, &tz, Disambiguation::Compatible).unwrap();
        assert_eq!((compatible.hour(), compatible.minute()), (3, 30));
        let earlier = ZonedDateTime::from_wall_time(&gap, &tz, Disambiguation::Earlier).unwrap();
        assert_eq!((earlier.hour(), earlier.minute()), (1, 30));
        assert_eq!(earlier.offset_ms(), -5 * MILLIS_PER_HOUR);
    }

    #[test]
    fn fall_back_overlap() {
        let tz = new_york();
        let overlap = wall(2021, 11, 7, 1, 30);
        let err = ZonedDateTime::from_wall_time(&overlap, &tz, Disambiguation::Reject).unwrap_err();
        assert!(matches!(err, CalendarError::AmbiguousTime { .. }));

        let earlier = ZonedDateTime::from_wall_time(&overlap, &tz, Disambiguation::Compatible).unwrap();
        let later = ZonedDateTime::from_wall_time(&overlap, &tz, Disambiguation::Later).unwrap();
        assert_eq!(earlier.offset_ms(), -4 * MILLIS_PER_HOUR);
        assert_eq!(later.offset_ms(), -5 * MILLIS_PER_HOUR);
        assert_eq!(later.compare(&earlier), MILLIS_PER_HOUR);
        assert_eq!(earlier.to_calendar_date_time(), later.to_calendar_date_time());
    }

    #[test]
    fn adding_hours_across_transition() {
        let tz = new_york();
        let start = ZonedDateTime::from_wall_time(&wall(2021, 3, 14, 1, 0), &tz, Disambiguation::Reject).unwrap();
        let next = start.add(TimeDuration::hours(1));
        assert_eq!((next.hour(), next.offset_ms()), (3, -4 * MILLIS_PER_HOUR));
        let day_later = start.add(DateDuration::days(1));
        assert_eq!((day_later.day(), day_later.hour()), (15, 1));
        assert_eq!(day_later.compare(&start), 23 * MILLIS_PER_HOUR);
    }

    #[test]
    fn cycling_hours_skips_missing_hour() {
        let tz = new_york();
        let start = ZonedDateTime::from_wall_time(&wall(2021, 3, 14, 1, 0), &tz, Disambiguation::Reject).unwrap();
        let next = start.cycle(TimeField::Hour, 1, CycleOptions::default());
        assert_eq!(next.hour(), 3);
        let back = next.cycle(TimeField::Hour, -1, CycleOptions::default());
        assert_eq!(back.hour(), 1);
        let wrap = start.cycle(TimeField::Hour, -2, CycleOptions::default());
        assert_eq!((wrap.day(), wrap.hour()), (14, 23));
    }

    #[test]
    fn set_returns_same_value_when_unchanged() {
        let tz = new_york();
        let overlap = ZonedDateTime::from_wall_time(&wall(2021, 11, 7, 1, 30), &tz, Disambiguation::Later).unwrap();
        let same = overlap
            .set(DateFields::new(), TimeFields::new().minute(30), Disambiguation::Reject)
            .unwrap();
        assert_eq!(same, overlap);
        let moved = overlap
            .set(DateFields::new(), TimeFields::new().hour(2), Disambiguation::Reject)
            .unwrap();
        assert_eq!(moved.offset_ms(), -5 * MILLIS_PER_HOUR);
    }

    #[test]
    fn time_zone_conversion_keeps_instant() {
        let utc = ZonedDateTime::from_absolute(0, &TimeZone::Utc);
        let tokyo = utc.to_time_zone(&"Asia/Tokyo".parse().unwrap());
        assert_eq!(tokyo.hour(), 9);
        assert_eq!(tokyo.compare(&utc), 0);
        assert_eq!(tokyo.to_utc().map(|d| d.timestamp()), Some(0));
    }
}

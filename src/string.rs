// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! ISO 8601 string forms.
//!
//! | Value | Form |
//! |-------|------|
//! | [`Time`] | `HH:mm:ss[.sss]` |
//! | [`CalendarDate`] | `YYYY-MM-DD` (`±YYYYYY` outside years 0000–9999) |
//! | [`CalendarDateTime`] | `YYYY-MM-DDTHH:mm:ss[.sss]` |
//! | [`ZonedDateTime`] | `…±HH:MM[Zone]` |
//! | [`DateTimeDuration`] | `±PnYnMnWnDTnHnMnS` |
//!
//! Dates are always written in the proleptic Gregorian calendar. Values in
//! another calendar carry an `[u-ca=<identifier>]` annotation, and parsing
//! that annotation converts the result back into the named calendar.
//! Fractional seconds are written with trailing zeros trimmed.

use crate::calendar::CalendarRef;
use crate::date::{AnyCalendarDate, AnyTime, CalendarDate, CalendarDateTime, Time};
use crate::duration::{DateDuration, DateTimeDuration, TimeDuration};
use crate::error::FieldName;
use crate::julian_day::is_gregorian_leap_year;
use crate::registry::{create_calendar, gregorian};
use crate::zoned::{self, Disambiguation, TimeZone, ZonedDateTime};
use crate::{CalendarError, Result};
use regex::{Captures, Regex};
use std::fmt::{self, Write};
use std::str::FromStr;
use std::sync::OnceLock;

// ── Compiled patterns ─────────────────────────────────────────────────────

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($re).expect("static ISO 8601 pattern"))
        }
    };
}

macro_rules! date_time_re {
    () => {
        r"([+-]\d{6}|\d{4})-(\d{2})-(\d{2})(?:T(\d{2})(?::(\d{2})(?::(\d{2})(\.\d+)?)?)?)?"
    };
}

pattern!(time_re, r"^(\d{2})(?::(\d{2})(?::(\d{2})(\.\d+)?)?)?$");
pattern!(
    date_re,
    r"^([+-]\d{6}|\d{4})-(\d{2})-(\d{2})(?:\[u-ca=([a-z0-9-]+)\])?$"
);
pattern!(
    date_time_re,
    concat!("^", date_time_re!(), r"(?:\[u-ca=([a-z0-9-]+)\])?$")
);
pattern!(
    zoned_re,
    concat!(
        "^",
        date_time_re!(),
        r"(?:([+-]\d{2})(?::?(\d{2}))?|Z)?\[([^\]=]+)\](?:\[u-ca=([a-z0-9-]+)\])?$"
    )
);
pattern!(
    absolute_re,
    concat!("^", date_time_re!(), r"(?:([+-]\d{2})(?::?(\d{2}))?|Z)$")
);
pattern!(
    duration_re,
    r"^([+-])?P(?:(-?\d+)Y)?(?:(-?\d+)M)?(?:(-?\d+)W)?(?:(-?\d+)D)?(?:T(?:(-?\d+(?:[.,]\d+)?)H)?(?:(-?\d+(?:[.,]\d+)?)M)?(?:(-?\d+(?:[.,]\d+)?)S)?)?$"
);
pattern!(offset_re, r"^([+-])(\d{2})(?::?(\d{2}))?(?::?(\d{2}))?$");

// ── Field helpers ─────────────────────────────────────────────────────────

fn number(caps: &Captures<'_>, index: usize, field: FieldName, min: i64, max: i64) -> Result<i64> {
    let Some(m) = caps.get(index) else {
        return Ok(0);
    };
    let value: i64 = m
        .as_str()
        .trim_start_matches('+')
        .parse()
        .map_err(|_| CalendarError::parse("number", m.as_str()))?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(CalendarError::InvalidField {
            field,
            value,
            min,
            max,
        })
    }
}

/// Milliseconds of a `.ddd…` fraction of one second.
fn fraction_millis(caps: &Captures<'_>, index: usize) -> u32 {
    caps.get(index).map_or(0, |m| fraction_of(&m.as_str()[1..], 1_000) as u32)
}

/// `0.<digits>` of `unit`, rounded to an integer.
fn fraction_of(digits: &str, unit: i64) -> i64 {
    let mut value = 0.0;
    let mut scale = 0.1;
    for b in digits.bytes().filter(u8::is_ascii_digit) {
        value += f64::from(b - b'0') * scale;
        scale /= 10.0;
    }
    (value * unit as f64).round() as i64
}

/// Gregorian date from the first three groups. Years run from 9999 BC
/// (`-009998`) to 9999 AD.
fn gregorian_date(caps: &Captures<'_>) -> Result<CalendarDate> {
    let year = number(caps, 1, FieldName::Year, -9_998, 9_999)? as i32;
    let month = number(caps, 2, FieldName::Month, 1, 12)? as i32;
    let days = days_in_gregorian_month(year, month);
    let day = number(caps, 3, FieldName::Day, 1, i64::from(days))? as i32;
    let (era, year) = if year < 1 { ("BC", 1 - year) } else { ("AD", year) };
    CalendarDate::with_era(gregorian(), era, year, month, day)
}

fn days_in_gregorian_month(year: i32, month: i32) -> i32 {
    match month {
        2 if is_gregorian_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Time from groups `first..first + 4` (hour, minute, second, fraction).
fn time_from(caps: &Captures<'_>, first: usize) -> Result<Time> {
    let hour = number(caps, first, FieldName::Hour, 0, 23)? as u32;
    let minute = number(caps, first + 1, FieldName::Minute, 0, 59)? as u32;
    let second = number(caps, first + 2, FieldName::Second, 0, 59)? as u32;
    Ok(Time::new(hour, minute, second, fraction_millis(caps, first + 3)))
}

fn date_time_from(caps: &Captures<'_>) -> Result<CalendarDateTime> {
    Ok(CalendarDateTime::new(gregorian_date(caps)?, time_from(caps, 4)?))
}

fn offset_from(caps: &Captures<'_>, hours: usize) -> Option<i64> {
    let h = caps.get(hours)?.as_str();
    let sign = if h.starts_with('-') { -1 } else { 1 };
    let h: i64 = h[1..].parse().ok()?;
    let m: i64 = caps.get(hours + 1).map_or(Some(0), |m| m.as_str().parse().ok())?;
    Some(sign * (h * 60 + m) * 60_000)
}

fn calendar_annotation(caps: &Captures<'_>, index: usize) -> Result<Option<CalendarRef>> {
    caps.get(index).map(|m| create_calendar(m.as_str())).transpose()
}

// ── Parsing ───────────────────────────────────────────────────────────────

/// Parses `HH[:mm[:ss[.sss]]]`.
///
/// # Errors
///
/// [`CalendarError::Parse`] for malformed input and
/// [`CalendarError::InvalidField`] for out-of-range fields.
pub fn parse_time(value: &str) -> Result<Time> {
    let caps = time_re()
        .captures(value)
        .ok_or_else(|| CalendarError::parse("time", value))?;
    time_from(&caps, 1)
}

/// Parses `YYYY-MM-DD[[u-ca=id]]`.
///
/// # Errors
///
/// [`CalendarError::Parse`], [`CalendarError::InvalidField`], or
/// [`CalendarError::UnknownCalendar`] for an unknown annotation.
pub fn parse_date(value: &str) -> Result<CalendarDate> {
    let caps = date_re()
        .captures(value)
        .ok_or_else(|| CalendarError::parse("date", value))?;
    let date = gregorian_date(&caps)?;
    Ok(match calendar_annotation(&caps, 4)? {
        Some(calendar) => date.to_calendar(&calendar),
        None => date,
    })
}

/// Parses `YYYY-MM-DD[THH[:mm[:ss[.sss]]]][[u-ca=id]]`.
///
/// # Errors
///
/// As [`parse_date`].
pub fn parse_date_time(value: &str) -> Result<CalendarDateTime> {
    let caps = date_time_re()
        .captures(value)
        .ok_or_else(|| CalendarError::parse("date-time", value))?;
    let date_time = date_time_from(&caps)?;
    Ok(match calendar_annotation(&caps, 8)? {
        Some(calendar) => date_time.to_calendar(&calendar),
        None => date_time,
    })
}

/// Parses `…[±HH[:MM]][Zone][[u-ca=id]]`.
///
/// An explicit offset must be one the zone actually uses at that wall time;
/// without one the wall time is resolved with `disambiguation`.
///
/// # Errors
///
/// [`CalendarError::OffsetMismatch`] for an offset the zone rejects,
/// [`CalendarError::UnknownTimeZone`], and the errors of [`parse_date`] and
/// [`ZonedDateTime::from_wall_time`].
pub fn parse_zoned_date_time(value: &str, disambiguation: Disambiguation) -> Result<ZonedDateTime> {
    let caps = zoned_re()
        .captures(value)
        .ok_or_else(|| CalendarError::parse("zoned date-time", value))?;
    let wall = date_time_from(&caps)?;
    let time_zone: TimeZone = caps[10].parse()?;
    let calendar = calendar_annotation(&caps, 11)?;

    let absolute = match offset_from(&caps, 8) {
        Some(offset) => {
            let absolute = wall.wall_milliseconds() - offset;
            if !zoned::valid_instants(wall.wall_milliseconds(), &time_zone).contains(&absolute) {
                return Err(CalendarError::OffsetMismatch {
                    offset: offset_to_string(offset),
                    date_time: wall.to_string(),
                    time_zone: time_zone.to_string(),
                });
            }
            absolute
        }
        None => zoned::to_absolute(&wall, &time_zone, disambiguation)?,
    };
    let calendar = calendar.unwrap_or_else(gregorian);
    Ok(ZonedDateTime::from_absolute_in(absolute, &time_zone, &calendar))
}

/// Parses an instant with an explicit offset or `Z` and places it in `time_zone`.
///
/// # Errors
///
/// [`CalendarError::Parse`] when the offset is missing or malformed, and
/// [`CalendarError::InvalidField`] for out-of-range fields.
pub fn parse_absolute(value: &str, time_zone: &TimeZone) -> Result<ZonedDateTime> {
    let caps = absolute_re()
        .captures(value)
        .ok_or_else(|| CalendarError::parse("absolute date-time", value))?;
    let wall = date_time_from(&caps)?;
    let offset = offset_from(&caps, 8).unwrap_or(0);
    Ok(ZonedDateTime::from_absolute(wall.wall_milliseconds() - offset, time_zone))
}

/// Parses `±PnYnMnWnDTnHnMnS`.
///
/// Only time parts may carry a fraction (`.` or `,`); it is spread over the
/// smaller units down to milliseconds, so `PT1.5H` is 1 hour 30 minutes.
/// A field may carry its own `-`, which is how mixed-sign durations such as
/// `P1Y-1M` are written.
///
/// # Errors
///
/// [`CalendarError::Parse`] for malformed input, including a bare `P` or a
/// `T` with nothing after it.
pub fn parse_duration(value: &str) -> Result<DateTimeDuration> {
    let invalid = || CalendarError::parse("duration", value);
    let caps = duration_re().captures(value).ok_or_else(invalid)?;
    if (2..=8).all(|i| caps.get(i).is_none()) || value.ends_with('T') {
        return Err(invalid());
    }
    let sign: i32 = if caps.get(1).map(|m| m.as_str()) == Some("-") { -1 } else { 1 };

    let date_part = |i: usize| -> Result<i32> {
        caps.get(i)
            .map_or(Ok(0), |m| m.as_str().parse::<i32>().map_err(|_| invalid()))
            .map(|v| v * sign)
    };
    let date = DateDuration {
        years: date_part(2)?,
        months: date_part(3)?,
        weeks: date_part(4)?,
        days: date_part(5)?,
    };

    const UNIT_MS: [i64; 3] = [3_600_000, 60_000, 1_000];
    let mut parts = [0i64; 3];
    let mut spill = 0i64;
    for (k, unit) in UNIT_MS.iter().enumerate() {
        let Some(m) = caps.get(6 + k) else { continue };
        let (field_sign, text) = match m.as_str().strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, m.as_str()),
        };
        let (whole, frac) = text.split_once(['.', ',']).unwrap_or((text, ""));
        parts[k] = field_sign * whole.parse::<i64>().map_err(|_| invalid())?;
        spill += field_sign * fraction_of(frac, *unit);
    }
    let sign = i64::from(sign);
    let time = TimeDuration {
        hours: sign * parts[0],
        minutes: sign * (parts[1] + spill / 60_000),
        seconds: sign * (parts[2] + spill % 60_000 / 1_000),
        milliseconds: sign * (spill % 1_000),
    };
    Ok(DateTimeDuration::new(date, time))
}

/// Parses `±HH`, `±HHMM`, `±HH:MM` or `±HH:MM:SS` into milliseconds.
pub(crate) fn parse_offset(value: &str) -> Option<i64> {
    let caps = offset_re().captures(value)?;
    let sign = if &caps[1] == "-" { -1 } else { 1 };
    let part = |i: usize| caps.get(i).map_or(Some(0), |m| m.as_str().parse::<i64>().ok());
    let (h, m, s) = (part(2)?, part(3)?, part(4)?);
    if h > 23 || m > 59 || s > 59 {
        return None;
    }
    Some(sign * ((h * 60 + m) * 60 + s) * 1_000)
}

// ── Formatting ────────────────────────────────────────────────────────────

/// `±HH:MM`, with `:SS` when the offset has seconds.
pub(crate) fn offset_to_string(offset_ms: i64) -> String {
    let sign = if offset_ms < 0 { '-' } else { '+' };
    let total = offset_ms.abs() / 1_000;
    let (h, m, s) = (total / 3_600, total / 60 % 60, total % 60);
    if s == 0 {
        format!("{sign}{h:02}:{m:02}")
    } else {
        format!("{sign}{h:02}:{m:02}:{s:02}")
    }
}

fn write_gregorian_date(f: &mut impl Write, date: &impl AnyCalendarDate) -> fmt::Result {
    let (year, month, day) = crate::julian_day::julian_day_to_date(date.to_julian_day());
    if (0..=9999).contains(&year) {
        write!(f, "{year:04}-{month:02}-{day:02}")
    } else {
        let sign = if year < 0 { '-' } else { '+' };
        write!(f, "{sign}{:06}-{month:02}-{day:02}", year.unsigned_abs())
    }
}

fn write_time(f: &mut impl Write, time: &impl AnyTime) -> fmt::Result {
    write!(f, "{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second())?;
    let ms = time.millisecond();
    if ms != 0 {
        let fraction = format!("{ms:03}");
        write!(f, ".{}", fraction.trim_end_matches('0'))?;
    }
    Ok(())
}

fn write_calendar(f: &mut impl Write, date: &impl AnyCalendarDate) -> fmt::Result {
    let id = date.calendar().identifier();
    if id == "gregory" {
        Ok(())
    } else {
        write!(f, "[u-ca={id}]")
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_time(f, self)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_gregorian_date(f, self)?;
        write_calendar(f, self)
    }
}

impl fmt::Display for CalendarDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_gregorian_date(f, self)?;
        f.write_char('T')?;
        write_time(f, self)?;
        write_calendar(f, self)
    }
}

impl fmt::Display for ZonedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_gregorian_date(f, self)?;
        f.write_char('T')?;
        write_time(f, self)?;
        write!(f, "{}[{}]", offset_to_string(self.offset_ms()), self.time_zone())?;
        write_calendar(f, self)
    }
}

impl fmt::Display for DateTimeDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let DateDuration { years, months, weeks, days } = self.date;
        let TimeDuration { hours, minutes, seconds, milliseconds } = self.time;
        let dates = [i64::from(years), i64::from(months), i64::from(weeks), i64::from(days)];
        let millis = seconds * 1_000 + milliseconds;
        let all = [dates[0], dates[1], dates[2], dates[3], hours, minutes, millis];

        let negative = all.iter().any(|v| *v < 0) && all.iter().all(|v| *v <= 0);
        let sign = if negative { -1 } else { 1 };
        if negative {
            f.write_char('-')?;
        }
        f.write_char('P')?;
        for (value, unit) in dates.iter().zip(['Y', 'M', 'W', 'D']) {
            if *value != 0 {
                write!(f, "{}{unit}", value * sign)?;
            }
        }
        if hours == 0 && minutes == 0 && millis == 0 {
            if self.date.is_zero() {
                f.write_str("T0S")?;
            }
            return Ok(());
        }
        f.write_char('T')?;
        if hours != 0 {
            write!(f, "{}H", hours * sign)?;
        }
        if minutes != 0 {
            write!(f, "{}M", minutes * sign)?;
        }
        if millis != 0 {
            let millis = millis * sign;
            let (whole, frac) = (millis / 1_000, (millis % 1_000).abs());
            if frac == 0 {
                write!(f, "{whole}S")?;
            } else {
                let lead = if millis < 0 && whole == 0 { "-" } else { "" };
                let fraction = format!("{frac:03}");
                write!(f, "{lead}{whole}.{}S", fraction.trim_end_matches('0'))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for DateDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&DateTimeDuration::from(*self), f)
    }
}

impl fmt::Display for TimeDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&DateTimeDuration::from(*self), f)
    }
}

impl FromStr for Time {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        parse_time(s)
    }
}

impl FromStr for CalendarDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        parse_date(s)
    }
}

impl FromStr for CalendarDateTime {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        parse_date_time(s)
    }
}

impl FromStr for ZonedDateTime {
    type Err = CalendarError;

    /// Parses with [`Disambiguation::Compatible`].
    fn from_str(s: &str) -> Result<Self> {
        parse_zoned_date_time(s, Disambiguation::Compatible)
    }
}

impl FromStr for DateTimeDuration {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        parse_duration(s)
    }
}

// ── Serde (ISO strings) ───────────────────────────────────────────────────

#[cfg(feature = "serde")]
macro_rules! iso_serde {
    ($ty:ty, $expecting:literal) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                struct IsoVisitor;

                impl serde::de::Visitor<'_> for IsoVisitor {
                    type Value = $ty;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str($expecting)
                    }

                    fn visit_str<E: serde::de::Error>(self, v: &str) -> std::result::Result<$ty, E> {
                        v.parse().map_err(E::custom)
                    }
                }

                deserializer.deserialize_str(IsoVisitor)
            }
        }
    };
}

#[cfg(feature = "serde")]
iso_serde!(Time, "an ISO 8601 time");
#[cfg(feature = "serde")]
iso_serde!(CalendarDate, "an ISO 8601 date");
#[cfg(feature = "serde")]
iso_serde!(CalendarDateTime, "an ISO 8601 date-time");
#[cfg(feature = "serde")]
iso_serde!(ZonedDateTime, "an ISO 8601 date-time with offset and time zone");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manipulation::{DateFields, TimeFields};

    #[test]
    fn parses_times() {
        assert_eq!(parse_time("09:05").unwrap(), Time::new(9, 5, 0, 0));
        assert_eq!(parse_time("23:59:59.5").unwrap(), Time::new(23, 59, 59, 500));
        assert!(matches!(
            parse_time("24:00"),
            Err(CalendarError::InvalidField { field: FieldName::Hour, .. })
        ));
        assert!(matches!(parse_time("9:05"), Err(CalendarError::Parse { .. })));
        assert!(matches!(parse_time("09.5"), Err(CalendarError::Parse { .. })));
    }

    #[test]
    fn formats_times() {
        assert_eq!(Time::new(9, 5, 0, 0).to_string(), "09:05:00");
        assert_eq!(Time::new(9, 5, 7, 500).to_string(), "09:05:07.5");
        assert_eq!(Time::new(9, 5, 7, 5).to_string(), "09:05:07.005");
    }

    #[test]
    fn parses_dates() {
        assert_eq!(parse_date("2019-06-05").unwrap(), CalendarDate::from_ymd(2019, 6, 5));
        assert_eq!(parse_date("2024-02-29").unwrap().day(), 29);
        assert!(matches!(
            parse_date("2023-02-29"),
            Err(CalendarError::InvalidField { field: FieldName::Day, max: 28, .. })
        ));
        assert!(matches!(parse_date("2019-6-5"), Err(CalendarError::Parse { .. })));
    }

    #[test]
    fn extended_years() {
        let bc = parse_date("-000044-03-15").unwrap();
        assert_eq!((bc.era(), bc.year()), ("BC", 45));
        assert_eq!(bc.to_string(), "-000044-03-15");
        let year_zero = parse_date("0000-01-01").unwrap();
        assert_eq!((year_zero.era(), year_zero.year()), ("BC", 1));
        assert_eq!(year_zero.to_string(), "0000-01-01");
        let earliest = parse_date("-009998-01-01").unwrap();
        assert_eq!((earliest.era(), earliest.year()), ("BC", 9999));
    }

    #[test]
    fn years_beyond_the_era_are_rejected() {
        for text in ["+012345-01-01", "+010000-01-01", "-009999-12-31"] {
            assert!(
                matches!(
                    parse_date(text),
                    Err(CalendarError::InvalidField { field: FieldName::Year, .. })
                ),
                "{text}"
            );
        }
        assert_eq!(parse_date("+009999-12-31").unwrap().year(), 9999);
    }

    #[test]
    fn calendar_annotation_round_trip() {
        let japanese = create_calendar("japanese").unwrap();
        let date = CalendarDate::from_ymd(2019, 6, 5).to_calendar(&japanese);
        let text = date.to_string();
        assert_eq!(text, "2019-06-05[u-ca=japanese]");
        let parsed: CalendarDate = text.parse().unwrap();
        assert_eq!(parsed, date);
        assert_eq!(parsed.era(), "reiwa");
        assert!(matches!(
            parse_date("2019-06-05[u-ca=mayan]"),
            Err(CalendarError::UnknownCalendar(_))
        ));
    }

    #[test]
    fn date_times() {
        let dt = parse_date_time("2019-06-05T14:30").unwrap();
        assert_eq!(dt, CalendarDateTime::from_ymd_hms(2019, 6, 5, 14, 30, 0));
        assert_eq!(dt.to_string(), "2019-06-05T14:30:00");
        let midnight = parse_date_time("2019-06-05").unwrap();
        assert_eq!(midnight.to_time(), Time::MIDNIGHT);
    }

    #[test]
    fn time_fields_need_their_prefix() {
        for bad in ["2020-01-01:30", "2020-01-01.5", "2020-01-01:30:15", "2020-01-01T10:30.5:00"] {
            assert!(
                matches!(parse_date_time(bad), Err(CalendarError::Parse { .. })),
                "{bad}"
            );
        }
        assert!(parse_date_time("2020-01-01T10:30:15.5").is_ok());
        assert!(matches!(
            parse_absolute("2020-01-01:30Z", &TimeZone::Utc),
            Err(CalendarError::Parse { .. })
        ));
    }

    #[test]
    fn zoned_with_offset() {
        let z = parse_zoned_date_time(
            "2021-03-10T00:45-05:00[America/New_York]",
            Disambiguation::Reject,
        )
        .unwrap();
        assert_eq!((z.year(), z.month(), z.day(), z.hour(), z.minute()), (2021, 3, 10, 0, 45));
        assert_eq!(z.offset_ms(), -5 * 3_600_000);
        assert_eq!(z.to_string(), "2021-03-10T00:45:00-05:00[America/New_York]");
    }

    #[test]
    fn zoned_offset_must_match_zone() {
        let err = parse_zoned_date_time(
            "2021-03-10T00:45-04:00[America/New_York]",
            Disambiguation::Compatible,
        )
        .unwrap_err();
        assert!(matches!(err, CalendarError::OffsetMismatch { .. }));
    }

    #[test]
    fn zoned_offset_selects_overlap_instant() {
        let later = parse_zoned_date_time(
            "2021-11-07T01:30-05:00[America/New_York]",
            Disambiguation::Reject,
        )
        .unwrap();
        assert_eq!(later.offset_ms(), -5 * 3_600_000);
        let err = parse_zoned_date_time("2021-11-07T01:30[America/New_York]", Disambiguation::Reject)
            .unwrap_err();
        assert!(matches!(err, CalendarError::AmbiguousTime { .. }));
    }

    #[test]
    fn zoned_without_offset_and_fixed_zones() {
        let z: ZonedDateTime = "2021-03-14T02:30[America/New_York]".parse().unwrap();
        assert_eq!(z.hour(), 3);
        let fixed = parse_zoned_date_time("2020-01-01T12:00+05:30[+05:30]", Disambiguation::Reject).unwrap();
        assert_eq!(fixed.to_string(), "2020-01-01T12:00:00+05:30[+05:30]");
        let utc = parse_zoned_date_time("2020-01-01T12:00Z[UTC]", Disambiguation::Reject).unwrap();
        assert_eq!(utc.to_absolute(), 1_577_880_000_000);
    }

    #[test]
    fn absolute_strings() {
        let tz: TimeZone = "Asia/Tokyo".parse().unwrap();
        let z = parse_absolute("2020-01-01T00:00:00Z", &tz).unwrap();
        assert_eq!(z.hour(), 9);
        let z = parse_absolute("2020-01-01T09:00:00+09:00", &TimeZone::Utc).unwrap();
        assert_eq!((z.day(), z.hour()), (1, 0));
        assert!(parse_absolute("2020-01-01T00:00:00", &tz).is_err());
    }

    #[test]
    fn durations() {
        let d = parse_duration("P1Y2M3W4DT5H6M7S").unwrap();
        assert_eq!(d.date, DateDuration { years: 1, months: 2, weeks: 3, days: 4 });
        assert_eq!(d.time, TimeDuration { hours: 5, minutes: 6, seconds: 7, milliseconds: 0 });
        assert_eq!(d.to_string(), "P1Y2M3W4DT5H6M7S");

        let half = parse_duration("PT1.5H").unwrap();
        assert_eq!(half.time, TimeDuration { hours: 1, minutes: 30, seconds: 0, milliseconds: 0 });
        let negative = parse_duration("-P1DT0,25S").unwrap();
        assert_eq!(negative.date.days, -1);
        assert_eq!(negative.time.milliseconds, -250);
        assert_eq!(negative.to_string(), "-P1DT0.25S");
        assert_eq!(DateTimeDuration::default().to_string(), "PT0S");
        assert_eq!(DateDuration::months(1).to_string(), "P1M");
    }

    #[test]
    fn mixed_sign_durations_read_back() {
        let mixed = DateTimeDuration::new(
            DateDuration { years: 1, months: -1, weeks: 0, days: 0 },
            TimeDuration { hours: 2, minutes: 0, seconds: 0, milliseconds: -250 },
        );
        let text = mixed.to_string();
        assert_eq!(text, "P1Y-1MT2H-0.25S");
        assert_eq!(parse_duration(&text).unwrap(), mixed);
        assert_eq!(
            parse_duration("-P1Y-1M").unwrap().date,
            DateDuration { years: -1, months: 1, weeks: 0, days: 0 }
        );
    }

    #[test]
    fn malformed_durations() {
        for bad in ["P", "PT", "P1DT", "1D", "P1.5D", "PT1H1H"] {
            assert!(
                matches!(parse_duration(bad), Err(CalendarError::Parse { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn offsets() {
        assert_eq!(parse_offset("+05:30"), Some(19_800_000));
        assert_eq!(parse_offset("-0800"), Some(-28_800_000));
        assert_eq!(parse_offset("+01"), Some(3_600_000));
        assert_eq!(parse_offset("+25:00"), None);
        assert_eq!(offset_to_string(-28_800_000), "-08:00");
        assert_eq!(offset_to_string(0), "+00:00");
    }

    #[test]
    fn set_then_format() {
        let dt = parse_date_time("2019-06-05T14:30").unwrap();
        let moved = dt
            .set(DateFields::new().day(31), TimeFields::new().millisecond(120))
            .unwrap();
        assert_eq!(moved.to_string(), "2019-06-30T14:30:00.12");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_iso_strings() {
        let date = CalendarDate::from_ymd(2019, 6, 5);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2019-06-05\"");
        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
        assert!(serde_json::from_str::<Time>("\"25:00\"").is_err());
    }
}

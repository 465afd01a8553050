// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar-agnostic dates.
//!
//! This crate represents dates in many civil calendar systems and does
//! era-aware, month-length-aware arithmetic on them. Every calendar maps its
//! dates onto the integer Julian day number, so values in different calendars
//! compare and convert exactly.
//!
//! # Core types
//!
//! - [`Calendar`]: trait describing one calendar system, shared as [`CalendarRef`].
//! - [`CalendarDate`]: a day in some calendar.
//! - [`CalendarDateTime`]: a date with a wall-clock [`Time`].
//! - [`ZonedDateTime`]: a date-time pinned to an instant by a [`TimeZone`].
//! - [`DateDuration`], [`TimeDuration`], [`DateTimeDuration`]: signed durations.
//! - [`DateRange<T>`]: an inclusive range of any of the above.
//!
//! # Calendars
//!
//! [`create_calendar`] returns the shared instance for a CLDR identifier;
//! see [`calendars`] for the built-in systems. Custom calendars implement
//! [`Calendar`] and may be published with [`register_calendar`].
//!
//! ```
//! use kalendae::{create_calendar, AnyCalendarDate, CalendarDate, DateDuration};
//!
//! let date = CalendarDate::from_ymd(2019, 6, 5);
//! let japanese = date.to_calendar(&create_calendar("japanese")?);
//! assert_eq!((japanese.era(), japanese.year()), ("reiwa", 1));
//!
//! let later = japanese.add(DateDuration::months(1));
//! assert_eq!(later.to_string(), "2019-07-05[u-ca=japanese]");
//! # Ok::<(), kalendae::CalendarError>(())
//! ```
//!
//! # Arithmetic
//!
//! `add`/`subtract` balance overflow through months and years using the
//! calendar's own lengths and clamp the result (`2020-01-31 + 1 month` is
//! `2020-02-29`). `set` overwrites fields and clamps. `cycle` steps a single
//! field and wraps within its range. Zoned values apply date parts on the wall
//! clock and time parts on the absolute timeline.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for value types (as ISO 8601 strings)
//!   and durations.

pub mod calendar;
pub mod calendars;
mod date;
mod duration;
mod error;
pub mod julian_day;
mod manipulation;
mod period;
pub mod queries;
mod registry;
mod string;
mod zoned;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{Calendar, CalendarRef, EraDate};
pub use date::{
    AnyCalendarDate, AnyTime, CalendarDate, CalendarDateTime, DateBuilder, DateValue, Overflow,
    Time,
};
pub use duration::{DateDuration, DateTimeDuration, TimeDuration};
pub use error::{CalendarError, FieldName, Result};
pub use manipulation::{
    CycleOptions, DateField, DateFields, Field, HourCycle, TimeField, TimeFields,
};
pub use period::{complement_within, intersect_ranges, DateRange};
pub use registry::{create_calendar, gregorian, register_calendar, BUILTIN_IDENTIFIERS};
pub use string::{
    parse_absolute, parse_date, parse_date_time, parse_duration, parse_time,
    parse_zoned_date_time,
};
pub use zoned::{Disambiguation, TimeZone, ZonedDateTime};

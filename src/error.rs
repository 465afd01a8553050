// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every fallible operation in the crate.

use std::fmt;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CalendarError>;

/// Names a single date or time field in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Era,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldName::Era => "era",
            FieldName::Year => "year",
            FieldName::Month => "month",
            FieldName::Day => "day",
            FieldName::Hour => "hour",
            FieldName::Minute => "minute",
            FieldName::Second => "second",
            FieldName::Millisecond => "millisecond",
        };
        f.write_str(name)
    }
}

/// Error type for all fallible operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A field was outside its valid range and the overflow policy was `Reject`.
    #[error("{field} value {value} is out of range {min}..={max}")]
    InvalidField {
        /// The offending field.
        field: FieldName,
        /// The supplied value.
        value: i64,
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },

    /// An era identifier that the calendar does not define.
    #[error("unknown era {era:?} for calendar {calendar}")]
    InvalidEra {
        /// The supplied era.
        era: String,
        /// Identifier of the calendar that rejected it.
        calendar: String,
    },

    /// No calendar is registered under this identifier.
    #[error("unknown calendar identifier {0:?}")]
    UnknownCalendar(String),

    /// The time zone identifier is neither a fixed offset nor an IANA zone.
    #[error("unknown time zone {0:?}")]
    UnknownTimeZone(String),

    /// A malformed ISO 8601 string.
    #[error("invalid ISO 8601 {kind} string: {input:?}")]
    Parse {
        /// What was being parsed (`"date"`, `"duration"`, ...).
        kind: &'static str,
        /// The rejected input.
        input: String,
    },

    /// An explicit UTC offset that the time zone never uses at that wall time.
    #[error("offset {offset} is invalid for {date_time} in {time_zone}")]
    OffsetMismatch {
        offset: String,
        date_time: String,
        time_zone: String,
    },

    /// A wall-clock time that occurs twice, resolved with `Disambiguation::Reject`.
    #[error("local time {date_time} is ambiguous in {time_zone}")]
    AmbiguousTime {
        date_time: String,
        time_zone: String,
    },

    /// A wall-clock time skipped by a transition, resolved with `Disambiguation::Reject`.
    #[error("local time {date_time} does not exist in {time_zone}")]
    NonexistentTime {
        date_time: String,
        time_zone: String,
    },

    /// The request needs information that neither the calendar nor the caller supplied.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),
}

impl CalendarError {
    pub(crate) fn parse(kind: &'static str, input: &str) -> Self {
        tracing::trace!(kind, input, "rejected ISO 8601 input");
        CalendarError::Parse {
            kind,
            input: input.to_owned(),
        }
    }
}

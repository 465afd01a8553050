// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar and clock durations.
//!
//! Durations are plain signed field counts. They carry no calendar: "one
//! month" means whatever the calendar of the date it is added to says. A
//! zero field is the same as an absent one.

use std::ops::Neg;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Years, months, weeks and days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DateDuration {
    pub years: i32,
    pub months: i32,
    pub weeks: i32,
    pub days: i32,
}

impl DateDuration {
    pub const ZERO: Self = Self {
        years: 0,
        months: 0,
        weeks: 0,
        days: 0,
    };

    #[inline]
    pub const fn years(years: i32) -> Self {
        Self { years, ..Self::ZERO }
    }

    #[inline]
    pub const fn months(months: i32) -> Self {
        Self { months, ..Self::ZERO }
    }

    #[inline]
    pub const fn weeks(weeks: i32) -> Self {
        Self { weeks, ..Self::ZERO }
    }

    #[inline]
    pub const fn days(days: i32) -> Self {
        Self { days, ..Self::ZERO }
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.weeks == 0 && self.days == 0
    }
}

impl Neg for DateDuration {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            years: -self.years,
            months: -self.months,
            weeks: -self.weeks,
            days: -self.days,
        }
    }
}

/// Hours, minutes, seconds and milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimeDuration {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
}

impl TimeDuration {
    pub const ZERO: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
        milliseconds: 0,
    };

    #[inline]
    pub const fn hours(hours: i64) -> Self {
        Self { hours, ..Self::ZERO }
    }

    #[inline]
    pub const fn minutes(minutes: i64) -> Self {
        Self { minutes, ..Self::ZERO }
    }

    #[inline]
    pub const fn seconds(seconds: i64) -> Self {
        Self { seconds, ..Self::ZERO }
    }

    #[inline]
    pub const fn milliseconds(milliseconds: i64) -> Self {
        Self {
            milliseconds,
            ..Self::ZERO
        }
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0 && self.milliseconds == 0
    }

    /// The whole duration in milliseconds.
    #[inline]
    pub const fn total_milliseconds(&self) -> i64 {
        ((self.hours * 60 + self.minutes) * 60 + self.seconds) * 1_000 + self.milliseconds
    }
}

impl Neg for TimeDuration {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            hours: -self.hours,
            minutes: -self.minutes,
            seconds: -self.seconds,
            milliseconds: -self.milliseconds,
        }
    }
}

/// A date part and a time part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DateTimeDuration {
    pub date: DateDuration,
    pub time: TimeDuration,
}

impl DateTimeDuration {
    #[inline]
    pub const fn new(date: DateDuration, time: TimeDuration) -> Self {
        Self { date, time }
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.date.is_zero() && self.time.is_zero()
    }
}

impl Neg for DateTimeDuration {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            date: -self.date,
            time: -self.time,
        }
    }
}

impl From<DateDuration> for DateTimeDuration {
    fn from(date: DateDuration) -> Self {
        Self {
            date,
            time: TimeDuration::ZERO,
        }
    }
}

impl From<TimeDuration> for DateTimeDuration {
    fn from(time: TimeDuration) -> Self {
        Self {
            date: DateDuration::ZERO,
            time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_flips_every_field() {
        let d = DateTimeDuration::new(
            DateDuration {
                years: 1,
                months: -2,
                weeks: 3,
                days: 4,
            },
            TimeDuration::hours(5),
        );
        let n = -d;
        assert_eq!(n.date.months, 2);
        assert_eq!(n.time.hours, -5);
        assert_eq!(-n, d);
    }

    #[test]
    fn total_milliseconds() {
        let t = TimeDuration {
            hours: 1,
            minutes: 2,
            seconds: 3,
            milliseconds: 4,
        };
        assert_eq!(t.total_milliseconds(), 3_723_004);
        assert_eq!((-t).total_milliseconds(), -3_723_004);
    }

    #[test]
    fn zero_detection() {
        assert!(DateTimeDuration::default().is_zero());
        assert!(!DateTimeDuration::from(DateDuration::days(1)).is_zero());
        assert!(!DateTimeDuration::from(TimeDuration::milliseconds(1)).is_zero());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_missing_fields_default_to_zero() {
        let d: DateDuration = serde_json::from_str(r#"{"months": 2}"#).unwrap();
        assert_eq!(d, DateDuration::months(2));
    }
}

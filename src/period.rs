// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Inclusive date ranges.
//!
//! This module provides:
//! - [`DateRange<T>`]: a closed range over any [`DateValue`]
//! - [`intersect_ranges`] and [`complement_within`] for sorted range lists
//!
//! Range endpoints are ordered on the timeline: plain dates by Julian day,
//! date-times by wall-clock time, and zoned values by absolute instant.
//! Endpoints may be in different calendars.

use crate::date::{AnyCalendarDate, CalendarDate, DateValue};
use qtty::{Day, Days, Seconds};
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A closed range `[start, end]` of dates or date-times.
///
/// # Examples
///
/// ```
/// use kalendae::{CalendarDate, DateRange};
///
/// let june = DateRange::new(CalendarDate::from_ymd(2019, 6, 1), CalendarDate::from_ymd(2019, 6, 30));
/// assert!(june.contains(&CalendarDate::from_ymd(2019, 6, 30)));
/// assert_eq!(june.day_count(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateRange<T: DateValue> {
    pub start: T,
    pub end: T,
}

#[inline]
fn order<T: DateValue>(a: &T, b: &T) -> Ordering {
    a.timeline_milliseconds().cmp(&b.timeline_milliseconds())
}

impl<T: DateValue> DateRange<T> {
    /// Creates a range, swapping the endpoints when `end` precedes `start`.
    pub fn new(start: T, end: T) -> Self {
        if order(&end, &start) == Ordering::Less {
            DateRange { start: end, end: start }
        } else {
            DateRange { start, end }
        }
    }

    /// Whether `value` lies within the range, endpoints included.
    pub fn contains(&self, value: &T) -> bool {
        order(value, &self.start) != Ordering::Less && order(value, &self.end) != Ordering::Greater
    }

    /// Time elapsed from `start` to `end`.
    pub fn duration(&self) -> Days {
        let ms = self.end.timeline_milliseconds() - self.start.timeline_milliseconds();
        Seconds::new(ms as f64 / 1_000.0).to::<Day>()
    }

    /// Number of calendar days the range touches.
    pub fn day_count(&self) -> i64 {
        self.end.to_julian_day() - self.start.to_julian_day() + 1
    }

    /// The overlap of both ranges. Ranges sharing a single endpoint overlap
    /// on that endpoint.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = match order(&self.start, &other.start) {
            Ordering::Less => &other.start,
            _ => &self.start,
        };
        let end = match order(&self.end, &other.end) {
            Ordering::Greater => &other.end,
            _ => &self.end,
        };
        (order(start, end) != Ordering::Greater).then(|| DateRange {
            start: start.clone(),
            end: end.clone(),
        })
    }
}

impl<T: DateValue + fmt::Display> fmt::Display for DateRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start, self.end)
    }
}

/// Overlaps of two sorted, non-overlapping range lists, in order.
///
/// Single O(n+m) merge pass.
pub fn intersect_ranges<T: DateValue>(a: &[DateRange<T>], b: &[DateRange<T>]) -> Vec<DateRange<T>> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if let Some(overlap) = a[i].intersection(&b[j]) {
            result.push(overlap);
        }
        if order(&a[i].end, &b[j].end) != Ordering::Greater {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}

/// Days of `outer` not covered by any of `ranges`.
///
/// `ranges` must be sorted and non-overlapping. Gaps are returned as
/// inclusive date ranges in chronological order, in the calendar of `outer`.
pub fn complement_within(
    outer: &DateRange<CalendarDate>,
    ranges: &[DateRange<CalendarDate>],
) -> Vec<DateRange<CalendarDate>> {
    let calendar = outer.start.calendar().clone();
    let day = |jd: i64| CalendarDate::from_julian_day(calendar.clone(), jd);
    let outer_end = outer.end.to_julian_day();
    let mut gaps = Vec::new();
    let mut cursor = outer.start.to_julian_day();
    for range in ranges {
        let (start, end) = (range.start.to_julian_day(), range.end.to_julian_day());
        if start > cursor {
            gaps.push(DateRange::new(day(cursor), day((start - 1).min(outer_end))));
        }
        cursor = cursor.max(end + 1);
        if cursor > outer_end {
            return gaps;
        }
    }
    gaps.push(DateRange::new(day(cursor), day(outer_end)));
    gaps
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Process-wide calendar instances, looked up by identifier.

use crate::calendar::CalendarRef;
use crate::calendars::{
    BuddhistCalendar, CopticCalendar, EthiopicCalendar, GregorianCalendar, HebrewCalendar,
    IndianCalendar, IslamicCalendar, JapaneseCalendar, PersianCalendar, TaiwanCalendar,
};
use crate::{CalendarError, Result};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Identifiers [`create_calendar`] understands without registration.
pub const BUILTIN_IDENTIFIERS: &[&str] = &[
    "gregory",
    "japanese",
    "buddhist",
    "roc",
    "persian",
    "indian",
    "islamic-civil",
    "islamic-tbla",
    "islamic-umalqura",
    "hebrew",
    "ethiopic",
    "ethioaa",
    "coptic",
];

fn registry() -> &'static RwLock<HashMap<String, CalendarRef>> {
    static REGISTRY: OnceLock<RwLock<HashMap<String, CalendarRef>>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

fn builtin(identifier: &str) -> Option<CalendarRef> {
    let calendar: CalendarRef = match identifier {
        "gregory" => Arc::new(GregorianCalendar),
        "japanese" => Arc::new(JapaneseCalendar),
        "buddhist" => Arc::new(BuddhistCalendar),
        "roc" => Arc::new(TaiwanCalendar),
        "persian" => Arc::new(PersianCalendar),
        "indian" => Arc::new(IndianCalendar),
        "islamic-civil" => Arc::new(IslamicCalendar::civil()),
        "islamic-tbla" => Arc::new(IslamicCalendar::tabular()),
        "islamic-umalqura" => Arc::new(IslamicCalendar::umalqura()),
        "hebrew" => Arc::new(HebrewCalendar),
        "ethiopic" => Arc::new(EthiopicCalendar::amete_mihret()),
        "ethioaa" => Arc::new(EthiopicCalendar::amete_alem()),
        "coptic" => Arc::new(CopticCalendar),
        _ => return None,
    };
    Some(calendar)
}

/// Returns the shared calendar for `identifier`.
///
/// Built-in calendars are created on first use; later calls return the same
/// instance. Calendars added with [`register_calendar`] are found too.
///
/// # Errors
///
/// [`CalendarError::UnknownCalendar`] when the identifier is neither built in
/// nor registered.
pub fn create_calendar(identifier: &str) -> Result<CalendarRef> {
    if let Some(found) = registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(identifier)
    {
        return Ok(Arc::clone(found));
    }

    let calendar =
        builtin(identifier).ok_or_else(|| CalendarError::UnknownCalendar(identifier.to_owned()))?;
    let mut map = registry().write().unwrap_or_else(PoisonError::into_inner);
    let shared = map
        .entry(identifier.to_owned())
        .or_insert_with(|| {
            tracing::debug!(identifier, "created calendar");
            calendar
        });
    Ok(Arc::clone(shared))
}

/// Registers a calendar under its own identifier, replacing any previous
/// instance. Returns the calendar that was replaced.
pub fn register_calendar(calendar: CalendarRef) -> Option<CalendarRef> {
    let identifier = calendar.identifier().to_owned();
    tracing::debug!(identifier = %identifier, "registered calendar");
    registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(identifier, calendar)
}

/// The shared Gregorian calendar.
pub fn gregorian() -> CalendarRef {
    static GREGORIAN: OnceLock<CalendarRef> = OnceLock::new();
    Arc::clone(GREGORIAN.get_or_init(|| Arc::new(GregorianCalendar)))
}

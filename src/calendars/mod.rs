// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Built-in calendar systems.
//!
//! | Type | Identifier(s) |
//! |------|---------------|
//! | [`GregorianCalendar`] | `gregory` |
//! | [`JapaneseCalendar`] | `japanese` |
//! | [`BuddhistCalendar`] | `buddhist` |
//! | [`TaiwanCalendar`] | `roc` |
//! | [`PersianCalendar`] | `persian` |
//! | [`IndianCalendar`] | `indian` |
//! | [`IslamicCalendar`] | `islamic-civil`, `islamic-tbla`, `islamic-umalqura` |
//! | [`HebrewCalendar`] | `hebrew` |
//! | [`EthiopicCalendar`] | `ethiopic`, `ethioaa` |
//! | [`CopticCalendar`] | `coptic` |
//! | [`FiscalCalendar`] | any (e.g. `custom-454`) |

mod buddhist;
mod ethiopic;
mod fiscal;
pub(crate) mod gregorian;
mod hebrew;
mod indian;
mod islamic;
mod japanese;
mod persian;
mod taiwan;

pub use buddhist::BuddhistCalendar;
pub use ethiopic::{CopticCalendar, EthiopicCalendar};
pub use fiscal::{FiscalCalendar, FiscalPeriod};
pub use gregorian::GregorianCalendar;
pub use hebrew::HebrewCalendar;
pub use indian::IndianCalendar;
pub use islamic::IslamicCalendar;
pub use japanese::JapaneseCalendar;
pub use persian::PersianCalendar;
pub use taiwan::TaiwanCalendar;

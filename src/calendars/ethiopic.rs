// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Ethiopic and Coptic calendars.
//!
//! Both have twelve 30-day months followed by a five-day thirteenth month
//! (six days every fourth year). They differ in epoch and era naming.

use crate::calendar::{Calendar, EraDate};

const ETHIOPIC_EPOCH: i64 = 1_723_856;
const COPTIC_EPOCH: i64 = 1_824_665;

/// Years between the Amete Alem and Amete Mihret epochs.
const AMETE_MIHRET_DELTA: i32 = 5500;

const ETHIOPIC_ERAS: &[&str] = &["AA", "AM"];
const AMETE_ALEM_ERAS: &[&str] = &["AA"];
const COPTIC_ERAS: &[&str] = &["BCE", "CE"];

fn ce_to_julian_day(epoch: i64, year: i32, month: i32, day: i32) -> i64 {
    let year = i64::from(year);
    epoch + 365 * year + year.div_euclid(4) + 30 * (i64::from(month) - 1) + i64::from(day) - 1
}

fn julian_day_to_ce(epoch: i64, jd: i64) -> (i32, i32, i32) {
    let cycles = (jd - epoch).div_euclid(1461);
    let remainder = (jd - epoch).rem_euclid(1461);
    let year = 4 * cycles + remainder / 365 - remainder / 1460;
    // The 366th day of the fourth year stays in that year's month 13.
    let day_of_year = if remainder == 1460 { 365 } else { remainder % 365 };
    (
        crate::julian_day::clamp_i32(year),
        (day_of_year / 30 + 1) as i32,
        (day_of_year % 30 + 1) as i32,
    )
}

#[inline]
fn ce_days_in_month(year: i32, month: i32) -> i32 {
    if month == 13 {
        if year.rem_euclid(4) == 3 {
            6
        } else {
            5
        }
    } else {
        30
    }
}

/// The Ethiopic calendar, counted either from the incarnation (Amete
/// Mihret, `"ethiopic"`) or from creation (Amete Alem, `"ethioaa"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthiopicCalendar {
    amete_alem: bool,
}

impl EthiopicCalendar {
    /// `ethiopic`: eras AA and AM; dates before AM 1 fall into AA.
    pub const fn amete_mihret() -> Self {
        Self { amete_alem: false }
    }

    /// `ethioaa`: a single AA era.
    pub const fn amete_alem() -> Self {
        Self { amete_alem: true }
    }

    /// Year counted from the Amete Mihret epoch.
    #[inline]
    fn mihret_year(date: &EraDate) -> i32 {
        if date.era == "AA" {
            date.year - AMETE_MIHRET_DELTA
        } else {
            date.year
        }
    }
}

impl Default for EthiopicCalendar {
    fn default() -> Self {
        Self::amete_mihret()
    }
}

impl Calendar for EthiopicCalendar {
    fn identifier(&self) -> &str {
        if self.amete_alem {
            "ethioaa"
        } else {
            "ethiopic"
        }
    }

    fn from_julian_day(&self, jd: i64) -> EraDate {
        let (year, month, day) = julian_day_to_ce(ETHIOPIC_EPOCH, jd);
        if self.amete_alem || year <= 0 {
            EraDate::new("AA", year + AMETE_MIHRET_DELTA, month, day)
        } else {
            EraDate::new("AM", year, month, day)
        }
    }

    fn to_julian_day(&self, date: &EraDate) -> i64 {
        ce_to_julian_day(ETHIOPIC_EPOCH, Self::mihret_year(date), date.month, date.day)
    }

    fn days_in_month(&self, date: &EraDate) -> i32 {
        ce_days_in_month(Self::mihret_year(date), date.month)
    }

    fn months_in_year(&self, _date: &EraDate) -> i32 {
        13
    }

    fn years_in_era(&self, date: &EraDate) -> i32 {
        if date.era == "AA" {
            9999
        } else {
            9991
        }
    }

    fn eras(&self) -> &'static [&'static str] {
        if self.amete_alem {
            AMETE_ALEM_ERAS
        } else {
            ETHIOPIC_ERAS
        }
    }

    fn days_in_year(&self, date: &EraDate) -> i32 {
        360 + ce_days_in_month(Self::mihret_year(date), 13)
    }

    fn balance_date(&self, date: &mut EraDate) {
        if !self.amete_alem && date.era == "AM" && date.year <= 0 {
            date.era = "AA";
            date.year += AMETE_MIHRET_DELTA;
        }
    }
}

/// The Coptic calendar (`"coptic"`), eras BCE and CE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopticCalendar;

impl CopticCalendar {
    #[inline]
    fn extended_year(date: &EraDate) -> i32 {
        if date.era == "BCE" {
            1 - date.year
        } else {
            date.year
        }
    }
}

impl Calendar for CopticCalendar {
    fn identifier(&self) -> &str {
        "coptic"
    }

    fn from_julian_day(&self, jd: i64) -> EraDate {
        let (year, month, day) = julian_day_to_ce(COPTIC_EPOCH, jd);
        if year <= 0 {
            EraDate::new("BCE", 1 - year, month, day)
        } else {
            EraDate::new("CE", year, month, day)
        }
    }

    fn to_julian_day(&self, date: &EraDate) -> i64 {
        ce_to_julian_day(COPTIC_EPOCH, Self::extended_year(date), date.month, date.day)
    }

    fn days_in_month(&self, date: &EraDate) -> i32 {
        ce_days_in_month(Self::extended_year(date), date.month)
    }

    fn months_in_year(&self, _date: &EraDate) -> i32 {
        13
    }

    fn years_in_era(&self, date: &EraDate) -> i32 {
        if date.era == "BCE" {
            9999
        } else {
            9715
        }
    }

    fn eras(&self) -> &'static [&'static str] {
        COPTIC_ERAS
    }

    fn days_in_year(&self, date: &EraDate) -> i32 {
        360 + ce_days_in_month(Self::extended_year(date), 13)
    }

    fn balance_date(&self, date: &mut EraDate) {
        if date.year <= 0 {
            date.era = if date.era == "BCE" { "CE" } else { "BCE" };
            date.year = 1 - date.year;
        }
    }

    fn is_inverse_era(&self, date: &EraDate) -> bool {
        date.era == "BCE"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::julian_day::date_to_julian_day;

    #[test]
    fn enkutatash_2016() {
        let jd = date_to_julian_day(2023, 9, 12);
        let ethiopic = EthiopicCalendar::amete_mihret();
        assert_eq!(ethiopic.from_julian_day(jd), EraDate::new("AM", 2016, 1, 1));
        assert_eq!(
            ethiopic.from_julian_day(jd - 1),
            EraDate::new("AM", 2015, 13, 6)
        );
        assert_eq!(
            EthiopicCalendar::amete_alem().from_julian_day(jd),
            EraDate::new("AA", 7516, 1, 1)
        );
        assert_eq!(
            CopticCalendar.from_julian_day(jd),
            EraDate::new("CE", 1740, 1, 1)
        );
    }

    #[test]
    fn pagume_length() {
        let cal = EthiopicCalendar::amete_mihret();
        assert_eq!(cal.days_in_month(&EraDate::new("AM", 2015, 13, 1)), 6);
        assert_eq!(cal.days_in_month(&EraDate::new("AM", 2016, 13, 1)), 5);
        assert_eq!(cal.days_in_year(&EraDate::new("AM", 2015, 1, 1)), 366);
        assert_eq!(cal.months_in_year(&EraDate::new("AM", 2015, 1, 1)), 13);
    }

    #[test]
    fn balance_moves_into_amete_alem() {
        let cal = EthiopicCalendar::amete_mihret();
        let mut date = EraDate::new("AM", 0, 3, 1);
        cal.balance_date(&mut date);
        assert_eq!(date, EraDate::new("AA", 5500, 3, 1));
        assert_eq!(
            cal.from_julian_day(cal.to_julian_day(&date)),
            EraDate::new("AA", 5500, 3, 1)
        );
    }

    #[test]
    fn coptic_bce_is_inverse() {
        let cal = CopticCalendar;
        let mut date = EraDate::new("CE", 0, 1, 1);
        cal.balance_date(&mut date);
        assert_eq!(date, EraDate::new("BCE", 1, 1, 1));
        assert!(cal.is_inverse_era(&date));
    }

    #[test]
    fn round_trip() {
        let calendars: [&dyn Calendar; 3] = [
            &EthiopicCalendar::amete_mihret(),
            &EthiopicCalendar::amete_alem(),
            &CopticCalendar,
        ];
        let start = date_to_julian_day(1, 1, 1);
        for cal in calendars {
            for jd in (start..start + 1_000_000).step_by(5) {
                let date = cal.from_julian_day(jd);
                assert_eq!(cal.to_julian_day(&date), jd, "{} {date}", cal.identifier());
            }
        }
    }
}

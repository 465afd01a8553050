// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Islamic (Hijri) calendars.
//!
//! In the tabular arithmetic months alternate between 30 and 29 days and
//! eleven years in every thirty add a day to Dhu al-Hijjah. The variants
//! differ in their epoch:
//!
//! | Identifier | Epoch (Julian day) |
//! |------------|--------------------|
//! | `islamic-civil` | 1 948 440 (Friday, July 16, 622) |
//! | `islamic-tbla` | 1 948 439 (Thursday, July 15, 622) |
//! | `islamic-umalqura` | 1 948 440 |
//!
//! `islamic-umalqura` follows the observed Saudi calendar for 1300–1600 AH
//! (November 1882 to November 2174) and the civil arithmetic outside it.

use crate::calendar::{Calendar, EraDate};

const CIVIL_EPOCH: i64 = 1_948_440;
const ASTRONOMICAL_EPOCH: i64 = 1_948_439;
const ERAS: &[&str] = &["AH"];

const UMALQURA_FIRST_YEAR: i32 = 1300;
const UMALQURA_LAST_YEAR: i32 = 1600;
/// Julian day of 1 Muharram 1300, which is also its civil date.
const UMALQURA_START: i64 = 2_408_762;

/// Month lengths for 1300–1600 AH, one word per year. Bit 11 is Muharram,
/// bit 0 is Dhu al-Hijjah; a set bit marks a 30-day month.
const UMALQURA_MONTHS: [u16; 301] = [
    0xaaa, 0xd54, 0xec9, 0x6d4, 0x6ea, 0x36c, 0xaad, 0x555, 0x6a9, 0x792,
    0xba9, 0x5d4, 0xada, 0x55c, 0xd2d, 0x695, 0x74a, 0xb54, 0xb6a, 0x5ad,
    0x4ae, 0xa4f, 0x517, 0x68b, 0x6a5, 0xad5, 0x2d6, 0x95b, 0x49d, 0xa4d,
    0xd26, 0xd95, 0x5ac, 0x9b6, 0x2ba, 0xa5b, 0x52b, 0xa95, 0x6ca, 0xae9,
    0x2f4, 0x976, 0x2b6, 0x956, 0xaca, 0xba4, 0xbd2, 0x5d9, 0x2dc, 0x96d,
    0x54d, 0xaa5, 0xb52, 0xba5, 0x5b4, 0x9b6, 0x557, 0x297, 0x54b, 0x6a3,
    0x752, 0xb65, 0x56a, 0xaab, 0x52b, 0xc95, 0xd4a, 0xda5, 0x5ca, 0xad6,
    0x957, 0x4ab, 0x94b, 0xaa5, 0xb52, 0xb6a, 0x575, 0x276, 0x8b7, 0x45b,
    0x555, 0x5a9, 0x5b4, 0x9da, 0x4dd, 0x26e, 0x936, 0xaaa, 0xd54, 0xdb2,
    0x5d5, 0x2da, 0x95b, 0x4ab, 0xa55, 0xb49, 0xb64, 0xb71, 0x5b4, 0xab5,
    0xa55, 0xd25, 0xe92, 0xec9, 0x6d4, 0xae9, 0x96b, 0x4ab, 0xa93, 0xd49,
    0xda4, 0xdb2, 0xab9, 0x4ba, 0xa5b, 0x52b, 0xa95, 0xb2a, 0xb55, 0x55c,
    0x4bd, 0x23d, 0x91d, 0xa95, 0xb4a, 0xb5a, 0x56d, 0x2b6, 0x93b, 0x49b,
    0x655, 0x6a9, 0x754, 0xb6a, 0x56c, 0xaad, 0x555, 0xb29, 0xb92, 0xba9,
    0x5d4, 0xada, 0x55a, 0xaab, 0x595, 0x749, 0x764, 0xbaa, 0x5b5, 0x2b6,
    0xa56, 0xe4d, 0xb25, 0xb52, 0xb6a, 0x5ad, 0x2ae, 0x92f, 0x497, 0x64b,
    0x6a5, 0x6ac, 0xad6, 0x55d, 0x49d, 0xa4d, 0xd16, 0xd95, 0x5aa, 0x5b5,
    0x2da, 0x95b, 0x4ad, 0x595, 0x6ca, 0x6e4, 0xaea, 0x4f5, 0x2b6, 0x956,
    0xaaa, 0xb54, 0xbd2, 0x5d9, 0x2ea, 0x96d, 0x4ad, 0xa95, 0xb4a, 0xba5,
    0x5b2, 0x9b5, 0x4d6, 0xa97, 0x547, 0x693, 0x749, 0xb55, 0x56a, 0xa6b,
    0x52b, 0xa8b, 0xd46, 0xda3, 0x5ca, 0xad6, 0x4db, 0x26b, 0x94b, 0xaa5,
    0xb52, 0xb69, 0x575, 0x176, 0x8b7, 0x25b, 0x52b, 0x565, 0x5b4, 0x9da,
    0x4ed, 0x16d, 0x8b6, 0xaa6, 0xd52, 0xda9, 0x5d4, 0xada, 0x95b, 0x4ab,
    0x653, 0x729, 0x762, 0xba9, 0x5b2, 0xab5, 0x555, 0xb25, 0xd92, 0xec9,
    0x6d2, 0xae9, 0x56b, 0x4ab, 0xa55, 0xd29, 0xd54, 0xdaa, 0x9b5, 0x4ba,
    0xa3b, 0x49b, 0xa4d, 0xaaa, 0xad5, 0x2da, 0x95d, 0x45e, 0xa2e, 0xc9a,
    0xd55, 0x6b2, 0x6b9, 0x4ba, 0xa5d, 0x52d, 0xa95, 0xb52, 0xba8, 0xbb4,
    0x5b9, 0x2da, 0x95a, 0xb4a, 0xda4, 0xed1, 0x6e8, 0xb6a, 0x56d, 0x535,
    0x695, 0xd4a, 0xda8, 0xdd4, 0x6da, 0x55b, 0x29d, 0x62b, 0xb15, 0xb4a,
    0xb95, 0x5aa, 0xaae, 0x92e, 0xc8f, 0x527, 0x695, 0x6aa, 0xad6, 0x55d,
    0x29d,
];

const UMALQURA_YEAR_STARTS: [i64; 302] = {
    let mut starts = [0i64; 302];
    starts[0] = UMALQURA_START;
    let mut i = 0;
    while i < UMALQURA_MONTHS.len() {
        starts[i + 1] = starts[i] + 348 + UMALQURA_MONTHS[i].count_ones() as i64;
        i += 1;
    }
    starts
};

/// Index into the Umm al-Qura tables, if the year is covered.
#[inline]
fn umalqura_index(year: i32) -> Option<usize> {
    (UMALQURA_FIRST_YEAR..=UMALQURA_LAST_YEAR)
        .contains(&year)
        .then(|| (year - UMALQURA_FIRST_YEAR) as usize)
}

#[inline]
fn umalqura_month_length(index: usize, month: i32) -> i32 {
    let month = month.clamp(1, 12);
    29 + i32::from((UMALQURA_MONTHS[index] >> (12 - month)) & 1)
}

fn umalqura_to_julian_day(index: usize, month: i32, day: i32) -> i64 {
    let before: i64 = (1..month.clamp(1, 13))
        .map(|m| i64::from(umalqura_month_length(index, m)))
        .sum();
    UMALQURA_YEAR_STARTS[index] + before + i64::from(day) - 1
}

fn julian_day_to_umalqura(jd: i64) -> Option<(i32, i32, i32)> {
    let end = UMALQURA_YEAR_STARTS[UMALQURA_YEAR_STARTS.len() - 1];
    if !(UMALQURA_START..end).contains(&jd) {
        return None;
    }
    let index = UMALQURA_YEAR_STARTS.partition_point(|&start| start <= jd) - 1;
    let mut remaining = jd - UMALQURA_YEAR_STARTS[index];
    let mut month = 1;
    loop {
        let length = i64::from(umalqura_month_length(index, month));
        if remaining < length || month == 12 {
            break;
        }
        remaining -= length;
        month += 1;
    }
    Some((
        UMALQURA_FIRST_YEAR + index as i32,
        month,
        remaining as i32 + 1,
    ))
}

#[inline]
fn is_leap_year(year: i32) -> bool {
    (14 + 11 * i64::from(year)).rem_euclid(30) < 11
}

/// `ceil(29.5 * months)` for a non-negative month count.
#[inline]
fn month_offset(months: i64) -> i64 {
    (59 * months + 1).div_euclid(2)
}

fn islamic_to_julian_day(epoch: i64, year: i64, month: i64, day: i64) -> i64 {
    day + month_offset(month - 1) + (year - 1) * 354 + (3 + 11 * year).div_euclid(30) + epoch - 1
}

fn julian_day_to_islamic(epoch: i64, jd: i64) -> (i64, i64, i64) {
    let year = (30 * (jd - epoch) + 10_646).div_euclid(10_631);
    let since_first_month = jd - (29 + islamic_to_julian_day(epoch, year, 1, 1));
    // ceil(since_first_month / 29.5)
    let month = (-(-2 * since_first_month).div_euclid(59) + 1).min(12);
    let day = jd - islamic_to_julian_day(epoch, year, month, 1) + 1;
    (year, month, day)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Civil,
    Tabular,
    UmmAlQura,
}

/// A tabular Islamic calendar. Construct with [`civil`](Self::civil),
/// [`tabular`](Self::tabular) or [`umalqura`](Self::umalqura).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IslamicCalendar {
    variant: Variant,
}

impl IslamicCalendar {
    /// `islamic-civil`: Friday epoch.
    pub const fn civil() -> Self {
        Self {
            variant: Variant::Civil,
        }
    }

    /// `islamic-tbla`: Thursday (astronomical) epoch.
    pub const fn tabular() -> Self {
        Self {
            variant: Variant::Tabular,
        }
    }

    /// `islamic-umalqura`: tabulated months for 1300–1600 AH, civil elsewhere.
    pub const fn umalqura() -> Self {
        Self {
            variant: Variant::UmmAlQura,
        }
    }

    #[inline]
    fn epoch(&self) -> i64 {
        match self.variant {
            Variant::Tabular => ASTRONOMICAL_EPOCH,
            Variant::Civil | Variant::UmmAlQura => CIVIL_EPOCH,
        }
    }

    fn table_index(&self, year: i32) -> Option<usize> {
        match self.variant {
            Variant::UmmAlQura => umalqura_index(year),
            Variant::Civil | Variant::Tabular => None,
        }
    }
}

impl Default for IslamicCalendar {
    fn default() -> Self {
        Self::civil()
    }
}

impl Calendar for IslamicCalendar {
    fn identifier(&self) -> &str {
        match self.variant {
            Variant::Civil => "islamic-civil",
            Variant::Tabular => "islamic-tbla",
            Variant::UmmAlQura => "islamic-umalqura",
        }
    }

    fn from_julian_day(&self, jd: i64) -> EraDate {
        if self.variant == Variant::UmmAlQura {
            if let Some((year, month, day)) = julian_day_to_umalqura(jd) {
                return EraDate::new("AH", year, month, day);
            }
        }
        let (year, month, day) = julian_day_to_islamic(self.epoch(), jd);
        EraDate::new(
            "AH",
            crate::julian_day::clamp_i32(year),
            month as i32,
            day as i32,
        )
    }

    fn to_julian_day(&self, date: &EraDate) -> i64 {
        if let Some(index) = self.table_index(date.year) {
            return umalqura_to_julian_day(index, date.month, date.day);
        }
        islamic_to_julian_day(
            self.epoch(),
            i64::from(date.year),
            i64::from(date.month),
            i64::from(date.day),
        )
    }

    fn days_in_month(&self, date: &EraDate) -> i32 {
        if let Some(index) = self.table_index(date.year) {
            return umalqura_month_length(index, date.month);
        }
        let mut length = 29 + date.month.rem_euclid(2);
        if date.month == 12 && is_leap_year(date.year) {
            length += 1;
        }
        length
    }

    fn months_in_year(&self, _date: &EraDate) -> i32 {
        12
    }

    fn years_in_era(&self, _date: &EraDate) -> i32 {
        9665
    }

    fn eras(&self) -> &'static [&'static str] {
        ERAS
    }

    fn days_in_year(&self, date: &EraDate) -> i32 {
        if let Some(index) = self.table_index(date.year) {
            return 348 + UMALQURA_MONTHS[index].count_ones() as i32;
        }
        if is_leap_year(date.year) {
            355
        } else {
            354
        }
    }
}

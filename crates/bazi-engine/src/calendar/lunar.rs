//! Chinese lunisolar dates for 1900–2100 from a packed year table.
//!
//! Each entry encodes one lunar year:
//! - bits 0–3: leap month number (0 when the year has none)
//! - bits 4–15: month lengths for months 1..12, month 1 at bit 15 (1 = 30 days)
//! - bit 16: length of the leap month (1 = 30 days)

use crate::symbols::{Branch, Sexagenary};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const FIRST_YEAR: i32 = 1900;
const LAST_YEAR: i32 = 2100;

#[rustfmt::skip]
const LUNAR_YEAR_INFO: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520,                                                                                   // 2100
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(rename = "isLeapMonth")]
    pub is_leap_month: bool,
    /// Sexagenary label of the lunar year (turns at the lunar new year).
    #[serde(rename = "yearLabel")]
    pub year_label: String,
    pub zodiac: String,
}

fn year_info(year: i32) -> u32 {
    LUNAR_YEAR_INFO[(year - FIRST_YEAR) as usize]
}

fn leap_month(year: i32) -> u32 {
    year_info(year) & 0xf
}

fn leap_month_days(year: i32) -> i64 {
    if leap_month(year) == 0 {
        0
    } else if year_info(year) & 0x10000 != 0 {
        30
    } else {
        29
    }
}

fn month_days(year: i32, month: u32) -> i64 {
    if year_info(year) & (0x10000 >> month) != 0 {
        30
    } else {
        29
    }
}

fn year_days(year: i32) -> i64 {
    let regular: i64 = (1..=12).map(|month| month_days(year, month)).sum();
    regular + leap_month_days(year)
}

fn epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1900, 1, 31)
}

impl LunarDate {
    /// Lunar date for a Gregorian date, or `None` outside 1900-01-31..=2100-12-31.
    pub fn from_solar(date: NaiveDate) -> Option<LunarDate> {
        if date.year() > LAST_YEAR {
            return None;
        }
        let mut offset = (date - epoch()?).num_days();
        if offset < 0 {
            return None;
        }

        let mut year = FIRST_YEAR;
        while year <= LAST_YEAR && offset >= year_days(year) {
            offset -= year_days(year);
            year += 1;
        }
        if year > LAST_YEAR {
            return None;
        }

        let leap = leap_month(year);
        let mut month = 1;
        let mut is_leap_month = false;
        loop {
            let length = if is_leap_month {
                leap_month_days(year)
            } else {
                month_days(year, month)
            };
            if offset < length {
                break;
            }
            offset -= length;
            if !is_leap_month && month == leap {
                is_leap_month = true;
            } else {
                is_leap_month = false;
                month += 1;
            }
            if month > 12 {
                return None;
            }
        }

        let year_term = Sexagenary::from_index(year as i64 - 4);
        Some(LunarDate {
            year,
            month,
            day: offset as u32 + 1,
            is_leap_month,
            year_label: year_term.label(),
            zodiac: Branch::from_index(year as i64 - 4).animal().to_string(),
        })
    }
}

//! Apparent solar longitude and the 24 solar terms.
//!
//! Uses the low-precision solar theory (mean longitude plus equation of
//! centre, corrected for nutation and aberration). Accuracy is about 0.01°,
//! which places solar-term instants within a few minutes of the published
//! tables for 1900–2100.

use crate::error::{BaziError, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const J2000: f64 = 2_451_545.0;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;
const TROPICAL_YEAR_DAYS: f64 = 365.2422;
const MAX_ITERATIONS: usize = 30;
const CONVERGENCE_DEGREES: f64 = 1e-7;

/// Solar terms in calendar order, starting with the beginning of spring.
/// Even positions are the "jie" terms that open a sexagenary month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SolarTerm {
    Lichun,
    Yushui,
    Jingzhe,
    Chunfen,
    Qingming,
    Guyu,
    Lixia,
    Xiaoman,
    Mangzhong,
    Xiazhi,
    Xiaoshu,
    Dashu,
    Liqiu,
    Chushu,
    Bailu,
    Qiufen,
    Hanlu,
    Shuangjiang,
    Lidong,
    Xiaoxue,
    Daxue,
    Dongzhi,
    Xiaohan,
    Dahan,
}

pub const SOLAR_TERMS: [SolarTerm; 24] = [
    SolarTerm::Lichun,
    SolarTerm::Yushui,
    SolarTerm::Jingzhe,
    SolarTerm::Chunfen,
    SolarTerm::Qingming,
    SolarTerm::Guyu,
    SolarTerm::Lixia,
    SolarTerm::Xiaoman,
    SolarTerm::Mangzhong,
    SolarTerm::Xiazhi,
    SolarTerm::Xiaoshu,
    SolarTerm::Dashu,
    SolarTerm::Liqiu,
    SolarTerm::Chushu,
    SolarTerm::Bailu,
    SolarTerm::Qiufen,
    SolarTerm::Hanlu,
    SolarTerm::Shuangjiang,
    SolarTerm::Lidong,
    SolarTerm::Xiaoxue,
    SolarTerm::Daxue,
    SolarTerm::Dongzhi,
    SolarTerm::Xiaohan,
    SolarTerm::Dahan,
];

const TERM_NAMES: [(&str, &str); 24] = [
    ("立春", "Start of Spring"),
    ("雨水", "Rain Water"),
    ("惊蛰", "Awakening of Insects"),
    ("春分", "Spring Equinox"),
    ("清明", "Pure Brightness"),
    ("谷雨", "Grain Rain"),
    ("立夏", "Start of Summer"),
    ("小满", "Grain Buds"),
    ("芒种", "Grain in Ear"),
    ("夏至", "Summer Solstice"),
    ("小暑", "Minor Heat"),
    ("大暑", "Major Heat"),
    ("立秋", "Start of Autumn"),
    ("处暑", "End of Heat"),
    ("白露", "White Dew"),
    ("秋分", "Autumn Equinox"),
    ("寒露", "Cold Dew"),
    ("霜降", "Frost's Descent"),
    ("立冬", "Start of Winter"),
    ("小雪", "Minor Snow"),
    ("大雪", "Major Snow"),
    ("冬至", "Winter Solstice"),
    ("小寒", "Minor Cold"),
    ("大寒", "Major Cold"),
];

/// Longitude of the beginning of spring, where the sexagenary year turns.
pub const LICHUN_LONGITUDE: f64 = 315.0;

impl SolarTerm {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn symbol(self) -> &'static str {
        TERM_NAMES[self.index()].0
    }

    pub fn english_name(self) -> &'static str {
        TERM_NAMES[self.index()].1
    }

    /// Ecliptic longitude the sun reaches when the term begins.
    pub fn longitude(self) -> f64 {
        normalize_degrees(LICHUN_LONGITUDE + 15.0 * self.index() as f64)
    }

    pub fn is_jie(self) -> bool {
        self.index() % 2 == 0
    }

    /// Term in force while the sun is at `longitude`.
    pub fn containing(longitude: f64) -> SolarTerm {
        let offset = normalize_degrees(longitude - LICHUN_LONGITUDE);
        SOLAR_TERMS[((offset / 15.0) as usize).min(23)]
    }

    /// The "jie" term that opened the month containing `longitude`.
    pub fn governing_jie(longitude: f64) -> SolarTerm {
        let term = SolarTerm::containing(longitude);
        SOLAR_TERMS[term.index() - term.index() % 2]
    }
}

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Julian day (UT) of an instant.
pub fn julian_day(instant: DateTime<Utc>) -> f64 {
    let seconds = instant.timestamp() as f64 + instant.timestamp_subsec_nanos() as f64 * 1e-9;
    seconds / SECONDS_PER_DAY + UNIX_EPOCH_JD
}

/// Instant for a Julian day (UT), rounded to the nearest second.
pub fn datetime_from_julian_day(jd: f64) -> Result<DateTime<Utc>> {
    let seconds = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY).round();
    if !seconds.is_finite() {
        return Err(BaziError::invalid(format!("julian day {} is not finite", jd)));
    }
    Utc.timestamp_opt(seconds as i64, 0)
        .single()
        .ok_or_else(|| BaziError::invalid(format!("julian day {} is out of range", jd)))
}

/// TT − UT in seconds (Espenak–Meeus polynomial fit).
pub fn delta_t_seconds(year: f64) -> f64 {
    let y = year;
    if y < -500.0 {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    } else if y < 500.0 {
        let u = y / 100.0;
        10583.6 - 1014.41 * u + 33.78311 * u.powi(2) - 5.952053 * u.powi(3) - 0.1798452 * u.powi(4)
            + 0.022174192 * u.powi(5)
            + 0.0090316521 * u.powi(6)
    } else if y < 1600.0 {
        let u = (y - 1000.0) / 100.0;
        1574.2 - 556.01 * u + 71.23472 * u.powi(2) + 0.319781 * u.powi(3) - 0.8503463 * u.powi(4)
            - 0.005050998 * u.powi(5)
            + 0.0083572073 * u.powi(6)
    } else if y < 1700.0 {
        let t = y - 1600.0;
        120.0 - 0.9808 * t - 0.01532 * t.powi(2) + t.powi(3) / 7129.0
    } else if y < 1800.0 {
        let t = y - 1700.0;
        8.83 + 0.1603 * t - 0.0059285 * t.powi(2) + 0.00013336 * t.powi(3) - t.powi(4) / 1_174_000.0
    } else if y < 1860.0 {
        let t = y - 1800.0;
        13.72 - 0.332447 * t + 0.0068612 * t.powi(2) + 0.0041116 * t.powi(3) - 0.00037436 * t.powi(4)
            + 0.0000121272 * t.powi(5)
            - 0.0000001699 * t.powi(6)
            + 0.000000000875 * t.powi(7)
    } else if y < 1900.0 {
        let t = y - 1860.0;
        7.62 + 0.5737 * t - 0.251754 * t.powi(2) + 0.01680668 * t.powi(3)
            - 0.0004473624 * t.powi(4)
            + t.powi(5) / 233_174.0
    } else if y < 1920.0 {
        let t = y - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3) - 0.000197 * t.powi(4)
    } else if y < 1941.0 {
        let t = y - 1920.0;
        21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
    } else if y < 1961.0 {
        let t = y - 1950.0;
        29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
    } else if y < 1986.0 {
        let t = y - 1975.0;
        45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
    } else if y < 2005.0 {
        let t = y - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t.powi(2)
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if y < 2050.0 {
        let t = y - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t.powi(2)
    } else if y < 2150.0 {
        -20.0 + 32.0 * ((y - 1820.0) / 100.0).powi(2) - 0.5628 * (2150.0 - y)
    } else {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    }
}

fn decimal_year(jd: f64) -> f64 {
    2000.0 + (jd - J2000) / 365.25
}

/// Apparent geocentric ecliptic longitude of the sun for a Julian day (UT).
pub fn apparent_solar_longitude_jd(jd_ut: f64) -> f64 {
    let jde = jd_ut + delta_t_seconds(decimal_year(jd_ut)) / SECONDS_PER_DAY;
    let t = (jde - J2000) / DAYS_PER_CENTURY;

    let mean_longitude = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let mean_anomaly = (357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t).to_radians();
    let centre = (1.914602 - 0.004817 * t - 0.000014 * t * t) * mean_anomaly.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * mean_anomaly).sin()
        + 0.000289 * (3.0 * mean_anomaly).sin();
    let true_longitude = mean_longitude + centre;

    // Nutation in longitude and aberration.
    let omega = (125.04 - 1934.136 * t).to_radians();
    normalize_degrees(true_longitude - 0.00569 - 0.00478 * omega.sin())
}

pub fn apparent_solar_longitude(instant: DateTime<Utc>) -> f64 {
    apparent_solar_longitude_jd(julian_day(instant))
}

/// Newton iteration for the Julian day at which the sun reaches `target`,
/// starting from `guess_jd`. Converges to the crossing nearest the guess.
fn solve_longitude(target: f64, guess_jd: f64) -> Result<f64> {
    let mut jd = guess_jd;
    for _ in 0..MAX_ITERATIONS {
        let longitude = apparent_solar_longitude_jd(jd);
        let diff = normalize_degrees(target - longitude + 180.0) - 180.0;
        jd += diff * TROPICAL_YEAR_DAYS / 360.0;
        if diff.abs() < CONVERGENCE_DEGREES {
            return Ok(jd);
        }
    }
    Err(BaziError::inconsistent(format!(
        "solar longitude {} did not converge near JD {}",
        target, guess_jd
    )))
}

/// UTC instant at which `term` begins within Gregorian `year`.
pub fn solar_term_instant(year: i32, term: SolarTerm) -> Result<DateTime<Utc>> {
    let jan_first = Utc
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| BaziError::invalid(format!("year {} is out of range", year)))?;
    // The sun sits near 280° on 1 January.
    let guess = julian_day(jan_first)
        + normalize_degrees(term.longitude() - 280.0) * TROPICAL_YEAR_DAYS / 360.0;
    datetime_from_julian_day(solve_longitude(term.longitude(), guess)?)
}

/// Start of the "jie" month in force at `instant`.
pub fn previous_jie(instant: DateTime<Utc>) -> Result<(SolarTerm, DateTime<Utc>)> {
    let jd = julian_day(instant);
    let longitude = apparent_solar_longitude_jd(jd);
    let term = SolarTerm::governing_jie(longitude);
    let behind = normalize_degrees(longitude - term.longitude());
    let solved = solve_longitude(term.longitude(), jd - behind * TROPICAL_YEAR_DAYS / 360.0)?;
    Ok((term, datetime_from_julian_day(solved)?))
}

/// Start of the next "jie" month after `instant`.
pub fn next_jie(instant: DateTime<Utc>) -> Result<(SolarTerm, DateTime<Utc>)> {
    let jd = julian_day(instant);
    let longitude = apparent_solar_longitude_jd(jd);
    let current = SolarTerm::governing_jie(longitude);
    let term = SOLAR_TERMS[(current.index() + 2) % SOLAR_TERMS.len()];
    let ahead = normalize_degrees(term.longitude() - longitude);
    let solved = solve_longitude(term.longitude(), jd + ahead * TROPICAL_YEAR_DAYS / 360.0)?;
    Ok((term, datetime_from_julian_day(solved)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDateTime};

    fn assert_within_minutes(actual: DateTime<Utc>, expected_cst: &str, minutes: i64) {
        let cst = FixedOffset::east_opt(8 * 3600).unwrap();
        let naive = NaiveDateTime::parse_from_str(expected_cst, "%Y-%m-%d %H:%M").unwrap();
        let expected = cst.from_local_datetime(&naive).unwrap().with_timezone(&Utc);
        let delta = (actual - expected).num_minutes().abs();
        assert!(delta <= minutes, "{} vs {} differs by {} min", actual, expected, delta);
    }

    #[test]
    fn test_term_longitudes() {
        assert_eq!(SolarTerm::Lichun.longitude(), 315.0);
        assert_eq!(SolarTerm::Chunfen.longitude(), 0.0);
        assert_eq!(SolarTerm::Dongzhi.longitude(), 270.0);
        assert!(SolarTerm::Jingzhe.is_jie());
        assert!(!SolarTerm::Chunfen.is_jie());
    }

    #[test]
    fn test_governing_jie() {
        assert_eq!(SolarTerm::governing_jie(354.0), SolarTerm::Jingzhe);
        assert_eq!(SolarTerm::governing_jie(3.0), SolarTerm::Jingzhe);
        assert_eq!(SolarTerm::governing_jie(315.0), SolarTerm::Lichun);
        assert_eq!(SolarTerm::governing_jie(314.9), SolarTerm::Xiaohan);
    }

    #[test]
    fn test_julian_day_epoch() {
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((julian_day(j2000) - J2000).abs() < 1e-9);
        assert_eq!(datetime_from_julian_day(J2000).unwrap(), j2000);
    }

    #[test]
    fn test_lichun_instants() {
        assert_within_minutes(solar_term_instant(1990, SolarTerm::Lichun).unwrap(), "1990-02-04 10:14", 15);
        assert_within_minutes(solar_term_instant(2000, SolarTerm::Lichun).unwrap(), "2000-02-04 20:40", 15);
        assert_within_minutes(solar_term_instant(2024, SolarTerm::Lichun).unwrap(), "2024-02-04 16:27", 15);
    }

    #[test]
    fn test_equinox_and_solstice() {
        assert_within_minutes(solar_term_instant(2024, SolarTerm::Chunfen).unwrap(), "2024-03-20 11:06", 15);
        assert_within_minutes(solar_term_instant(2023, SolarTerm::Dongzhi).unwrap(), "2023-12-22 11:27", 15);
    }

    #[test]
    fn test_delta_t_segments_stay_continuous() {
        assert!((delta_t_seconds(1700.0) - 8.83).abs() < 1e-9);
        assert!((delta_t_seconds(1800.0) - 13.72).abs() < 1e-9);
        assert!((delta_t_seconds(1600.0) - 120.0).abs() < 1e-9);
        assert!((delta_t_seconds(1859.999) - delta_t_seconds(1860.0)).abs() < 0.1);
        assert!((delta_t_seconds(1799.999) - delta_t_seconds(1800.0)).abs() < 0.1);
        for year in [1000.0, 1500.0, 1650.0, 1750.0, 1830.0] {
            let seconds = delta_t_seconds(year);
            assert!((0.0..2000.0).contains(&seconds), "{} -> {}", year, seconds);
        }
    }

    #[test]
    fn test_lichun_before_1860() {
        // The beginning of spring fell on 4 February (Beijing time) in 1700 and 1800.
        assert_within_minutes(solar_term_instant(1700, SolarTerm::Lichun).unwrap(), "1700-02-04 01:05", 60);
        assert_within_minutes(solar_term_instant(1800, SolarTerm::Lichun).unwrap(), "1800-02-04 07:36", 60);
    }

    #[test]
    fn test_jie_neighbours() {
        let instant = Utc.with_ymd_and_hms(1990, 3, 15, 2, 0, 0).unwrap();
        let (prev, at) = previous_jie(instant).unwrap();
        assert_eq!(prev, SolarTerm::Jingzhe);
        assert!(at < instant);
        let (next, at) = next_jie(instant).unwrap();
        assert_eq!(next, SolarTerm::Qingming);
        assert!(at > instant);
        assert_eq!(at.format("%m-%d").to_string(), "04-05");
    }
}

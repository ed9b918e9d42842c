//! Birth instant → four pillars.
//!
//! Year, month and day pillars follow the absolute instant (evaluated in
//! UTC), so one instant always yields one day pillar whatever zone it was
//! written in. The hour pillar follows the local wall clock.

use crate::analysis::elements::{aggregate_elements, ElementWeights};
use crate::calendar::lunar::LunarDate;
use crate::calendar::solar::{apparent_solar_longitude, normalize_degrees, SolarTerm, LICHUN_LONGITUDE};
use crate::calendar::types::{ChartMetadata, FourPillarChart, Pillar};
use crate::error::{BaziError, Result};
use crate::symbols::{Branch, Sexagenary, Stem};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

const ACCEPTED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Julian day number of 0001-01-01 minus one (chrono counts that day as 1).
const JDN_CE_OFFSET: i64 = 1_721_425;
/// Offset that puts 2000-01-01 (戊午, term 54) at the right place in the cycle.
const DAY_CYCLE_OFFSET: i64 = 49;
/// 1984 opened a sexagenary cycle (甲子).
const YEAR_CYCLE_OFFSET: i64 = 4;

/// Parse a zone-less birth date-time.
pub fn parse_birth_local(birth_local: &str) -> Result<NaiveDateTime> {
    let trimmed = birth_local.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| {
            BaziError::invalid(format!(
                "'{}' is not a date-time (expected YYYY-MM-DDTHH:MM[:SS])",
                birth_local
            ))
        })
}

pub fn resolve_timezone(timezone: &str) -> Result<Tz> {
    timezone
        .trim()
        .parse::<Tz>()
        .map_err(|_| BaziError::invalid(format!("'{}' is not a recognised IANA timezone", timezone)))
}

/// Attach `tz` to a wall-clock time. Times skipped by a DST transition are
/// rejected; repeated times resolve to the earlier instant.
pub fn localize(local: NaiveDateTime, tz: Tz) -> Result<DateTime<Tz>> {
    tz.from_local_datetime(&local).earliest().ok_or_else(|| {
        BaziError::invalid(format!("{} does not exist in timezone {}", local, tz.name()))
    })
}

/// Sexagenary day for a calendar date.
pub fn day_term(date: NaiveDate) -> Sexagenary {
    let jdn = date.num_days_from_ce() as i64 + JDN_CE_OFFSET;
    Sexagenary::from_index(jdn + DAY_CYCLE_OFFSET)
}

/// Sexagenary month ordinal (0 = 寅 month opened by 立春) for a solar longitude.
pub fn month_ordinal(solar_longitude: f64) -> u32 {
    (normalize_degrees(solar_longitude - LICHUN_LONGITUDE) / 30.0) as u32 % 12
}

/// Year and month terms at a UTC instant. The year turns at 立春, months at
/// each "jie" term.
pub fn year_and_month_terms(instant: DateTime<Utc>) -> Result<(Sexagenary, Sexagenary)> {
    let ordinal = month_ordinal(apparent_solar_longitude(instant));

    // January and February dates still in the 子 or 丑 month precede 立春.
    let mut year = instant.year() as i64;
    if instant.month() <= 2 && ordinal >= 10 {
        year -= 1;
    }
    let year_term = Sexagenary::from_index(year - YEAR_CYCLE_OFFSET);

    // The 寅 month stem follows from the year stem (甲/己 years open with 丙寅).
    let first_month_stem = (year_term.stem().index() % 5) * 2 + 2;
    let stem = Stem::from_index((first_month_stem + ordinal as usize) as i64);
    let branch = Branch::from_index(ordinal as i64 + 2);
    let month_term = Sexagenary::from_parts(stem, branch)
        .map_err(|e| BaziError::inconsistent(format!("month pillar: {}", e)))?;

    Ok((year_term, month_term))
}

/// Hour pillar for a local hour; the stem cycle restarts from the day stem.
///
/// `compute_chart` passes the day stem of the UTC date, so when the local
/// date differs from the UTC date the stem comes from the neighbouring day.
pub fn hour_pillar(day_stem: Stem, local_hour: u32) -> Pillar {
    let branch = Branch::for_hour(local_hour);
    let stem = Stem::from_index((day_stem.index() * 2 + branch.index()) as i64);
    Pillar {
        stem,
        branch,
        combined: format!("{}{}", stem.symbol(), branch.symbol()),
    }
}

/// Build the four-pillar chart for a birth wall-clock time in an IANA zone.
pub fn compute_chart(
    birth_local: &str,
    timezone: &str,
    weights: Option<&ElementWeights>,
) -> Result<FourPillarChart> {
    let weights = weights.copied().unwrap_or_default();
    weights.validate()?;

    let local = parse_birth_local(birth_local)?;
    let tz = resolve_timezone(timezone)?;
    let zoned = localize(local, tz)?;
    let instant = zoned.with_timezone(&Utc);

    let (year_term, month_term) = year_and_month_terms(instant)?;
    let day = Pillar::from(day_term(instant.date_naive()));
    let hour = hour_pillar(day.stem, zoned.hour());
    let year = Pillar::from(year_term);
    let month = Pillar::from(month_term);

    let pillars = [year, month, day, hour];
    let elements = aggregate_elements(&pillars, &weights);
    let [year, month, day, hour] = pillars;

    let metadata = ChartMetadata {
        local_date_time: local,
        timezone: tz.name().to_string(),
        utc_instant: instant,
        lunar_date: LunarDate::from_solar(instant.date_naive()),
        solar_term: SolarTerm::governing_jie(apparent_solar_longitude(instant)),
        weights,
    };

    log::debug!(
        "chart for {} {}: {} {} {} {}",
        local,
        tz.name(),
        year.combined,
        month.combined,
        day.combined,
        hour.combined
    );

    Ok(FourPillarChart {
        year,
        month,
        day,
        hour,
        elements,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert!(parse_birth_local("1990-03-15T10:00:00").is_ok());
        assert!(parse_birth_local("1990-03-15T10:00").is_ok());
        assert!(parse_birth_local("1990-03-15 10:00:00.250").is_ok());
        assert!(matches!(parse_birth_local("15/03/1990 10:00"), Err(BaziError::InvalidInput(_))));
        assert!(parse_birth_local("1990-02-30T10:00:00").is_err());
    }

    #[test]
    fn test_day_term_reference_dates() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(day_term(date(2000, 1, 1)).label(), "戊午");
        assert_eq!(day_term(date(1990, 3, 15)).label(), "己卯");
        assert_eq!(day_term(date(2000, 1, 2)).label(), "己未");
    }

    #[test]
    fn test_year_turns_at_lichun() {
        let before = Utc.with_ymd_and_hms(2024, 2, 3, 12, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 2, 5, 12, 0, 0).unwrap();
        let (year_before, month_before) = year_and_month_terms(before).unwrap();
        let (year_after, month_after) = year_and_month_terms(after).unwrap();
        assert_eq!(year_before.label(), "癸卯");
        assert_eq!(month_before.label(), "乙丑");
        assert_eq!(year_after.label(), "甲辰");
        assert_eq!(month_after.label(), "丙寅");
    }

    #[test]
    fn test_hour_pillar_stem_cycle() {
        assert_eq!(hour_pillar(Stem::Jia, 0).combined, "甲子");
        assert_eq!(hour_pillar(Stem::Ji, 23).combined, "甲子");
        assert_eq!(hour_pillar(Stem::Yi, 0).combined, "丙子");
        assert_eq!(hour_pillar(Stem::Ji, 10).combined, "己巳");
    }

    #[test]
    fn test_unknown_timezone() {
        let err = compute_chart("1990-03-15T10:00:00", "Mars/Olympus_Mons", None).unwrap_err();
        assert!(matches!(err, BaziError::InvalidInput(_)));
    }

    #[test]
    fn test_dst_gap_rejected() {
        // Clocks in New York jumped from 02:00 to 03:00 on 2021-03-14.
        let err = compute_chart("2021-03-14T02:30:00", "America/New_York", None).unwrap_err();
        assert!(matches!(err, BaziError::InvalidInput(_)));
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let weights = ElementWeights {
            hidden_stem_weight: f64::NAN,
            ..ElementWeights::default()
        };
        assert!(compute_chart("1990-03-15T10:00:00", "UTC", Some(&weights)).is_err());
    }
}

//! Decade luck cycles stepping away from the month pillar.
//!
//! Each cycle moves the month pillar one place along the sexagenary cycle
//! (stem and branch together), forwards or backwards.

use crate::analysis::ten_gods::{classify, TenGod};
use crate::calendar::solar::{next_jie, previous_jie};
use crate::calendar::types::FourPillarChart;
use crate::error::{BaziError, Result};
use crate::symbols::{Branch, Element, Polarity, Stem};
use serde::{Deserialize, Serialize};

pub const LUCK_CYCLE_COUNT: usize = 8;
pub const CYCLE_YEARS: u32 = 10;
pub const DEFAULT_START_AGE: u32 = 8;
pub const MAX_START_AGE: u32 = 100;

/// Three days between birth and the bounding solar term count as one year.
const DAYS_PER_START_YEAR: f64 = 3.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LuckDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl LuckDirection {
    fn step(self) -> i64 {
        match self {
            LuckDirection::Forward => 1,
            LuckDirection::Backward => -1,
        }
    }

    /// Yang years run forward for men, yin years forward for women.
    pub fn for_subject(year_stem: Stem, sex: Sex) -> LuckDirection {
        match (year_stem.polarity(), sex) {
            (Polarity::Yang, Sex::Male) | (Polarity::Yin, Sex::Female) => LuckDirection::Forward,
            _ => LuckDirection::Backward,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LuckCycleConfig {
    pub direction: LuckDirection,
    #[serde(rename = "startAge", alias = "start_age")]
    pub start_age: u32,
}

impl Default for LuckCycleConfig {
    fn default() -> Self {
        Self {
            direction: LuckDirection::Forward,
            start_age: DEFAULT_START_AGE,
        }
    }
}

impl LuckCycleConfig {
    /// Direction from the year stem and sex, start age from the distance to
    /// the bounding "jie" term.
    pub fn traditional(chart: &FourPillarChart, sex: Sex) -> Result<Self> {
        let direction = LuckDirection::for_subject(chart.year.stem, sex);
        Ok(Self {
            direction,
            start_age: derive_start_age(chart, direction)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_age > MAX_START_AGE {
            return Err(BaziError::invalid(format!(
                "startAge must be at most {} (got {})",
                MAX_START_AGE, self.start_age
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckCycle {
    #[serde(rename = "ageStart")]
    pub age_start: u32,
    #[serde(rename = "ageEnd")]
    pub age_end: u32,
    #[serde(rename = "gregorianStart")]
    pub gregorian_start: i32,
    #[serde(rename = "gregorianEnd")]
    pub gregorian_end: i32,
    pub stem: Stem,
    pub branch: Branch,
    pub combined: String,
    pub element: Element,
    pub relationship: TenGod,
    pub description: String,
}

/// Days from birth to the next (forward) or previous (backward) "jie" term,
/// divided by three and rounded to whole years. Never less than one.
pub fn derive_start_age(chart: &FourPillarChart, direction: LuckDirection) -> Result<u32> {
    let birth = chart.metadata.utc_instant;
    let span = match direction {
        LuckDirection::Forward => next_jie(birth)?.1 - birth,
        LuckDirection::Backward => birth - previous_jie(birth)?.1,
    };
    let days = span.num_seconds() as f64 / SECONDS_PER_DAY;
    let years = (days / DAYS_PER_START_YEAR).round().max(1.0);
    Ok((years as u32).min(MAX_START_AGE))
}

/// Gregorian year in which the subject turns `age`.
fn calendar_year(birth_year: i32, age: u32) -> Result<i32> {
    i32::try_from(age)
        .ok()
        .and_then(|age| birth_year.checked_add(age))
        .ok_or_else(|| BaziError::invalid(format!("birth year {} plus age {} is out of range", birth_year, age)))
}

/// The eight decade cycles following the month pillar.
pub fn generate_luck_cycles(
    chart: &FourPillarChart,
    birth_year: i32,
    config: &LuckCycleConfig,
) -> Result<Vec<LuckCycle>> {
    config.validate()?;
    let month = chart.month.term().ok_or_else(|| {
        BaziError::inconsistent(format!("month pillar {} is not a sexagenary term", chart.month.combined))
    })?;
    let day_stem = chart.day_stem();

    let cycles: Vec<LuckCycle> = (0..LUCK_CYCLE_COUNT as u32)
        .map(|i| -> Result<LuckCycle> {
            let term = month.offset(config.direction.step() * (i as i64 + 1));
            let (stem, branch) = term.split();
            let age_start = config.start_age + CYCLE_YEARS * i;
            let age_end = age_start + CYCLE_YEARS - 1;
            let gregorian_start = calendar_year(birth_year, age_start)?;
            let gregorian_end = calendar_year(birth_year, age_end)?;
            let relationship = classify(day_stem, stem);
            let combined = term.label();
            let description = format!(
                "Ages {}-{} ({}-{}): {} cycle of {} {}, {} influence",
                age_start,
                age_end,
                gregorian_start,
                gregorian_end,
                combined,
                stem.polarity(),
                stem.element(),
                relationship.label()
            );
            Ok(LuckCycle {
                age_start,
                age_end,
                gregorian_start,
                gregorian_end,
                stem,
                branch,
                combined,
                element: stem.element(),
                relationship,
                description,
            })
        })
        .collect::<Result<_>>()?;

    if cycles.len() != LUCK_CYCLE_COUNT {
        return Err(BaziError::inconsistent(format!(
            "expected {} luck cycles, built {}",
            LUCK_CYCLE_COUNT,
            cycles.len()
        )));
    }

    log::trace!(
        "luck cycles from {} ({:?}, start age {}): {}",
        chart.month.combined,
        config.direction,
        config.start_age,
        cycles.iter().map(|c| c.combined.as_str()).collect::<Vec<_>>().join(" ")
    );

    Ok(cycles)
}

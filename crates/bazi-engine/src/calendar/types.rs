//! Chart records produced by the calendrical conversion.

use crate::analysis::elements::{ElementScores, ElementWeights};
use crate::calendar::lunar::LunarDate;
use crate::calendar::solar::SolarTerm;
use crate::symbols::{Branch, Sexagenary, Stem};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
    /// Two-symbol sexagenary label, e.g. `己卯`.
    pub combined: String,
}

impl Pillar {
    pub fn term(&self) -> Option<Sexagenary> {
        Sexagenary::from_parts(self.stem, self.branch).ok()
    }
}

impl From<Sexagenary> for Pillar {
    fn from(term: Sexagenary) -> Self {
        let (stem, branch) = term.split();
        Pillar {
            stem,
            branch,
            combined: term.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarPosition {
    Year,
    Month,
    Day,
    Hour,
}

pub const PILLAR_POSITIONS: [PillarPosition; 4] = [
    PillarPosition::Year,
    PillarPosition::Month,
    PillarPosition::Day,
    PillarPosition::Hour,
];

impl fmt::Display for PillarPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PillarPosition::Year => "year",
            PillarPosition::Month => "month",
            PillarPosition::Day => "day",
            PillarPosition::Hour => "hour",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartMetadata {
    /// Birth wall-clock time exactly as supplied.
    #[serde(rename = "localDateTime")]
    pub local_date_time: NaiveDateTime,
    pub timezone: String,
    #[serde(rename = "utcInstant")]
    pub utc_instant: DateTime<Utc>,
    /// Absent outside the 1900–2100 lunar table.
    #[serde(rename = "lunarDate")]
    pub lunar_date: Option<LunarDate>,
    /// The "jie" term that opened the birth month.
    #[serde(rename = "solarTerm")]
    pub solar_term: SolarTerm,
    pub weights: ElementWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FourPillarChart {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
    pub elements: ElementScores,
    pub metadata: ChartMetadata,
}

impl FourPillarChart {
    pub fn pillar(&self, position: PillarPosition) -> &Pillar {
        match position {
            PillarPosition::Year => &self.year,
            PillarPosition::Month => &self.month,
            PillarPosition::Day => &self.day,
            PillarPosition::Hour => &self.hour,
        }
    }

    /// Pillars in year, month, day, hour order.
    pub fn pillars(&self) -> [(PillarPosition, &Pillar); 4] {
        PILLAR_POSITIONS.map(|position| (position, self.pillar(position)))
    }

    pub fn day_stem(&self) -> Stem {
        self.day.stem
    }
}

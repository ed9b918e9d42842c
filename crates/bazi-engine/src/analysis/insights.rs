//! Full insight bundle for a chart, and its condensed persistence form.

use crate::analysis::day_master::{resolve_day_master, DayMaster};
use crate::analysis::luck_cycles::{generate_luck_cycles, LuckCycle, LuckCycleConfig};
use crate::analysis::personality::{generate_personality_tags, PersonalityTag, TagCategory};
use crate::analysis::ten_gods::{analyze_ten_gods, TenGod, TenGodsAnalysis};
use crate::calendar::types::{FourPillarChart, PillarPosition};
use crate::error::{BaziError, Result};
use crate::symbols::{Branch, Element, Stem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const SUMMARY_TAGS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightsSummary {
    #[serde(rename = "overallBalance")]
    pub overall_balance: u32,
    #[serde(rename = "dominantElements")]
    pub dominant_elements: Vec<Element>,
    #[serde(rename = "keyStrengths")]
    pub key_strengths: Vec<String>,
    #[serde(rename = "areasForGrowth")]
    pub areas_for_growth: Vec<String>,
    #[serde(rename = "favorableElements")]
    pub favorable_elements: Vec<Element>,
    #[serde(rename = "unfavorableElements")]
    pub unfavorable_elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaziInsights {
    #[serde(rename = "dayMaster")]
    pub day_master: DayMaster,
    #[serde(rename = "tenGods")]
    pub ten_gods: TenGodsAnalysis,
    #[serde(rename = "luckCycles")]
    pub luck_cycles: Vec<LuckCycle>,
    #[serde(rename = "personalityTags")]
    pub personality_tags: Vec<PersonalityTag>,
    pub summary: InsightsSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CondensedStrength {
    pub relationship: TenGod,
    pub strength: u32,
    pub element: Element,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CondensedLuckCycle {
    #[serde(rename = "ageStart")]
    pub age_start: u32,
    #[serde(rename = "ageEnd")]
    pub age_end: u32,
    pub stem: Stem,
    pub branch: Branch,
    pub relationship: TenGod,
}

/// Compact record kept by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CondensedInsights {
    #[serde(rename = "dayMasterStem")]
    pub day_master_stem: Stem,
    pub relationships: BTreeMap<PillarPosition, TenGod>,
    pub strengths: Vec<CondensedStrength>,
    #[serde(rename = "luckCycles")]
    pub luck_cycles: Vec<CondensedLuckCycle>,
}

impl CondensedInsights {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| BaziError::inconsistent(format!("condensed insights failed to serialise: {}", e)))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BaziError::invalid(format!("malformed condensed insights: {}", e)))
    }
}

fn first_tags(tags: &[PersonalityTag], category: TagCategory) -> Vec<String> {
    tags.iter()
        .filter(|tag| tag.category == category)
        .take(SUMMARY_TAGS)
        .map(|tag| tag.tag.clone())
        .collect()
}

/// Insights with the default luck-cycle configuration.
pub fn compute_insights(chart: &FourPillarChart, birth_year: i32) -> Result<BaziInsights> {
    compute_insights_with(chart, birth_year, &LuckCycleConfig::default())
}

pub fn compute_insights_with(
    chart: &FourPillarChart,
    birth_year: i32,
    config: &LuckCycleConfig,
) -> Result<BaziInsights> {
    let day_master = resolve_day_master(chart.day_stem())?;
    let ten_gods = analyze_ten_gods(chart)?;
    let luck_cycles = generate_luck_cycles(chart, birth_year, config)?;
    let personality_tags = generate_personality_tags(&day_master, &ten_gods);

    let summary = InsightsSummary {
        overall_balance: ten_gods.balance_score,
        dominant_elements: ten_gods.dominant_elements.clone(),
        key_strengths: first_tags(&personality_tags, TagCategory::Strengths),
        areas_for_growth: first_tags(&personality_tags, TagCategory::Weaknesses),
        favorable_elements: ten_gods.dominant_elements.clone(),
        unfavorable_elements: ten_gods.weak_elements.clone(),
    };

    log::debug!(
        "insights for day master {}: balance {}, {} tags, {} luck cycles",
        day_master.stem,
        summary.overall_balance,
        personality_tags.len(),
        luck_cycles.len()
    );

    Ok(BaziInsights {
        day_master,
        ten_gods,
        luck_cycles,
        personality_tags,
        summary,
    })
}

pub fn to_persistence_form(insights: &BaziInsights) -> CondensedInsights {
    CondensedInsights {
        day_master_stem: insights.day_master.stem,
        relationships: insights.ten_gods.relationships.clone(),
        strengths: insights
            .ten_gods
            .strengths
            .iter()
            .map(|entry| CondensedStrength {
                relationship: entry.relationship,
                strength: entry.strength,
                element: entry.element,
            })
            .collect(),
        luck_cycles: insights
            .luck_cycles
            .iter()
            .map(|cycle| CondensedLuckCycle {
                age_start: cycle.age_start,
                age_end: cycle.age_end,
                stem: cycle.stem,
                branch: cycle.branch,
                relationship: cycle.relationship,
            })
            .collect(),
    }
}

//! Ten-gods classification of every chart stem against the day master.
//!
//! A stem's relationship is fixed by two things: how its element stands
//! towards the day master's element (same, produced, controlled, controlling,
//! producing) and whether the two stems share polarity.

use crate::calendar::types::{FourPillarChart, PillarPosition};
use crate::error::{BaziError, Result};
use crate::symbols::{Element, ElementRelation, Stem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Relationship categories. Declaration order is the tie-break priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TenGod {
    Peer,
    Plunderer,
    DirectOutput,
    RebelliousOutput,
    DirectWealth,
    WindfallWealth,
    DirectAuthority,
    AggressiveAuthority,
    DirectResource,
    IndirectResource,
}

pub const TEN_GODS: [TenGod; 10] = [
    TenGod::Peer,
    TenGod::Plunderer,
    TenGod::DirectOutput,
    TenGod::RebelliousOutput,
    TenGod::DirectWealth,
    TenGod::WindfallWealth,
    TenGod::DirectAuthority,
    TenGod::AggressiveAuthority,
    TenGod::DirectResource,
    TenGod::IndirectResource,
];

/// Strength contributed by a visible stem.
const VISIBLE_STEM_WEIGHT: f64 = 1.0;
/// Strength contributed by a branch's main hidden stem.
const HIDDEN_STEM_WEIGHT: f64 = 0.5;

struct TenGodProfile {
    label: &'static str,
    description: &'static str,
    influence_keywords: &'static [&'static str],
}

static PROFILES: [TenGodProfile; 10] = [
    TenGodProfile {
        label: "Peer",
        description: "Siblings, friends and equals; self-reliance and a strong sense of identity.",
        influence_keywords: &["independent", "confident", "loyal"],
    },
    TenGodProfile {
        label: "Plunderer",
        description: "Rivals and competitors; drive that can turn into impulsive risk-taking.",
        influence_keywords: &["competitive", "bold", "impulsive"],
    },
    TenGodProfile {
        label: "Direct Output",
        description: "Expression, craft and enjoyment; talent that flows out easily.",
        influence_keywords: &["creative", "expressive", "easygoing"],
    },
    TenGodProfile {
        label: "Rebellious Output",
        description: "Challenge to convention; brilliance that resists being told what to do.",
        influence_keywords: &["innovative", "outspoken", "unconventional"],
    },
    TenGodProfile {
        label: "Direct Wealth",
        description: "Steady earnings and careful stewardship of what has been built.",
        influence_keywords: &["practical", "diligent", "thrifty"],
    },
    TenGodProfile {
        label: "Windfall Wealth",
        description: "Opportunity, speculation and generosity with whatever arrives.",
        influence_keywords: &["opportunistic", "generous", "sociable"],
    },
    TenGodProfile {
        label: "Direct Authority",
        description: "Order, reputation and duty; respect for rules and hierarchy.",
        influence_keywords: &["disciplined", "responsible", "honorable"],
    },
    TenGodProfile {
        label: "Aggressive Authority",
        description: "Pressure and power; the urge to take command under stress.",
        influence_keywords: &["assertive", "resilient", "forceful"],
    },
    TenGodProfile {
        label: "Direct Resource",
        description: "Learning, mentors and protection; support given without conditions.",
        influence_keywords: &["scholarly", "compassionate", "patient"],
    },
    TenGodProfile {
        label: "Indirect Resource",
        description: "Unusual knowledge and intuition; insight found off the beaten track.",
        influence_keywords: &["intuitive", "perceptive", "solitary"],
    },
];

impl TenGod {
    pub fn priority(self) -> usize {
        self as usize
    }

    fn profile(self) -> &'static TenGodProfile {
        &PROFILES[self.priority()]
    }

    pub fn label(self) -> &'static str {
        self.profile().label
    }

    pub fn description(self) -> &'static str {
        self.profile().description
    }

    pub fn influence_keywords(self) -> &'static [&'static str] {
        self.profile().influence_keywords
    }

    /// How the day master's element stands towards this category's element.
    pub fn relation(self) -> ElementRelation {
        match self {
            TenGod::Peer | TenGod::Plunderer => ElementRelation::Same,
            TenGod::DirectOutput | TenGod::RebelliousOutput => ElementRelation::Generates,
            TenGod::DirectWealth | TenGod::WindfallWealth => ElementRelation::Overcomes,
            TenGod::DirectAuthority | TenGod::AggressiveAuthority => ElementRelation::OvercomeBy,
            TenGod::DirectResource | TenGod::IndirectResource => ElementRelation::GeneratedBy,
        }
    }

    /// Element carried by stems of this category for a given day master.
    pub fn element_for(self, day_master: Element) -> Element {
        day_master.related(self.relation())
    }
}

impl fmt::Display for TenGod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Relationship of `target` to the day master `day`.
pub fn classify(day: Stem, target: Stem) -> TenGod {
    let same_polarity = day.polarity() == target.polarity();
    match (day.element().relation_to(target.element()), same_polarity) {
        (ElementRelation::Same, true) => TenGod::Peer,
        (ElementRelation::Same, false) => TenGod::Plunderer,
        (ElementRelation::GeneratedBy, true) => TenGod::DirectResource,
        (ElementRelation::GeneratedBy, false) => TenGod::IndirectResource,
        (ElementRelation::Generates, true) => TenGod::DirectOutput,
        (ElementRelation::Generates, false) => TenGod::RebelliousOutput,
        (ElementRelation::OvercomeBy, true) => TenGod::DirectAuthority,
        (ElementRelation::OvercomeBy, false) => TenGod::AggressiveAuthority,
        (ElementRelation::Overcomes, true) => TenGod::DirectWealth,
        (ElementRelation::Overcomes, false) => TenGod::WindfallWealth,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenGodStrength {
    pub relationship: TenGod,
    /// Share of the chart's stem weight, in whole percent.
    pub strength: u32,
    pub element: Element,
    pub description: String,
    #[serde(rename = "influenceKeywords")]
    pub influence_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenGodsAnalysis {
    #[serde(rename = "dayMasterStem")]
    pub day_master_stem: Stem,
    pub relationships: BTreeMap<PillarPosition, TenGod>,
    pub strengths: Vec<TenGodStrength>,
    #[serde(rename = "dominantElements")]
    pub dominant_elements: Vec<Element>,
    #[serde(rename = "weakElements")]
    pub weak_elements: Vec<Element>,
    #[serde(rename = "balanceScore")]
    pub balance_score: u32,
}

impl TenGodsAnalysis {
    pub fn relationship(&self, position: PillarPosition) -> Option<TenGod> {
        self.relationships.get(&position).copied()
    }

    pub fn strength_of(&self, relationship: TenGod) -> u32 {
        self.strengths
            .iter()
            .find(|entry| entry.relationship == relationship)
            .map_or(0, |entry| entry.strength)
    }
}

/// Classify the four visible stems and weigh every category in the chart.
pub fn analyze_ten_gods(chart: &FourPillarChart) -> Result<TenGodsAnalysis> {
    let day = chart.day_stem();

    let mut relationships = BTreeMap::new();
    let mut scores = [0.0_f64; 10];
    for (position, pillar) in chart.pillars() {
        let visible = classify(day, pillar.stem);
        relationships.insert(position, visible);
        scores[visible.priority()] += VISIBLE_STEM_WEIGHT;

        let hidden = classify(day, pillar.branch.main_hidden_stem()?);
        scores[hidden.priority()] += HIDDEN_STEM_WEIGHT;
    }

    match relationships.get(&PillarPosition::Day) {
        Some(TenGod::Peer) => {}
        other => {
            return Err(BaziError::inconsistent(format!(
                "day pillar resolved to {:?} instead of Peer",
                other
            )))
        }
    }

    let total: f64 = scores.iter().sum();
    let mut strengths: Vec<TenGodStrength> = TEN_GODS
        .iter()
        .filter(|god| scores[god.priority()] > 0.0)
        .map(|&god| TenGodStrength {
            relationship: god,
            strength: (scores[god.priority()] / total * 100.0).round() as u32,
            element: god.element_for(day.element()),
            description: god.description().to_string(),
            influence_keywords: god.influence_keywords().iter().map(|k| k.to_string()).collect(),
        })
        .collect();
    strengths.sort_by(|a, b| {
        b.strength
            .cmp(&a.strength)
            .then(a.relationship.priority().cmp(&b.relationship.priority()))
    });

    let elements = &chart.elements;
    let balance = (100.0 - 10.0 * elements.variance()).clamp(0.0, 100.0);
    let analysis = TenGodsAnalysis {
        day_master_stem: day,
        relationships,
        strengths,
        dominant_elements: elements.ranked_descending().into_iter().take(2).collect(),
        weak_elements: elements.ranked_ascending().into_iter().take(2).collect(),
        balance_score: balance.round() as u32,
    };

    log::trace!(
        "ten gods for day master {}: {:?}",
        day,
        analysis
            .strengths
            .iter()
            .map(|entry| (entry.relationship, entry.strength))
            .collect::<Vec<_>>()
    );

    Ok(analysis)
}

//! Day-master profiles: the persona attached to the day pillar's stem.

use crate::error::{BaziError, Result};
use crate::symbols::{Element, Polarity, Stem, STEMS, STEM_COUNT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMaster {
    pub stem: Stem,
    pub element: Element,
    pub polarity: Polarity,
    pub keywords: Vec<String>,
    pub description: String,
}

struct DayMasterProfile {
    keywords: &'static [&'static str],
    description: &'static str,
}

// Indexed by stem order.
const PROFILES: [DayMasterProfile; STEM_COUNT] = [
    DayMasterProfile {
        keywords: &["upright", "ambitious", "principled", "pioneering", "steadfast"],
        description: "Yang wood, the tall tree: grows straight toward its goals and keeps its shape under pressure.",
    },
    DayMasterProfile {
        keywords: &["flexible", "gentle", "resourceful", "diplomatic", "persistent"],
        description: "Yin wood, the vine and flower: bends around obstacles and finds a way through quiet persistence.",
    },
    DayMasterProfile {
        keywords: &["radiant", "generous", "enthusiastic", "expressive", "open"],
        description: "Yang fire, the sun: warms everything in reach and is seen by everyone.",
    },
    DayMasterProfile {
        keywords: &["warm", "perceptive", "devoted", "refined", "inspiring"],
        description: "Yin fire, the candle: a focused light that illuminates what others overlook.",
    },
    DayMasterProfile {
        keywords: &["stable", "reliable", "protective", "loyal", "solid"],
        description: "Yang earth, the mountain: dependable and hard to move once committed.",
    },
    DayMasterProfile {
        keywords: &["nurturing", "mild", "adaptable", "patient", "humble"],
        description: "Yin earth, the fertile field: quietly supports growth and absorbs whatever is planted.",
    },
    DayMasterProfile {
        keywords: &["decisive", "resilient", "just", "direct", "courageous"],
        description: "Yang metal, the blade and ore: firm resolve tempered by challenge.",
    },
    DayMasterProfile {
        keywords: &["elegant", "precise", "sensitive", "discerning", "polished"],
        description: "Yin metal, the jewel: values refinement and notices the finest detail.",
    },
    DayMasterProfile {
        keywords: &["dynamic", "intelligent", "adventurous", "free-flowing", "bold"],
        description: "Yang water, the ocean: vast, restless and carried by strong currents.",
    },
    DayMasterProfile {
        keywords: &["intuitive", "imaginative", "gentle", "wise", "quiet"],
        description: "Yin water, the rain and mist: seeps into every corner and understands without being told.",
    },
];

lazy_static::lazy_static! {
    static ref DAY_MASTERS: Vec<DayMaster> = build_day_masters();
}

fn build_day_masters() -> Vec<DayMaster> {
    STEMS
        .iter()
        .zip(PROFILES.iter())
        .map(|(&stem, profile)| DayMaster {
            stem,
            element: stem.element(),
            polarity: stem.polarity(),
            keywords: profile.keywords.iter().map(|k| k.to_string()).collect(),
            description: profile.description.to_string(),
        })
        .collect()
}

/// Profile for a day stem.
pub fn resolve_day_master(stem: Stem) -> Result<DayMaster> {
    DAY_MASTERS
        .get(stem.index())
        .cloned()
        .ok_or_else(|| BaziError::inconsistent(format!("no day-master profile for {}", stem)))
}

/// Profile for a stem given as its symbol or pinyin.
pub fn resolve_day_master_symbol(symbol: &str) -> Result<DayMaster> {
    resolve_day_master(symbol.parse::<Stem>()?)
}

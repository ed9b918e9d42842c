//! Personality tags synthesised from the day master, ten gods and elements.

use crate::analysis::day_master::DayMaster;
use crate::analysis::ten_gods::TenGodsAnalysis;
use crate::symbols::Element;
use serde::{Deserialize, Serialize};

const DAY_MASTER_CONFIDENCE: u32 = 85;
const ELEMENT_CONFIDENCE: u32 = 70;
const MAX_TEN_GOD_CONFIDENCE: u32 = 95;
const TEN_GOD_BASE_CONFIDENCE: u32 = 60;
/// Categories above this strength count as strengths rather than traits.
const STRONG_CATEGORY: u32 = 30;
const TOP_CATEGORIES: usize = 3;
const KEYWORDS_PER_CATEGORY: usize = 2;
const BALANCED_ABOVE: u32 = 70;
const UNBALANCED_BELOW: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    Strengths,
    Weaknesses,
    Traits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagSource {
    DayMaster,
    TenGods,
    Balance,
    Elements,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityTag {
    pub tag: String,
    pub category: TagCategory,
    pub confidence: u32,
    pub source: TagSource,
}

impl PersonalityTag {
    fn new(tag: impl Into<String>, category: TagCategory, confidence: u32, source: TagSource) -> Self {
        Self {
            tag: tag.into(),
            category,
            confidence: confidence.min(100),
            source,
        }
    }
}

/// Trait tag carried by a dominant element.
pub fn element_trait(element: Element) -> &'static str {
    match element {
        Element::Wood => "growth-oriented",
        Element::Fire => "passionate",
        Element::Earth => "grounded",
        Element::Metal => "principled",
        Element::Water => "intuitive",
    }
}

pub fn generate_personality_tags(day_master: &DayMaster, ten_gods: &TenGodsAnalysis) -> Vec<PersonalityTag> {
    let mut tags: Vec<PersonalityTag> = day_master
        .keywords
        .iter()
        .map(|keyword| {
            PersonalityTag::new(keyword.as_str(), TagCategory::Traits, DAY_MASTER_CONFIDENCE, TagSource::DayMaster)
        })
        .collect();

    for entry in ten_gods.strengths.iter().take(TOP_CATEGORIES) {
        let category = if entry.strength > STRONG_CATEGORY {
            TagCategory::Strengths
        } else {
            TagCategory::Traits
        };
        let confidence = (TEN_GOD_BASE_CONFIDENCE + entry.strength).min(MAX_TEN_GOD_CONFIDENCE);
        tags.extend(
            entry
                .influence_keywords
                .iter()
                .take(KEYWORDS_PER_CATEGORY)
                .map(|keyword| PersonalityTag::new(keyword.as_str(), category, confidence, TagSource::TenGods)),
        );
    }

    let balance = ten_gods.balance_score;
    if balance > BALANCED_ABOVE {
        tags.push(PersonalityTag::new("well-balanced", TagCategory::Strengths, balance, TagSource::Balance));
    } else if balance < UNBALANCED_BELOW {
        tags.push(PersonalityTag::new(
            "needs-adjustment",
            TagCategory::Weaknesses,
            100 - balance,
            TagSource::Balance,
        ));
    }

    tags.extend(
        ten_gods
            .dominant_elements
            .iter()
            .map(|&element| {
                PersonalityTag::new(element_trait(element), TagCategory::Traits, ELEMENT_CONFIDENCE, TagSource::Elements)
            }),
    );

    tags
}

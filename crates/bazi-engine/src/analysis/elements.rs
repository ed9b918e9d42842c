//! Weighted five-element scoring over the four pillars.

use crate::calendar::types::Pillar;
use crate::error::{BaziError, Result};
use crate::symbols::{Element, ELEMENT_ORDER};
use serde::{Deserialize, Serialize};

/// Contribution of each visible and hidden symbol to the element totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementWeights {
    #[serde(rename = "stemWeight", alias = "stem_weight")]
    pub stem_weight: f64,
    #[serde(rename = "branchWeight", alias = "branch_weight")]
    pub branch_weight: f64,
    /// Split evenly across a branch's hidden stems.
    #[serde(rename = "hiddenStemWeight", alias = "hidden_stem_weight")]
    pub hidden_stem_weight: f64,
}

impl Default for ElementWeights {
    fn default() -> Self {
        Self {
            stem_weight: 1.0,
            branch_weight: 1.0,
            hidden_stem_weight: 0.3,
        }
    }
}

impl ElementWeights {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("stemWeight", self.stem_weight),
            ("branchWeight", self.branch_weight),
            ("hiddenStemWeight", self.hidden_stem_weight),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(BaziError::invalid(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementScores {
    pub wood: f64,
    pub fire: f64,
    pub earth: f64,
    pub metal: f64,
    pub water: f64,
}

impl ElementScores {
    pub fn get(&self, element: Element) -> f64 {
        match element {
            Element::Wood => self.wood,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Metal => self.metal,
            Element::Water => self.water,
        }
    }

    fn slot(&mut self, element: Element) -> &mut f64 {
        match element {
            Element::Wood => &mut self.wood,
            Element::Fire => &mut self.fire,
            Element::Earth => &mut self.earth,
            Element::Metal => &mut self.metal,
            Element::Water => &mut self.water,
        }
    }

    /// Scores in the fixed element order.
    pub fn entries(&self) -> [(Element, f64); 5] {
        ELEMENT_ORDER.map(|element| (element, self.get(element)))
    }

    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, score)| score).sum()
    }

    /// Population variance of the five scores.
    pub fn variance(&self) -> f64 {
        let entries = self.entries();
        let mean = self.total() / entries.len() as f64;
        entries
            .iter()
            .map(|(_, score)| (score - mean).powi(2))
            .sum::<f64>()
            / entries.len() as f64
    }

    /// Elements ordered strongest first; equal scores keep element order.
    pub fn ranked_descending(&self) -> Vec<Element> {
        let mut entries = self.entries().to_vec();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        entries.into_iter().map(|(element, _)| element).collect()
    }

    /// Elements ordered weakest first; equal scores keep element order.
    pub fn ranked_ascending(&self) -> Vec<Element> {
        let mut entries = self.entries().to_vec();
        entries.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        entries.into_iter().map(|(element, _)| element).collect()
    }

    fn rounded(mut self) -> Self {
        for element in ELEMENT_ORDER {
            let slot = self.slot(element);
            *slot = round_to_tenth(*slot).max(0.0);
        }
        self
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sum the weighted elements of each pillar's stem, branch and hidden stems.
pub fn aggregate_elements(pillars: &[Pillar; 4], weights: &ElementWeights) -> ElementScores {
    let mut scores = ElementScores::default();
    for pillar in pillars {
        *scores.slot(pillar.stem.element()) += weights.stem_weight;
        *scores.slot(pillar.branch.element()) += weights.branch_weight;

        let hidden = pillar.branch.hidden_stems();
        if hidden.is_empty() {
            continue;
        }
        let share = weights.hidden_stem_weight / hidden.len() as f64;
        for stem in hidden {
            *scores.slot(stem.element()) += share;
        }
    }
    scores.rounded()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::Sexagenary;

    fn pillars(labels: [&str; 4]) -> [Pillar; 4] {
        labels.map(|label| Pillar::from(label.parse::<Sexagenary>().unwrap()))
    }

    #[test]
    fn test_default_total() {
        let chart = pillars(["庚午", "己卯", "己卯", "己巳"]);
        let scores = aggregate_elements(&chart, &ElementWeights::default());
        assert!((scores.total() - 9.2).abs() <= 0.15);
    }

    #[test]
    fn test_single_hidden_stem_branch() {
        // 卯 hides only 乙, so wood gets the full hidden weight.
        let chart = pillars(["乙卯", "乙卯", "乙卯", "乙卯"]);
        let scores = aggregate_elements(&chart, &ElementWeights::default());
        assert_eq!(scores.wood, 9.2);
        assert_eq!(scores.fire, 0.0);
    }

    #[test]
    fn test_hidden_weight_changes_total() {
        let chart = pillars(["庚午", "己卯", "己卯", "己巳"]);
        let base = aggregate_elements(&chart, &ElementWeights::default());
        let heavier = aggregate_elements(
            &chart,
            &ElementWeights {
                hidden_stem_weight: 1.2,
                ..ElementWeights::default()
            },
        );
        assert!(heavier.total() > base.total());
    }

    #[test]
    fn test_rankings_break_ties_by_element_order() {
        let scores = ElementScores {
            wood: 1.0,
            fire: 3.0,
            earth: 3.0,
            metal: 0.0,
            water: 1.0,
        };
        assert_eq!(&scores.ranked_descending()[..2], &[Element::Fire, Element::Earth]);
        assert_eq!(&scores.ranked_ascending()[..2], &[Element::Metal, Element::Wood]);
    }

    #[test]
    fn test_validate_rejects_negative() {
        let weights = ElementWeights {
            branch_weight: -0.5,
            ..ElementWeights::default()
        };
        assert!(matches!(weights.validate(), Err(BaziError::InvalidInput(_))));
        assert!(ElementWeights::default().validate().is_ok());
    }
}

//! The five elements and the two directed cycles that link them.
//!
//! *Generates*: wood → fire → earth → metal → water → wood.
//! *Overcomes*: wood → earth, fire → metal, earth → water, metal → wood,
//! water → fire.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// Fixed element order, also used for every tie-break.
pub const ELEMENT_ORDER: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

/// How one element stands towards another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementRelation {
    Same,
    /// `self` feeds `other`.
    Generates,
    /// `other` feeds `self`.
    GeneratedBy,
    /// `self` controls `other`.
    Overcomes,
    /// `other` controls `self`.
    OvercomeBy,
}

impl Element {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Element::Wood => "wood",
            Element::Fire => "fire",
            Element::Earth => "earth",
            Element::Metal => "metal",
            Element::Water => "water",
        }
    }

    /// The element this one produces in the generating cycle.
    pub fn generates(self) -> Element {
        match self {
            Element::Wood => Element::Fire,
            Element::Fire => Element::Earth,
            Element::Earth => Element::Metal,
            Element::Metal => Element::Water,
            Element::Water => Element::Wood,
        }
    }

    /// The element this one controls in the overcoming cycle.
    pub fn overcomes(self) -> Element {
        match self {
            Element::Wood => Element::Earth,
            Element::Fire => Element::Metal,
            Element::Earth => Element::Water,
            Element::Metal => Element::Wood,
            Element::Water => Element::Fire,
        }
    }

    /// Relation of `self` towards `other`.
    ///
    /// Two distinct elements sit either one or two steps apart on the
    /// generating pentagon, in one direction or the other, so the five
    /// outcomes below partition all 25 ordered pairs.
    pub fn relation_to(self, other: Element) -> ElementRelation {
        let steps = (other.index() + 5 - self.index()) % 5;
        match steps {
            0 => ElementRelation::Same,
            1 => ElementRelation::Generates,
            2 => ElementRelation::Overcomes,
            3 => ElementRelation::OvercomeBy,
            _ => ElementRelation::GeneratedBy,
        }
    }

    /// The element `other` for which `self.relation_to(other) == relation`.
    pub fn related(self, relation: ElementRelation) -> Element {
        let steps = match relation {
            ElementRelation::Same => 0,
            ElementRelation::Generates => 1,
            ElementRelation::Overcomes => 2,
            ElementRelation::OvercomeBy => 3,
            ElementRelation::GeneratedBy => 4,
        };
        ELEMENT_ORDER[(self.index() + steps) % 5]
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! The twelve Earthly Branches with their primary element and hidden stems.

use crate::error::{BaziError, Result};
use crate::symbols::elements::Element;
use crate::symbols::stems::Stem;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

pub const BRANCH_COUNT: usize = 12;

pub const BRANCHES: [Branch; BRANCH_COUNT] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

// (symbol, pinyin, zodiac animal)
const BRANCH_NAMES: [(&str, &str, &str); BRANCH_COUNT] = [
    ("子", "zi", "rat"),
    ("丑", "chou", "ox"),
    ("寅", "yin", "tiger"),
    ("卯", "mao", "rabbit"),
    ("辰", "chen", "dragon"),
    ("巳", "si", "snake"),
    ("午", "wu", "horse"),
    ("未", "wei", "goat"),
    ("申", "shen", "monkey"),
    ("酉", "you", "rooster"),
    ("戌", "xu", "dog"),
    ("亥", "hai", "pig"),
];

/// Hidden stems per branch, main qi first.
const HIDDEN_STEMS: [&[Stem]; BRANCH_COUNT] = [
    &[Stem::Gui],
    &[Stem::Ji, Stem::Gui, Stem::Xin],
    &[Stem::Jia, Stem::Bing, Stem::Wu],
    &[Stem::Yi],
    &[Stem::Wu, Stem::Yi, Stem::Gui],
    &[Stem::Bing, Stem::Geng, Stem::Wu],
    &[Stem::Ding, Stem::Ji],
    &[Stem::Ji, Stem::Ding, Stem::Yi],
    &[Stem::Geng, Stem::Ren, Stem::Wu],
    &[Stem::Xin],
    &[Stem::Wu, Stem::Xin, Stem::Ding],
    &[Stem::Ren, Stem::Jia],
];

impl Branch {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Branch at `index` modulo 12; negative offsets wrap.
    pub fn from_index(index: i64) -> Branch {
        BRANCHES[index.rem_euclid(BRANCH_COUNT as i64) as usize]
    }

    pub fn symbol(self) -> &'static str {
        BRANCH_NAMES[self.index()].0
    }

    pub fn pinyin(self) -> &'static str {
        BRANCH_NAMES[self.index()].1
    }

    pub fn animal(self) -> &'static str {
        BRANCH_NAMES[self.index()].2
    }

    pub fn element(self) -> Element {
        match self {
            Branch::Yin | Branch::Mao => Element::Wood,
            Branch::Si | Branch::Wu => Element::Fire,
            Branch::Chou | Branch::Chen | Branch::Wei | Branch::Xu => Element::Earth,
            Branch::Shen | Branch::You => Element::Metal,
            Branch::Hai | Branch::Zi => Element::Water,
        }
    }

    pub fn hidden_stems(self) -> &'static [Stem] {
        HIDDEN_STEMS[self.index()]
    }

    /// Canonical representative of the hidden stems (the main qi).
    pub fn main_hidden_stem(self) -> Result<Stem> {
        self.hidden_stems().first().copied().ok_or_else(|| {
            BaziError::inconsistent(format!("branch {} has no hidden stems", self.symbol()))
        })
    }

    pub fn offset(self, steps: i64) -> Branch {
        Branch::from_index(self.index() as i64 + steps)
    }

    /// Branch governing a local hour of day. Each branch spans two hours and
    /// the first one straddles midnight (23:00–00:59).
    pub fn for_hour(hour: u32) -> Branch {
        Branch::from_index(((hour as i64 + 1) / 2) % BRANCH_COUNT as i64)
    }
}

impl FromStr for Branch {
    type Err = BaziError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        BRANCH_NAMES
            .iter()
            .position(|(symbol, pinyin, _)| *symbol == needle || pinyin.eq_ignore_ascii_case(needle))
            .map(|idx| BRANCHES[idx])
            .ok_or_else(|| BaziError::invalid(format!("'{}' is not an earthly branch", s)))
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for Branch {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for Branch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

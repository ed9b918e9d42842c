//! The ten Heavenly Stems.
//!
//! Stems pair up by element in generating order (wood, fire, earth, metal,
//! water); within each pair the first stem is yang and the second yin.

use crate::error::{BaziError, Result};
use crate::symbols::elements::Element;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

pub const STEM_COUNT: usize = 10;

pub const STEMS: [Stem; STEM_COUNT] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

// (symbol, pinyin)
const STEM_NAMES: [(&str, &str); STEM_COUNT] = [
    ("甲", "jia"),
    ("乙", "yi"),
    ("丙", "bing"),
    ("丁", "ding"),
    ("戊", "wu"),
    ("己", "ji"),
    ("庚", "geng"),
    ("辛", "xin"),
    ("壬", "ren"),
    ("癸", "gui"),
];

impl Stem {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stem at `index` modulo 10; negative offsets wrap.
    pub fn from_index(index: i64) -> Stem {
        STEMS[index.rem_euclid(STEM_COUNT as i64) as usize]
    }

    pub fn symbol(self) -> &'static str {
        STEM_NAMES[self.index()].0
    }

    pub fn pinyin(self) -> &'static str {
        STEM_NAMES[self.index()].1
    }

    pub fn element(self) -> Element {
        match self {
            Stem::Jia | Stem::Yi => Element::Wood,
            Stem::Bing | Stem::Ding => Element::Fire,
            Stem::Wu | Stem::Ji => Element::Earth,
            Stem::Geng | Stem::Xin => Element::Metal,
            Stem::Ren | Stem::Gui => Element::Water,
        }
    }

    pub fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    pub fn offset(self, steps: i64) -> Stem {
        Stem::from_index(self.index() as i64 + steps)
    }
}

impl FromStr for Stem {
    type Err = BaziError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        STEM_NAMES
            .iter()
            .position(|(symbol, pinyin)| *symbol == needle || pinyin.eq_ignore_ascii_case(needle))
            .map(|idx| STEMS[idx])
            .ok_or_else(|| BaziError::invalid(format!("'{}' is not a heavenly stem", s)))
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Yang => f.write_str("yang"),
            Polarity::Yin => f.write_str("yin"),
        }
    }
}

impl Serialize for Stem {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for Stem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

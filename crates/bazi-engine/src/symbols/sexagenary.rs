//! The 60-term sexagenary cycle formed by pairing stems with branches.

use crate::error::{BaziError, Result};
use crate::symbols::branches::{Branch, BRANCH_COUNT};
use crate::symbols::stems::{Stem, STEM_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const CYCLE_LENGTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Sexagenary(u8);

impl Sexagenary {
    /// Term at `index` modulo 60; negative values wrap.
    pub fn from_index(index: i64) -> Sexagenary {
        Sexagenary(index.rem_euclid(CYCLE_LENGTH as i64) as u8)
    }

    /// Only pairs of matching parity occur in the cycle.
    pub fn from_parts(stem: Stem, branch: Branch) -> Result<Sexagenary> {
        let (s, b) = (stem.index(), branch.index());
        if s % 2 != b % 2 {
            return Err(BaziError::invalid(format!(
                "{}{} does not occur in the sexagenary cycle",
                stem, branch
            )));
        }
        // Chinese remainder: find n in 0..60 with n ≡ s (mod 10), n ≡ b (mod 12).
        let index = (0..CYCLE_LENGTH / STEM_COUNT)
            .map(|k| s + k * STEM_COUNT)
            .find(|n| n % BRANCH_COUNT == b)
            .ok_or_else(|| BaziError::inconsistent("sexagenary index not found"))?;
        Ok(Sexagenary(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn stem(self) -> Stem {
        Stem::from_index(self.0 as i64)
    }

    pub fn branch(self) -> Branch {
        Branch::from_index(self.0 as i64)
    }

    pub fn split(self) -> (Stem, Branch) {
        (self.stem(), self.branch())
    }

    /// Two-symbol label, e.g. `甲子`.
    pub fn label(self) -> String {
        format!("{}{}", self.stem().symbol(), self.branch().symbol())
    }

    pub fn offset(self, steps: i64) -> Sexagenary {
        Sexagenary::from_index(self.0 as i64 + steps)
    }
}

impl FromStr for Sexagenary {
    type Err = BaziError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        let (stem, branch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(stem), Some(branch), None) => (stem, branch),
            _ => return Err(BaziError::invalid(format!("'{}' is not a sexagenary label", s))),
        };
        let stem: Stem = stem.to_string().parse()?;
        let branch: Branch = branch.to_string().parse()?;
        Sexagenary::from_parts(stem, branch)
    }
}

impl TryFrom<u8> for Sexagenary {
    type Error = BaziError;

    fn try_from(value: u8) -> Result<Self> {
        if (value as usize) < CYCLE_LENGTH {
            Ok(Sexagenary(value))
        } else {
            Err(BaziError::invalid(format!("sexagenary index {} out of range", value)))
        }
    }
}

impl From<Sexagenary> for u8 {
    fn from(value: Sexagenary) -> u8 {
        value.0
    }
}

impl fmt::Display for Sexagenary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

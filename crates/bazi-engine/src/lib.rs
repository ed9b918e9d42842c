//! Four-pillar (BaZi) chart calculation.
//!
//! [`compute_chart`] turns a birth wall-clock time and an IANA timezone into
//! year, month, day and hour pillars with weighted element scores.
//! [`compute_insights`] derives the day master, ten-gods analysis, luck
//! cycles and personality tags from a chart, and [`to_persistence_form`]
//! condenses the result for storage.
//!
//! Everything here is a pure function of its inputs: the engine never reads
//! the clock, the filesystem or the network.

pub mod analysis;
pub mod calendar;
pub mod config;
pub mod error;
pub mod symbols;

pub use analysis::{
    compute_insights, compute_insights_with, derive_start_age, resolve_day_master,
    resolve_day_master_symbol, to_persistence_form, BaziInsights, CondensedInsights, DayMaster,
    ElementScores, ElementWeights, InsightsSummary, LuckCycle, LuckCycleConfig, LuckDirection,
    PersonalityTag, Sex, TagCategory, TagSource, TenGod, TenGodsAnalysis,
};
pub use calendar::{compute_chart, ChartMetadata, FourPillarChart, LunarDate, Pillar, PillarPosition, SolarTerm};
pub use config::{Engine, EngineConfig};
pub use error::{BaziError, Result};
pub use symbols::{Branch, Element, Polarity, Sexagenary, Stem};

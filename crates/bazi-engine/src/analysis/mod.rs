pub mod day_master;
pub mod elements;
pub mod insights;
pub mod luck_cycles;
pub mod personality;
pub mod ten_gods;

pub use day_master::{resolve_day_master, resolve_day_master_symbol, DayMaster};
pub use elements::{aggregate_elements, ElementScores, ElementWeights};
pub use insights::{
    compute_insights, compute_insights_with, to_persistence_form, BaziInsights, CondensedInsights,
    CondensedLuckCycle, CondensedStrength, InsightsSummary,
};
pub use luck_cycles::{
    derive_start_age, generate_luck_cycles, LuckCycle, LuckCycleConfig, LuckDirection, Sex,
    LUCK_CYCLE_COUNT,
};
pub use personality::{generate_personality_tags, PersonalityTag, TagCategory, TagSource};
pub use ten_gods::{analyze_ten_gods, classify, TenGod, TenGodStrength, TenGodsAnalysis, TEN_GODS};

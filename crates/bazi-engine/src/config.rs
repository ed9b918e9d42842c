//! Engine configuration: element weights plus luck-cycle defaults.
//!
//! ```toml
//! [weights]
//! stem_weight = 1.0
//! branch_weight = 1.0
//! hidden_stem_weight = 0.3
//!
//! [luck]
//! direction = "forward"
//! start_age = 8
//! ```

use crate::analysis::elements::ElementWeights;
use crate::analysis::insights::{compute_insights_with, to_persistence_form, BaziInsights, CondensedInsights};
use crate::analysis::luck_cycles::LuckCycleConfig;
use crate::calendar::converter::compute_chart;
use crate::calendar::types::FourPillarChart;
use crate::error::{BaziError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EngineConfig {
    pub weights: ElementWeights,
    pub luck: LuckCycleConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct EngineConfigToml {
    #[serde(default)]
    weights: ElementWeights,
    #[serde(default)]
    luck: LuckCycleConfig,
}

impl EngineConfig {
    /// Parse a TOML document; missing tables and keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: EngineConfigToml =
            toml::from_str(text).map_err(|e| BaziError::invalid(format!("engine config: {}", e)))?;
        let config = EngineConfig {
            weights: raw.weights,
            luck: raw.luck,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.luck.validate()
    }
}

/// A configured entry point bundling the chart and insight calculations.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn chart(&self, birth_local: &str, timezone: &str) -> Result<FourPillarChart> {
        compute_chart(birth_local, timezone, Some(&self.config.weights))
    }

    pub fn insights(&self, chart: &FourPillarChart, birth_year: i32) -> Result<BaziInsights> {
        compute_insights_with(chart, birth_year, &self.config.luck)
    }

    pub fn condense(&self, insights: &BaziInsights) -> CondensedInsights {
        to_persistence_form(insights)
    }
}

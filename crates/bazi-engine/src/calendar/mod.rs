pub mod converter;
pub mod lunar;
pub mod solar;
pub mod types;

pub use converter::{compute_chart, hour_pillar, parse_birth_local, resolve_timezone};
pub use lunar::LunarDate;
pub use solar::{solar_term_instant, SolarTerm, SOLAR_TERMS};
pub use types::{ChartMetadata, FourPillarChart, Pillar, PillarPosition, PILLAR_POSITIONS};

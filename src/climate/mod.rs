//! Site climate inputs.
//!
//! Daily samples and period averages that drive the estimator, plus helpers
//! for reshaping NASA POWER daily responses, summarizing a series and falling
//! back to regional averages for Brazilian states.

pub mod region;
pub mod sample;
pub mod series;
pub mod statistics;

pub use region::{lookup_ibge, lookup_uf, states_in, Region, StateInfo, STATES};
pub use sample::{DailyClimateSample, SiteClimate};
pub use series::{ClimateAverages, ClimateSummary, PowerDailyParameters, PowerResponse, MISSING_VALUE};
pub use statistics::ClimateStatistics;

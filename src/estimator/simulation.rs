use serde::{Deserialize, Serialize};

use super::constants::DAYS_PER_YEAR;
use super::dispatch::simulate_dispatch;
use super::energy::compute_energy;
use super::error::EstimatorResult;
use super::finance::roll_up;
use super::params::{CostAssumptions, InstallationConfig};
use crate::climate::{DailyClimateSample, SiteClimate};

/// Dispatch simulation plus its cost roll-up
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub days_simulated: usize,
    pub dropped_samples: usize,
    pub total_energy_consumed_kwh: f64,
    /// Hydrogen produced over the simulated period (kg)
    pub h2_production_kg: f64,
    /// Period production scaled to one year (kg)
    pub annualized_h2_kg: f64,
    pub capacity_factor_pct: f64,
    pub curtailment_kwh: f64,
    pub operating_hours: u32,
    pub lcoh_per_kg: f64,
    pub capex_annualized: f64,
    pub opex_annual: f64,
}

/// Simulate a daily series and cost the result.
///
/// CAPEX is sized from the average power of the usable samples; LCOH uses
/// the dispatched (not the naive) hydrogen production, annualized from the
/// simulated period.
pub fn simulate(
    samples: &[DailyClimateSample],
    install: &InstallationConfig,
    costs: &CostAssumptions,
) -> EstimatorResult<SimulationResult> {
    let outcome = simulate_dispatch(samples, install, costs)?;

    let average = SiteClimate::from_samples(samples)?;
    let energy = compute_energy(&average, install, costs)?;

    let annualized_h2_kg =
        outcome.h2_production_kg * DAYS_PER_YEAR / outcome.days_simulated as f64;
    let financials = roll_up(&energy, annualized_h2_kg, install, costs)?;

    Ok(SimulationResult {
        days_simulated: outcome.days_simulated,
        dropped_samples: outcome.dropped_samples,
        total_energy_consumed_kwh: outcome.total_energy_consumed_kwh,
        h2_production_kg: outcome.h2_production_kg,
        annualized_h2_kg,
        capacity_factor_pct: outcome.capacity_factor_pct,
        curtailment_kwh: outcome.curtailment_kwh,
        operating_hours: outcome.operating_hours,
        lcoh_per_kg: financials.lcoh_per_kg,
        capex_annualized: financials.capex_annualized,
        opex_annual: financials.opex_annual,
    })
}

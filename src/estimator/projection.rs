//! Multi-year feasibility projection.
//!
//! Repeats the yearly production and cash flows over a set of horizons
//! (1, 3 and 5 years by default) so that a dashboard can show cumulative
//! hydrogen output, investment and return side by side. No escalation or
//! degradation is modelled; every year looks like the first.

use serde::{Deserialize, Serialize};

use super::energy::{compute_energy, EnergyResult};
use super::error::{EstimatorError, EstimatorResult};
use super::finance::{roll_up, FinancialResult};
use super::presets::ParameterSet;
use crate::climate::SiteClimate;

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPeriod {
    pub years: u32,
    pub h2_production_tonnes: f64,
    pub energy_mwh: f64,
    /// CAPEX plus OPEX over the period
    pub cumulative_investment: f64,
    pub cumulative_revenue: f64,
    /// Revenue minus investment at the end of the period
    pub net_position: f64,
    pub roi_pct: f64,
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityProjection {
    pub climate: SiteClimate,
    pub parameters: ParameterSet,
    pub energy: EnergyResult,
    pub financials: FinancialResult,
    pub periods: Vec<ProjectionPeriod>,
}

/// Project one site over several horizons.
pub fn project(
    climate: &SiteClimate,
    params: &ParameterSet,
    horizons_years: &[u32],
) -> EstimatorResult<FeasibilityProjection> {
    if horizons_years.is_empty() {
        return Err(EstimatorError::invalid_input(
            "horizons_years",
            "at least one horizon is required",
        ));
    }
    if let Some(bad) = horizons_years.iter().find(|y| **y == 0) {
        return Err(EstimatorError::invalid_input(
            "horizons_years",
            format!("horizon of {bad} years is not allowed"),
        ));
    }

    let energy = compute_energy(climate, &params.installation, &params.costs)?;
    let financials = roll_up(
        &energy,
        energy.annual_h2_kg(),
        &params.installation,
        &params.costs,
    )?;

    let periods = horizons_years
        .iter()
        .map(|&years| period(years, &energy, &financials))
        .collect();

    Ok(FeasibilityProjection {
        climate: SiteClimate::new(climate.solar_irradiance_kwh_m2_day, climate.wind_speed_ms),
        parameters: params.clone(),
        energy,
        financials,
        periods,
    })
}

fn period(years: u32, energy: &EnergyResult, fin: &FinancialResult) -> ProjectionPeriod {
    let n = years as f64;
    let cumulative_investment = fin.total_capex + fin.opex_annual * n;
    let cumulative_revenue = fin.annual_revenue * n;
    let net_position = cumulative_revenue - cumulative_investment;

    ProjectionPeriod {
        years,
        h2_production_tonnes: energy.annual_h2_tonnes * n,
        energy_mwh: energy.annual_energy_kwh * n / 1000.0,
        cumulative_investment,
        cumulative_revenue,
        net_position,
        roi_pct: net_position / cumulative_investment * 100.0,
    }
}

//! # Financial Roll-up
//!
//! CAPEX, annualized CAPEX via the capital recovery factor, OPEX, LCOH and
//! simple ROI/payback from an assumed sale price. ROI and payback are
//! reported figures, not forecasts.

use serde::{Deserialize, Serialize};

use super::constants::{MAX_DISCOUNT_RATE, MAX_PROJECT_LIFETIME_YEARS};
use super::energy::EnergyResult;
use super::error::{EstimatorError, EstimatorResult};
use super::params::{CostAssumptions, InstallationConfig};

/// Cost and return metrics (monetary values in R$)
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialResult {
    /// Solar + wind CAPEX
    pub renewable_capex: f64,
    /// Infrastructure share, a fraction of `renewable_capex`
    pub infrastructure_capex: f64,
    pub electrolyzer_capex: f64,
    pub total_capex: f64,
    pub capital_recovery_factor: f64,
    pub capex_annualized: f64,
    pub opex_annual: f64,
    /// Levelized cost of hydrogen (R$/kg)
    pub lcoh_per_kg: f64,
    pub annual_h2_kg: f64,
    pub annual_revenue: f64,
    /// Revenue minus OPEX
    pub annual_net_cash_flow: f64,
    /// Net cash flow over total CAPEX (%)
    pub roi_pct: f64,
    /// None when the project never pays back
    pub payback_years: Option<f64>,
}

/// Capital recovery factor for a discount rate and lifetime.
///
/// A zero rate degenerates to straight-line recovery, `1 / n`. Lifetimes
/// above [`MAX_PROJECT_LIFETIME_YEARS`] and rates above [`MAX_DISCOUNT_RATE`]
/// are rejected so the annuity stays finite.
pub fn capital_recovery_factor(discount_rate: f64, lifetime_years: u32) -> EstimatorResult<f64> {
    if !(1..=MAX_PROJECT_LIFETIME_YEARS).contains(&lifetime_years) {
        return Err(EstimatorError::invalid_input(
            "project_lifetime_years",
            format!("{lifetime_years} is outside 1..={MAX_PROJECT_LIFETIME_YEARS}"),
        ));
    }
    if !discount_rate.is_finite() || !(0.0..=MAX_DISCOUNT_RATE).contains(&discount_rate) {
        return Err(EstimatorError::invalid_input(
            "discount_rate",
            format!("{discount_rate} must be in [0, {MAX_DISCOUNT_RATE}]"),
        ));
    }
    if discount_rate == 0.0 {
        return Ok(1.0 / f64::from(lifetime_years));
    }

    // r / (1 - (1+r)^-n), in log space so tiny rates do not cancel to 0/0
    let growth = f64::from(lifetime_years) * discount_rate.ln_1p();
    let crf = discount_rate / -(-growth).exp_m1();
    if !crf.is_finite() || crf <= 0.0 {
        return Err(EstimatorError::invalid_result(
            "capital_recovery_factor",
            format!("no finite annuity for rate {discount_rate} over {lifetime_years} years"),
        ));
    }
    Ok(crf)
}

/// Reject a derived figure that left the finite range.
fn require_finite_result(quantity: &'static str, value: f64) -> EstimatorResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EstimatorError::invalid_result(
            quantity,
            format!("{value} is not a finite amount"),
        ))
    }
}

/// CAPEX split (renewable, infrastructure, electrolyzer).
///
/// Infrastructure is charged on the renewable portion only.
pub fn capex_breakdown(
    solar_power_kw: f64,
    wind_power_kw: f64,
    install: &InstallationConfig,
    costs: &CostAssumptions,
) -> (f64, f64, f64) {
    let renewable = solar_power_kw * costs.solar_capex_per_kw + wind_power_kw * costs.wind_capex_per_kw;
    let infrastructure = renewable * costs.infrastructure_multiplier;
    let electrolyzer = install.electrolyzer_nominal_power_kw * costs.electrolyzer_capex_per_kw;
    (renewable, infrastructure, electrolyzer)
}

/// Levelized cost of hydrogen
pub fn levelized_cost(
    capex_annualized: f64,
    opex_annual: f64,
    annual_h2_kg: f64,
) -> EstimatorResult<f64> {
    if !annual_h2_kg.is_finite() || annual_h2_kg <= 0.0 {
        return Err(EstimatorError::invalid_result(
            "annual_h2_kg",
            format!("LCOH is undefined for an annual production of {annual_h2_kg} kg"),
        ));
    }
    Ok((capex_annualized + opex_annual) / annual_h2_kg)
}

/// Roll physical results up into cost metrics.
///
/// `annual_h2_kg` is passed separately so the dispatch simulator can use
/// its own (curtailment-aware) production instead of the naive daily
/// average in `energy`.
pub fn roll_up(
    energy: &EnergyResult,
    annual_h2_kg: f64,
    install: &InstallationConfig,
    costs: &CostAssumptions,
) -> EstimatorResult<FinancialResult> {
    install.validate()?;
    costs.validate()?;

    let (renewable_capex, infrastructure_capex, electrolyzer_capex) =
        capex_breakdown(energy.solar_power_kw, energy.wind_power_kw, install, costs);
    let total_capex = require_finite_result(
        "total_capex",
        renewable_capex + infrastructure_capex + electrolyzer_capex,
    )?;
    if total_capex <= 0.0 {
        return Err(EstimatorError::invalid_result(
            "total_capex",
            "total CAPEX must be positive to compute returns",
        ));
    }

    let crf = capital_recovery_factor(costs.discount_rate, costs.project_lifetime_years)?;
    let capex_annualized = require_finite_result("capex_annualized", total_capex * crf)?;
    let opex_annual = require_finite_result(
        "opex_annual",
        total_capex * costs.opex_fraction_of_capex + annual_h2_kg * costs.water_cost_per_kg_h2,
    )?;
    let lcoh_per_kg = require_finite_result(
        "lcoh_per_kg",
        levelized_cost(capex_annualized, opex_annual, annual_h2_kg)?,
    )?;

    let annual_revenue =
        require_finite_result("annual_revenue", annual_h2_kg * costs.h2_sale_price_per_kg)?;
    let annual_net_cash_flow =
        require_finite_result("annual_net_cash_flow", annual_revenue - opex_annual)?;
    let roi_pct = require_finite_result("roi_pct", annual_net_cash_flow / total_capex * 100.0)?;
    let payback_years = if annual_net_cash_flow > 0.0 {
        Some(require_finite_result(
            "payback_years",
            total_capex / annual_net_cash_flow,
        )?)
    } else {
        None
    };

    Ok(FinancialResult {
        renewable_capex,
        infrastructure_capex,
        electrolyzer_capex,
        total_capex,
        capital_recovery_factor: crf,
        capex_annualized,
        opex_annual,
        lcoh_per_kg,
        annual_h2_kg,
        annual_revenue,
        annual_net_cash_flow,
        roi_pct,
        payback_years,
    })
}

use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_MIN_OPERATING_LOAD_FRACTION, DEFAULT_WIND_CAPACITY_FACTOR, MAX_DISCOUNT_RATE,
    MAX_PROJECT_LIFETIME_YEARS,
};
use super::error::{
    require_fraction, require_non_negative, require_positive, require_unit_interval,
    EstimatorError, EstimatorResult,
};

/// Physical layout of a renewable-to-hydrogen installation
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallationConfig {
    /// Project size multiplier applied to panel and swept areas
    pub scale_factor: f64,
    /// PV panel area per unit (m²)
    pub solar_panel_area_per_unit_m2: f64,
    /// PV conversion efficiency (0-1)
    pub solar_efficiency: f64,
    /// Rotor swept area per unit (m²)
    pub wind_swept_area_per_unit_m2: f64,
    /// Turbine conversion efficiency (0-1)
    pub wind_efficiency: f64,
    /// Discount applied to the cubic-law wind power because the input speed
    /// is a long-run mean, not an instantaneous value (0-1)
    #[serde(default = "default_wind_capacity_factor")]
    pub wind_capacity_factor: f64,
    /// Electrolyzer rated input power (kW)
    pub electrolyzer_nominal_power_kw: f64,
    /// Turn-down floor as a fraction of nominal power (0-1)
    #[serde(default = "default_min_operating_load_fraction")]
    pub min_operating_load_fraction: f64,
}

fn default_wind_capacity_factor() -> f64 {
    DEFAULT_WIND_CAPACITY_FACTOR
}

fn default_min_operating_load_fraction() -> f64 {
    DEFAULT_MIN_OPERATING_LOAD_FRACTION
}

impl InstallationConfig {
    pub fn solar_panel_area_m2(&self) -> f64 {
        self.solar_panel_area_per_unit_m2 * self.scale_factor
    }

    pub fn wind_swept_area_m2(&self) -> f64 {
        self.wind_swept_area_per_unit_m2 * self.scale_factor
    }

    /// Electrolyzer power below which it stays off (kW)
    pub fn min_operating_power_kw(&self) -> f64 {
        self.electrolyzer_nominal_power_kw * self.min_operating_load_fraction
    }

    /// Same installation with a different project size
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Validate the physical parameters
    pub fn validate(&self) -> EstimatorResult<()> {
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(EstimatorError::invalid_input(
                "scale_factor",
                format!("{} must be greater than zero", self.scale_factor),
            ));
        }
        require_positive("solar_panel_area_per_unit_m2", self.solar_panel_area_per_unit_m2)?;
        require_fraction("solar_efficiency", self.solar_efficiency)?;
        require_positive("wind_swept_area_per_unit_m2", self.wind_swept_area_per_unit_m2)?;
        require_fraction("wind_efficiency", self.wind_efficiency)?;
        require_fraction("wind_capacity_factor", self.wind_capacity_factor)?;
        require_positive("electrolyzer_nominal_power_kw", self.electrolyzer_nominal_power_kw)?;
        require_unit_interval("min_operating_load_fraction", self.min_operating_load_fraction)?;
        Ok(())
    }
}

/// Cost, tariff and conversion assumptions (monetary values in R$)
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostAssumptions {
    /// R$ per kW of average solar power
    pub solar_capex_per_kw: f64,
    /// R$ per kW of average wind power
    pub wind_capex_per_kw: f64,
    /// R$ per kW of electrolyzer nominal power
    pub electrolyzer_capex_per_kw: f64,
    /// Infrastructure cost as a fraction of the solar+wind CAPEX
    pub infrastructure_multiplier: f64,
    pub project_lifetime_years: u32,
    pub discount_rate: f64,
    /// Yearly OPEX as a fraction of total CAPEX
    pub opex_fraction_of_capex: f64,
    /// R$ of water per kg of hydrogen produced
    pub water_cost_per_kg_h2: f64,
    /// Electrolyzer specific consumption (kWh/kg H2)
    pub electrolyzer_consumption_kwh_per_kg: f64,
    /// Balance-of-plant efficiency between generation and electrolyzer (0-1)
    pub system_efficiency: f64,
    /// Sale price used for ROI and payback (R$/kg)
    pub h2_sale_price_per_kg: f64,
}

impl CostAssumptions {
    /// Conversion parameters only; used by the energy and dispatch passes
    pub fn validate_conversion(&self) -> EstimatorResult<()> {
        require_positive(
            "electrolyzer_consumption_kwh_per_kg",
            self.electrolyzer_consumption_kwh_per_kg,
        )?;
        require_fraction("system_efficiency", self.system_efficiency)?;
        Ok(())
    }

    pub fn validate(&self) -> EstimatorResult<()> {
        self.validate_conversion()?;
        require_non_negative("solar_capex_per_kw", self.solar_capex_per_kw)?;
        require_non_negative("wind_capex_per_kw", self.wind_capex_per_kw)?;
        require_non_negative("electrolyzer_capex_per_kw", self.electrolyzer_capex_per_kw)?;
        require_non_negative("infrastructure_multiplier", self.infrastructure_multiplier)?;
        if !(1..=MAX_PROJECT_LIFETIME_YEARS).contains(&self.project_lifetime_years) {
            return Err(EstimatorError::invalid_input(
                "project_lifetime_years",
                format!(
                    "{} is outside 1..={MAX_PROJECT_LIFETIME_YEARS}",
                    self.project_lifetime_years
                ),
            ));
        }
        require_non_negative("discount_rate", self.discount_rate)?;
        if self.discount_rate > MAX_DISCOUNT_RATE {
            return Err(EstimatorError::invalid_input(
                "discount_rate",
                format!("{} exceeds {MAX_DISCOUNT_RATE}", self.discount_rate),
            ));
        }
        require_non_negative("opex_fraction_of_capex", self.opex_fraction_of_capex)?;
        require_non_negative("water_cost_per_kg_h2", self.water_cost_per_kg_h2)?;
        require_non_negative("h2_sale_price_per_kg", self.h2_sale_price_per_kg)?;
        Ok(())
    }
}

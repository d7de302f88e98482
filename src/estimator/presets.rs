//! Named parameter sets.
//!
//! Each preset is a complete, immutable set of installation and cost
//! constants. Computations never read literals of their own; they take a
//! [`ParameterSet`] (or its parts) as an argument.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use super::constants::DEFAULT_MIN_OPERATING_LOAD_FRACTION;
use super::params::{CostAssumptions, InstallationConfig};

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModelPreset {
    /// Typical utility-scale assumptions, 30 % wind capacity factor
    #[default]
    Reference,
    /// Lower efficiencies, 20 % wind capacity factor, higher costs
    Conservative,
    /// Best-in-class equipment and cheaper CAPEX
    Optimistic,
}

/// Complete set of inputs besides the climate
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub preset: ModelPreset,
    pub installation: InstallationConfig,
    pub costs: CostAssumptions,
}

impl ParameterSet {
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.installation.scale_factor = scale_factor;
        self
    }

    pub fn with_sale_price(mut self, price_per_kg: f64) -> Self {
        self.costs.h2_sale_price_per_kg = price_per_kg;
        self
    }
}

impl ModelPreset {
    pub fn all() -> Vec<ModelPreset> {
        ModelPreset::iter().collect()
    }

    pub fn parameters(self) -> ParameterSet {
        match self {
            ModelPreset::Reference => ParameterSet {
                preset: self,
                installation: InstallationConfig {
                    scale_factor: 1.0,
                    solar_panel_area_per_unit_m2: 1000.0,
                    solar_efficiency: 0.20,
                    wind_swept_area_per_unit_m2: 314.0,
                    wind_efficiency: 0.40,
                    wind_capacity_factor: 0.30,
                    electrolyzer_nominal_power_kw: 100.0,
                    min_operating_load_fraction: DEFAULT_MIN_OPERATING_LOAD_FRACTION,
                },
                costs: CostAssumptions {
                    solar_capex_per_kw: 4_500.0,
                    wind_capex_per_kw: 6_500.0,
                    electrolyzer_capex_per_kw: 8_000.0,
                    infrastructure_multiplier: 0.15,
                    project_lifetime_years: 20,
                    discount_rate: 0.10,
                    opex_fraction_of_capex: 0.02,
                    water_cost_per_kg_h2: 0.05,
                    electrolyzer_consumption_kwh_per_kg: 55.0,
                    system_efficiency: 0.70,
                    h2_sale_price_per_kg: 25.0,
                },
            },
            ModelPreset::Conservative => ParameterSet {
                preset: self,
                installation: InstallationConfig {
                    scale_factor: 1.0,
                    solar_panel_area_per_unit_m2: 1000.0,
                    solar_efficiency: 0.18,
                    wind_swept_area_per_unit_m2: 314.0,
                    wind_efficiency: 0.35,
                    wind_capacity_factor: 0.20,
                    electrolyzer_nominal_power_kw: 100.0,
                    min_operating_load_fraction: 0.25,
                },
                costs: CostAssumptions {
                    solar_capex_per_kw: 5_200.0,
                    wind_capex_per_kw: 7_500.0,
                    electrolyzer_capex_per_kw: 10_000.0,
                    infrastructure_multiplier: 0.20,
                    project_lifetime_years: 20,
                    discount_rate: 0.12,
                    opex_fraction_of_capex: 0.03,
                    water_cost_per_kg_h2: 0.08,
                    electrolyzer_consumption_kwh_per_kg: 58.0,
                    system_efficiency: 0.65,
                    h2_sale_price_per_kg: 20.0,
                },
            },
            ModelPreset::Optimistic => ParameterSet {
                preset: self,
                installation: InstallationConfig {
                    scale_factor: 1.0,
                    solar_panel_area_per_unit_m2: 1000.0,
                    solar_efficiency: 0.22,
                    wind_swept_area_per_unit_m2: 314.0,
                    wind_efficiency: 0.45,
                    wind_capacity_factor: 0.30,
                    electrolyzer_nominal_power_kw: 100.0,
                    min_operating_load_fraction: 0.10,
                },
                costs: CostAssumptions {
                    solar_capex_per_kw: 3_800.0,
                    wind_capex_per_kw: 5_500.0,
                    electrolyzer_capex_per_kw: 6_000.0,
                    infrastructure_multiplier: 0.10,
                    project_lifetime_years: 25,
                    discount_rate: 0.08,
                    opex_fraction_of_capex: 0.015,
                    water_cost_per_kg_h2: 0.04,
                    electrolyzer_consumption_kwh_per_kg: 50.0,
                    system_efficiency: 0.75,
                    h2_sale_price_per_kg: 30.0,
                },
            },
        }
    }
}

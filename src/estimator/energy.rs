//! # Power & Energy Calculator
//!
//! Turns site climate averages and an installation layout into average
//! power, integrated energy and hydrogen mass.
//!
//! Solar input is already daily-integrated (kWh/m²/day), so the daily
//! energy is `irradiance × area × efficiency` and the average power is that
//! figure divided by 24. Wind uses the cubic law on the mean speed and then
//! an explicit capacity-factor discount, because a long-run mean speed fed
//! straight into `v³` does not describe the turbine's average output.

use serde::{Deserialize, Serialize};

use super::constants::{
    AIR_DENSITY_KG_M3, DAYS_PER_YEAR, HOURS_PER_DAY, KG_PER_TONNE, W_PER_KW,
};
use super::error::EstimatorResult;
use super::params::{CostAssumptions, InstallationConfig};
use crate::climate::SiteClimate;

/// Derived production figures for one site and installation
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyResult {
    /// Average solar power (kW)
    pub solar_power_kw: f64,
    /// Cubic-law wind power before the capacity-factor discount (kW)
    pub wind_peak_power_kw: f64,
    /// Average wind power after the capacity-factor discount (kW)
    pub wind_power_kw: f64,
    pub total_power_kw: f64,
    pub daily_solar_energy_kwh: f64,
    pub daily_wind_energy_kwh: f64,
    pub daily_energy_kwh: f64,
    pub annual_energy_kwh: f64,
    pub daily_h2_kg: f64,
    pub annual_h2_tonnes: f64,
}

impl EnergyResult {
    pub fn annual_h2_kg(&self) -> f64 {
        self.annual_h2_tonnes * KG_PER_TONNE
    }
}

/// Daily solar energy (kWh/day) for a daily-integrated irradiance
pub fn daily_solar_energy_kwh(irradiance_kwh_m2_day: f64, install: &InstallationConfig) -> f64 {
    irradiance_kwh_m2_day * install.solar_panel_area_m2() * install.solar_efficiency
}

/// Cubic-law wind power (kW), no capacity-factor discount
pub fn wind_peak_power_kw(wind_speed_ms: f64, install: &InstallationConfig) -> f64 {
    0.5 * AIR_DENSITY_KG_M3
        * install.wind_swept_area_m2()
        * wind_speed_ms.powi(3)
        * install.wind_efficiency
        / W_PER_KW
}

/// Average wind power (kW) after the capacity-factor discount
pub fn wind_power_kw(wind_speed_ms: f64, install: &InstallationConfig) -> f64 {
    wind_peak_power_kw(wind_speed_ms, install) * install.wind_capacity_factor
}

/// Compute power, energy and hydrogen production for a site.
pub fn compute_energy(
    climate: &SiteClimate,
    install: &InstallationConfig,
    costs: &CostAssumptions,
) -> EstimatorResult<EnergyResult> {
    climate.validate()?;
    install.validate()?;
    costs.validate_conversion()?;

    let daily_solar_energy_kwh =
        daily_solar_energy_kwh(climate.solar_irradiance_kwh_m2_day, install);
    let solar_power_kw = daily_solar_energy_kwh / HOURS_PER_DAY;

    let wind_peak_power_kw = wind_peak_power_kw(climate.wind_speed_ms, install);
    let wind_power_kw = wind_peak_power_kw * install.wind_capacity_factor;
    let daily_wind_energy_kwh = wind_power_kw * HOURS_PER_DAY;

    let daily_energy_kwh = daily_solar_energy_kwh + daily_wind_energy_kwh;
    let annual_energy_kwh = daily_energy_kwh * DAYS_PER_YEAR;

    let usable_energy_kwh = daily_energy_kwh * costs.system_efficiency;
    let daily_h2_kg = usable_energy_kwh / costs.electrolyzer_consumption_kwh_per_kg;
    let annual_h2_tonnes = daily_h2_kg * DAYS_PER_YEAR / KG_PER_TONNE;

    Ok(EnergyResult {
        solar_power_kw,
        wind_peak_power_kw,
        wind_power_kw,
        total_power_kw: solar_power_kw + wind_power_kw,
        daily_solar_energy_kwh,
        daily_wind_energy_kwh,
        daily_energy_kwh,
        annual_energy_kwh,
        daily_h2_kg,
        annual_h2_tonnes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::error::EstimatorError;
    use crate::estimator::presets::ModelPreset;
    use rstest::rstest;

    fn example_install() -> InstallationConfig {
        InstallationConfig {
            scale_factor: 1.0,
            solar_panel_area_per_unit_m2: 1000.0,
            solar_efficiency: 0.20,
            wind_swept_area_per_unit_m2: 314.0,
            wind_efficiency: 0.40,
            wind_capacity_factor: 0.30,
            electrolyzer_nominal_power_kw: 100.0,
            min_operating_load_fraction: 0.20,
        }
    }

    fn example_costs() -> CostAssumptions {
        ModelPreset::Reference.parameters().costs
    }

    #[test]
    fn test_solar_example() {
        let result = compute_energy(
            &SiteClimate::new(5.0, 6.0),
            &example_install(),
            &example_costs(),
        )
        .unwrap();

        // 5.0 kWh/m²/day × 1000 m² × 0.20 = 1000 kWh/day, not re-multiplied by 24
        assert!((result.daily_solar_energy_kwh - 1000.0).abs() < 1e-9);
        assert!((result.solar_power_kw - 41.666_666_666).abs() < 1e-6);
    }

    #[test]
    fn test_wind_example() {
        let result = compute_energy(
            &SiteClimate::new(5.0, 6.0),
            &example_install(),
            &example_costs(),
        )
        .unwrap();

        // 0.5 × 1.225 × 314 × 6³ × 0.40 = 16 616.88 W
        assert!((result.wind_peak_power_kw - 16.61688).abs() < 1e-9);
        assert!((result.wind_power_kw - 16.61688 * 0.30).abs() < 1e-9);
    }

    #[test]
    fn test_energy_identities() {
        let result = compute_energy(
            &SiteClimate::new(5.5, 7.2),
            &example_install(),
            &example_costs(),
        )
        .unwrap();

        assert_eq!(
            result.daily_energy_kwh,
            result.daily_solar_energy_kwh + result.daily_wind_energy_kwh
        );
        assert_eq!(result.annual_energy_kwh, result.daily_energy_kwh * 365.0);
        assert_eq!(
            result.total_power_kw,
            result.solar_power_kw + result.wind_power_kw
        );
    }

    #[test]
    fn test_hydrogen_mass() {
        let costs = example_costs();
        let result =
            compute_energy(&SiteClimate::new(5.0, 6.0), &example_install(), &costs).unwrap();

        let expected_daily =
            result.daily_energy_kwh * costs.system_efficiency / costs.electrolyzer_consumption_kwh_per_kg;
        assert!((result.daily_h2_kg - expected_daily).abs() < 1e-9);
        assert!((result.annual_h2_tonnes - expected_daily * 365.0 / 1000.0).abs() < 1e-9);
        assert!((result.annual_h2_kg() - expected_daily * 365.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_wind_is_zero_not_nan() {
        let result = compute_energy(
            &SiteClimate::new(5.0, 0.0),
            &example_install(),
            &example_costs(),
        )
        .unwrap();

        assert_eq!(result.wind_power_kw, 0.0);
        assert_eq!(result.wind_peak_power_kw, 0.0);
        assert!(result.daily_energy_kwh.is_finite());
    }

    #[test]
    fn test_scale_factor_is_linear() {
        let climate = SiteClimate::new(5.0, 6.0);
        let base = compute_energy(&climate, &example_install(), &example_costs()).unwrap();
        let scaled = compute_energy(
            &climate,
            &example_install().with_scale_factor(4.0),
            &example_costs(),
        )
        .unwrap();

        assert!((scaled.solar_power_kw - base.solar_power_kw * 4.0).abs() < 1e-9);
        assert!((scaled.wind_power_kw - base.wind_power_kw * 4.0).abs() < 1e-9);
    }

    #[rstest]
    #[case(SiteClimate::new(-1.0, 6.0), "solar_irradiance_kwh_m2_day")]
    #[case(SiteClimate::new(5.0, -0.1), "wind_speed_ms")]
    #[case(SiteClimate::new(f64::NAN, 6.0), "solar_irradiance_kwh_m2_day")]
    fn test_invalid_climate_rejected(#[case] climate: SiteClimate, #[case] field: &str) {
        let err = compute_energy(&climate, &example_install(), &example_costs()).unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidInput { .. }));
        assert_eq!(err.field(), Some(field));
    }

    #[rstest]
    #[case::zero_scale(|i: &mut InstallationConfig| i.scale_factor = 0.0, "scale_factor")]
    #[case::negative_scale(|i: &mut InstallationConfig| i.scale_factor = -2.0, "scale_factor")]
    #[case::zero_area(|i: &mut InstallationConfig| i.solar_panel_area_per_unit_m2 = 0.0, "solar_panel_area_per_unit_m2")]
    #[case::zero_swept(|i: &mut InstallationConfig| i.wind_swept_area_per_unit_m2 = 0.0, "wind_swept_area_per_unit_m2")]
    #[case::solar_eff(|i: &mut InstallationConfig| i.solar_efficiency = 1.5, "solar_efficiency")]
    #[case::wind_eff(|i: &mut InstallationConfig| i.wind_efficiency = 0.0, "wind_efficiency")]
    #[case::wind_cf(|i: &mut InstallationConfig| i.wind_capacity_factor = 0.0, "wind_capacity_factor")]
    fn test_invalid_installation_rejected(
        #[case] mutate: fn(&mut InstallationConfig),
        #[case] field: &str,
    ) {
        let mut install = example_install();
        mutate(&mut install);
        let err = compute_energy(&SiteClimate::new(5.0, 6.0), &install, &example_costs())
            .unwrap_err();
        assert_eq!(err.field(), Some(field));
    }

    #[test]
    fn test_idempotent() {
        let climate = SiteClimate::new(5.3, 6.7);
        let a = compute_energy(&climate, &example_install(), &example_costs()).unwrap();
        let b = compute_energy(&climate, &example_install(), &example_costs()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.annual_h2_tonnes.to_bits(), b.annual_h2_tonnes.to_bits());
    }
}

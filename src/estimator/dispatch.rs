//! # Hourly Dispatch Simulator
//!
//! Walks a daily climate series hour by hour and decides how much power the
//! electrolyzer draws, instead of trusting the daily-average energy figure.
//!
//! ## Model
//!
//! - Solar: the day's energy is spread evenly over a fixed 12-hour window
//!   (06:00-18:00).
//! - Wind: the day's average power (after the capacity-factor discount) is
//!   available in every one of the 24 hours.
//! - Available power is scaled by the system efficiency.
//!
//! ## Dispatch policy
//!
//! | Available power              | Electrolyzer draw | Curtailment          |
//! |------------------------------|-------------------|----------------------|
//! | `>= nominal`                 | nominal           | `available - nominal`|
//! | `>= nominal × min_load`      | available         | 0                    |
//! | below the floor              | off               | not tracked          |
//!
//! Hours run in chronological order within each day; days run in input
//! order.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::constants::{HOURS_PER_DAY, SOLAR_WINDOW_END_HOUR, SOLAR_WINDOW_HOURS, SOLAR_WINDOW_START_HOUR};
use super::energy::{daily_solar_energy_kwh, wind_power_kw};
use super::error::{EstimatorError, EstimatorResult};
use super::params::{CostAssumptions, InstallationConfig};
use crate::climate::DailyClimateSample;

/// Electrolyzer operating mode for a single hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    /// Running at nominal power, surplus curtailed
    Full,
    /// Running between the turn-down floor and nominal power
    Partial,
    Off,
}

/// Result of dispatching one hour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyDispatch {
    pub mode: OperatingMode,
    /// Energy drawn by the electrolyzer during the hour (kWh)
    pub consumed_kwh: f64,
    /// Surplus above nominal power (kWh)
    pub curtailed_kwh: f64,
}

/// Apply the dispatch thresholds to the power available in one hour.
pub fn dispatch_hour(available_kw: f64, nominal_kw: f64, min_load_fraction: f64) -> HourlyDispatch {
    if available_kw >= nominal_kw {
        HourlyDispatch {
            mode: OperatingMode::Full,
            consumed_kwh: nominal_kw,
            curtailed_kwh: available_kw - nominal_kw,
        }
    } else if available_kw >= nominal_kw * min_load_fraction {
        HourlyDispatch {
            mode: OperatingMode::Partial,
            consumed_kwh: available_kw,
            curtailed_kwh: 0.0,
        }
    } else {
        HourlyDispatch {
            mode: OperatingMode::Off,
            consumed_kwh: 0.0,
            curtailed_kwh: 0.0,
        }
    }
}

/// Whether `hour` (0-23) falls inside the solar production window
pub fn in_solar_window(hour: u32) -> bool {
    (SOLAR_WINDOW_START_HOUR..SOLAR_WINDOW_END_HOUR).contains(&hour)
}

/// Physical outcome of a dispatch run, before any costing
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub days_simulated: usize,
    /// Samples skipped because irradiance or wind was invalid
    pub dropped_samples: usize,
    pub total_hours: u32,
    pub total_energy_consumed_kwh: f64,
    pub curtailment_kwh: f64,
    pub operating_hours: u32,
    pub h2_production_kg: f64,
    /// Share of nominal energy actually drawn (0-100)
    pub capacity_factor_pct: f64,
}

/// Run the hourly dispatch over a daily series.
///
/// Invalid samples are dropped with a warning; an empty or all-invalid
/// series is an error.
pub fn simulate_dispatch(
    samples: &[DailyClimateSample],
    install: &InstallationConfig,
    costs: &CostAssumptions,
) -> EstimatorResult<DispatchOutcome> {
    install.validate()?;
    costs.validate_conversion()?;

    if samples.is_empty() {
        return Err(EstimatorError::InsufficientData(
            "climate series is empty".to_string(),
        ));
    }

    let nominal_kw = install.electrolyzer_nominal_power_kw;
    let min_load = install.min_operating_load_fraction;

    let mut days_simulated = 0usize;
    let mut dropped_samples = 0usize;
    let mut total_energy_consumed_kwh = 0.0;
    let mut curtailment_kwh = 0.0;
    let mut operating_hours = 0u32;

    for sample in samples {
        if !sample.is_usable() {
            warn!(
                date = %sample.date,
                solar_irradiance = sample.solar_irradiance_kwh_m2_day,
                wind_speed = sample.wind_speed_ms,
                "dropping climate sample with invalid irradiance or wind speed"
            );
            dropped_samples += 1;
            continue;
        }

        let solar_per_hour_kw =
            daily_solar_energy_kwh(sample.solar_irradiance_kwh_m2_day, install) / SOLAR_WINDOW_HOURS;
        let wind_kw = wind_power_kw(sample.wind_speed_ms, install);

        for hour in 0..HOURS_PER_DAY as u32 {
            let solar_kw = if in_solar_window(hour) { solar_per_hour_kw } else { 0.0 };
            let available_kw = (solar_kw + wind_kw) * costs.system_efficiency;

            let step = dispatch_hour(available_kw, nominal_kw, min_load);
            total_energy_consumed_kwh += step.consumed_kwh;
            curtailment_kwh += step.curtailed_kwh;
            if step.mode != OperatingMode::Off {
                operating_hours += 1;
            }
        }
        days_simulated += 1;
    }

    if days_simulated == 0 {
        return Err(EstimatorError::InsufficientData(format!(
            "all {dropped_samples} climate samples were invalid"
        )));
    }

    let total_hours = days_simulated as u32 * HOURS_PER_DAY as u32;
    let capacity_factor_pct = total_energy_consumed_kwh / (nominal_kw * total_hours as f64) * 100.0;
    let h2_production_kg = total_energy_consumed_kwh / costs.electrolyzer_consumption_kwh_per_kg;

    debug!(
        days_simulated,
        dropped_samples,
        operating_hours,
        capacity_factor_pct,
        curtailment_kwh,
        "dispatch simulation finished"
    );

    Ok(DispatchOutcome {
        days_simulated,
        dropped_samples,
        total_hours,
        total_energy_consumed_kwh,
        curtailment_kwh,
        operating_hours,
        h2_production_kg,
        capacity_factor_pct,
    })
}

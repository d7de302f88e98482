//! Descriptive statistics over a daily climate series

use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};

use super::sample::DailyClimateSample;
use crate::estimator::constants::PV_PERFORMANCE_RATIO;
use crate::estimator::error::{EstimatorError, EstimatorResult};

/// Precipitation above which a day counts as rainy (mm)
pub const RAINY_DAY_THRESHOLD_MM: f64 = 1.0;
/// Irradiance from which a day counts as sunny (kWh/m²/day)
pub const SUNNY_DAY_THRESHOLD_KWH_M2: f64 = 5.0;

const DAYS_PER_MONTH: f64 = 30.0;

/// Summary of a daily series.
///
/// Temperature and humidity figures cover only the samples that report
/// them and are `None` when no sample does.
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateStatistics {
    pub data_points: usize,
    pub avg_temperature_c: Option<f64>,
    pub max_temperature_c: Option<f64>,
    pub min_temperature_c: Option<f64>,
    pub temperature_std_dev: Option<f64>,
    pub avg_humidity_percent: Option<f64>,
    pub avg_wind_speed_ms: f64,
    pub max_wind_speed_ms: f64,
    pub wind_speed_std_dev: f64,
    /// Sum over the days that report precipitation
    pub total_precipitation_mm: f64,
    pub rainy_days: usize,
    pub sunny_days: usize,
    pub avg_solar_irradiance_kwh_m2_day: f64,
    /// Expected daily yield of 1 kWp of PV (kWh)
    pub daily_yield_per_kwp_kwh: f64,
    /// Same, over a 30-day month
    pub monthly_yield_per_kwp_kwh: f64,
}

/// Mean and population standard deviation; `None` for an empty slice
fn mean_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance.sqrt()))
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    match values.iter().copied().minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some((v, v)),
        MinMaxResult::MinMax(lo, hi) => Some((lo, hi)),
    }
}

/// Finite values of an optional observation
fn observed(
    samples: &[&DailyClimateSample],
    field: fn(&DailyClimateSample) -> Option<f64>,
) -> Vec<f64> {
    samples
        .iter()
        .filter_map(|s| field(s))
        .filter(|v| v.is_finite())
        .collect()
}

impl ClimateStatistics {
    /// Summarize the usable samples of a series.
    pub fn from_samples(samples: &[DailyClimateSample]) -> EstimatorResult<Self> {
        let usable: Vec<&DailyClimateSample> = samples.iter().filter(|s| s.is_usable()).collect();
        let winds: Vec<f64> = usable.iter().map(|s| s.wind_speed_ms).collect();
        let (Some((avg_wind_speed_ms, wind_speed_std_dev)), Some((_, max_wind_speed_ms))) =
            (mean_std(&winds), min_max(&winds))
        else {
            return Err(EstimatorError::InsufficientData(
                "no usable daily samples to summarize".to_string(),
            ));
        };

        let temps = observed(&usable, |s| s.temperature_c);
        let humidity = observed(&usable, |s| s.humidity_percent);
        let precipitation = observed(&usable, |s| s.precipitation_mm);
        let solar: Vec<f64> = usable.iter().map(|s| s.solar_irradiance_kwh_m2_day).collect();

        let temperature = mean_std(&temps);
        let temperature_range = min_max(&temps);
        let avg_solar_irradiance_kwh_m2_day = solar.iter().sum::<f64>() / solar.len() as f64;

        let rainy_days = precipitation
            .iter()
            .filter(|p| **p > RAINY_DAY_THRESHOLD_MM)
            .count();
        let sunny_days = solar
            .iter()
            .filter(|v| **v >= SUNNY_DAY_THRESHOLD_KWH_M2)
            .count();

        let daily_yield_per_kwp_kwh = avg_solar_irradiance_kwh_m2_day * PV_PERFORMANCE_RATIO;

        Ok(Self {
            data_points: usable.len(),
            avg_temperature_c: temperature.map(|(mean, _)| mean),
            max_temperature_c: temperature_range.map(|(_, hi)| hi),
            min_temperature_c: temperature_range.map(|(lo, _)| lo),
            temperature_std_dev: temperature.map(|(_, std)| std),
            avg_humidity_percent: mean_std(&humidity).map(|(mean, _)| mean),
            avg_wind_speed_ms,
            max_wind_speed_ms,
            wind_speed_std_dev,
            total_precipitation_mm: precipitation.iter().sum(),
            rainy_days,
            sunny_days,
            avg_solar_irradiance_kwh_m2_day,
            daily_yield_per_kwp_kwh,
            monthly_yield_per_kwp_kwh: daily_yield_per_kwp_kwh * DAYS_PER_MONTH,
        })
    }
}

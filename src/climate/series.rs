//! NASA POWER daily series reshaping
//!
//! The daily point endpoint returns one `YYYYMMDD -> value` map per
//! parameter, with `-999` marking missing data. This module turns those maps
//! into [`DailyClimateSample`]s and period averages. Fetching is left to the
//! caller.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::sample::{DailyClimateSample, SiteClimate};
use crate::estimator::error::{EstimatorError, EstimatorResult};

/// Fill value used by NASA POWER for missing observations
pub const MISSING_VALUE: f64 = -999.0;

const DATE_FORMAT: &str = "%Y%m%d";

/// Top-level NASA POWER response (only the parts we read)
#[derive(Debug, Clone, Deserialize)]
pub struct PowerResponse {
    pub properties: PowerProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PowerProperties {
    pub parameter: PowerDailyParameters,
}

/// `properties.parameter` of a daily NASA POWER response
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerDailyParameters {
    /// All-sky surface shortwave downward irradiance (kWh/m²/day)
    #[serde(rename = "ALLSKY_SFC_SW_DWN", default)]
    pub solar_irradiance: BTreeMap<String, f64>,
    /// Wind speed at 10 m (m/s)
    #[serde(rename = "WS10M", default)]
    pub wind_speed: BTreeMap<String, f64>,
    /// Temperature at 2 m (°C)
    #[serde(rename = "T2M", default)]
    pub temperature: BTreeMap<String, f64>,
    /// Relative humidity at 2 m (%)
    #[serde(rename = "RH2M", default)]
    pub humidity: BTreeMap<String, f64>,
    /// Corrected precipitation (mm/day)
    #[serde(rename = "PRECTOTCORR", default)]
    pub precipitation: BTreeMap<String, f64>,
}

/// Period averages over valid values only
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateAverages {
    pub solar_irradiance_kwh_m2_day: f64,
    pub wind_speed_ms: f64,
    pub temperature_c: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub total_precipitation_mm: f64,
}

/// Reshaped series plus its averages
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateSummary {
    /// Number of days with a valid irradiance value
    pub days_analyzed: usize,
    pub averages: ClimateAverages,
    pub daily: Vec<DailyClimateSample>,
}

impl ClimateSummary {
    /// Averages plus the daily profile, ready for the estimator
    pub fn site_climate(&self) -> SiteClimate {
        SiteClimate {
            solar_irradiance_kwh_m2_day: self.averages.solar_irradiance_kwh_m2_day,
            wind_speed_ms: self.averages.wind_speed_ms,
            daily: self.daily.clone(),
        }
    }
}

pub fn is_valid(value: f64) -> bool {
    value.is_finite() && value > MISSING_VALUE
}

fn valid_values(map: &BTreeMap<String, f64>) -> Vec<f64> {
    map.values().copied().filter(|v| is_valid(*v)).collect()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

impl PowerResponse {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

impl PowerDailyParameters {
    /// Filter missing values and build the daily profile.
    ///
    /// A day is kept only when both irradiance and wind speed are present.
    /// Missing temperature and humidity fall back to the period average;
    /// missing precipitation stays absent.
    pub fn summarize(&self) -> EstimatorResult<ClimateSummary> {
        let solar_values = valid_values(&self.solar_irradiance);
        let wind_values = valid_values(&self.wind_speed);
        let temp_values = valid_values(&self.temperature);
        let humidity_values = valid_values(&self.humidity);
        let precip_values = valid_values(&self.precipitation);

        debug!(
            solar = solar_values.len(),
            wind = wind_values.len(),
            temperature = temp_values.len(),
            humidity = humidity_values.len(),
            precipitation = precip_values.len(),
            "valid NASA POWER data points"
        );

        let (Some(avg_solar), Some(avg_wind)) = (mean(&solar_values), mean(&wind_values)) else {
            return Err(EstimatorError::InsufficientData(
                "no valid irradiance or wind speed values for this location/period".to_string(),
            ));
        };
        let avg_temperature = mean(&temp_values);
        let avg_humidity = mean(&humidity_values);

        let mut daily = Vec::with_capacity(self.solar_irradiance.len());
        for (key, &solar) in &self.solar_irradiance {
            let Some(&wind) = self.wind_speed.get(key) else {
                continue;
            };
            if !is_valid(solar) || !is_valid(wind) {
                continue;
            }
            let date = match NaiveDate::parse_from_str(key, DATE_FORMAT) {
                Ok(d) => d,
                Err(e) => {
                    warn!(key = %key, error = %e, "skipping NASA POWER entry with malformed date");
                    continue;
                }
            };

            let pick = |map: &BTreeMap<String, f64>| {
                map.get(key).copied().filter(|v| is_valid(*v))
            };

            daily.push(DailyClimateSample {
                date,
                solar_irradiance_kwh_m2_day: solar,
                wind_speed_ms: wind,
                temperature_c: pick(&self.temperature).or(avg_temperature),
                humidity_percent: pick(&self.humidity).or(avg_humidity),
                precipitation_mm: pick(&self.precipitation),
            });
        }

        Ok(ClimateSummary {
            days_analyzed: solar_values.len(),
            averages: ClimateAverages {
                solar_irradiance_kwh_m2_day: avg_solar,
                wind_speed_ms: avg_wind,
                temperature_c: avg_temperature,
                humidity_percent: avg_humidity,
                total_precipitation_mm: precip_values.iter().sum(),
            },
            daily,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "type": "Feature",
        "properties": {
            "parameter": {
                "ALLSKY_SFC_SW_DWN": {"20240101": 5.0, "20240102": -999.0, "20240103": 6.0},
                "WS10M": {"20240101": 4.0, "20240102": 5.0, "20240103": 6.0},
                "T2M": {"20240101": 26.0, "20240102": 27.0, "20240103": -999.0},
                "RH2M": {"20240101": 70.0, "20240102": 80.0, "20240103": 75.0},
                "PRECTOTCORR": {"20240101": 2.5, "20240102": 0.0, "20240103": -999.0}
            }
        }
    }"#;

    #[test]
    fn test_summarize_filters_missing_values() {
        let response = PowerResponse::from_json(BODY).unwrap();
        let summary = response.properties.parameter.summarize().unwrap();

        assert_eq!(summary.days_analyzed, 2);
        assert_eq!(summary.daily.len(), 2);
        assert!((summary.averages.solar_irradiance_kwh_m2_day - 5.5).abs() < 1e-12);
        assert!((summary.averages.wind_speed_ms - 5.0).abs() < 1e-12);
        assert!((summary.averages.total_precipitation_mm - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_summarize_fills_gaps() {
        let response = PowerResponse::from_json(BODY).unwrap();
        let summary = response.properties.parameter.summarize().unwrap();

        let last = &summary.daily[1];
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        // T2M missing on the 3rd: average of 26 and 27
        assert!((last.temperature_c.unwrap() - 26.5).abs() < 1e-12);
        assert_eq!(last.humidity_percent, Some(75.0));
        assert_eq!(last.precipitation_mm, None);
    }

    #[test]
    fn test_parameter_absent_for_whole_period() {
        let mut params = PowerDailyParameters::default();
        params.solar_irradiance.insert("20240101".into(), 5.0);
        params.wind_speed.insert("20240101".into(), 4.0);

        let summary = params.summarize().unwrap();
        assert_eq!(summary.averages.temperature_c, None);
        assert_eq!(summary.daily[0].temperature_c, None);
        assert_eq!(summary.daily[0].humidity_percent, None);
    }

    #[test]
    fn test_daily_is_chronological() {
        let response = PowerResponse::from_json(BODY).unwrap();
        let summary = response.properties.parameter.summarize().unwrap();
        assert!(summary.daily.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_no_valid_solar_is_insufficient() {
        let mut params = PowerDailyParameters::default();
        params.solar_irradiance.insert("20240101".into(), MISSING_VALUE);
        params.wind_speed.insert("20240101".into(), 4.0);

        let err = params.summarize().unwrap_err();
        assert!(matches!(err, EstimatorError::InsufficientData(_)));
    }

    #[test]
    fn test_malformed_date_skipped() {
        let mut params = PowerDailyParameters::default();
        params.solar_irradiance.insert("2024-01-01".into(), 5.0);
        params.wind_speed.insert("2024-01-01".into(), 4.0);
        params.solar_irradiance.insert("20240102".into(), 5.0);
        params.wind_speed.insert("20240102".into(), 4.0);

        let summary = params.summarize().unwrap();
        assert_eq!(summary.daily.len(), 1);
    }

    #[test]
    fn test_site_climate_carries_daily() {
        let response = PowerResponse::from_json(BODY).unwrap();
        let summary = response.properties.parameter.summarize().unwrap();
        let climate = summary.site_climate();
        assert_eq!(climate.daily.len(), 2);
        assert_eq!(climate.wind_speed_ms, summary.averages.wind_speed_ms);
    }
}

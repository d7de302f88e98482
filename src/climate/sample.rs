use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::estimator::error::{require_non_negative, EstimatorError, EstimatorResult};

/// One day of climate observations for a site
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyClimateSample {
    pub date: NaiveDate,
    /// Daily-integrated global horizontal irradiance (kWh/m²/day)
    pub solar_irradiance_kwh_m2_day: f64,
    /// Mean wind speed (m/s)
    pub wind_speed_ms: f64,
    /// Mean air temperature (°C), when observed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    /// Relative humidity (%), when observed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity_percent: Option<f64>,
    /// Precipitation (mm/day), when observed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_mm: Option<f64>,
}

impl DailyClimateSample {
    /// Whether the sample can drive the energy model.
    ///
    /// Only irradiance and wind matter; temperature, humidity and
    /// precipitation are informational.
    pub fn is_usable(&self) -> bool {
        self.solar_irradiance_kwh_m2_day.is_finite()
            && self.solar_irradiance_kwh_m2_day >= 0.0
            && self.wind_speed_ms.is_finite()
            && self.wind_speed_ms >= 0.0
    }
}

/// Site climate averages, optionally with the daily series they came from
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteClimate {
    /// Mean daily-integrated irradiance (kWh/m²/day)
    pub solar_irradiance_kwh_m2_day: f64,
    /// Mean wind speed (m/s)
    pub wind_speed_ms: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub daily: Vec<DailyClimateSample>,
}

impl SiteClimate {
    pub fn new(solar_irradiance_kwh_m2_day: f64, wind_speed_ms: f64) -> Self {
        Self {
            solar_irradiance_kwh_m2_day,
            wind_speed_ms,
            daily: Vec::new(),
        }
    }

    /// Average the usable samples of a daily series.
    ///
    /// Unusable samples are ignored; the usable ones are kept in `daily`.
    pub fn from_samples(samples: &[DailyClimateSample]) -> EstimatorResult<Self> {
        let usable: Vec<DailyClimateSample> =
            samples.iter().filter(|s| s.is_usable()).cloned().collect();

        if usable.is_empty() {
            return Err(EstimatorError::InsufficientData(format!(
                "none of {} daily samples has valid irradiance and wind speed",
                samples.len()
            )));
        }

        let n = usable.len() as f64;
        let solar = usable
            .iter()
            .map(|s| s.solar_irradiance_kwh_m2_day)
            .sum::<f64>()
            / n;
        let wind = usable.iter().map(|s| s.wind_speed_ms).sum::<f64>() / n;

        Ok(Self {
            solar_irradiance_kwh_m2_day: solar,
            wind_speed_ms: wind,
            daily: usable,
        })
    }

    pub fn validate(&self) -> EstimatorResult<()> {
        require_non_negative("solar_irradiance_kwh_m2_day", self.solar_irradiance_kwh_m2_day)?;
        require_non_negative("wind_speed_ms", self.wind_speed_ms)?;
        Ok(())
    }
}

use std::str::FromStr;
use std::time::Instant;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use super::error::ApiError;
use super::health::{health_check, liveness_check};
use super::response::{success, ApiResponse};
use crate::{
    climate::{
        lookup_uf, ClimateStatistics, ClimateSummary, DailyClimateSample, PowerDailyParameters,
        PowerResponse, SiteClimate, StateInfo, STATES,
    },
    config::{EstimatorConfig, MAX_HORIZON_YEARS},
    estimator::{
        compute_energy, project, roll_up, simulate, CostAssumptions, EnergyResult,
        FeasibilityProjection, FinancialResult, InstallationConfig, ModelPreset, ParameterSet,
        SimulationResult,
    },
    state::AppState,
};

/// Longest daily series accepted in one request (about 100 years)
pub const MAX_SERIES_DAYS: u64 = 36_600;
/// Upper bound on one fully populated daily sample as compact JSON
pub const MAX_SAMPLE_JSON_BYTES: usize = 256;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(liveness_check))
        .route("/health", get(health_check))
        .route("/presets", get(list_presets))
        .route("/presets/:name", get(get_preset))
        .route("/estimate", post(estimate))
        .route("/simulate", post(simulate_series))
        .route("/feasibility", post(feasibility))
        .route("/climate/nasa-power", post(reshape_nasa_power))
        .route("/climate/statistics", post(climate_statistics))
        .route("/regions", get(list_regions))
        .route("/regions/:uf", get(get_region))
        .with_state(state)
}

/// Preset plus optional overrides, shared by the estimation endpoints
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ParameterOverrides {
    /// Falls back to the configured default preset
    pub preset: Option<ModelPreset>,
    /// Replaces the preset's installation block
    pub installation: Option<InstallationConfig>,
    /// Replaces the preset's cost block
    pub costs: Option<CostAssumptions>,
    #[validate(range(exclusive_min = 0.0))]
    pub scale_factor: Option<f64>,
}

impl ParameterOverrides {
    /// The named preset stays in `preset` even when blocks are replaced.
    fn resolve(self, cfg: &EstimatorConfig) -> ParameterSet {
        let mut params = cfg.parameters(self.preset);
        if let Some(installation) = self.installation {
            params.installation = installation;
        }
        if let Some(costs) = self.costs {
            params.costs = costs;
        }
        match self.scale_factor {
            Some(scale) => params.with_scale_factor(scale),
            None => params,
        }
    }
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Validate)]
pub struct EstimateRequest {
    pub climate: SiteClimate,
    #[serde(flatten)]
    #[validate(nested)]
    pub parameters: ParameterOverrides,
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub parameters: ParameterSet,
    pub energy: EnergyResult,
    pub financials: FinancialResult,
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Validate)]
pub struct SimulateRequest {
    #[validate(length(max = MAX_SERIES_DAYS))]
    pub samples: Vec<DailyClimateSample>,
    #[serde(flatten)]
    #[validate(nested)]
    pub parameters: ParameterOverrides,
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Validate)]
pub struct FeasibilityRequest {
    pub climate: SiteClimate,
    /// Defaults to the configured horizons
    #[validate(length(min = 1, max = 10))]
    pub horizons_years: Option<Vec<u32>>,
    #[serde(flatten)]
    #[validate(nested)]
    pub parameters: ParameterOverrides,
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Validate)]
pub struct StatisticsRequest {
    #[validate(length(max = MAX_SERIES_DAYS))]
    pub samples: Vec<DailyClimateSample>,
}

/// Either a whole NASA POWER response or just its `properties.parameter`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NasaPowerPayload {
    Response(PowerResponse),
    Parameters(PowerDailyParameters),
}

impl NasaPowerPayload {
    fn into_parameters(self) -> PowerDailyParameters {
        match self {
            NasaPowerPayload::Response(r) => r.properties.parameter,
            NasaPowerPayload::Parameters(p) => p,
        }
    }
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct RegionDetail {
    pub state: StateInfo,
    pub default_climate: SiteClimate,
}

fn parse_preset(name: &str) -> Result<ModelPreset, ApiError> {
    ModelPreset::from_str(name).map_err(|_| ApiError::NotFound(format!("preset `{name}`")))
}

#[cfg_attr(feature = "swagger", utoipa::path(
    get,
    path = "/api/v1/presets",
    responses((status = 200, description = "All presets with configured overrides applied"))
))]
pub async fn list_presets(State(st): State<AppState>) -> ApiResponse<Vec<ParameterSet>> {
    let presets: Vec<ParameterSet> = ModelPreset::all()
        .into_iter()
        .map(|p| st.cfg.estimator.parameters(Some(p)))
        .collect();
    let count = presets.len();
    success(presets).with_count(count)
}

#[cfg_attr(feature = "swagger", utoipa::path(
    get,
    path = "/api/v1/presets/{name}",
    params(("name" = String, Path, description = "reference, conservative or optimistic")),
    responses(
        (status = 200, description = "Preset parameters"),
        (status = 404, description = "Unknown preset", body = super::error::ErrorResponse)
    )
))]
pub async fn get_preset(
    State(st): State<AppState>,
    Path(name): Path<String>,
) -> Result<ApiResponse<ParameterSet>, ApiError> {
    let preset = parse_preset(&name)?;
    Ok(success(st.cfg.estimator.parameters(Some(preset))))
}

#[cfg_attr(feature = "swagger", utoipa::path(
    post,
    path = "/api/v1/estimate",
    request_body = EstimateRequest,
    responses(
        (status = 200, description = "Energy and financial estimate"),
        (status = 400, description = "Invalid input", body = super::error::ErrorResponse),
        (status = 422, description = "Result not computable", body = super::error::ErrorResponse)
    )
))]
pub async fn estimate(
    State(st): State<AppState>,
    Json(req): Json<EstimateRequest>,
) -> Result<ApiResponse<EstimateResponse>, ApiError> {
    req.validate()?;
    req.climate.validate()?;
    let params = req.parameters.resolve(&st.cfg.estimator);

    let energy = compute_energy(&req.climate, &params.installation, &params.costs)?;
    let financials = roll_up(
        &energy,
        energy.annual_h2_kg(),
        &params.installation,
        &params.costs,
    )?;

    info!(
        preset = %params.preset,
        total_power_kw = energy.total_power_kw,
        lcoh_per_kg = financials.lcoh_per_kg,
        "estimate computed"
    );

    Ok(success(EstimateResponse {
        parameters: params,
        energy,
        financials,
    }))
}

#[cfg_attr(feature = "swagger", utoipa::path(
    post,
    path = "/api/v1/simulate",
    request_body = SimulateRequest,
    responses(
        (status = 200, description = "Hourly dispatch simulation", body = SimulationResult),
        (status = 400, description = "Invalid input", body = super::error::ErrorResponse),
        (status = 422, description = "No usable samples or no production", body = super::error::ErrorResponse)
    )
))]
pub async fn simulate_series(
    State(st): State<AppState>,
    Json(req): Json<SimulateRequest>,
) -> Result<ApiResponse<SimulationResult>, ApiError> {
    req.validate()?;
    let params = req.parameters.resolve(&st.cfg.estimator);

    let started = Instant::now();
    let result = simulate(&req.samples, &params.installation, &params.costs)?;
    let elapsed = started.elapsed().as_micros() as u64;

    info!(
        preset = %params.preset,
        days = result.days_simulated,
        dropped = result.dropped_samples,
        capacity_factor_pct = result.capacity_factor_pct,
        duration_us = elapsed,
        "simulation completed"
    );

    Ok(success(result).with_duration(elapsed))
}

#[cfg_attr(feature = "swagger", utoipa::path(
    post,
    path = "/api/v1/feasibility",
    request_body = FeasibilityRequest,
    responses(
        (status = 200, description = "Multi-year projection", body = FeasibilityProjection),
        (status = 400, description = "Invalid input", body = super::error::ErrorResponse),
        (status = 422, description = "Result not computable", body = super::error::ErrorResponse)
    )
))]
pub async fn feasibility(
    State(st): State<AppState>,
    Json(req): Json<FeasibilityRequest>,
) -> Result<ApiResponse<FeasibilityProjection>, ApiError> {
    req.validate()?;
    req.climate.validate()?;

    let horizons = req
        .horizons_years
        .unwrap_or_else(|| st.cfg.estimator.default_horizons_years.clone());
    if horizons.iter().any(|y| *y > MAX_HORIZON_YEARS) {
        return Err(ApiError::validation(
            format!("horizons must be at most {MAX_HORIZON_YEARS} years"),
            "horizons_years",
        ));
    }

    let params = req.parameters.resolve(&st.cfg.estimator);
    let projection = project(&req.climate, &params, &horizons)?;
    Ok(success(projection))
}

#[cfg_attr(feature = "swagger", utoipa::path(
    post,
    path = "/api/v1/climate/nasa-power",
    request_body = PowerDailyParameters,
    responses(
        (status = 200, description = "Filtered daily series and averages", body = ClimateSummary),
        (status = 422, description = "No valid irradiance or wind values", body = super::error::ErrorResponse)
    )
))]
pub async fn reshape_nasa_power(
    Json(payload): Json<NasaPowerPayload>,
) -> Result<ApiResponse<ClimateSummary>, ApiError> {
    let summary = payload.into_parameters().summarize()?;
    let count = summary.daily.len();
    Ok(success(summary).with_count(count))
}

#[cfg_attr(feature = "swagger", utoipa::path(
    post,
    path = "/api/v1/climate/statistics",
    request_body = StatisticsRequest,
    responses(
        (status = 200, description = "Series statistics", body = ClimateStatistics),
        (status = 422, description = "No usable samples", body = super::error::ErrorResponse)
    )
))]
pub async fn climate_statistics(
    Json(req): Json<StatisticsRequest>,
) -> Result<ApiResponse<ClimateStatistics>, ApiError> {
    req.validate()?;
    Ok(success(ClimateStatistics::from_samples(&req.samples)?))
}

#[cfg_attr(feature = "swagger", utoipa::path(
    get,
    path = "/api/v1/regions",
    responses((status = 200, description = "All federative units"))
))]
pub async fn list_regions() -> ApiResponse<&'static [StateInfo]> {
    success(&STATES[..]).with_count(STATES.len())
}

#[cfg_attr(feature = "swagger", utoipa::path(
    get,
    path = "/api/v1/regions/{uf}",
    params(("uf" = String, Path, description = "Two-letter state abbreviation")),
    responses(
        (status = 200, description = "State and its regional default climate", body = RegionDetail),
        (status = 404, description = "Unknown state", body = super::error::ErrorResponse)
    )
))]
pub async fn get_region(Path(uf): Path<String>) -> Result<ApiResponse<RegionDetail>, ApiError> {
    let state = lookup_uf(&uf).ok_or_else(|| ApiError::NotFound(format!("state `{uf}`")))?;
    Ok(success(RegionDetail {
        state: *state,
        default_climate: state.region.default_climate(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_applies_overrides() {
        let cfg = EstimatorConfig::default();
        let overrides = ParameterOverrides {
            preset: Some(ModelPreset::Conservative),
            scale_factor: Some(4.0),
            ..Default::default()
        };
        let params = overrides.resolve(&cfg);
        assert_eq!(params.preset, ModelPreset::Conservative);
        assert_eq!(params.installation.scale_factor, 4.0);
        assert_eq!(params.costs, ModelPreset::Conservative.parameters().costs);
    }

    #[test]
    fn test_zero_scale_factor_fails_validation() {
        let overrides = ParameterOverrides {
            scale_factor: Some(0.0),
            ..Default::default()
        };
        assert!(overrides.validate().is_err());
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!(parse_preset("Optimistic").unwrap(), ModelPreset::Optimistic);
        assert!(matches!(parse_preset("sunny"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_nasa_payload_accepts_both_shapes() {
        let full = r#"{"properties": {"parameter": {"WS10M": {"20240101": 4.0}}}}"#;
        let bare = r#"{"WS10M": {"20240101": 4.0}}"#;
        for body in [full, bare] {
            let payload: NasaPowerPayload = serde_json::from_str(body).unwrap();
            assert_eq!(payload.into_parameters().wind_speed.len(), 1);
        }
    }
}

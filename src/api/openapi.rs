use utoipa::OpenApi;

use crate::api::error::ErrorResponse;
use crate::api::health::{ComponentHealth, HealthChecks, HealthResponse};
use crate::api::v1::{
    EstimateRequest, EstimateResponse, FeasibilityRequest, ParameterOverrides, RegionDetail,
    SimulateRequest, StatisticsRequest,
};
use crate::climate::{
    ClimateAverages, ClimateStatistics, ClimateSummary, DailyClimateSample, PowerDailyParameters,
    Region, SiteClimate, StateInfo,
};
use crate::estimator::{
    CostAssumptions, EnergyResult, ErrorKind, FeasibilityProjection, FinancialResult,
    InstallationConfig, ModelPreset, ParameterSet, ProjectionPeriod, SimulationResult,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::health::liveness_check,
        crate::api::health::health_check,
        crate::api::v1::list_presets,
        crate::api::v1::get_preset,
        crate::api::v1::estimate,
        crate::api::v1::simulate_series,
        crate::api::v1::feasibility,
        crate::api::v1::reshape_nasa_power,
        crate::api::v1::climate_statistics,
        crate::api::v1::list_regions,
        crate::api::v1::get_region,
    ),
    components(
        schemas(
            EstimateRequest, EstimateResponse, SimulateRequest, FeasibilityRequest,
            StatisticsRequest, ParameterOverrides, RegionDetail, ErrorResponse, ErrorKind,
            HealthResponse, HealthChecks, ComponentHealth,
            SiteClimate, DailyClimateSample, PowerDailyParameters, ClimateSummary,
            ClimateAverages, ClimateStatistics, StateInfo, Region,
            ModelPreset, ParameterSet, InstallationConfig, CostAssumptions,
            EnergyResult, FinancialResult, SimulationResult, FeasibilityProjection,
            ProjectionPeriod,
        )
    ),
    tags((name = "h2-feasibility", description = "Renewable-to-hydrogen estimator API v1"))
)]
pub struct ApiDoc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::climate::Region;
use crate::estimator::{compute_energy, roll_up};
use crate::state::AppState;

/// Health check response
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: &'static str,
    timestamp: chrono::DateTime<chrono::Utc>,
    checks: HealthChecks,
}

/// Individual health checks
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    estimator: ComponentHealth,
}

/// Health status of a component
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ComponentHealth {
    fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            error: None,
        }
    }

    fn unhealthy(error: String) -> Self {
        Self {
            status: "unhealthy".to_string(),
            error: Some(error),
        }
    }
}

/// Run the configured default preset against a regional default climate.
///
/// Fails when configuration overrides produce parameters the estimator
/// rejects.
fn check_estimator(state: &AppState) -> ComponentHealth {
    let params = state.cfg.estimator.parameters(None);
    let climate = Region::Northeast.default_climate();

    let result = compute_energy(&climate, &params.installation, &params.costs).and_then(|energy| {
        roll_up(&energy, energy.annual_h2_kg(), &params.installation, &params.costs)
    });

    match result {
        Ok(_) => ComponentHealth::healthy(),
        Err(e) => ComponentHealth::unhealthy(e.to_string()),
    }
}

/// GET /health - Health check endpoint
#[cfg_attr(feature = "swagger", utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Service degraded", body = HealthResponse)
    )
))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let estimator = check_estimator(&state);
    let all_healthy = estimator.status == "healthy";

    let response = HealthResponse {
        status: if all_healthy {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now(),
        checks: HealthChecks { estimator },
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(healthy = all_healthy, "Health check completed");
    (status_code, Json(response))
}

/// GET /healthz - Liveness probe
#[cfg_attr(feature = "swagger", utoipa::path(
    get,
    path = "/api/v1/healthz",
    responses((status = 200, description = "Process is running"))
))]
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_component_health() {
        let health = ComponentHealth::healthy();
        assert_eq!(health.status, "healthy");
        assert!(health.error.is_none());

        let health = ComponentHealth::unhealthy("bad preset".to_string());
        assert_eq!(health.status, "unhealthy");
        assert_eq!(health.error, Some("bad preset".to_string()));
    }

    #[test]
    fn test_default_config_is_healthy() {
        let state = AppState::new(Config::default());
        assert_eq!(check_estimator(&state).status, "healthy");
    }
}

#[cfg(feature = "swagger")]
pub mod openapi;
pub mod error;
pub mod health;
pub mod response;
pub mod v1;

use axum::Router;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{config::Config, state::AppState};

/// Largest accepted request body: a full-length daily series plus room for
/// the parameter overrides.
pub const MAX_BODY_BYTES: usize =
    v1::MAX_SERIES_DAYS as usize * v1::MAX_SAMPLE_JSON_BYTES + 64 * 1024;

pub fn router(state: AppState, cfg: &Config) -> Router {
    let mut router = Router::new().nest("/api/v1", v1::router(state));

    if cfg.server.enable_cors {
        use tower_http::cors::Any;
        // Read-only computations; any origin may call them.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers([axum::http::header::CONTENT_TYPE]);
        router = router.layer(cors);
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
                .layer(TimeoutLayer::new(Duration::from_secs(cfg.server.request_timeout_secs))),
        )
        .layer(TraceLayer::new_for_http())
}

#[cfg(feature = "swagger")]
pub fn with_swagger(app: Router) -> Router {
    use crate::api::openapi::ApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;
    app.merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::DailyClimateSample;
    use chrono::NaiveDate;

    #[test]
    fn test_body_limit_fits_longest_series() {
        let sample = DailyClimateSample {
            date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            solar_irradiance_kwh_m2_day: 5.123456789012345,
            wind_speed_ms: 12.345678901234567,
            temperature_c: Some(-12.345678901234567),
            humidity_percent: Some(99.12345678901234),
            precipitation_mm: Some(123.45678901234567),
        };
        let encoded = serde_json::to_vec(&sample).unwrap();
        assert!(encoded.len() < v1::MAX_SAMPLE_JSON_BYTES);

        // one comma per sample plus the array brackets
        let series_bytes = v1::MAX_SERIES_DAYS as usize * (encoded.len() + 1) + 2;
        assert!(series_bytes < MAX_BODY_BYTES);
    }
}

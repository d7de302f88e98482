//! HTTP surface driven through the router without binding a socket.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};
use tower::ServiceExt;

use h2_feasibility::{
    api::{self, v1::MAX_SERIES_DAYS},
    config::Config,
    state::AppState,
};

fn app() -> Router {
    let cfg = Config::default();
    api::router(AppState::new(cfg.clone()), &cfg)
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

fn week(solar: f64, wind: f64) -> Value {
    let samples: Vec<Value> = (1..=7)
        .map(|d| {
            json!({
                "date": format!("2024-01-{d:02}"),
                "solar_irradiance_kwh_m2_day": solar,
                "wind_speed_ms": wind,
            })
        })
        .collect();
    Value::Array(samples)
}

#[tokio::test]
async fn health_endpoints() {
    let (status, _) = get("/api/v1/healthz").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn presets_listed_and_fetched() {
    let (status, body) = get("/api/v1/presets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    assert_eq!(body["metadata"]["total_count"], 3);

    let (status, body) = get("/api/v1/presets/conservative").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["preset"], "conservative");
    assert_eq!(body["data"]["installation"]["wind_capacity_factor"], 0.2);

    let (status, body) = get("/api/v1/presets/sunny").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFound");
}

#[tokio::test]
async fn estimate_returns_energy_and_financials() {
    let (status, body) = post(
        "/api/v1/estimate",
        json!({
            "climate": {"solar_irradiance_kwh_m2_day": 5.5, "wind_speed_ms": 7.0},
            "preset": "reference",
            "scale_factor": 10.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["parameters"]["installation"]["scale_factor"], 10.0);
    assert!(data["energy"]["total_power_kw"].as_f64().unwrap() > 0.0);
    assert!(data["financials"]["lcoh_per_kg"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn estimate_rejects_negative_wind() {
    let (status, body) = post(
        "/api/v1/estimate",
        json!({"climate": {"solar_irradiance_kwh_m2_day": 5.5, "wind_speed_ms": -1.0}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidInput");
    assert_eq!(body["details"], "wind_speed_ms");
}

#[tokio::test]
async fn estimate_rejects_zero_scale() {
    let (status, body) = post(
        "/api/v1/estimate",
        json!({
            "climate": {"solar_irradiance_kwh_m2_day": 5.5, "wind_speed_ms": 7.0},
            "scale_factor": 0.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
    assert_eq!(body["details"], "scale_factor");
}

#[tokio::test]
async fn simulate_week() {
    let (status, body) = post("/api/v1/simulate", json!({"samples": week(5.5, 6.5)})).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["days_simulated"], 7);
    let cf = data["capacity_factor_pct"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&cf));
    assert!(body["metadata"]["duration_us"].is_u64());
}

#[tokio::test]
async fn simulate_empty_series_is_unprocessable() {
    let (status, body) = post("/api/v1/simulate", json!({"samples": []})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "InsufficientData");
}

#[tokio::test]
async fn simulate_without_production_is_unprocessable() {
    let (status, body) = post("/api/v1/simulate", json!({"samples": week(0.0, 0.0)})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "InvalidResult");
}

#[tokio::test]
async fn feasibility_default_horizons() {
    let (status, body) = post(
        "/api/v1/feasibility",
        json!({"climate": {"solar_irradiance_kwh_m2_day": 6.0, "wind_speed_ms": 8.0}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let years: Vec<u64> = body["data"]["periods"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["years"].as_u64().unwrap())
        .collect();
    assert_eq!(years, vec![1, 3, 5]);
}

#[tokio::test]
async fn feasibility_rejects_long_horizon() {
    let (status, body) = post(
        "/api/v1/feasibility",
        json!({
            "climate": {"solar_irradiance_kwh_m2_day": 6.0, "wind_speed_ms": 8.0},
            "horizons_years": [1, 80]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "horizons_years");
}

#[tokio::test]
async fn nasa_power_reshaping() {
    let (status, body) = post(
        "/api/v1/climate/nasa-power",
        json!({
            "properties": {"parameter": {
                "ALLSKY_SFC_SW_DWN": {"20240101": 5.0, "20240102": -999.0},
                "WS10M": {"20240101": 4.0, "20240102": 5.0}
            }}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["days_analyzed"], 1);
    assert_eq!(body["data"]["daily"].as_array().unwrap().len(), 1);

    let (status, body) = post(
        "/api/v1/climate/nasa-power",
        json!({"ALLSKY_SFC_SW_DWN": {"20240101": -999.0}, "WS10M": {"20240101": 4.0}}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "InsufficientData");
}

#[tokio::test]
async fn climate_statistics() {
    let (status, body) = post("/api/v1/climate/statistics", json!({"samples": week(5.5, 6.0)})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data_points"], 7);
    assert_eq!(body["data"]["sunny_days"], 7);
    assert_eq!(body["data"]["rainy_days"], 0);
    assert!(body["data"]["avg_temperature_c"].is_null());
    assert!(body["data"]["avg_humidity_percent"].is_null());
}

#[tokio::test]
async fn climate_statistics_skip_missing_observations() {
    let samples = json!([
        {
            "date": "2024-03-01",
            "solar_irradiance_kwh_m2_day": 5.5,
            "wind_speed_ms": 6.0,
            "temperature_c": 30.0,
            "humidity_percent": 80.0
        },
        {"date": "2024-03-02", "solar_irradiance_kwh_m2_day": 5.0, "wind_speed_ms": 5.0}
    ]);
    let (status, body) = post("/api/v1/climate/statistics", json!({"samples": samples})).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["data_points"], 2);
    assert_eq!(data["avg_temperature_c"], 30.0);
    assert_eq!(data["min_temperature_c"], 30.0);
    assert_eq!(data["avg_humidity_percent"], 80.0);
}

fn long_series(days: u64) -> Value {
    let start = NaiveDate::from_ymd_opt(1925, 1, 1).unwrap();
    let samples: Vec<Value> = (0..days)
        .map(|d| {
            json!({
                "date": start + Duration::days(d as i64),
                "solar_irradiance_kwh_m2_day": 5.123456789012345,
                "wind_speed_ms": 6.345678901234567,
                "temperature_c": 24.345678901234567,
                "humidity_percent": 71.12345678901234,
                "precipitation_mm": 1.4567890123456789,
            })
        })
        .collect();
    Value::Array(samples)
}

#[tokio::test]
async fn statistics_accept_longest_series() {
    let (status, body) = post(
        "/api/v1/climate/statistics",
        json!({"samples": long_series(MAX_SERIES_DAYS)}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data_points"], MAX_SERIES_DAYS);
}

#[tokio::test]
async fn statistics_reject_series_over_limit() {
    let (status, body) = post(
        "/api/v1/climate/statistics",
        json!({"samples": long_series(MAX_SERIES_DAYS + 1)}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
    assert_eq!(body["details"], "samples");
}

#[tokio::test]
async fn regions() {
    let (status, body) = get("/api/v1/regions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 27);

    let (status, body) = get("/api/v1/regions/ba").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["state"]["uf"], "BA");
    assert_eq!(body["data"]["state"]["region"], "northeast");
    assert!(body["data"]["default_climate"]["solar_irradiance_kwh_m2_day"].as_f64().unwrap() > 0.0);

    let (status, _) = get("/api/v1/regions/zz").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

use anyhow::Result;
use axum::Router;
use h2_feasibility::{api, config::Config, state::AppState, telemetry};
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }
    init_tracing();

    let cfg = Config::load()?;
    info!(
        default_preset = %cfg.estimator.default_preset,
        sale_price_override = ?cfg.estimator.h2_sale_price_per_kg,
        horizons = ?cfg.estimator.default_horizons_years,
        "configuration loaded"
    );

    let app_state = AppState::new(cfg.clone());

    #[allow(unused_mut)]
    let mut app: Router = api::router(app_state, &cfg);

    #[cfg(feature = "swagger")]
    {
        app = api::with_swagger(app);
    }

    let addr = cfg.server.socket_addr()?;

    if cfg.server.host == "0.0.0.0" {
        warn!("binding to 0.0.0.0, the service is reachable from the network");
    }

    info!(%addr, "starting h2-feasibility");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}

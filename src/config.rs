use anyhow::{bail, Result};
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;
use std::net::SocketAddr;

use crate::estimator::constants::DEFAULT_HORIZONS_YEARS;
use crate::estimator::{ModelPreset, ParameterSet};

/// Longest projection horizon accepted from config or requests (years)
pub const MAX_HORIZON_YEARS: u32 = 50;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub estimator: EstimatorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_true")]
    pub enable_cors: bool,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: true,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EstimatorConfig {
    /// Preset used when a request names none
    #[serde(default)]
    pub default_preset: ModelPreset,
    /// Overrides the preset's hydrogen sale price (per kg)
    #[serde(default)]
    pub h2_sale_price_per_kg: Option<f64>,
    #[serde(default = "default_horizons_years")]
    pub default_horizons_years: Vec<u32>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            default_preset: ModelPreset::default(),
            h2_sale_price_per_kg: None,
            default_horizons_years: default_horizons_years(),
        }
    }
}

impl EstimatorConfig {
    /// Parameters for `preset` (or the configured default), with the
    /// configured sale price applied.
    pub fn parameters(&self, preset: Option<ModelPreset>) -> ParameterSet {
        let params = preset.unwrap_or(self.default_preset).parameters();
        match self.h2_sale_price_per_kg {
            Some(price) => params.with_sale_price(price),
            None => params,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_horizons_years() -> Vec<u32> {
    DEFAULT_HORIZONS_YEARS.to_vec()
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file("config/default.toml"))
                .merge(Env::prefixed("H2F__").split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let cfg: Config = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.server.request_timeout_secs == 0 {
            bail!("server.request_timeout_secs must be greater than zero");
        }
        let horizons = &self.estimator.default_horizons_years;
        if horizons.is_empty() {
            bail!("estimator.default_horizons_years must not be empty");
        }
        if let Some(bad) = horizons.iter().find(|y| **y == 0 || **y > MAX_HORIZON_YEARS) {
            bail!("estimator.default_horizons_years: {bad} is outside 1..={MAX_HORIZON_YEARS}");
        }
        if let Some(price) = self.estimator.h2_sale_price_per_kg {
            if !price.is_finite() || price < 0.0 {
                bail!("estimator.h2_sale_price_per_kg must be a non-negative number, got {price}");
            }
        }
        Ok(())
    }
}

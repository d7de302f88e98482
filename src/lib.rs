//! Renewable-to-hydrogen feasibility estimator.
//!
//! [`estimator`] and [`climate`] are plain synchronous library code; the
//! remaining modules wrap them in a small stateless HTTP service.

pub mod api;
pub mod climate;
pub mod config;
pub mod estimator;
pub mod state;
pub mod telemetry;

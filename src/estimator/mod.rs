//! # Renewable-to-Hydrogen Estimator
//!
//! Pure, synchronous computations from site climate to hydrogen output and
//! cost metrics. Nothing here holds state between calls or performs I/O, so
//! every function can be called concurrently from any number of requests.
//!
//! ## Components
//!
//! - **Energy**: average solar/wind power, daily and annual energy, hydrogen mass
//! - **Dispatch**: hour-by-hour electrolyzer operation over a daily series
//!   (capacity factor, curtailment, operating hours)
//! - **Finance**: CAPEX, capital recovery factor, OPEX, LCOH, ROI and payback
//! - **Projection**: cumulative figures over multi-year horizons
//! - **Presets**: named, immutable parameter sets
//!
//! ## Usage
//!
//! ```rust
//! use h2_feasibility::climate::SiteClimate;
//! use h2_feasibility::estimator::{compute_energy, roll_up, ModelPreset};
//!
//! let params = ModelPreset::Reference.parameters().with_scale_factor(10.0);
//! let climate = SiteClimate::new(5.4, 7.1);
//!
//! let energy = compute_energy(&climate, &params.installation, &params.costs).unwrap();
//! let financials = roll_up(
//!     &energy,
//!     energy.annual_h2_kg(),
//!     &params.installation,
//!     &params.costs,
//! )
//! .unwrap();
//!
//! assert!(financials.lcoh_per_kg > 0.0);
//! ```

pub mod constants;
pub mod dispatch;
pub mod energy;
pub mod error;
pub mod finance;
pub mod params;
pub mod presets;
pub mod projection;
pub mod simulation;

pub use dispatch::{dispatch_hour, simulate_dispatch, DispatchOutcome, HourlyDispatch, OperatingMode};
pub use energy::{compute_energy, EnergyResult};
pub use error::{ErrorKind, EstimatorError, EstimatorResult};
pub use finance::{capital_recovery_factor, roll_up, FinancialResult};
pub use params::{CostAssumptions, InstallationConfig};
pub use presets::{ModelPreset, ParameterSet};
pub use projection::{project, FeasibilityProjection, ProjectionPeriod};
pub use simulation::{simulate, SimulationResult};

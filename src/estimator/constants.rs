//! Physical and calendar constants shared by the estimator.

/// Air density at sea level, 15 °C (kg/m³)
pub const AIR_DENSITY_KG_M3: f64 = 1.225;

pub const HOURS_PER_DAY: f64 = 24.0;
pub const DAYS_PER_YEAR: f64 = 365.0;
pub const KG_PER_TONNE: f64 = 1000.0;
pub const W_PER_KW: f64 = 1000.0;

/// First hour (inclusive) of the fixed solar production window
pub const SOLAR_WINDOW_START_HOUR: u32 = 6;
/// Last hour (exclusive) of the fixed solar production window
pub const SOLAR_WINDOW_END_HOUR: u32 = 18;
pub const SOLAR_WINDOW_HOURS: f64 = (SOLAR_WINDOW_END_HOUR - SOLAR_WINDOW_START_HOUR) as f64;

/// Default electrolyzer turn-down floor (fraction of nominal power)
pub const DEFAULT_MIN_OPERATING_LOAD_FRACTION: f64 = 0.20;

/// Default wind capacity-factor discount applied to the cubic-law power
/// computed from a long-run mean wind speed
pub const DEFAULT_WIND_CAPACITY_FACTOR: f64 = 0.30;

/// Performance ratio used to turn irradiance into 1 kWp yield
pub const PV_PERFORMANCE_RATIO: f64 = 0.8;

/// Default feasibility horizons (years)
pub const DEFAULT_HORIZONS_YEARS: [u32; 3] = [1, 3, 5];

/// Longest project lifetime accepted for annualizing CAPEX (years)
pub const MAX_PROJECT_LIFETIME_YEARS: u32 = 100;
/// Highest discount rate accepted (1.0 = 100 % per year)
pub const MAX_DISCOUNT_RATE: f64 = 1.0;

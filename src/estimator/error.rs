use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Estimator errors
///
/// Every variant carries enough detail (kind plus offending field or
/// quantity) for a caller to decide on a fallback, e.g. switching to the
/// regional default climate when a live series turns out to be empty.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimatorError {
    #[error("Invalid input `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Insufficient climate data: {0}")]
    InsufficientData(String),

    #[error("Invalid result `{quantity}`: {reason}")]
    InvalidResult {
        quantity: &'static str,
        reason: String,
    },
}

/// Coarse error classification exposed to API clients
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    InsufficientData,
    InvalidResult,
}

impl EstimatorError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn invalid_result(quantity: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidResult {
            quantity,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EstimatorError::InvalidInput { .. } => ErrorKind::InvalidInput,
            EstimatorError::InsufficientData(_) => ErrorKind::InsufficientData,
            EstimatorError::InvalidResult { .. } => ErrorKind::InvalidResult,
        }
    }

    /// Name of the offending input field or derived quantity, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            EstimatorError::InvalidInput { field, .. } => Some(field),
            EstimatorError::InvalidResult { quantity, .. } => Some(quantity),
            EstimatorError::InsufficientData(_) => None,
        }
    }
}

pub type EstimatorResult<T> = Result<T, EstimatorError>;

/// Reject NaN/Inf and negative values.
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> EstimatorResult<()> {
    if !value.is_finite() {
        return Err(EstimatorError::invalid_input(field, format!("{value} is not finite")));
    }
    if value < 0.0 {
        return Err(EstimatorError::invalid_input(
            field,
            format!("{value} cannot be negative"),
        ));
    }
    Ok(())
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> EstimatorResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EstimatorError::invalid_input(
            field,
            format!("{value} must be a positive number"),
        ));
    }
    Ok(())
}

/// Fraction in (0, 1]
pub(crate) fn require_fraction(field: &'static str, value: f64) -> EstimatorResult<()> {
    if !value.is_finite() || value <= 0.0 || value > 1.0 {
        return Err(EstimatorError::invalid_input(
            field,
            format!("{value} must be in (0, 1]"),
        ));
    }
    Ok(())
}

/// Fraction in [0, 1]
pub(crate) fn require_unit_interval(field: &'static str, value: f64) -> EstimatorResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(EstimatorError::invalid_input(
            field,
            format!("{value} must be in [0, 1]"),
        ));
    }
    Ok(())
}

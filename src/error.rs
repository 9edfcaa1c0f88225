//! Error types for the simulation core
//!
//! Only two things can go wrong in-core: the caller hands us an impossible
//! configuration, or a frame arrives with values that would break an invariant
//! (negative time, NaN timestamps). Everything else is a plain bool/Option.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Frame input that would break a simulation invariant (e.g. negative dt)
    InvariantViolation(String),
    /// Settings that cannot describe a playable session
    Configuration(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvariantViolation(msg) => write!(f, "invariant violation: {msg}"),
            Self::Configuration(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for SimError {}

/// Validate a frame's elapsed time in seconds.
pub fn check_dt(dt: f64) -> Result<f64, SimError> {
    if !dt.is_finite() {
        return Err(SimError::InvariantViolation(format!("dt is not finite ({dt})")));
    }
    if dt < 0.0 {
        return Err(SimError::InvariantViolation(format!("negative dt ({dt})")));
    }
    Ok(dt)
}

/// Validate a monotonic timestamp in milliseconds.
pub fn check_now(now_ms: f64) -> Result<f64, SimError> {
    if now_ms.is_finite() {
        Ok(now_ms)
    } else {
        Err(SimError::InvariantViolation(format!(
            "timestamp is not finite ({now_ms})"
        )))
    }
}

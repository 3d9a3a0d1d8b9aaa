//! Input validation errors
//!
//! The coverage formulas themselves never fail: degenerate arithmetic (zero
//! swath, zero flow, zero spray time) resolves to a defined number. Only the
//! boundary checks in [`crate::SprayParameters::validate`] and the model
//! parameter parser produce these errors.

use crate::coverage::LossModelKind;
use thiserror::Error;

/// Rejected spray inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SprayInputError {
    /// A physical quantity was below zero.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Parameter name (e.g. `"speed"`, `"tank_capacity"`)
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// A quantity that must be strictly positive was zero or below.
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Parameter name
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// A physical quantity was NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFinite {
        /// Parameter name
        field: &'static str,
    },

    /// A loss-model calibration constant was outside its valid range.
    #[error("{model} parameter {name} = {value} is out of range (expected {expected})")]
    ModelParameter {
        /// Model the parameter belongs to
        model: LossModelKind,
        /// Parameter name (e.g. `"eta"`, `"ks"`)
        name: &'static str,
        /// Offending value
        value: f64,
        /// Human-readable valid range
        expected: &'static str,
    },

    /// A `key=value` pair named a parameter the model does not take.
    #[error("{model} has no parameter named '{key}'")]
    UnknownModelParameter {
        /// Model the key was applied to
        model: LossModelKind,
        /// Unrecognised key
        key: String,
    },

    /// A model parameter was not of the form `key=value` with a numeric value.
    #[error("malformed model parameter '{raw}' (expected key=value)")]
    MalformedModelParameter {
        /// The raw argument
        raw: String,
    },
}

impl SprayInputError {
    /// Check a physical quantity is finite and non-negative.
    ///
    /// # Errors
    /// Returns [`SprayInputError::NonFinite`] or [`SprayInputError::Negative`].
    pub(crate) fn check_quantity(field: &'static str, value: f64) -> Result<(), Self> {
        if !value.is_finite() {
            return Err(Self::NonFinite { field });
        }
        if value < 0.0 {
            return Err(Self::Negative { field, value });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_quantity() {
        assert!(SprayInputError::check_quantity("speed", 0.0).is_ok());
        assert!(SprayInputError::check_quantity("speed", 5.0).is_ok());
        assert_eq!(
            SprayInputError::check_quantity("speed", -1.0),
            Err(SprayInputError::Negative {
                field: "speed",
                value: -1.0
            })
        );
        assert_eq!(
            SprayInputError::check_quantity("flow_rate", f64::INFINITY),
            Err(SprayInputError::NonFinite { field: "flow_rate" })
        );
    }

    #[test]
    fn test_messages() {
        let err = SprayInputError::ModelParameter {
            model: LossModelKind::PerTurnExponential,
            name: "eta",
            value: 1.2,
            expected: "0 < eta <= 1",
        };
        assert_eq!(
            err.to_string(),
            "per-turn-exponential parameter eta = 1.2 is out of range (expected 0 < eta <= 1)"
        );
    }
}

//! Configuration error type shared by every planning stage.

use thiserror::Error;

/// Result type for planning operations.
pub type PlanResult<T> = Result<T, ConfigError>;

/// Invalid input detected while deriving a survey plan.
///
/// Every variant is a deterministic input-validation failure; nothing here is
/// transient, so callers should report and stop rather than retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} must be in [0, 1) (got {value})")]
    RatioOutOfRange { field: &'static str, value: f64 },

    #[error("waypoint spacing along {axis} collapsed to {value} m")]
    DegenerateSpacing { axis: &'static str, value: f64 },

    #[error("capture grid of {rows} rows x {columns} columns exceeds {limit} waypoints")]
    GridTooLarge { rows: f64, columns: f64, limit: usize },

    #[error("boundary speed {boundary} m/s exceeds cruise speed {cruise} m/s")]
    InconsistentSpeeds { boundary: f64, cruise: f64 },
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> PlanResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

pub(crate) fn ensure_positive(field: &'static str, value: f64) -> PlanResult<f64> {
    ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> PlanResult<f64> {
    ensure_finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

pub(crate) fn ensure_ratio(field: &'static str, value: f64) -> PlanResult<f64> {
    ensure_finite(field, value)?;
    if (0.0..1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::RatioOutOfRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(ensure_positive("height_m", 10.0).is_ok());
        assert_eq!(
            ensure_positive("height_m", 0.0),
            Err(ConfigError::NonPositive { field: "height_m", value: 0.0 })
        );
        assert!(matches!(
            ensure_positive("height_m", f64::NAN),
            Err(ConfigError::NonFinite { field: "height_m", .. })
        ));
    }

    #[test]
    fn ratio_is_half_open() {
        assert!(ensure_ratio("overlap", 0.0).is_ok());
        assert!(ensure_ratio("overlap", 0.999).is_ok());
        assert!(ensure_ratio("overlap", 1.0).is_err());
        assert!(ensure_ratio("overlap", -0.1).is_err());
    }

    #[test]
    fn error_message_names_field() {
        let err = ConfigError::RatioOutOfRange { field: "sidelap", value: 1.2 };
        assert_eq!(err.to_string(), "sidelap must be in [0, 1) (got 1.2)");
    }
}

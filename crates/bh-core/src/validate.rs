//! Input bounds for the calling layer.
//!
//! The engine itself never checks ranges: any well-typed input produces a
//! well-defined result. These validators carry the setup-form rules so
//! every caller rejects the same nonsense before invoking the engine.

use thiserror::Error;

/// Validation errors for user-supplied planning inputs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The plan year was outside the supported range.
    #[error("year must be between 2000 and 2100, got {year}")]
    YearOutOfRange { year: i32 },

    /// The annual goal was outside the supported range.
    #[error("annual goal must be between 1 and 4000 hours, got {hours}")]
    GoalOutOfRange { hours: f64 },

    /// The month was not 1-12.
    #[error("month must be between 1 and 12, got {month}")]
    MonthOutOfRange { month: u32 },

    /// The monthly weight was outside the supported range.
    #[error("monthly weight must be between 0.1 and 2.0, got {weight}")]
    WeightOutOfRange { weight: f64 },

    /// The logged hours were outside a physical day.
    #[error("logged hours must be between 0 and 24, got {hours}")]
    LoggedHoursOutOfRange { hours: f64 },

    /// The per-day target override was outside a physical day.
    #[error("target override must be between 0 and 24 hours, got {hours}")]
    TargetOverrideOutOfRange { hours: f64 },

    /// The daily ceiling was outside a physical day.
    #[error("daily ceiling must be above 0 and at most 24, got {hours}")]
    DailyCeilingOutOfRange { hours: f64 },
}

/// Validates a plan year.
pub fn validate_year(year: i32) -> Result<(), ValidationError> {
    if (2000..=2100).contains(&year) {
        Ok(())
    } else {
        Err(ValidationError::YearOutOfRange { year })
    }
}

/// Validates an annual goal in hours. Rejects `NaN`.
pub fn validate_goal_hours(hours: f64) -> Result<(), ValidationError> {
    if hours.is_nan() || !(1.0..=4000.0).contains(&hours) {
        return Err(ValidationError::GoalOutOfRange { hours });
    }
    Ok(())
}

/// Validates a month number.
pub fn validate_month(month: u32) -> Result<(), ValidationError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ValidationError::MonthOutOfRange { month })
    }
}

/// Validates a monthly weight multiplier. Rejects `NaN`.
pub fn validate_weight(weight: f64) -> Result<(), ValidationError> {
    if weight.is_nan() || !(0.1..=2.0).contains(&weight) {
        return Err(ValidationError::WeightOutOfRange { weight });
    }
    Ok(())
}

/// Validates hours logged for a single day. Rejects `NaN`.
pub fn validate_logged_hours(hours: f64) -> Result<(), ValidationError> {
    if hours.is_nan() || !(0.0..=24.0).contains(&hours) {
        return Err(ValidationError::LoggedHoursOutOfRange { hours });
    }
    Ok(())
}

/// Validates a per-day target override. Rejects `NaN`.
pub fn validate_target_override(hours: f64) -> Result<(), ValidationError> {
    if hours.is_nan() || !(0.0..=24.0).contains(&hours) {
        return Err(ValidationError::TargetOverrideOutOfRange { hours });
    }
    Ok(())
}

/// Validates the per-day target ceiling. Rejects `NaN` and zero.
pub fn validate_max_daily_hours(hours: f64) -> Result<(), ValidationError> {
    if hours.is_nan() || hours <= 0.0 || hours > 24.0 {
        return Err(ValidationError::DailyCeilingOutOfRange { hours });
    }
    Ok(())
}

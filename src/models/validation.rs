use time::Date;

/// Input rejected before it reaches the store
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} must be a positive number")]
    NotPositive(&'static str),

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("{0} is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate(&'static str),

    #[error("Start date cannot be after end date")]
    InvertedDateRange,
}

pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// NaN and infinities are rejected along with zero and negatives
pub fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(())
}

pub fn require_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::Negative(field));
    }
    Ok(())
}

pub fn require_date_order(start: Date, end: Date) -> Result<(), ValidationError> {
    if start > end {
        return Err(ValidationError::InvertedDateRange);
    }
    Ok(())
}

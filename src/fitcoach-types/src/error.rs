use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{record} name must not be blank")]
    BlankName { record: &'static str },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("a session needs at least one exercise with a name, weight and reps")]
    EmptySession,
    #[error("update does not change any field")]
    EmptyUpdate,
}

pub(crate) fn non_blank(record: &'static str, name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::BlankName { record });
    }
    Ok(())
}

fn finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_infinite() {
        return Err(ValidationError::NotFinite { field, value });
    }
    Ok(())
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    finite(field, value)?;
    if value.is_nan() || value <= 0.0 {
        return Err(ValidationError::NonPositive { field, value });
    }
    Ok(())
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    finite(field, value)?;
    if value.is_nan() || value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

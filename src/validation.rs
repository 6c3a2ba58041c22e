use crate::error::{PersonError, Result};
use chrono::{DateTime, Utc};

pub fn validate_non_empty_string(field_name: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PersonError::invalid_argument(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_positive_count(field_name: &'static str, value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(PersonError::invalid_argument(
            field_name,
            format!("Count must be positive, got {}", value),
        ));
    }
    usize::try_from(value).map_err(|_| {
        PersonError::invalid_argument(field_name, format!("Count {} is too large", value))
    })
}

pub fn validate_not_future(
    field_name: &'static str,
    value: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<()> {
    if value > now {
        return Err(PersonError::invalid_argument(
            field_name,
            format!("Date {} cannot be in the future", value.to_rfc3339()),
        ));
    }
    Ok(())
}

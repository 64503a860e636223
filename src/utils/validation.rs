use crate::utils::error::{AssistError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AssistError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AssistError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AssistError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_latitude(field_name: &str, lat: f64) -> Result<()> {
    validate_finite(field_name, lat)?;
    validate_range(field_name, lat, -90.0, 90.0)
}

pub fn validate_longitude(field_name: &str, lon: f64) -> Result<()> {
    validate_finite(field_name, lon)?;
    validate_range(field_name, lon, -180.0, 180.0)
}

pub fn validate_unique_ids<'a, I>(field_name: &str, ids: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(AssistError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: id.to_string(),
                reason: "Duplicate id".to_string(),
            });
        }
    }
    Ok(())
}

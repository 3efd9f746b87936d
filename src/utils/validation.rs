use crate::utils::error::{HookError, Result};
use regex::Regex;
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HookError::ValidationError {
            field: field_name.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_distinct(field_name: &str, values: &[&str]) -> Result<()> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(*value) {
            return Err(HookError::ValidationError {
                field: field_name.to_string(),
                reason: format!("Duplicate value: {}", value),
            });
        }
    }
    Ok(())
}

/// 顏色必須是 `#RRGGBB` 格式
pub fn validate_hex_colors(field_name: &str, colors: &[String]) -> Result<()> {
    if colors.is_empty() {
        return Err(HookError::ValidationError {
            field: field_name.to_string(),
            reason: "At least one color is required".to_string(),
        });
    }

    let re = Regex::new(r"^#[0-9A-Fa-f]{6}$")?;
    for color in colors {
        if !re.is_match(color) {
            return Err(HookError::ValidationError {
                field: field_name.to_string(),
                reason: format!("Invalid color '{}', expected #RRGGBB", color),
            });
        }
    }
    Ok(())
}

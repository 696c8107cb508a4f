//! Input validation functions
//!
//! Client-side checks run before a form is turned into a request body.
//! The ranges follow what the API accepts, so a request that passes here
//! is only rejected by the server for server-side reasons.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Maximum nickname length accepted by the API
pub const MAX_NICKNAME_CHARS: usize = 64;

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static date pattern"));

/// Parse a strict ISO `YYYY-MM-DD` calendar date
pub fn parse_record_date(value: &str) -> Result<NaiveDate, String> {
    let value = value.trim();
    if !ISO_DATE.is_match(value) {
        return Err("Date must be in YYYY-MM-DD format".to_string());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| "Date does not exist".to_string())
}

/// Validate nickname length
pub fn validate_nickname(nickname: &str) -> Result<(), String> {
    if nickname.chars().count() > MAX_NICKNAME_CHARS {
        return Err(format!(
            "Nickname must be at most {} characters",
            MAX_NICKNAME_CHARS
        ));
    }
    Ok(())
}

/// Validate height value (in cm)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm <= 0.0 {
        return Err("Height must be greater than 0".to_string());
    }
    Ok(())
}

/// Validate weight value (in kg)
pub fn validate_weight_kg(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg <= 0.0 {
        return Err("Weight must be greater than 0".to_string());
    }
    Ok(())
}

/// Validate age in years
pub fn validate_age(age: u32) -> Result<(), String> {
    if age == 0 {
        return Err("Age must be greater than 0".to_string());
    }
    Ok(())
}

/// Validate a macronutrient amount in grams
pub fn validate_grams(grams: f64) -> Result<(), String> {
    if grams.is_nan() || grams.is_infinite() {
        return Err("Amount must be a valid number".to_string());
    }
    if grams < 0.0 {
        return Err("Amount cannot be negative".to_string());
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map form field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "nickname" => "Nickname",
        "height" | "height_cm" => "Height",
        "weight" | "weight_kg" => "Weight",
        "age" => "Age",
        "gender" => "Gender",
        "goal" => "Goal",
        "record_date" => "Date",
        "calories_consumed" => "Calories Consumed",
        "protein_g" => "Protein",
        "fat_g" => "Fat",
        "carbs_g" => "Carbohydrates",
        "calories_burned_exercise" => "Exercise Calories",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Require a form field to be filled in
pub fn require<T>(field: &str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::new(field, "is required"))
}

/// Attach field context to a plain validation result
pub fn check(field: &str, result: Result<(), String>) -> Result<(), ValidationError> {
    result.map_err(|msg| ValidationError::new(field, &msg))
}

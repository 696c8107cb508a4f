//! API request bodies and the editable/view types held in client state

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DailyRecord, DailySummary, Gender, Goal, UserProfile};
use crate::validation::{
    check, require, validate_age, validate_grams, validate_height_cm, validate_nickname,
    validate_weight_kg, ValidationError,
};

// ============================================================================
// Request Bodies
// ============================================================================

/// Body for creating or updating a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPayload {
    pub nickname: Option<String>,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: u32,
    pub gender: Gender,
    pub goal: Goal,
}

/// Body for creating or overwriting a daily record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRecordPayload {
    pub record_date: NaiveDate,
    pub calories_consumed: u32,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    pub calories_burned_exercise: u32,
}

// ============================================================================
// Profile Form
// ============================================================================

/// Editable profile form. Numeric fields stay empty until the user fills them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProfileForm {
    pub nickname: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub age: Option<u32>,
    pub gender: Gender,
    pub goal: Goal,
}

impl ProfileForm {
    /// Overwrite every field with the server representation
    pub fn fill_from(&mut self, profile: &UserProfile) {
        *self = Self::from(profile);
    }

    /// Validate the form and build a request body
    pub fn to_payload(&self) -> Result<UserPayload, ValidationError> {
        let nickname = self
            .nickname
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        if let Some(ref name) = nickname {
            check("nickname", validate_nickname(name))?;
        }

        let height_cm = require("height_cm", self.height_cm)?;
        check("height_cm", validate_height_cm(height_cm))?;

        let weight_kg = require("weight_kg", self.weight_kg)?;
        check("weight_kg", validate_weight_kg(weight_kg))?;

        let age = require("age", self.age)?;
        check("age", validate_age(age))?;

        Ok(UserPayload {
            nickname,
            height_cm,
            weight_kg,
            age,
            gender: self.gender,
            goal: self.goal,
        })
    }
}

impl From<&UserProfile> for ProfileForm {
    fn from(profile: &UserProfile) -> Self {
        Self {
            nickname: profile.nickname.clone(),
            height_cm: Some(profile.height_cm),
            weight_kg: Some(profile.weight_kg),
            age: Some(profile.age),
            gender: profile.gender,
            goal: profile.goal,
        }
    }
}

// ============================================================================
// Daily Record Form
// ============================================================================

/// Editable daily record form for one calendar date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordForm {
    pub record_date: NaiveDate,
    pub calories_consumed: Option<u32>,
    pub protein_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub calories_burned_exercise: u32,
}

impl RecordForm {
    /// Empty form for a date: nutrition fields cleared, no exercise
    pub fn empty(record_date: NaiveDate) -> Self {
        Self {
            record_date,
            calories_consumed: None,
            protein_g: None,
            fat_g: None,
            carbs_g: None,
            calories_burned_exercise: 0,
        }
    }

    /// True when nothing but the date has been entered
    pub fn is_empty(&self) -> bool {
        *self == Self::empty(self.record_date)
    }

    /// Validate the form and build a request body
    pub fn to_payload(&self) -> Result<DailyRecordPayload, ValidationError> {
        let calories_consumed = require("calories_consumed", self.calories_consumed)?;

        let protein_g = require("protein_g", self.protein_g)?;
        check("protein_g", validate_grams(protein_g))?;

        let fat_g = require("fat_g", self.fat_g)?;
        check("fat_g", validate_grams(fat_g))?;

        let carbs_g = require("carbs_g", self.carbs_g)?;
        check("carbs_g", validate_grams(carbs_g))?;

        Ok(DailyRecordPayload {
            record_date: self.record_date,
            calories_consumed,
            protein_g,
            fat_g,
            carbs_g,
            calories_burned_exercise: self.calories_burned_exercise,
        })
    }
}

impl From<&DailyRecord> for RecordForm {
    fn from(record: &DailyRecord) -> Self {
        Self {
            record_date: record.record_date,
            calories_consumed: Some(record.calories_consumed),
            protein_g: Some(record.protein_g),
            fat_g: Some(record.fat_g),
            carbs_g: Some(record.carbs_g),
            calories_burned_exercise: record.calories_burned_exercise.unwrap_or(0),
        }
    }
}

// ============================================================================
// Views
// ============================================================================

/// Displayed summary metrics. All fields empty means "nothing to show".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SummaryView {
    pub bmr: Option<f64>,
    pub recommended_daily_calories: Option<f64>,
    pub calorie_balance: Option<f64>,
    pub llm_feedback: Option<String>,
}

impl SummaryView {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<&DailySummary> for SummaryView {
    fn from(summary: &DailySummary) -> Self {
        Self {
            bmr: Some(summary.bmr),
            recommended_daily_calories: Some(summary.recommended_daily_calories),
            calorie_balance: Some(summary.calorie_balance),
            llm_feedback: summary.llm_feedback.clone(),
        }
    }
}

/// Calendar highlight style
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub fill_mode: String,
    pub class: String,
}

/// Calendar highlight descriptor for dates that have a record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMarker {
    pub key: String,
    pub dates: Vec<NaiveDate>,
    pub highlight: Highlight,
}

impl CalendarMarker {
    /// Marker for filled dates
    pub fn filled(dates: Vec<NaiveDate>) -> Self {
        Self {
            key: "done".to_string(),
            dates,
            highlight: Highlight {
                fill_mode: "solid".to_string(),
                class: "has-record".to_string(),
            },
        }
    }
}

/// Banner style
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Success,
    Error,
}

/// Transient message shown to the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BannerMessage {
    pub text: String,
    pub kind: BannerKind,
}

impl BannerMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: BannerKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: BannerKind::Error,
        }
    }
}

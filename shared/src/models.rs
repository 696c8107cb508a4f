//! Data models mirrored from the nutrition API

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned user identifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(UserId)
    }
}

/// Gender as accepted by the API
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
            Gender::Other => write!(f, "other"),
        }
    }
}

/// Body composition goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseFat,
    #[default]
    Maintain,
    GainMuscle,
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lose" | "lose_fat" => Ok(Goal::LoseFat),
            "maintain" => Ok(Goal::Maintain),
            "gain" | "gain_muscle" => Ok(Goal::GainMuscle),
            _ => Err(format!("Unknown goal: {}", s)),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::LoseFat => write!(f, "lose_fat"),
            Goal::Maintain => write!(f, "maintain"),
            Goal::GainMuscle => write!(f, "gain_muscle"),
        }
    }
}

/// User profile as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: UserId,
    #[serde(default)]
    pub nickname: Option<String>,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: u32,
    pub gender: Gender,
    pub goal: Goal,
}

impl UserProfile {
    /// Label used in user pickers
    pub fn display_name(&self) -> String {
        match self.nickname.as_deref() {
            Some(name) if !name.trim().is_empty() => format!("{} (#{})", name, self.id),
            _ => format!("User #{}", self.id),
        }
    }
}

/// One day of nutrition data, keyed by (user, record_date)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRecord {
    pub record_date: NaiveDate,
    pub calories_consumed: u32,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    #[serde(default)]
    pub calories_burned_exercise: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

/// Server-computed metrics for one (user, date) pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub bmr: f64,
    pub recommended_daily_calories: f64,
    /// Consumed minus recommended, plus exercise calories
    pub calorie_balance: f64,
    #[serde(default)]
    pub llm_feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_record: Option<DailyRecord>,
}

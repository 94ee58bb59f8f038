use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::nutrition::DailyGoals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Body metrics and goals saved per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub age: u32,
    pub sex: Sex,
    pub height_feet: u32,
    pub height_inches: u32,
    /// pounds
    pub weight: f64,
    /// TDEE multiplier, 1.2 (sedentary) to 1.9 (very active)
    pub activity_level: f64,
    pub calorie_goal: f64,
    pub protein_goal: f64,
    pub fiber_goal: f64,
}

impl Default for UserSettings {
    fn default() -> Self {
        let goals = DailyGoals::default();
        Self {
            age: 30,
            sex: Sex::Male,
            height_feet: 5,
            height_inches: 10,
            weight: 180.0,
            activity_level: 1.55,
            calorie_goal: goals.calorie_goal,
            protein_goal: goals.protein_goal,
            fiber_goal: goals.fiber_goal,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("{0} goal must be a non-negative number")]
    NegativeGoal(&'static str),
    #[error("{0} must be a positive number")]
    NonPositive(&'static str),
}

impl UserSettings {
    pub fn goals(&self) -> DailyGoals {
        DailyGoals {
            calorie_goal: self.calorie_goal,
            protein_goal: self.protein_goal,
            fiber_goal: self.fiber_goal,
        }
    }

    pub fn total_height_inches(&self) -> u32 {
        self.height_feet * 12 + self.height_inches
    }

    /// Zero goals are accepted and scored as "met"; negative or non-finite
    /// values are not.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, goal) in [
            ("calorie", self.calorie_goal),
            ("protein", self.protein_goal),
            ("fiber", self.fiber_goal),
        ] {
            if !goal.is_finite() || goal < 0.0 {
                return Err(SettingsError::NegativeGoal(name));
            }
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(SettingsError::NonPositive("weight"));
        }
        if !(self.activity_level.is_finite() && self.activity_level > 0.0) {
            return Err(SettingsError::NonPositive("activity level"));
        }
        if self.total_height_inches() == 0 {
            return Err(SettingsError::NonPositive("height"));
        }
        if self.age == 0 {
            return Err(SettingsError::NonPositive("age"));
        }
        Ok(())
    }
}

/// Calories, protein and fiber targets for one plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuggestedGoals {
    pub calories: i64,
    pub protein: i64,
    pub fiber: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSuggestions {
    pub bmr: f64,
    pub tdee: f64,
    pub lose2: SuggestedGoals,
    pub lose1: SuggestedGoals,
    pub maintain: SuggestedGoals,
    pub gain1: SuggestedGoals,
}

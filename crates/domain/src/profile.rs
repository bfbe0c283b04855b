use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{ConfigError, EquipmentInventory, equipment};

const BIRTHDAY_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const NO_PREFERENCES: &str = "no preferences";

/// User data as submitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub gender: String,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    pub height: f64,
    pub height_type: String,
    pub weight: f64,
    pub weight_type: String,
    pub fitness_level: String,
    #[serde(default)]
    pub improve_body_parts: Vec<String>,
    #[serde(default)]
    pub exercise_limitations: Vec<String>,
    pub nutrition_goal: String,
    #[serde(default)]
    pub equipment_list: Vec<String>,
    pub training_days: u8,
    pub workout_time: u32,
}

impl UserProfile {
    /// Age in full years on `today`, derived from the birthday if present.
    pub fn age_on(&self, today: NaiveDate) -> Result<u32, ProfileError> {
        let Some(birthday) = &self.birthday else {
            return self.age.ok_or(ProfileError::MissingAge);
        };
        let birthday = NaiveDateTime::parse_from_str(birthday.trim(), BIRTHDAY_FORMAT)
            .map_err(|_| ProfileError::InvalidBirthday(birthday.clone()))?
            .date();
        today
            .years_since(birthday)
            .ok_or_else(|| ProfileError::InvalidBirthday(birthday.to_string()))
    }

    pub fn height_cm(&self) -> Result<f64, ProfileError> {
        let unit = self
            .height_type
            .trim()
            .parse::<HeightUnit>()
            .map_err(|_| ProfileError::UnknownHeightUnit(self.height_type.clone()))?;
        Ok(self.height * unit.centimeters())
    }

    pub fn weight_kg(&self) -> Result<f64, ProfileError> {
        let unit = self
            .weight_type
            .trim()
            .parse::<WeightUnit>()
            .map_err(|_| ProfileError::UnknownWeightUnit(self.weight_type.clone()))?;
        Ok(self.weight * unit.kilograms())
    }

    #[must_use]
    pub fn improve_body_parts(&self) -> Vec<&str> {
        if self.improve_body_parts.is_empty() {
            vec![NO_PREFERENCES]
        } else {
            self.improve_body_parts.iter().map(String::as_str).collect()
        }
    }

    /// Described limitations in the order the user listed them. Limitations
    /// without a description are ignored.
    #[must_use]
    pub fn exercise_limitations<'a>(
        &'a self,
        descriptions: &'a UserDataDescriptions,
    ) -> Vec<(&'a str, &'a str)> {
        let mut limitations: Vec<(&str, &str)> = Vec::new();
        for limitation in &self.exercise_limitations {
            let Some((key, description)) = descriptions
                .exercise_limitations
                .get_key_value(limitation.trim())
            else {
                continue;
            };
            if limitations.iter().all(|(k, _)| *k != key.as_str()) {
                limitations.push((key.as_str(), description.as_str()));
            }
        }
        limitations
    }

    pub fn nutrition_goal<'a>(
        &'a self,
        descriptions: &'a UserDataDescriptions,
    ) -> Result<(&'a str, &'a str), ConfigError> {
        descriptions
            .nutrition_goals
            .get_key_value(self.nutrition_goal.trim())
            .map(|(goal, description)| (goal.as_str(), description.as_str()))
            .ok_or_else(|| ConfigError::UnknownNutritionGoal(self.nutrition_goal.clone()))
    }

    /// The listed equipment followed by the bodyweight sentinel.
    #[must_use]
    pub fn equipment_list(&self) -> Vec<&str> {
        let mut list = self
            .equipment_list
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>();
        if !list.iter().any(|tag| equipment::normalize(tag) == equipment::NO_EQUIPMENT) {
            list.push(equipment::NO_EQUIPMENT);
        }
        list
    }

    #[must_use]
    pub fn equipment(&self) -> EquipmentInventory {
        EquipmentInventory::new(&self.equipment_list)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HeightUnit {
    Cm,
    In,
    Ft,
    M,
}

impl HeightUnit {
    #[must_use]
    pub fn centimeters(self) -> f64 {
        match self {
            HeightUnit::Cm => 1.0,
            HeightUnit::In => 2.54,
            HeightUnit::Ft => 30.48,
            HeightUnit::M => 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WeightUnit {
    Kg,
    Lb,
    Stone,
}

impl WeightUnit {
    #[must_use]
    pub fn kilograms(self) -> f64 {
        match self {
            WeightUnit::Kg => 1.0,
            WeightUnit::Lb => 0.453_592_37,
            WeightUnit::Stone => 6.350_29,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("unrecognized height unit: {0}")]
    UnknownHeightUnit(String),
    #[error("unrecognized weight unit: {0}")]
    UnknownWeightUnit(String),
    #[error("invalid birthday: {0}")]
    InvalidBirthday(String),
    #[error("neither birthday nor age given")]
    MissingAge,
}

/// Text describing exercise limitations and nutrition goals by key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserDataDescriptions {
    pub exercise_limitations: IndexMap<String, String>,
    pub nutrition_goals: IndexMap<String, String>,
}

impl Default for UserDataDescriptions {
    fn default() -> Self {
        let map = |entries: &[(&str, &str)]| -> IndexMap<String, String> {
            entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect()
        };
        Self {
            exercise_limitations: map(&[
                (
                    "no_squatting",
                    "avoid exercises with deep knee flexion under load",
                ),
                (
                    "no_jumping",
                    "avoid plyometric and high impact exercises",
                ),
                (
                    "no_overhead",
                    "avoid pressing or holding weights overhead",
                ),
                (
                    "no_lying_on_back",
                    "avoid exercises performed lying on the back",
                ),
            ]),
            nutrition_goals: map(&[
                (
                    "lose_weight",
                    "caloric deficit, favour higher training volume and short rest times",
                ),
                (
                    "maintain_weight",
                    "caloric balance, keep a balanced mix of strength and conditioning",
                ),
                (
                    "gain_weight",
                    "caloric surplus, favour compound lifts and progressive overload",
                ),
                (
                    "build_muscle",
                    "slight caloric surplus, favour hypertrophy rep ranges",
                ),
            ]),
        }
    }
}

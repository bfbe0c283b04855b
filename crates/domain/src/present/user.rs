use chrono::NaiveDate;
use serde::Deserialize;

use super::{BULLET, PresentError};
use crate::{UserDataDescriptions, UserProfile};

/// Selects the profile fields included in the user data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct UserDataFormatter {
    pub print_gender: bool,
    pub print_age: bool,
    pub print_height: bool,
    pub print_weight: bool,
    pub print_fitness_level: bool,
    pub print_improve_body_parts: bool,
    pub print_exercise_limitations: bool,
    pub print_nutrition_goal: bool,
    pub print_equipment_list: bool,
    pub print_training_days: bool,
    pub print_workout_time: bool,
}

impl Default for UserDataFormatter {
    fn default() -> Self {
        Self {
            print_gender: true,
            print_age: true,
            print_height: true,
            print_weight: true,
            print_fitness_level: true,
            print_improve_body_parts: true,
            print_exercise_limitations: true,
            print_nutrition_goal: true,
            print_equipment_list: true,
            print_training_days: true,
            print_workout_time: true,
        }
    }
}

impl UserDataFormatter {
    pub fn format(
        &self,
        profile: &UserProfile,
        descriptions: &UserDataDescriptions,
        today: NaiveDate,
    ) -> Result<String, PresentError> {
        let mut lines = Vec::new();

        if self.print_gender {
            lines.push(format!("Gender: {}", profile.gender));
        }
        if self.print_age {
            lines.push(format!("Age: {} years", profile.age_on(today)?));
        }
        if self.print_height {
            lines.push(format!("Height (cm): {:.1}", profile.height_cm()?));
        }
        if self.print_weight {
            lines.push(format!("Weight (kg): {:.1}", profile.weight_kg()?));
        }
        if self.print_fitness_level {
            lines.push(format!("Fitness Level: {}", profile.fitness_level));
        }
        if self.print_improve_body_parts {
            lines.push(format!(
                "Target Body Parts: {}",
                profile.improve_body_parts().join(", ")
            ));
        }
        if self.print_exercise_limitations {
            let limitations = profile.exercise_limitations(descriptions);
            if limitations.is_empty() {
                lines.push("Exercise Limitations: none".to_string());
            } else {
                lines.push("Exercise Limitations:".to_string());
                for (limitation, description) in limitations {
                    lines.push(format!("  {BULLET} {limitation}: {description}"));
                }
            }
        }
        if self.print_nutrition_goal {
            let (goal, description) = profile.nutrition_goal(descriptions)?;
            lines.push(format!("Nutrition Goal: {goal} \u{2013} {description}"));
        }
        if self.print_equipment_list {
            lines.push(format!(
                "Available Equipment: {}",
                profile.equipment_list().join(", ")
            ));
        }
        if self.print_training_days {
            lines.push(format!("Training Days: {}", profile.training_days));
        }
        if self.print_workout_time {
            lines.push(format!(
                "Workout Time (min): {} minutes",
                profile.workout_time
            ));
        }

        Ok(lines.join("\n"))
    }
}

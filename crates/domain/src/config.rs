use serde::Deserialize;

use crate::{
    AgeBasedAdjustments, AssistantConfig, DayTypePlan, ExerciseFilter, ExercisesFormatter,
    FeedbackDescriptions, ScannerDataFormatter, SkillLevelOrdering, UserDataDescriptions,
    UserDataFormatter,
};

/// Immutable settings of the plan generation, one section per concern.
///
/// Every section is optional and falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub skills: SkillLevelOrdering,
    pub day_types: DayTypePlan,
    pub exercises_formatter: ExercisesFormatter,
    pub user_data_formatter: UserDataFormatter,
    pub scanner_data_formatter: ScannerDataFormatter,
    pub user_data: UserDataDescriptions,
    pub age_based_adjustments: AgeBasedAdjustments,
    pub feedback: FeedbackDescriptions,
    pub assistant: AssistantConfig,
}

impl Config {
    #[must_use]
    pub fn filter(&self) -> ExerciseFilter {
        ExerciseFilter::new(self.skills.clone(), self.day_types.clone())
    }
}

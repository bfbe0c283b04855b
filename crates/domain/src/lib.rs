#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod assistant;
pub mod catalog;
pub mod config;
pub mod day_type;
pub mod equipment;
pub mod error;
pub mod filter;
pub mod name;
pub mod plan;
pub mod present;
pub mod profile;
pub mod service;
pub mod skill;
pub mod week;

#[cfg(test)]
mod test_data;

pub use assistant::{
    AssistantConfig, CompletionRequest, FlowConfig, GenerateError, LanguageModel, PlanContext,
    ProgramReferences, Prompts, TrainingAssistant, render,
};
pub use catalog::{Catalog, ExerciseRecord, FeatureRow, FeatureTable, RawExercise, parse_muscles};
pub use config::Config;
pub use day_type::{BodyPart, DayType, DayTypePlan};
pub use equipment::EquipmentInventory;
pub use error::{
    ConfigError, FilterError, ReadError, StorageError, UnknownEquipmentError,
    UnsupportedTrainingDaysError,
};
pub use filter::{EligibleExerciseSet, ExerciseFilter};
pub use name::{Name, NameError};
pub use plan::{PlanParseError, PlannedExercise, TrainingDay, TrainingWeek, parse_plan};
pub use present::{
    AgeBasedAdjustments, AgeFormatter, AgePeriod, BodyFatEstimate, ExercisesFormatter, Feedback,
    FeedbackDescriptions, PhysicalAttributes, PresentError, ScannerData, ScannerDataFormatter,
    TrainingReadiness, UserDataFormatter, format_previous_week,
};
pub use profile::{HeightUnit, ProfileError, UserDataDescriptions, UserProfile, WeightUnit};
pub use service::Service;
pub use skill::SkillLevelOrdering;
pub use week::{DaySlot, TrainingDays, WeekSkeleton, WeekTemplate, WeekTemplates};

/// Source of the raw catalog rows.
pub trait CatalogRepository {
    fn read_catalog(&self) -> Result<Vec<RawExercise>, ReadError>;
}

use std::collections::BTreeSet;

use crate::DayType;

/// An input constraint that has no counterpart in the supplied configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown skill level: {0}")]
    UnknownSkillLevel(String),
    #[error("unknown day type: {0}")]
    UnknownDayType(String),
    #[error("no body parts configured for day type {0}")]
    EmptyDayType(DayType),
    #[error("skill level ordering must not be empty")]
    NoSkillLevels,
    #[error("unknown feedback: {0}")]
    UnknownFeedback(String),
    #[error("no description for nutrition goal: {0}")]
    UnknownNutritionGoal(String),
    #[error("no week template for {0} training days")]
    MissingWeekTemplate(u8),
    #[error("invalid week template for {0} training days")]
    InvalidWeekTemplate(u8),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown equipment: {}", join(.0))]
pub struct UnknownEquipmentError(pub BTreeSet<String>);

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unsupported number of training days: {0} (expected 2 to 6)")]
pub struct UnsupportedTrainingDaysError(pub u8);

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    UnknownEquipment(#[from] UnknownEquipmentError),
    #[error(transparent)]
    UnsupportedTrainingDays(#[from] UnsupportedTrainingDaysError),
}

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid content in {path}: {message}")]
    Invalid { path: String, message: String },
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

fn join(tags: &BTreeSet<String>) -> String {
    tags.iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_unknown_equipment_error_display() {
        assert_eq!(
            UnknownEquipmentError(BTreeSet::from(["kettlebell".into(), "barbell".into()]))
                .to_string(),
            "unknown equipment: barbell, kettlebell"
        );
    }

    #[test]
    fn test_filter_error_from_config_error() {
        assert!(matches!(
            FilterError::from(ConfigError::UnknownSkillLevel("expert".into())),
            FilterError::Config(ConfigError::UnknownSkillLevel(skill)) if skill == "expert"
        ));
        assert_eq!(
            FilterError::from(UnsupportedTrainingDaysError(7)).to_string(),
            "unsupported number of training days: 7 (expected 2 to 6)"
        );
    }

    #[test]
    fn test_read_error_from_storage_error() {
        assert!(matches!(
            ReadError::from(StorageError::NotFound("catalog.json".into())),
            ReadError::Storage(StorageError::NotFound(path)) if path == "catalog.json"
        ));
        assert!(matches!(
            ReadError::from(Box::<dyn std::error::Error + Send + Sync>::from("foo")),
            ReadError::Other(error) if error.to_string() == "foo"
        ));
    }
}

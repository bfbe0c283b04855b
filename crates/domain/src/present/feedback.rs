use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::ConfigError;

/// How the user perceived the previous week.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Easy,
    Normal,
    Hard,
}

impl Feedback {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        value
            .trim()
            .parse()
            .map_err(|_| ConfigError::UnknownFeedback(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FeedbackDescriptions(BTreeMap<Feedback, String>);

impl FeedbackDescriptions {
    #[must_use]
    pub fn new(descriptions: BTreeMap<Feedback, String>) -> Self {
        Self(descriptions)
    }

    pub fn format(&self, feedback: Feedback) -> Result<&str, ConfigError> {
        self.0
            .get(&feedback)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::UnknownFeedback(feedback.to_string()))
    }
}

impl Default for FeedbackDescriptions {
    fn default() -> Self {
        Self(BTreeMap::from([
            (
                Feedback::Easy,
                "The user reported that the previous week's workout was 'easy'. \
                 Increase the training load moderately."
                    .to_string(),
            ),
            (
                Feedback::Normal,
                "The user reported that the previous week's workout was 'normal'. \
                 Keep the training load and progress gradually."
                    .to_string(),
            ),
            (
                Feedback::Hard,
                "The user reported that the previous week's workout was 'hard'. \
                 Reduce the training load and allow more recovery."
                    .to_string(),
            ),
        ]))
    }
}

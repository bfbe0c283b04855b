use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::ConfigError;

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
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayType {
    FullBody,
    LowerBody,
    UpperBody,
    Push,
    Pull,
    Legs,
}

impl DayType {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        value
            .trim()
            .parse()
            .map_err(|_| ConfigError::UnknownDayType(value.to_string()))
    }
}

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
#[strum(ascii_case_insensitive)]
pub enum BodyPart {
    Back,
    Chest,
    Triceps,
    Biceps,
    Shoulders,
    Legs,
    Forearms,
    Core,
}

/// Body parts that may be trained on each day type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<DayType, BTreeSet<BodyPart>>")]
pub struct DayTypePlan {
    body_parts: BTreeMap<DayType, BTreeSet<BodyPart>>,
}

impl DayTypePlan {
    pub fn new(body_parts: BTreeMap<DayType, BTreeSet<BodyPart>>) -> Result<Self, ConfigError> {
        if let Some((day_type, _)) = body_parts.iter().find(|(_, parts)| parts.is_empty()) {
            return Err(ConfigError::EmptyDayType(*day_type));
        }
        Ok(Self { body_parts })
    }

    pub fn body_parts(&self, day_type: DayType) -> Result<&BTreeSet<BodyPart>, ConfigError> {
        self.body_parts
            .get(&day_type)
            .ok_or_else(|| ConfigError::UnknownDayType(day_type.to_string()))
    }

    #[must_use]
    pub fn allows(&self, day_type: DayType, body_part: BodyPart) -> bool {
        self.body_parts
            .get(&day_type)
            .is_some_and(|parts| parts.contains(&body_part))
    }

    pub fn day_types(&self) -> impl Iterator<Item = DayType> + '_ {
        self.body_parts.keys().copied()
    }
}

impl Default for DayTypePlan {
    fn default() -> Self {
        use BodyPart::{Back, Biceps, Chest, Core, Forearms, Legs, Shoulders, Triceps};

        let body_parts = DayType::iter()
            .map(|day_type| {
                let parts: &[BodyPart] = match day_type {
                    DayType::FullBody => &[
                        Back, Chest, Triceps, Biceps, Shoulders, Legs, Forearms, Core,
                    ],
                    DayType::UpperBody => {
                        &[Back, Chest, Triceps, Biceps, Shoulders, Forearms, Core]
                    }
                    DayType::LowerBody | DayType::Legs => &[Legs, Core],
                    DayType::Push => &[Chest, Triceps, Shoulders, Forearms, Core],
                    DayType::Pull => &[Back, Biceps, Shoulders, Forearms, Core],
                };
                (day_type, parts.iter().copied().collect())
            })
            .collect();

        Self { body_parts }
    }
}

impl TryFrom<BTreeMap<DayType, BTreeSet<BodyPart>>> for DayTypePlan {
    type Error = ConfigError;

    fn try_from(value: BTreeMap<DayType, BTreeSet<BodyPart>>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

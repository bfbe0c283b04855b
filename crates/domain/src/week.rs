use std::collections::BTreeMap;

use derive_more::Display;
use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};

use crate::{ConfigError, DayType, UnsupportedTrainingDaysError};

pub const DAYS_PER_WEEK: usize = 7;

const REST_DAY: &str = "REST_DAY";

/// Number of workout days per week.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrainingDays(u8);

impl TrainingDays {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 6;

    pub fn new(value: u8) -> Result<Self, UnsupportedTrainingDaysError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(UnsupportedTrainingDaysError(value))
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// The split implied by the number of training days, rotated over the workout days.
    #[must_use]
    pub fn day_types(self) -> &'static [DayType] {
        match self.0 {
            0..=3 => &[DayType::FullBody],
            4 => &[DayType::UpperBody, DayType::LowerBody],
            _ => &[DayType::Push, DayType::Pull, DayType::Legs],
        }
    }
}

impl TryFrom<u8> for TrainingDays {
    type Error = UnsupportedTrainingDaysError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySlot {
    Rest,
    Workout(DayType),
}

impl DaySlot {
    #[must_use]
    pub fn day_type(self) -> Option<DayType> {
        match self {
            DaySlot::Rest => None,
            DaySlot::Workout(day_type) => Some(day_type),
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        match self {
            DaySlot::Rest => REST_DAY.to_string(),
            DaySlot::Workout(day_type) => day_type.to_string(),
        }
    }
}

/// The seven days of a week, each either a rest day or a workout of some day type.
///
/// Serializes as `{"day 1": {"day_type": "FULL_BODY"}, "day 2": {"day_type": "REST_DAY"}, ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSkeleton([DaySlot; DAYS_PER_WEEK]);

impl WeekSkeleton {
    fn new(pattern: [bool; DAYS_PER_WEEK], day_types: &[DayType]) -> Self {
        let mut rotation = day_types.iter().copied().cycle();
        Self(pattern.map(|workout| {
            if workout {
                rotation.next().map_or(DaySlot::Rest, DaySlot::Workout)
            } else {
                DaySlot::Rest
            }
        }))
    }

    #[must_use]
    pub fn slots(&self) -> &[DaySlot; DAYS_PER_WEEK] {
        &self.0
    }

    #[must_use]
    pub fn workout_days(&self) -> usize {
        self.0.iter().filter(|slot| **slot != DaySlot::Rest).count()
    }
}

impl Serialize for WeekSkeleton {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(DAYS_PER_WEEK))?;
        for (index, slot) in self.0.iter().enumerate() {
            map.serialize_entry(
                &format!("day {}", index + 1),
                &BTreeMap::from([("day_type", slot.label())]),
            )?;
        }
        map.end()
    }
}

/// The skeleton and day type rotation for a number of training days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekTemplate {
    pub training_days: TrainingDays,
    pub skeleton: WeekSkeleton,
    pub day_types: Vec<DayType>,
}

/// Rest/workout patterns for every supported number of training days.
///
/// Deserializes from an object of `day_N_template` entries, each holding seven
/// days in order. A day whose `day_type` is `REST_DAY` is a rest day, any
/// other day is a workout day. The workout day types are always assigned by
/// rotating the split over the workout days.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, IndexMap<String, StoredDay>>")]
pub struct WeekTemplates {
    patterns: BTreeMap<u8, [bool; DAYS_PER_WEEK]>,
}

impl WeekTemplates {
    pub fn new(patterns: BTreeMap<u8, [bool; DAYS_PER_WEEK]>) -> Result<Self, ConfigError> {
        for (training_days, pattern) in &patterns {
            let workouts = pattern.iter().filter(|workout| **workout).count();
            if TrainingDays::new(*training_days).is_err()
                || workouts != usize::from(*training_days)
            {
                return Err(ConfigError::InvalidWeekTemplate(*training_days));
            }
        }

        if let Some(missing) = TrainingDays::all().find(|d| !patterns.contains_key(&d.get())) {
            return Err(ConfigError::MissingWeekTemplate(missing.get()));
        }

        Ok(Self { patterns })
    }

    pub fn select(&self, training_days: u8) -> Result<WeekTemplate, UnsupportedTrainingDaysError> {
        let training_days = TrainingDays::new(training_days)?;
        let pattern = self
            .patterns
            .get(&training_days.get())
            .ok_or(UnsupportedTrainingDaysError(training_days.get()))?;
        let day_types = training_days.day_types().to_vec();

        Ok(WeekTemplate {
            training_days,
            skeleton: WeekSkeleton::new(*pattern, &day_types),
            day_types,
        })
    }
}

impl Default for WeekTemplates {
    fn default() -> Self {
        let patterns = [
            (2, "WRRWRRR"),
            (3, "WRWRWRR"),
            (4, "WWRWWRR"),
            (5, "WWWRWWR"),
            (6, "WWWWWWR"),
        ]
        .into_iter()
        .map(|(training_days, pattern)| {
            let mut days = [false; DAYS_PER_WEEK];
            for (day, c) in days.iter_mut().zip(pattern.chars()) {
                *day = c == 'W';
            }
            (training_days, days)
        })
        .collect();

        Self { patterns }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoredDay {
    day_type: String,
}

impl TryFrom<BTreeMap<String, IndexMap<String, StoredDay>>> for WeekTemplates {
    type Error = ConfigError;

    fn try_from(value: BTreeMap<String, IndexMap<String, StoredDay>>) -> Result<Self, Self::Error> {
        let mut patterns = BTreeMap::new();

        for (key, days) in value {
            let Some(training_days) = key
                .strip_prefix("day_")
                .and_then(|rest| rest.strip_suffix("_template"))
                .and_then(|n| n.parse::<u8>().ok())
            else {
                warn!("ignoring unexpected week template key: {key}");
                continue;
            };

            let pattern: [bool; DAYS_PER_WEEK] = days
                .values()
                .map(|day| !day.day_type.trim().eq_ignore_ascii_case(REST_DAY))
                .collect::<Vec<_>>()
                .try_into()
                .map_err(|_| ConfigError::InvalidWeekTemplate(training_days))?;

            patterns.insert(training_days, pattern);
        }

        Self::new(patterns)
    }
}

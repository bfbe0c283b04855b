use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{BodyPart, Name, equipment};

/// One row of the exercise catalog as it is stored.
///
/// All fields are free text. Missing or `null` values read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawExercise {
    #[serde(rename = "Exercise Name", default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(rename = "Exercise Group", default, deserialize_with = "lenient")]
    pub group: String,
    #[serde(rename = "Body Part", default, deserialize_with = "lenient")]
    pub body_part: String,
    #[serde(rename = "Equipment Used", default, deserialize_with = "lenient")]
    pub equipment: String,
    #[serde(rename = "Skill Level", default, deserialize_with = "lenient")]
    pub skill_level: String,
    #[serde(
        rename = "Muscle Groups Targeted (%)",
        default,
        deserialize_with = "lenient"
    )]
    pub muscles: String,
}

fn lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseRecord {
    pub name: Name,
    pub group: String,
    /// `None` if the stored body part is not part of the known vocabulary.
    pub body_part: Option<BodyPart>,
    pub body_part_text: String,
    pub muscle_targets: BTreeMap<String, u32>,
    pub muscles_text: String,
    pub equipment_required: BTreeSet<String>,
    pub skill_levels: BTreeSet<String>,
}

impl ExerciseRecord {
    fn encode(raw: &RawExercise) -> Option<Self> {
        let name = match Name::new(&raw.name) {
            Ok(name) => name,
            Err(err) => {
                warn!("skipping catalog row without valid name: {err}");
                return None;
            }
        };

        Some(Self {
            name,
            group: raw.group.trim().to_string(),
            body_part: raw.body_part.trim().parse().ok(),
            body_part_text: raw.body_part.trim().to_string(),
            muscle_targets: parse_muscles(&raw.muscles),
            muscles_text: raw.muscles.trim().to_string(),
            equipment_required: parse_tags(&raw.equipment, &[',']),
            skill_levels: parse_tags(&raw.skill_level, &['|', ',']),
        })
    }

    #[must_use]
    pub fn muscle_target(&self, muscle: &str) -> u32 {
        self.muscle_targets
            .get(&muscle.trim().to_lowercase())
            .copied()
            .unwrap_or(0)
    }
}

/// The merged exercise catalog.
///
/// Records keep the order of the stored rows. The vocabularies are derived from
/// the complete catalog and survive filtering, so a narrowed catalog still
/// knows every equipment tag, skill level and muscle of its origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    exercises: Vec<ExerciseRecord>,
    muscles: BTreeSet<String>,
    equipment: BTreeSet<String>,
    skills: BTreeSet<String>,
}

impl Catalog {
    #[must_use]
    pub fn encode(rows: &[RawExercise]) -> Self {
        let mut names = HashSet::new();
        let exercises = rows
            .iter()
            .filter_map(ExerciseRecord::encode)
            .filter(|exercise| {
                let unique = names.insert(exercise.name.clone());
                if !unique {
                    warn!("skipping duplicate catalog row: {}", exercise.name);
                }
                unique
            })
            .collect::<Vec<_>>();

        let muscles = exercises
            .iter()
            .flat_map(|e| e.muscle_targets.keys().cloned())
            .collect();
        let equipment = exercises
            .iter()
            .flat_map(|e| e.equipment_required.iter().cloned())
            .collect();
        let skills = exercises
            .iter()
            .flat_map(|e| e.skill_levels.iter().cloned())
            .collect();

        debug!(
            "encoded catalog of {} exercises from {} rows",
            exercises.len(),
            rows.len()
        );

        Self {
            exercises,
            muscles,
            equipment,
            skills,
        }
    }

    #[must_use]
    pub fn exercises(&self) -> &[ExerciseRecord] {
        &self.exercises
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ExerciseRecord> {
        let name = name.trim();
        self.exercises.iter().find(|e| e.name.as_str() == name)
    }

    #[must_use]
    pub fn muscle_vocabulary(&self) -> &BTreeSet<String> {
        &self.muscles
    }

    #[must_use]
    pub fn equipment_vocabulary(&self) -> &BTreeSet<String> {
        &self.equipment
    }

    #[must_use]
    pub fn skill_vocabulary(&self) -> &BTreeSet<String> {
        &self.skills
    }

    #[must_use]
    pub fn muscle_table(&self) -> FeatureTable<u32> {
        FeatureTable::new(&self.muscles, &self.exercises, |e, muscle| {
            e.muscle_target(muscle)
        })
    }

    #[must_use]
    pub fn equipment_table(&self) -> FeatureTable<bool> {
        FeatureTable::new(&self.equipment, &self.exercises, |e, tag| {
            e.equipment_required.contains(tag)
        })
    }

    #[must_use]
    pub fn skill_table(&self) -> FeatureTable<bool> {
        FeatureTable::new(&self.skills, &self.exercises, |e, skill| {
            e.skill_levels.contains(skill)
        })
    }

    pub(crate) fn retain(&self, predicate: impl Fn(&ExerciseRecord) -> bool) -> Self {
        Self {
            exercises: self
                .exercises
                .iter()
                .filter(|e| predicate(e))
                .cloned()
                .collect(),
            muscles: self.muscles.clone(),
            equipment: self.equipment.clone(),
            skills: self.skills.clone(),
        }
    }
}

/// Per-exercise values over a catalog-wide set of columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureTable<V> {
    columns: Vec<String>,
    rows: Vec<FeatureRow<V>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRow<V> {
    pub exercise: Name,
    pub values: BTreeMap<String, V>,
}

impl<V: Copy + Default + PartialEq> FeatureTable<V> {
    fn new(
        columns: &BTreeSet<String>,
        exercises: &[ExerciseRecord],
        value: impl Fn(&ExerciseRecord, &str) -> V,
    ) -> Self {
        Self {
            columns: columns.iter().cloned().collect(),
            rows: exercises
                .iter()
                .map(|e| FeatureRow {
                    exercise: e.name.clone(),
                    values: columns.iter().map(|c| (c.clone(), value(e, c))).collect(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[FeatureRow<V>] {
        &self.rows
    }

    #[must_use]
    pub fn value(&self, exercise: &str, column: &str) -> Option<V> {
        self.rows
            .iter()
            .find(|row| row.exercise.as_str() == exercise)
            .and_then(|row| row.values.get(column).copied())
    }

    /// Columns holding a non-default value in at least one row.
    #[must_use]
    pub fn active_columns(&self) -> BTreeSet<&str> {
        self.rows
            .iter()
            .flat_map(|row| {
                row.values
                    .iter()
                    .filter(|(_, v)| **v != V::default())
                    .map(|(c, _)| c.as_str())
            })
            .collect()
    }
}

static MUSCLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.+?)\s+(\d+)%").expect("muscle pattern must be a valid regex")
});

/// Parse text like `"Chest 80%, Triceps 40%"` into lower-cased muscle names
/// and percentages. Segments that do not match are ignored.
#[must_use]
pub fn parse_muscles(text: &str) -> BTreeMap<String, u32> {
    text.split(',')
        .filter_map(|segment| {
            let captures = MUSCLE_PATTERN.captures(segment.trim())?;
            let muscle = captures[1].trim().to_lowercase();
            let percentage = captures[2].parse().ok()?;
            Some((muscle, percentage))
        })
        .filter(|(muscle, _)| !muscle.is_empty())
        .collect()
}

fn parse_tags(text: &str, separators: &[char]) -> BTreeSet<String> {
    text.split(separators)
        .map(equipment::normalize)
        .filter(|tag| !tag.is_empty())
        .collect()
}

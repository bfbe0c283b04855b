use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::ConfigError;

/// Integer grades of the skill levels a catalog may reference.
///
/// Names are compared case-insensitively. A user at a given level may perform
/// every exercise tagged with a level of the same or a lower grade.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, u8>")]
pub struct SkillLevelOrdering {
    grades: BTreeMap<String, u8>,
}

impl SkillLevelOrdering {
    pub fn new<I, S>(grades: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, u8)>,
        S: AsRef<str>,
    {
        let grades = grades
            .into_iter()
            .map(|(name, grade)| (normalize(name.as_ref()), grade))
            .filter(|(name, _)| !name.is_empty())
            .collect::<BTreeMap<_, _>>();

        if grades.is_empty() {
            return Err(ConfigError::NoSkillLevels);
        }

        Ok(Self { grades })
    }

    pub fn grade(&self, skill_level: &str) -> Result<u8, ConfigError> {
        self.grades
            .get(&normalize(skill_level))
            .copied()
            .ok_or_else(|| ConfigError::UnknownSkillLevel(skill_level.to_string()))
    }

    /// Skill levels whose grade does not exceed the grade of `skill_level`.
    pub fn levels_up_to(&self, skill_level: &str) -> Result<BTreeSet<&str>, ConfigError> {
        let grade = self.grade(skill_level)?;
        Ok(self
            .grades
            .iter()
            .filter(|(_, g)| **g <= grade)
            .map(|(name, _)| name.as_str())
            .collect())
    }

    pub fn levels(&self) -> impl Iterator<Item = (&str, u8)> {
        self.grades.iter().map(|(name, grade)| (name.as_str(), *grade))
    }
}

impl Default for SkillLevelOrdering {
    fn default() -> Self {
        Self {
            grades: BTreeMap::from([
                ("beginner".to_string(), 1),
                ("intermediate".to_string(), 2),
                ("advanced".to_string(), 3),
            ]),
        }
    }
}

impl TryFrom<BTreeMap<String, u8>> for SkillLevelOrdering {
    type Error = ConfigError;

    fn try_from(value: BTreeMap<String, u8>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

fn normalize(skill_level: &str) -> String {
    skill_level.trim().to_lowercase()
}

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

const REST_DAY: &str = "REST_DAY";

/// A generated training week keyed by day name (`"day 1"` to `"day 7"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingWeek(pub IndexMap<String, TrainingDay>);

impl TrainingWeek {
    pub fn days(&self) -> impl Iterator<Item = (&str, &TrainingDay)> {
        self.0.iter().map(|(name, day)| (name.as_str(), day))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingDay {
    #[serde(default)]
    pub day_type: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub exercises: IndexMap<String, PlannedExercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_time: Option<f64>,
}

impl TrainingDay {
    #[must_use]
    pub fn is_rest_day(&self) -> bool {
        self.day_type.trim() == REST_DAY
    }

    #[must_use]
    pub fn total_sets(&self) -> u64 {
        self.exercises
            .values()
            .fold(0, |total: u64, e| total.saturating_add(e.sets))
    }

    /// Sets times repetitions over all exercises, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_reps(&self) -> u64 {
        self.exercises.values().fold(0, |total: u64, e| {
            total.saturating_add(e.sets.saturating_mul(e.counts))
        })
    }

    /// Mean rest between sets in seconds, 0 for a day without exercises.
    #[must_use]
    pub fn average_set_rest(&self) -> f64 {
        if self.exercises.is_empty() {
            return 0.0;
        }
        let total = self.exercises.values().map(|e| e.set_rest_time).sum::<f64>();
        #[allow(clippy::cast_precision_loss)]
        let count = self.exercises.len() as f64;
        total / count
    }
}

/// Counts accept any non-negative JSON number, fractional values are rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannedExercise {
    #[serde(deserialize_with = "count")]
    pub sets: u64,
    #[serde(deserialize_with = "count")]
    pub counts: u64,
    #[serde(default)]
    pub set_rest_time: f64,
}

fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 {
        return Err(D::Error::custom(format!(
            "expected a non-negative count, found {value}"
        )));
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    let count = value.round().min(u64::MAX as f64) as u64;
    Ok(count)
}

#[derive(thiserror::Error, Debug)]
#[error("failed to decode training plan: {source}\noutput received:\n{output}")]
pub struct PlanParseError {
    pub output: String,
    pub source: serde_json::Error,
}

/// Parse a model reply into a training week.
///
/// A surrounding Markdown code fence (with or without a language tag) is removed first.
pub fn parse_plan(output: &str) -> Result<TrainingWeek, PlanParseError> {
    let output = strip_code_fence(output.trim());
    serde_json::from_str(output).map_err(|source| PlanParseError {
        output: output.to_string(),
        source,
    })
}

fn strip_code_fence(output: &str) -> &str {
    if output.len() < 6 || !output.starts_with("```") || !output.ends_with("```") {
        return output;
    }
    let inner = &output[3..output.len() - 3];
    match inner.find('\n') {
        Some(index) => inner[index + 1..].trim(),
        None => inner.trim(),
    }
}

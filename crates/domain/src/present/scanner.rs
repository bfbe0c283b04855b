use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use super::{BULLET, humanize};

const NO_NEED: &str = "no need";

/// Body scanner analysis of a user.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScannerData {
    pub disclaimer: Option<String>,
    pub physical_attributes: PhysicalAttributes,
    pub estimated_body_fat: BodyFatEstimate,
    pub training_readiness: TrainingReadiness,
    pub training_recommendations: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PhysicalAttributes {
    pub body_shape: Option<String>,
    pub muscle_tone: Option<String>,
    pub muscle_symmetry: Option<String>,
    pub major_muscle_groups: Vec<String>,
    pub major_muscle_groups_indicators: Vec<String>,
    pub weak_muscle_groups: Vec<String>,
    pub weak_muscle_groups_indicators: Vec<String>,
}

impl PhysicalAttributes {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BodyFatEstimate {
    pub percentage_range: Option<Value>,
    pub indicators: Vec<String>,
}

impl BodyFatEstimate {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrainingReadiness {
    pub score: Option<Value>,
    pub indicators: Vec<String>,
}

impl TrainingReadiness {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScannerDataFormatter {
    pub print_disclaimer: bool,
}

impl ScannerDataFormatter {
    #[must_use]
    pub fn format(&self, data: &ScannerData) -> String {
        let mut lines = Vec::new();

        if let Some(disclaimer) = data
            .disclaimer
            .as_deref()
            .filter(|d| self.print_disclaimer && !d.is_empty())
        {
            lines.push(disclaimer.to_string());
            lines.push(String::new());
        }

        physical_attributes(&mut lines, &data.physical_attributes);
        body_fat(&mut lines, &data.estimated_body_fat);
        training_readiness(&mut lines, &data.training_readiness);
        training_recommendations(&mut lines, &data.training_recommendations);

        lines.join("\n")
    }
}

fn physical_attributes(lines: &mut Vec<String>, attributes: &PhysicalAttributes) {
    if attributes.is_empty() {
        return;
    }

    lines.push("Physical Attributes:".to_string());
    for (label, value) in [
        ("Body shape", &attributes.body_shape),
        ("Muscle tone", &attributes.muscle_tone),
        ("Muscle symmetry", &attributes.muscle_symmetry),
    ] {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            lines.push(format!("  {BULLET} {label}: {value}"));
        }
    }
    for (label, groups, indicators) in [
        (
            "Major muscle groups",
            &attributes.major_muscle_groups,
            &attributes.major_muscle_groups_indicators,
        ),
        (
            "Weak muscle groups",
            &attributes.weak_muscle_groups,
            &attributes.weak_muscle_groups_indicators,
        ),
    ] {
        if groups.is_empty() {
            continue;
        }
        if indicators.is_empty() {
            lines.push(format!("  {BULLET} {label}: {}", groups.join(", ")));
        } else {
            lines.push(format!(
                "  {BULLET} {label}: {} ({})",
                groups.join(", "),
                indicators.join("; ")
            ));
        }
    }
    lines.push(String::new());
}

fn body_fat(lines: &mut Vec<String>, estimate: &BodyFatEstimate) {
    if estimate.is_empty() {
        return;
    }

    lines.push("Estimated Body Fat:".to_string());
    if let Some(range) = estimate.percentage_range.as_ref().and_then(plain) {
        lines.push(format!("  {BULLET} Percentage range: {range}%"));
    }
    if !estimate.indicators.is_empty() {
        lines.push(format!(
            "  {BULLET} Indicators: {}",
            estimate.indicators.join(", ")
        ));
    }
    lines.push(String::new());
}

fn training_readiness(lines: &mut Vec<String>, readiness: &TrainingReadiness) {
    if readiness.is_empty() {
        return;
    }

    lines.push("Training Readiness:".to_string());
    if let Some(score) = readiness.score.as_ref().and_then(plain) {
        lines.push(format!("  {BULLET} Score: {score}/10"));
    }
    if !readiness.indicators.is_empty() {
        lines.push(format!(
            "  {BULLET} Indicators: {}",
            readiness.indicators.join(", ")
        ));
    }
    lines.push(String::new());
}

fn training_recommendations(lines: &mut Vec<String>, recommendations: &IndexMap<String, Value>) {
    if recommendations.is_empty() {
        return;
    }

    lines.push("Training Recommendations:".to_string());
    for (category, content) in recommendations {
        lines.push(format!("  {}:", humanize(category)));
        if let Value::Object(subgroups) = content {
            for (subgroup, exercises) in subgroups {
                let title = humanize(subgroup);
                let Value::Object(parts) = exercises else {
                    lines.push(format!("    {title}: {}", join_items(exercises)));
                    continue;
                };
                if let Some(items) = parts.get("exercises") {
                    lines.push(format!("    {title}: {}", join_items(items)));
                    continue;
                }
                lines.push(format!("    {title}:"));
                for (part, part_exercises) in parts {
                    lines.push(format!(
                        "      {}: {}",
                        humanize(part),
                        join_items(part_exercises)
                    ));
                }
            }
        }
        lines.push(String::new());
    }
}

/// Scalars rendered without JSON quoting. `null` renders as nothing.
fn plain(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn join_items(items: &Value) -> String {
    let text = match items {
        Value::Array(items) => items
            .iter()
            .filter_map(plain)
            .collect::<Vec<_>>()
            .join(", "),
        other => plain(other).unwrap_or_default(),
    };
    if text.is_empty() {
        NO_NEED.to_string()
    } else {
        text
    }
}

use indexmap::IndexMap;
use serde::Deserialize;

use super::{BULLET, bullets};

/// Training heuristics for an inclusive range of ages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgePeriod {
    #[serde(default)]
    pub label: Option<String>,
    pub lower_bound: u32,
    pub upper_bound: u32,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub training_recommendations: String,
    #[serde(default)]
    pub adjustments: String,
}

impl AgePeriod {
    #[must_use]
    pub fn contains(&self, age: u32) -> bool {
        (self.lower_bound..=self.upper_bound).contains(&age)
    }

    #[must_use]
    pub fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("{}-{}", self.lower_bound, self.upper_bound))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AgeBasedAdjustments {
    pub age_periods: IndexMap<String, AgePeriod>,
    pub formatter: AgeFormatter,
}

impl AgeBasedAdjustments {
    /// The first configured period containing `age`.
    #[must_use]
    pub fn select(&self, age: u32) -> Option<&AgePeriod> {
        self.age_periods.values().find(|period| period.contains(age))
    }

    /// The rendered adjustments for `age`, empty if no period matches.
    #[must_use]
    pub fn format(&self, age: u32) -> String {
        self.select(age)
            .map(|period| self.formatter.format(period))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct AgeFormatter {
    pub print_age_range: bool,
    pub print_summary: bool,
    pub print_training_recommendations: bool,
    pub print_adjustments: bool,
}

impl Default for AgeFormatter {
    fn default() -> Self {
        Self {
            print_age_range: true,
            print_summary: true,
            print_training_recommendations: true,
            print_adjustments: true,
        }
    }
}

impl AgeFormatter {
    #[must_use]
    pub fn format(&self, period: &AgePeriod) -> String {
        let mut lines = Vec::new();

        if self.print_age_range {
            lines.push(format!("Age Range: {}", period.label()));
            lines.push(String::new());
        }
        if self.print_summary && !period.summary.trim().is_empty() {
            lines.push("Summary:".to_string());
            lines.extend(
                period
                    .summary
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(|line| format!("  {BULLET} {line}")),
            );
            lines.push(String::new());
        }
        if self.print_training_recommendations && !period.training_recommendations.trim().is_empty()
        {
            lines.push("Training Recommendations:".to_string());
            lines.extend(bullets(&period.training_recommendations));
            lines.push(String::new());
        }
        if self.print_adjustments && !period.adjustments.trim().is_empty() {
            lines.push("Adjustments:".to_string());
            lines.extend(bullets(&period.adjustments));
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

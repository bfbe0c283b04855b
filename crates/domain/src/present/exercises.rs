use serde::Deserialize;

use crate::{EligibleExerciseSet, ExerciseRecord};

/// Selects the columns of the eligible exercise listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ExercisesFormatter {
    pub print_exercises_names: bool,
    pub print_exercises_group: bool,
    pub print_body_part: bool,
    pub print_muscle_groups_targeted: bool,
}

impl Default for ExercisesFormatter {
    fn default() -> Self {
        Self {
            print_exercises_names: true,
            print_exercises_group: true,
            print_body_part: true,
            print_muscle_groups_targeted: true,
        }
    }
}

type Column = (&'static str, fn(&ExerciseRecord) -> &str);

impl ExercisesFormatter {
    fn columns(&self) -> Vec<Column> {
        let columns: [(bool, Column); 4] = [
            (self.print_exercises_names, ("Exercise Name", |e| e.name.as_str())),
            (self.print_exercises_group, ("Exercise Group", |e| e.group.as_str())),
            (self.print_body_part, ("Body Part", |e| e.body_part_text.as_str())),
            (
                self.print_muscle_groups_targeted,
                ("Muscle Groups Targeted (%)", |e| e.muscles_text.as_str()),
            ),
        ];
        columns
            .into_iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, column)| column)
            .collect()
    }

    /// One table per day type, a header line followed by one line per exercise.
    #[must_use]
    pub fn format(&self, eligible: &EligibleExerciseSet) -> String {
        let columns = self.columns();
        let header = columns
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(" | ");
        let mut lines = Vec::new();

        for (day_type, exercises) in eligible.iter() {
            lines.push(format!("Exercises for DAY_TYPE='{day_type}':\n{header}"));
            for exercise in exercises {
                lines.push(
                    columns
                        .iter()
                        .map(|(_, value)| value(exercise))
                        .collect::<Vec<_>>()
                        .join(" | "),
                );
            }
            lines.push("\n".to_string());
        }

        lines.join("\n")
    }
}

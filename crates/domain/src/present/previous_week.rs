use crate::TrainingWeek;

/// Summarize a previously generated week.
#[must_use]
pub fn format_previous_week(week: &TrainingWeek) -> String {
    let mut rest_days = Vec::new();
    let mut workout_days = Vec::new();
    let mut day_lines = Vec::new();

    for (name, day) in week.days() {
        if day.is_rest_day() {
            rest_days.push(name);
            continue;
        }
        workout_days.push(name);

        day_lines.push(format!("{name} ({}):", day.day_type));
        day_lines.push(format!("  Exercises: {}", day.exercises.len()));
        day_lines.push(format!("  Total sets: {}", day.total_sets()));
        day_lines.push(format!("  Total reps: {}", day.total_reps()));
        day_lines.push(format!(
            "  Avg rest between sets: {:.1}s",
            day.average_set_rest()
        ));
        if let Some(rest_time) = day.rest_time {
            day_lines.push(format!("  Rest between exercises: {rest_time}s"));
        }
        if let Some(notes) = day.notes.as_deref().filter(|notes| !notes.is_empty()) {
            day_lines.push(format!("  Notes: {notes}"));
        }
        day_lines.push(String::new());
    }

    let mut lines = vec![
        format!("Total days: {}", week.len()),
        format!("Rest days ({}): {}", rest_days.len(), rest_days.join(", ")),
        format!(
            "Workout days ({}): {}",
            workout_days.len(),
            workout_days.join(", ")
        ),
        String::new(),
    ];
    lines.extend(day_lines);
    lines.join("\n")
}

use std::sync::LazyLock;

use crate::{Catalog, RawExercise, UserProfile};

pub fn raw(
    name: &str,
    group: &str,
    body_part: &str,
    equipment: &str,
    skill_level: &str,
    muscles: &str,
) -> RawExercise {
    RawExercise {
        name: name.into(),
        group: group.into(),
        body_part: body_part.into(),
        equipment: equipment.into(),
        skill_level: skill_level.into(),
        muscles: muscles.into(),
    }
}

pub static ROWS: LazyLock<Vec<RawExercise>> = LazyLock::new(|| {
    vec![
        raw(
            "Bench Press",
            "PUSH",
            "Chest",
            "Barbell, Bench",
            "Intermediate",
            "Chest 80%, Triceps 40%",
        ),
        raw("Push Up", "PUSH", "Chest", "Bodyweight", "Beginner", "Chest 100%"),
        raw(
            "Overhead Press",
            "PUSH",
            "Shoulders",
            "Barbell",
            "Intermediate",
            "Shoulders 80%, Triceps 30%",
        ),
        raw(
            "Cable Fly",
            "PUSH",
            "Chest",
            "Cable Machine",
            "Beginner",
            "Chest 90%",
        ),
        raw(
            "Barbell Row",
            "PULL",
            "Back",
            "Barbell",
            "Advanced",
            "Lats 70%, Biceps 30%",
        ),
        raw(
            "Dumbbell Curl",
            "PULL",
            "Biceps",
            "Dumbbell",
            "Beginner",
            "Biceps 100%",
        ),
        raw("Pull Up", "PULL", "Back", "Pull Up Bar", "Intermediate", "Lats 80%"),
        raw("Back Squat", "LEGS", "Legs", "Barbell, Squat Rack", "Intermediate", "Quads 70%"),
        raw("Lunge", "LEGS", "Legs", "Bodyweight", "Beginner", "Quads 60%, Glutes 40%"),
        raw("Plank", "LEGS", "Core", "Bodyweight", "Beginner", "Abs 100%"),
        raw("Legacy Stretch", "", "Hips", "", "", "n/a"),
    ]
});

pub static CATALOG: LazyLock<Catalog> = LazyLock::new(|| Catalog::encode(&ROWS));

pub fn names(exercises: &[crate::ExerciseRecord]) -> Vec<&str> {
    exercises.iter().map(|e| e.name.as_str()).collect()
}

pub fn profile() -> UserProfile {
    UserProfile {
        gender: "male".into(),
        birthday: None,
        age: Some(25),
        height: 72.0,
        height_type: "in".into(),
        weight: 180.0,
        weight_type: "lb".into(),
        fitness_level: "beginner".into(),
        improve_body_parts: vec![],
        exercise_limitations: vec!["no_squatting".into(), "unknown".into()],
        nutrition_goal: "gain_weight".into(),
        equipment_list: vec!["barbell".into()],
        training_days: 3,
        workout_time: 45,
    }
}

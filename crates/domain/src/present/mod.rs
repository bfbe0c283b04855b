//! Plain text renderings of the inputs of a training plan request.

mod age;
mod exercises;
mod feedback;
mod previous_week;
mod scanner;
mod user;

pub use age::{AgeBasedAdjustments, AgeFormatter, AgePeriod};
pub use exercises::ExercisesFormatter;
pub use feedback::{Feedback, FeedbackDescriptions};
pub use previous_week::format_previous_week;
pub use scanner::{
    BodyFatEstimate, PhysicalAttributes, ScannerData, ScannerDataFormatter, TrainingReadiness,
};
pub use user::UserDataFormatter;

use crate::{ConfigError, ProfileError};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PresentError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

const BULLET: &str = "•";

/// Split text on `" - "` into bullet lines, keeping existing bullets.
fn bullets(text: &str) -> impl Iterator<Item = String> + '_ {
    text.trim()
        .split(" - ")
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            if part.starts_with(BULLET) {
                part.to_string()
            } else {
                format!("{BULLET} {part}")
            }
        })
}

/// `"body_development"` becomes `"Body development"`.
fn humanize(key: &str) -> String {
    let text = key.replace('_', " ");
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

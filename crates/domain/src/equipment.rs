use std::collections::BTreeSet;

/// Tag every user owns implicitly.
pub const NO_EQUIPMENT: &str = "none";

const BODYWEIGHT_TAGS: [&str; 4] = [NO_EQUIPMENT, "bodyweight", "body weight", "no equipment"];

#[must_use]
pub fn is_bodyweight(tag: &str) -> bool {
    BODYWEIGHT_TAGS.contains(&normalize(tag).as_str())
}

pub(crate) fn normalize(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Equipment a user has access to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentInventory(BTreeSet<String>);

impl EquipmentInventory {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags = tags
            .into_iter()
            .map(|tag| normalize(tag.as_ref()))
            .filter(|tag| !tag.is_empty())
            .collect::<BTreeSet<_>>();
        tags.insert(NO_EQUIPMENT.to_string());
        Self(tags)
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        is_bodyweight(tag) || self.0.contains(&normalize(tag))
    }

    /// Whether every piece of `required` equipment is available.
    #[must_use]
    pub fn covers<'a>(&self, required: impl IntoIterator<Item = &'a String>) -> bool {
        required.into_iter().all(|tag| self.contains(tag))
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for EquipmentInventory {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

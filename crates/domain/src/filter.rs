use std::collections::BTreeSet;

use log::debug;

use crate::{
    Catalog, ConfigError, DayType, DayTypePlan, EquipmentInventory, ExerciseRecord, FilterError,
    SkillLevelOrdering, UnknownEquipmentError, equipment,
};

/// Narrows a catalog to the exercises a user can perform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseFilter {
    skills: SkillLevelOrdering,
    day_types: DayTypePlan,
}

impl ExerciseFilter {
    #[must_use]
    pub fn new(skills: SkillLevelOrdering, day_types: DayTypePlan) -> Self {
        Self { skills, day_types }
    }

    /// Keep exercises tagged with at least one skill level at or below `skill_level`.
    pub fn by_skill_level(&self, catalog: &Catalog, skill_level: &str) -> Result<Catalog, ConfigError> {
        let levels = self.skills.levels_up_to(skill_level)?;
        Ok(catalog.retain(|e| e.skill_levels.iter().any(|s| levels.contains(s.as_str()))))
    }

    /// Keep exercises whose required equipment is completely available.
    pub fn by_equipment(
        &self,
        catalog: &Catalog,
        inventory: &EquipmentInventory,
    ) -> Result<Catalog, UnknownEquipmentError> {
        let vocabulary = catalog.equipment_vocabulary();
        let unknown = inventory
            .tags()
            .filter(|tag| !equipment::is_bodyweight(tag) && !vocabulary.contains(*tag))
            .map(str::to_string)
            .collect::<BTreeSet<_>>();

        if !unknown.is_empty() {
            return Err(UnknownEquipmentError(unknown));
        }

        Ok(catalog.retain(|e| inventory.covers(&e.equipment_required)))
    }

    /// Partition exercises by the day types that may train their body part.
    ///
    /// Each exercise is placed in exactly one bucket. If several requested day
    /// types allow its body part, the one matching the exercise group is
    /// preferred, otherwise the first requested one. Exercises without a known
    /// body part or with a body part no requested day type allows are left out.
    pub fn by_day_type(
        &self,
        catalog: &Catalog,
        day_types: &[DayType],
    ) -> Result<EligibleExerciseSet, ConfigError> {
        let mut buckets: Vec<(DayType, Vec<ExerciseRecord>)> = Vec::new();

        for day_type in day_types {
            self.day_types.body_parts(*day_type)?;
            if buckets.iter().all(|(d, _)| d != day_type) {
                buckets.push((*day_type, Vec::new()));
            }
        }

        for exercise in catalog.exercises() {
            let Some(body_part) = exercise.body_part else {
                continue;
            };
            let candidates = buckets
                .iter()
                .enumerate()
                .filter(|(_, (day_type, _))| self.day_types.allows(*day_type, body_part))
                .map(|(index, _)| index)
                .collect::<Vec<_>>();
            let preferred = DayType::parse(&exercise.group).ok();
            let Some(index) = candidates
                .iter()
                .copied()
                .find(|index| Some(buckets[*index].0) == preferred)
                .or_else(|| candidates.first().copied())
            else {
                continue;
            };
            buckets[index].1.push(exercise.clone());
        }

        Ok(EligibleExerciseSet { buckets })
    }

    /// Apply the equipment, skill level and day type filters in sequence.
    pub fn eligible(
        &self,
        catalog: &Catalog,
        skill_level: &str,
        inventory: &EquipmentInventory,
        day_types: &[DayType],
    ) -> Result<EligibleExerciseSet, FilterError> {
        let by_equipment = self.by_equipment(catalog, inventory)?;
        debug!(
            "{} of {} exercises match the available equipment",
            by_equipment.len(),
            catalog.len()
        );
        let by_skill_level = self.by_skill_level(&by_equipment, skill_level)?;
        debug!(
            "{} exercises match skill level {skill_level}",
            by_skill_level.len()
        );
        let eligible = self.by_day_type(&by_skill_level, day_types)?;
        debug!("{} exercises are eligible", eligible.len());
        Ok(eligible)
    }

    #[must_use]
    pub fn skills(&self) -> &SkillLevelOrdering {
        &self.skills
    }

    #[must_use]
    pub fn day_types(&self) -> &DayTypePlan {
        &self.day_types
    }
}

/// Eligible exercises per day type, in the order the day types were requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibleExerciseSet {
    buckets: Vec<(DayType, Vec<ExerciseRecord>)>,
}

impl EligibleExerciseSet {
    #[must_use]
    pub fn get(&self, day_type: DayType) -> Option<&[ExerciseRecord]> {
        self.buckets
            .iter()
            .find(|(d, _)| *d == day_type)
            .map(|(_, exercises)| exercises.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayType, &[ExerciseRecord])> {
        self.buckets
            .iter()
            .map(|(day_type, exercises)| (*day_type, exercises.as_slice()))
    }

    pub fn day_types(&self) -> impl Iterator<Item = DayType> + '_ {
        self.buckets.iter().map(|(day_type, _)| *day_type)
    }

    /// Number of exercises over all day types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|(_, exercises)| exercises.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{
        BodyPart,
        test_data::{CATALOG, names, raw},
    };

    fn filter() -> ExerciseFilter {
        ExerciseFilter::default()
    }

    #[rstest]
    #[case::beginner("beginner", &["Push Up", "Cable Fly", "Dumbbell Curl", "Lunge", "Plank"])]
    #[case::intermediate(
        "Intermediate",
        &[
            "Bench Press", "Push Up", "Overhead Press", "Cable Fly", "Dumbbell Curl", "Pull Up",
            "Back Squat", "Lunge", "Plank",
        ]
    )]
    fn test_by_skill_level(#[case] skill_level: &str, #[case] expected: &[&str]) {
        assert_eq!(
            names(filter().by_skill_level(&CATALOG, skill_level).unwrap().exercises()),
            expected
        );
    }

    #[test]
    fn test_by_skill_level_unknown() {
        assert_eq!(
            filter().by_skill_level(&CATALOG, "expert"),
            Err(ConfigError::UnknownSkillLevel("expert".into()))
        );
    }

    #[test]
    fn test_by_skill_level_monotonic() {
        let beginner = filter().by_skill_level(&CATALOG, "beginner").unwrap();
        let intermediate = filter().by_skill_level(&CATALOG, "intermediate").unwrap();
        let advanced = filter().by_skill_level(&CATALOG, "advanced").unwrap();

        for (lower, higher) in [(&beginner, &intermediate), (&intermediate, &advanced)] {
            assert!(
                lower
                    .exercises()
                    .iter()
                    .all(|e| higher.get(e.name.as_str()).is_some())
            );
        }
        assert_eq!(advanced.len(), CATALOG.len() - 1);
    }

    #[test]
    fn test_by_skill_level_keeps_vocabulary() {
        let filtered = filter().by_skill_level(&CATALOG, "beginner").unwrap();

        assert_eq!(
            filtered.equipment_vocabulary(),
            CATALOG.equipment_vocabulary()
        );
    }

    #[rstest]
    #[case::no_equipment(&[], &["Push Up", "Lunge", "Plank", "Legacy Stretch"])]
    #[case::barbell(
        &["barbell"],
        &["Push Up", "Overhead Press", "Barbell Row", "Lunge", "Plank", "Legacy Stretch"]
    )]
    #[case::barbell_and_bench(
        &["Barbell", "Bench"],
        &[
            "Bench Press", "Push Up", "Overhead Press", "Barbell Row", "Lunge", "Plank",
            "Legacy Stretch",
        ]
    )]
    #[case::unrelated_equipment_does_not_help(
        &["bench", "dumbbell"],
        &["Push Up", "Dumbbell Curl", "Lunge", "Plank", "Legacy Stretch"]
    )]
    fn test_by_equipment(#[case] equipment: &[&str], #[case] expected: &[&str]) {
        let inventory = EquipmentInventory::new(equipment);

        assert_eq!(
            names(filter().by_equipment(&CATALOG, &inventory).unwrap().exercises()),
            expected
        );
    }

    #[test]
    fn test_by_equipment_unknown() {
        let inventory = EquipmentInventory::new(["barbell", "kettlebell", "sled"]);

        assert_eq!(
            filter().by_equipment(&CATALOG, &inventory),
            Err(UnknownEquipmentError(BTreeSet::from([
                "kettlebell".into(),
                "sled".into()
            ])))
        );
    }

    #[test]
    fn test_by_equipment_exact_coverage() {
        let inventory = EquipmentInventory::new(["barbell", "bench", "dumbbell"]);
        let kept = filter().by_equipment(&CATALOG, &inventory).unwrap();

        for exercise in CATALOG.exercises() {
            let covered = exercise
                .equipment_required
                .iter()
                .all(|tag| inventory.contains(tag));
            assert_eq!(kept.get(exercise.name.as_str()).is_some(), covered);
        }
    }

    #[test]
    fn test_by_equipment_idempotent() {
        let inventory = EquipmentInventory::new(["barbell", "cable machine"]);
        let once = filter().by_equipment(&CATALOG, &inventory).unwrap();
        let twice = filter().by_equipment(&once, &inventory).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_by_day_type_push_pull_legs() {
        let eligible = filter()
            .by_day_type(&CATALOG, &[DayType::Push, DayType::Pull, DayType::Legs])
            .unwrap();

        assert_eq!(
            eligible.day_types().collect::<Vec<_>>(),
            vec![DayType::Push, DayType::Pull, DayType::Legs]
        );
        assert_eq!(
            names(eligible.get(DayType::Push).unwrap()),
            vec!["Bench Press", "Push Up", "Overhead Press", "Cable Fly"]
        );
        assert_eq!(
            names(eligible.get(DayType::Pull).unwrap()),
            vec!["Barbell Row", "Dumbbell Curl", "Pull Up"]
        );
        assert_eq!(
            names(eligible.get(DayType::Legs).unwrap()),
            vec!["Back Squat", "Lunge", "Plank"]
        );
    }

    #[test]
    fn test_by_day_type_prefers_first_requested_without_matching_group() {
        let catalog = Catalog::encode(&[
            raw("Plank", "", "Core", "", "Beginner", "Abs 100%"),
            raw("Side Plank", "PULL", "Core", "", "Beginner", "Obliques 100%"),
        ]);
        let eligible = filter()
            .by_day_type(&catalog, &[DayType::Push, DayType::Pull])
            .unwrap();

        assert_eq!(names(eligible.get(DayType::Push).unwrap()), vec!["Plank"]);
        assert_eq!(
            names(eligible.get(DayType::Pull).unwrap()),
            vec!["Side Plank"]
        );
    }

    #[test]
    fn test_by_day_type_partition_complete() {
        let day_types = [DayType::UpperBody, DayType::LowerBody];
        let eligible = filter().by_day_type(&CATALOG, &day_types).unwrap();

        let mut occurrences = HashMap::<&str, usize>::new();
        for (_, exercises) in eligible.iter() {
            for exercise in exercises {
                *occurrences.entry(exercise.name.as_str()).or_default() += 1;
            }
        }

        for exercise in CATALOG.exercises() {
            let allowed = exercise.body_part.is_some_and(|body_part| {
                day_types
                    .iter()
                    .any(|day_type| filter().day_types().allows(*day_type, body_part))
            });
            assert_eq!(
                occurrences.get(exercise.name.as_str()).copied().unwrap_or(0),
                usize::from(allowed),
                "{}",
                exercise.name
            );
        }
    }

    #[test]
    fn test_by_day_type_deduplicates_requested_day_types() {
        let eligible = filter()
            .by_day_type(&CATALOG, &[DayType::FullBody, DayType::FullBody])
            .unwrap();

        assert_eq!(eligible.day_types().count(), 1);
        assert_eq!(eligible.len(), CATALOG.len() - 1);
    }

    #[test]
    fn test_by_day_type_unknown() {
        let filter = ExerciseFilter::new(
            SkillLevelOrdering::default(),
            DayTypePlan::new(BTreeMap::from([(
                DayType::Push,
                BTreeSet::from([BodyPart::Chest]),
            )]))
            .unwrap(),
        );

        assert_eq!(
            filter.by_day_type(&CATALOG, &[DayType::Push, DayType::Legs]),
            Err(ConfigError::UnknownDayType("LEGS".into()))
        );
    }

    #[test]
    fn test_eligible_single_exercise() {
        let catalog = Catalog::encode(&[raw(
            "Push Up",
            "PUSH",
            "chest",
            "bodyweight",
            "beginner",
            "chest 100%",
        )]);
        let inventory = EquipmentInventory::new(["none"]);

        let push = filter()
            .eligible(&catalog, "beginner", &inventory, &[DayType::Push])
            .unwrap();
        assert_eq!(names(push.get(DayType::Push).unwrap()), vec!["Push Up"]);

        let legs = filter()
            .eligible(&catalog, "beginner", &inventory, &[DayType::Legs])
            .unwrap();
        assert!(legs.get(DayType::Legs).unwrap().is_empty());
        assert!(legs.is_empty());
    }

    #[rstest]
    #[case::unknown_equipment(
        "beginner",
        &["kettlebell"],
        FilterError::UnknownEquipment(UnknownEquipmentError(BTreeSet::from(["kettlebell".into()])))
    )]
    #[case::unknown_skill_level(
        "expert",
        &["barbell"],
        FilterError::Config(ConfigError::UnknownSkillLevel("expert".into()))
    )]
    fn test_eligible_error(
        #[case] skill_level: &str,
        #[case] equipment: &[&str],
        #[case] expected: FilterError,
    ) {
        assert_eq!(
            filter().eligible(
                &CATALOG,
                skill_level,
                &EquipmentInventory::new(equipment),
                &[DayType::FullBody]
            ),
            Err(expected)
        );
    }

    #[test]
    fn test_eligible_intermediate_with_barbell() {
        let eligible = filter()
            .eligible(
                &CATALOG,
                "intermediate",
                &EquipmentInventory::new(["barbell", "bench", "squat rack"]),
                &[DayType::UpperBody, DayType::LowerBody],
            )
            .unwrap();

        assert_eq!(
            names(eligible.get(DayType::UpperBody).unwrap()),
            vec!["Bench Press", "Push Up", "Overhead Press", "Plank"]
        );
        assert_eq!(
            names(eligible.get(DayType::LowerBody).unwrap()),
            vec!["Back Squat", "Lunge"]
        );
    }
}

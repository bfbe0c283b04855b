use std::sync::{Arc, PoisonError, RwLock};

use chrono::NaiveDate;
use log::{debug, error};

use crate::{
    Catalog, CatalogRepository, Config, EligibleExerciseSet, EquipmentInventory, FilterError,
    PlanContext, ReadError, UserProfile, WeekTemplate, WeekTemplates,
};

/// Shares one catalog snapshot between concurrent planning requests.
///
/// A reload builds a new catalog and swaps it in. Callers holding the previous
/// snapshot keep using it unchanged.
pub struct Service<R> {
    repository: R,
    config: Config,
    templates: WeekTemplates,
    catalog: RwLock<Arc<Catalog>>,
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Config(_) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: CatalogRepository> Service<R> {
    pub fn new(repository: R, config: Config, templates: WeekTemplates) -> Result<Self, ReadError> {
        let catalog = log_on_error!(load(&repository), ReadError, "load", "catalog")?;
        Ok(Self {
            repository,
            config,
            templates,
            catalog: RwLock::new(Arc::new(catalog)),
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Read the catalog again and publish it. On failure the current snapshot stays in place.
    pub fn reload(&self) -> Result<Arc<Catalog>, ReadError> {
        let catalog = Arc::new(log_on_error!(
            load(&self.repository),
            ReadError,
            "reload",
            "catalog"
        )?);
        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&catalog);
        Ok(catalog)
    }

    pub fn week_template(&self, training_days: u8) -> Result<WeekTemplate, FilterError> {
        log_on_error!(
            self.templates
                .select(training_days)
                .map_err(FilterError::from),
            FilterError,
            "select",
            "week template"
        )
    }

    pub fn eligible_exercises(
        &self,
        skill_level: &str,
        inventory: &EquipmentInventory,
        training_days: u8,
    ) -> Result<(WeekTemplate, EligibleExerciseSet), FilterError> {
        let week = self.week_template(training_days)?;
        let catalog = self.catalog();
        let eligible = log_on_error!(
            self.config
                .filter()
                .eligible(&catalog, skill_level, inventory, &week.day_types),
            FilterError,
            "filter",
            "exercises"
        )?;
        Ok((week, eligible))
    }

    /// Run the eligibility pipeline for the constraints of a user.
    pub fn plan_context(
        &self,
        profile: UserProfile,
        today: NaiveDate,
    ) -> Result<PlanContext, FilterError> {
        let (week, eligible) = self.eligible_exercises(
            &profile.fitness_level,
            &profile.equipment(),
            profile.training_days,
        )?;
        Ok(PlanContext {
            profile,
            today,
            week,
            eligible,
        })
    }
}

fn load(repository: &impl CatalogRepository) -> Result<Catalog, ReadError> {
    Ok(Catalog::encode(&repository.read_catalog()?))
}

//! Loaded state shared by every command.

use std::path::Path;

use crate::calculation::{ComplianceEvaluator, PeriodResolver, WorkdayCalendar};
use crate::config::{ComplianceConfig, ConfigLoader};
use crate::error::EngineResult;
use crate::storage::AttendanceStore;

/// Configuration, calendar and attendance store for one invocation.
///
/// Engine components borrow from the context, so a command builds its
/// resolver and evaluator on demand.
#[derive(Debug)]
pub struct AppContext {
    config: ComplianceConfig,
    calendar: WorkdayCalendar,
    store: AttendanceStore,
}

impl AppContext {
    /// Loads configuration from `config_dir` and opens the attendance store
    /// it points at.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> EngineResult<Self> {
        let config = ConfigLoader::load(config_dir)?.into_config();
        let store = AttendanceStore::open(config.attendance_dir())?;
        Ok(Self::new(config, store))
    }

    /// Builds a context from already-loaded parts.
    pub fn new(config: ComplianceConfig, store: AttendanceStore) -> Self {
        let calendar = config.calendar();
        Self {
            config,
            calendar,
            store,
        }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &ComplianceConfig {
        &self.config
    }

    /// Returns the workday calendar.
    pub fn calendar(&self) -> &WorkdayCalendar {
        &self.calendar
    }

    /// Returns the attendance store.
    pub fn store(&self) -> &AttendanceStore {
        &self.store
    }

    /// A period resolver over the configured periods.
    pub fn resolver(&self) -> PeriodResolver<'_> {
        PeriodResolver::new(self.config.periods(), &self.calendar)
    }

    /// A compliance evaluator over the configured calendar.
    pub fn evaluator(&self) -> ComplianceEvaluator<'_> {
        ComplianceEvaluator::new(&self.calendar)
    }
}

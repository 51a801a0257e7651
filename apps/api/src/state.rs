use std::sync::Arc;

use crate::config::Config;
use crate::dataset::StudentDataset;
use crate::skills::catalog::SkillCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<SkillCatalog>,
    pub dataset: Arc<StudentDataset>,
    pub config: Config,
}

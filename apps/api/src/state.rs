use std::sync::Arc;

use crate::config::Config;
use crate::generation::gateway::ContentGateway;
use crate::resumes::store::ResumeStore;
use crate::templates::catalog::TemplateCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable resume store. Default: InMemoryResumeStore (process lifetime only).
    pub resumes: Arc<dyn ResumeStore>,
    pub templates: Arc<TemplateCatalog>,
    pub gateway: ContentGateway,
    pub config: Config,
}

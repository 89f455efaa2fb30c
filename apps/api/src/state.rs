use std::sync::Arc;

use crate::config::Config;
use crate::ingest::text::TextExtractionService;
use crate::repository::{CandidateRepository, JobRepository, MemoryStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub candidates: Arc<dyn CandidateRepository>,
    pub jobs: Arc<dyn JobRepository>,
    /// Turns uploaded résumé files into plain text.
    pub extractor: Arc<dyn TextExtractionService>,
}

impl AppState {
    /// State backed by a single in-memory store for both repositories.
    pub fn in_memory(config: Config, extractor: Arc<dyn TextExtractionService>) -> Self {
        let store = Arc::new(MemoryStore::new());
        AppState {
            config,
            candidates: store.clone(),
            jobs: store,
            extractor,
        }
    }
}

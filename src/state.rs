//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::store::ArtifactStore;
use crate::styles::ReportStyles;

/// Shared application state, injected into route handlers via axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ArtifactStore>,
    pub styles: Arc<ReportStyles>,
}

impl AppState {
    /// Creates the state with the default report styles.
    pub fn new(store: ArtifactStore) -> Self {
        Self {
            store: Arc::new(store),
            styles: Arc::new(ReportStyles::default()),
        }
    }
}

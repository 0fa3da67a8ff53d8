//! Application state shared across handlers.

use std::sync::Arc;

use crate::broadcast::ChangeBroadcaster;
use crate::config::AdminConfig;
use crate::services::CatalogService;
use crate::store::EntityStore;
use crate::uploads::ImageStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    catalog: CatalogService,
    broadcaster: ChangeBroadcaster,
    images: ImageStore,
}

impl AppState {
    #[must_use]
    pub fn new(config: AdminConfig, store: Arc<dyn EntityStore>, images: ImageStore) -> Self {
        let broadcaster = ChangeBroadcaster::new();
        let catalog = CatalogService::new(store, broadcaster.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                broadcaster,
                images,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    #[must_use]
    pub fn broadcaster(&self) -> &ChangeBroadcaster {
        &self.inner.broadcaster
    }

    #[must_use]
    pub fn images(&self) -> &ImageStore {
        &self.inner.images
    }
}

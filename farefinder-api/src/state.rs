use std::sync::Arc;

use farefinder_catalog::FlightCatalog;
use farefinder_store::app_config::CatalogConfig;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<FlightCatalog>,
    pub limits: CatalogConfig,
}

impl AppState {
    pub fn new(catalog: FlightCatalog, limits: CatalogConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            limits,
        }
    }
}

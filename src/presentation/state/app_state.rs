use std::sync::Arc;

use crate::application::ports::{ConnectivityProber, TableStore, VisionClient};
use crate::application::services::ExtractionService;
use crate::presentation::config::Settings;

pub struct AppState<C, P, S>
where
    C: VisionClient,
    P: ConnectivityProber,
    S: TableStore,
{
    pub extraction_service: Arc<ExtractionService<C>>,
    pub prober: Arc<P>,
    pub table_store: Arc<S>,
    pub settings: Settings,
}

impl<C, P, S> Clone for AppState<C, P, S>
where
    C: VisionClient,
    P: ConnectivityProber,
    S: TableStore,
{
    fn clone(&self) -> Self {
        Self {
            extraction_service: Arc::clone(&self.extraction_service),
            prober: Arc::clone(&self.prober),
            table_store: Arc::clone(&self.table_store),
            settings: self.settings.clone(),
        }
    }
}

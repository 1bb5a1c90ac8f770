use std::sync::Arc;
use crate::domain::ports::{BookingRepository, CatalogRepository};
use crate::domain::services::booking_service::BookingService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog_repo: Arc<dyn CatalogRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub booking_service: Arc<BookingService>,
}

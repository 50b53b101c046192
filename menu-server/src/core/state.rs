//! Server state assembly
//!
//! Builds every service once at startup and hands them out as explicit
//! handles; core operations never reach for globals.

use super::Config;
use crate::catalog::CatalogService;
use crate::db::DbService;
use crate::notify::NotificationHub;
use crate::orders::OrderService;
use crate::pricing::PricingEngine;
use shared::error::AppError;

/// Aggregated services for one server instance
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub catalog: CatalogService,
    pub pricing: PricingEngine,
    pub orders: OrderService,
    pub events: NotificationHub,
}

impl ServerState {
    /// Initialize storage and services from configuration
    pub async fn init(config: Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;

        let db = DbService::new(&config.database_path).await?;
        let events = NotificationHub::new(config.event_capacity);
        let catalog = CatalogService::new(db.pool.clone());
        let pricing = PricingEngine::new(db.pool.clone());
        let orders = OrderService::new(db.pool.clone(), pricing.clone(), events.clone());

        tracing::info!(work_dir = %config.work_dir, "Server state initialized");

        Ok(Self {
            config,
            db,
            catalog,
            pricing,
            orders,
            events,
        })
    }
}

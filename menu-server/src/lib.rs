//! Smart Menu Server - order pricing and persistence backend
//!
//! Backend core for a food-and-beverage smart menu: customers browse a
//! nested catalog, submit orders and receive an authoritatively computed
//! total; administrators manage catalog content and watch incoming orders
//! in real time through the notification hub.
//!
//! # Module structure
//!
//! ```text
//! menu-server/src/
//! ├── core/       # Configuration, server state
//! ├── db/         # SQLite pool, migrations, repositories, seed data
//! ├── catalog/    # Public menu assembly
//! ├── pricing/    # Delivery fee, voucher discount, price breakdown
//! ├── orders/     # Order submission transaction, listing, status
//! ├── notify/     # Broadcast event hub
//! └── utils/      # Logging setup
//! ```
//!
//! The HTTP transport and the real-time fan-out delivery are external
//! collaborators: they consume [`ServerState`] and
//! [`NotificationHub::subscribe`] respectively.

pub mod catalog;
pub mod core;
pub mod db;
pub mod notify;
pub mod orders;
pub mod pricing;
pub mod utils;

// Re-export public types
pub use catalog::CatalogService;
pub use core::{Config, ServerState};
pub use db::DbService;
pub use notify::NotificationHub;
pub use orders::{OrderError, OrderService};
pub use pricing::{PricingEngine, PricingError};
pub use utils::logger::{init_logger, init_logger_with_file};

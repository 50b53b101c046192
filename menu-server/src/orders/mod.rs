//! Orders Module
//!
//! Order submission (the one multi-statement write path in the system),
//! admin listing/detail reads and status updates.

mod service;

pub use service::{OrderError, OrderService};

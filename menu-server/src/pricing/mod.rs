//! Pricing Module
//!
//! The single authoritative price computation. The same recomputation
//! backs live cart previews and the final submission write, so a client
//! can never smuggle its own prices into an order.

pub mod delivery;
mod engine;
pub mod voucher;

pub use engine::{PricedLine, PricedOption, PricedOrder, PricingEngine, PricingError};

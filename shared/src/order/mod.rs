//! Shared order flow types
//!
//! Request and response shapes exchanged between the transport layer and
//! the pricing/order services.

mod types;

pub use types::*;

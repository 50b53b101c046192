//! Notification events
//!
//! The order core produces these events after a successful commit; the
//! real-time fan-out collaborator delivers them to connected
//! administrator sessions. Emission is fire-and-forget: delivery failure
//! never affects the order that produced the event.

mod payload;

pub use payload::{MenuEvent, OrderPlacedEvent};

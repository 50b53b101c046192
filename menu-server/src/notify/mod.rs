//! Notification Hub
//!
//! Broadcast channel between the order core and the real-time fan-out
//! collaborator. The core only produces events; subscriber connection
//! bookkeeping lives entirely on the consumer side of `subscribe`.
//!
//! ```text
//! OrderService ──▶ publish() ──▶ broadcast::Sender<MenuEvent>
//!                                      │
//!                          ┌───────────┴───────────┐
//!                          ▼                       ▼
//!                    admin session 1 ...     admin session N
//! ```

use shared::message::MenuEvent;
use tokio::sync::broadcast;

/// Event hub for administrator notifications
#[derive(Debug, Clone)]
pub struct NotificationHub {
    tx: broadcast::Sender<MenuEvent>,
}

impl NotificationHub {
    /// Create a hub with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to events; each receiver sees every event published
    /// after the call
    pub fn subscribe(&self) -> broadcast::Receiver<MenuEvent> {
        self.tx.subscribe()
    }

    /// Number of currently attached receivers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Publish an event, fire-and-forget.
    ///
    /// Failure (no attached subscribers) is logged and swallowed; it must
    /// never affect the operation that produced the event.
    pub fn publish(&self, event: MenuEvent) {
        match self.tx.send(event) {
            Ok(receivers) => {
                tracing::debug!(receivers, "Event published");
            }
            Err(_) => {
                tracing::debug!("No subscribers attached, event dropped");
            }
        }
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::OrderStatus;

    fn status_event(order_id: i64) -> MenuEvent {
        MenuEvent::OrderStatusUpdated {
            order_id,
            status: OrderStatus::Confirmed,
            timestamp: "2026-01-01T00:00:00Z".into(),
        }
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_does_not_panic() {
        let hub = NotificationHub::new(8);
        hub.publish(status_event(1));
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_every_subscriber_receives_the_event() {
        let hub = NotificationHub::new(8);
        let mut rx1 = hub.subscribe();
        let mut rx2 = hub.subscribe();

        hub.publish(status_event(42));

        assert_eq!(rx1.recv().await.unwrap(), status_event(42));
        assert_eq!(rx2.recv().await.unwrap(), status_event(42));
    }
}

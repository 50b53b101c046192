use crate::models::{DeliveryMethod, OrderStatus, PaymentMethod};
use serde::{Deserialize, Serialize};

/// Payload of the `new_order` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPlacedEvent {
    pub order_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub total_amount: i64,
    pub delivery_method: DeliveryMethod,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    /// RFC3339 creation time
    pub timestamp: String,
}

/// Events published on the notification hub
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuEvent {
    /// A customer order was committed
    NewOrder(OrderPlacedEvent),
    /// An administrator changed an order's status
    OrderStatusUpdated {
        order_id: i64,
        status: OrderStatus,
        /// RFC3339 change time
        timestamp: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_event_wire_format() {
        let event = MenuEvent::NewOrder(OrderPlacedEvent {
            order_id: 7,
            customer_name: "Alex".into(),
            customer_phone: "0900000001".into(),
            total_amount: 70000,
            delivery_method: DeliveryMethod::Standard,
            payment_method: PaymentMethod::Cash,
            status: OrderStatus::New,
            timestamp: "2026-01-01T00:00:00Z".into(),
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "new_order");
        assert_eq!(json["order_id"], 7);
        assert_eq!(json["delivery_method"], "STANDARD");
        assert_eq!(json["status"], "NEW");
    }

    #[test]
    fn test_status_event_wire_format() {
        let event = MenuEvent::OrderStatusUpdated {
            order_id: 7,
            status: OrderStatus::Confirmed,
            timestamp: "2026-01-01T00:00:00Z".into(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "order_status_updated");
        assert_eq!(json["status"], "CONFIRMED");
    }
}

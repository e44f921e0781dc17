use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::value_objects::{OrderStatus, OrderType, Priority};

// ============================================================================
// Order - unit of work owned by the processor during a batch
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    // Identity
    pub id: i64,

    // Repository-supplied attributes
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub amount: Decimal,
    pub flag: bool,

    // Mutable processing state
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub priority: Priority,
}

impl Order {
    /// Create a fresh order in `new` status with `low` priority.
    pub fn new(id: i64, order_type: impl Into<OrderType>, amount: Decimal, flag: bool) -> Self {
        Self {
            id,
            order_type: order_type.into(),
            amount,
            flag,
            status: OrderStatus::New,
            priority: Priority::Low,
        }
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        if self.status != status {
            tracing::trace!(
                order_id = self.id,
                from = %self.status,
                to = %status,
                "Order status transition"
            );
        }
        self.status = status;
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_starts_with_defaults() {
        let order = Order::new(1, "A", Decimal::from(100), false);

        assert_eq!(order.id, 1);
        assert_eq!(order.order_type, OrderType::A);
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.priority, Priority::Low);
    }

    #[test]
    fn test_deserialize_without_processing_state() {
        let json = r#"{"id": 7, "type": "Q", "amount": "12.50", "flag": true}"#;
        let order: Order = serde_json::from_str(json).unwrap();

        assert_eq!(order.order_type, OrderType::from("Q"));
        assert!(matches!(order.order_type, OrderType::Unrecognized(_)));
        assert_eq!(order.amount, Decimal::new(1250, 2));
        assert!(order.flag);
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.priority, Priority::Low);
    }

    #[test]
    fn test_set_status_and_priority() {
        let mut order = Order::new(2, "C", Decimal::from(10), true);
        order.set_status(OrderStatus::Completed);
        order.set_priority(Priority::High);

        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.priority, Priority::High);
    }
}

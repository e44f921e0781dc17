use rust_decimal::Decimal;
use serde::Deserialize;

use super::aggregate::Order;
use super::errors::VerificationError;
use super::ports::RemoteStatusResponse;
use super::value_objects::{OrderStatus, Priority};

// ============================================================================
// Business Rules - pure status / priority decisions
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct BusinessRules {
    /// Exports above this amount carry the "High value order" note
    #[serde(default = "default_high_value_note_threshold")]
    pub high_value_note_threshold: Decimal,
    /// Orders above this amount get `high` priority
    #[serde(default = "default_high_priority_threshold")]
    pub high_priority_threshold: Decimal,
    /// Remote data at or above this counts as verified
    #[serde(default = "default_remote_data_threshold")]
    pub remote_data_threshold: f64,
    /// Verified orders below this amount are `processed`
    #[serde(default = "default_processed_amount_ceiling")]
    pub processed_amount_ceiling: Decimal,
}

fn default_high_value_note_threshold() -> Decimal { Decimal::from(150) }
fn default_high_priority_threshold() -> Decimal { Decimal::from(200) }
fn default_remote_data_threshold() -> f64 { 50.0 }
fn default_processed_amount_ceiling() -> Decimal { Decimal::from(100) }

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            high_value_note_threshold: default_high_value_note_threshold(),
            high_priority_threshold: default_high_priority_threshold(),
            remote_data_threshold: default_remote_data_threshold(),
            processed_amount_ceiling: default_processed_amount_ceiling(),
        }
    }
}

impl BusinessRules {
    pub fn is_high_value(&self, order: &Order) -> bool {
        order.amount > self.high_value_note_threshold
    }

    /// Strictly greater than the threshold; the boundary itself stays `low`.
    pub fn priority_for(&self, order: &Order) -> Priority {
        if order.amount > self.high_priority_threshold {
            Priority::High
        } else {
            Priority::Low
        }
    }

    pub fn completion_status(&self, order: &Order) -> OrderStatus {
        if order.flag {
            OrderStatus::Completed
        } else {
            OrderStatus::InProgress
        }
    }

    /// Map a remote response onto a status. Rule order matters: the
    /// `processed` check runs before the `pending` fallback.
    ///
    /// A `success` with no payload cannot be evaluated and is returned as
    /// an error for the caller to escalate.
    pub fn verification_status(
        &self,
        order: &Order,
        response: &RemoteStatusResponse,
    ) -> Result<OrderStatus, VerificationError> {
        if !response.is_success() {
            return Ok(OrderStatus::ApiError);
        }

        let data = response
            .data
            .ok_or(VerificationError::MissingData { order_id: order.id })?;

        let status = if data >= self.remote_data_threshold
            && order.amount < self.processed_amount_ceiling
        {
            OrderStatus::Processed
        } else if data < self.remote_data_threshold || order.flag {
            OrderStatus::Pending
        } else {
            OrderStatus::Error
        };
        Ok(status)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn order(amount: i64, flag: bool) -> Order {
        Order::new(1, "B", Decimal::from(amount), flag)
    }

    fn success(data: f64) -> RemoteStatusResponse {
        RemoteStatusResponse::success(data)
    }

    #[test]
    fn test_verification_processed() {
        let rules = BusinessRules::default();
        assert_eq!(rules.verification_status(&order(50, false), &success(60.0)).unwrap(), OrderStatus::Processed);
        // Boundary: data == threshold is verified
        assert_eq!(rules.verification_status(&order(99, false), &success(50.0)).unwrap(), OrderStatus::Processed);
    }

    #[test]
    fn test_verification_pending() {
        let rules = BusinessRules::default();
        assert_eq!(rules.verification_status(&order(50, false), &success(40.0)).unwrap(), OrderStatus::Pending);
        // Verified data but amount too high falls through to the flag
        assert_eq!(rules.verification_status(&order(150, true), &success(60.0)).unwrap(), OrderStatus::Pending);
    }

    #[test]
    fn test_verification_error() {
        let rules = BusinessRules::default();
        assert_eq!(rules.verification_status(&order(150, false), &success(60.0)).unwrap(), OrderStatus::Error);
        assert_eq!(rules.verification_status(&order(100, false), &success(50.0)).unwrap(), OrderStatus::Error);
    }

    #[test]
    fn test_verification_non_success_response() {
        let rules = BusinessRules::default();
        let response = RemoteStatusResponse::new("error", Some(90.0));
        assert_eq!(rules.verification_status(&order(10, true), &response).unwrap(), OrderStatus::ApiError);
    }

    #[test]
    fn test_verification_success_without_data_is_an_error() {
        let rules = BusinessRules::default();
        let response = RemoteStatusResponse::new("success", None);
        assert!(matches!(
            rules.verification_status(&order(10, false), &response),
            Err(VerificationError::MissingData { order_id: 1 })
        ));
    }

    #[test]
    fn test_verification_non_success_without_data() {
        let rules = BusinessRules::default();
        let response = RemoteStatusResponse::new("error", None);
        assert_eq!(rules.verification_status(&order(10, false), &response).unwrap(), OrderStatus::ApiError);
    }

    #[test]
    fn test_priority_boundary() {
        let rules = BusinessRules::default();
        assert_eq!(rules.priority_for(&order(250, false)), Priority::High);
        assert_eq!(rules.priority_for(&order(200, false)), Priority::Low);
        assert_eq!(rules.priority_for(&order(150, false)), Priority::Low);
        assert_eq!(
            rules.priority_for(&Order::new(1, "A", Decimal::new(20001, 2), false)),
            Priority::High
        );
    }

    #[test]
    fn test_completion_status() {
        let rules = BusinessRules::default();
        assert_eq!(rules.completion_status(&order(1, true)), OrderStatus::Completed);
        assert_eq!(rules.completion_status(&order(1, false)), OrderStatus::InProgress);
    }

    #[test]
    fn test_high_value_boundary() {
        let rules = BusinessRules::default();
        assert!(!rules.is_high_value(&order(150, false)));
        assert!(rules.is_high_value(&order(151, false)));
    }
}

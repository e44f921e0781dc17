use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Order type as reported by the repository.
///
/// Any type string other than `A`, `B` or `C` is kept verbatim in
/// `Unrecognized` so it can still be round-tripped and logged. The payload
/// is only built through `From<&str>`, so it never holds a known type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderType {
    /// Exported to a record file
    A,
    /// Verified against the remote status service
    B,
    /// Completed from the order flag
    C,
    Unrecognized(UnrecognizedType),
}

/// Raw type string that matched none of the known order types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnrecognizedType(String);

impl UnrecognizedType {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnrecognizedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl OrderType {
    pub fn as_str(&self) -> &str {
        match self {
            OrderType::A => "A",
            OrderType::B => "B",
            OrderType::C => "C",
            OrderType::Unrecognized(raw) => raw.as_str(),
        }
    }
}

impl From<&str> for OrderType {
    fn from(raw: &str) -> Self {
        match raw {
            "A" => OrderType::A,
            "B" => OrderType::B,
            "C" => OrderType::C,
            other => OrderType::Unrecognized(UnrecognizedType(other.to_string())),
        }
    }
}

impl From<String> for OrderType {
    fn from(raw: String) -> Self {
        OrderType::from(raw.as_str())
    }
}

impl From<OrderType> for String {
    fn from(order_type: OrderType) -> Self {
        order_type.as_str().to_string()
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal (and initial) order statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    New,
    Exported,
    ExportFailed,
    Processed,
    Pending,
    Error,
    ApiError,
    ApiFailure,
    Completed,
    InProgress,
    UnknownType,
    DbError,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Exported => "exported",
            OrderStatus::ExportFailed => "export_failed",
            OrderStatus::Processed => "processed",
            OrderStatus::Pending => "pending",
            OrderStatus::Error => "error",
            OrderStatus::ApiError => "api_error",
            OrderStatus::ApiFailure => "api_failure",
            OrderStatus::Completed => "completed",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::UnknownType => "unknown_type",
            OrderStatus::DbError => "db_error",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Low,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_type_from_known_strings() {
        assert_eq!(OrderType::from("A"), OrderType::A);
        assert_eq!(OrderType::from("B"), OrderType::B);
        assert_eq!(OrderType::from("C"), OrderType::C);
    }

    #[test]
    fn test_order_type_keeps_unrecognized_value() {
        let order_type = OrderType::from("X");
        assert!(matches!(&order_type, OrderType::Unrecognized(raw) if raw.as_str() == "X"));
        assert_eq!(order_type.as_str(), "X");

        // Matching is case sensitive
        assert!(matches!(OrderType::from("a"), OrderType::Unrecognized(_)));
    }

    #[test]
    fn test_order_type_serializes_as_raw_string() {
        let json = serde_json::to_string(&OrderType::B).unwrap();
        assert_eq!(json, "\"B\"");

        let parsed: OrderType = serde_json::from_str("\"ZZ\"").unwrap();
        assert_eq!(parsed, OrderType::from("ZZ"));
    }

    #[test]
    fn test_round_trip_preserves_dispatch() {
        for raw in ["A", "B", "C", "X", ""] {
            let order_type = OrderType::from(raw);
            let json = serde_json::to_string(&order_type).unwrap();
            let parsed: OrderType = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, order_type);
        }
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(OrderStatus::ExportFailed.as_str(), "export_failed");
        assert_eq!(OrderStatus::UnknownType.to_string(), "unknown_type");

        let json = serde_json::to_string(&OrderStatus::ApiFailure).unwrap();
        assert_eq!(json, "\"api_failure\"");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(OrderStatus::default(), OrderStatus::New);
        assert_eq!(Priority::default(), Priority::Low);
        assert_eq!(Priority::High.as_str(), "high");
    }
}

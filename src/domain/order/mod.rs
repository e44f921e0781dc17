// ============================================================================
// Order Domain - Business Logic for Order Processing
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (OrderType, OrderStatus, Priority)
// - Aggregate (Order with its mutable processing state)
// - Rules (status and priority decisions)
// - Ports (OrderRepository, RemoteStatusService)
// - Errors (RepositoryError, RemoteCallError, ExportError, BatchError)
//
// ============================================================================

pub mod value_objects;
pub mod aggregate;
pub mod rules;
pub mod ports;
pub mod errors;

// Re-export for convenience
pub use value_objects::*;
pub use aggregate::*;
pub use rules::*;
pub use ports::*;
pub use errors::*;

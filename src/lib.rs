// ============================================================================
// Order Processor
// ============================================================================
//
// Fetches a user's orders, runs each through its type-specific stage
// (export, remote verification or flag completion), assigns a priority
// tier and persists the result.
//
// ============================================================================

pub mod config;
pub mod domain;
pub mod export;
pub mod memory;
pub mod metrics;
pub mod processor;

pub use config::ProcessorConfig;
pub use domain::order::{
    BatchError, Order, OrderRepository, OrderStatus, OrderType, Priority, RemoteStatusResponse,
    RemoteStatusService,
};
pub use processor::{BatchSummary, OrderOutcome, OrderProcessor};

use std::path::PathBuf;

// ============================================================================
// Order Processing Errors
// ============================================================================

/// Raised by an `OrderRepository` on any retrieval or write fault.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Failed to fetch orders for user {user_id}: {reason}")]
    Fetch { user_id: i64, reason: String },

    #[error("Failed to update order {order_id}: {reason}")]
    Update { order_id: i64, reason: String },

    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

/// Raised by a `RemoteStatusService` on any transport or service fault.
#[derive(Debug, thiserror::Error)]
pub enum RemoteCallError {
    #[error("Remote status call for order {order_id} failed: {reason}")]
    Transport { order_id: i64, reason: String },

    #[error("Remote status service unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to prepare export directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write export file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A remote response that cannot be evaluated against the order.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("Successful remote response for order {order_id} carried no data")]
    MissingData { order_id: i64 },
}

/// Errors that abort a whole batch. Anything else is contained per order.
/// An empty batch is not an error; see `OrderProcessor::run_batch`.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Order fetch failed: {0}")]
    Fetch(#[from] RepositoryError),

    /// Raised mid-batch; orders after `order_id` are left untouched.
    #[error("Unexpected failure on order {order_id}: {source}")]
    Unexpected {
        order_id: i64,
        #[source]
        source: VerificationError,
    },
}

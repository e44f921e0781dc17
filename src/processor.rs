use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::config::ProcessorConfig;
use crate::domain::order::{
    BatchError, BusinessRules, Order, OrderRepository, OrderStatus, OrderType, Priority,
    RemoteStatusService,
};
use crate::export::CsvExporter;
use crate::metrics::Metrics;

// ============================================================================
// Order Processor
// ============================================================================
//
// Orchestrates: Fetch → (per order) Type stage → Priority → Persist
//
// Orders are handled one at a time in fetch order. Only a failed fetch or
// an empty batch stops the run; every per-order failure becomes a status.
//
// ============================================================================

/// Final state of one order after the pipeline ran
#[derive(Debug, Clone, PartialEq)]
pub struct OrderOutcome {
    pub order_id: i64,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub priority: Priority,
    pub export_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub user_id: i64,
    pub outcomes: Vec<OrderOutcome>,
}

impl BatchSummary {
    pub fn status_of(&self, order_id: i64) -> Option<OrderStatus> {
        self.outcomes.iter().find(|o| o.order_id == order_id).map(|o| o.status)
    }

    pub fn export_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.outcomes.iter().filter_map(|o| o.export_path.as_ref())
    }
}

pub struct OrderProcessor {
    repository: Arc<dyn OrderRepository>,
    remote: Arc<dyn RemoteStatusService>,
    exporter: CsvExporter,
    rules: BusinessRules,
    metrics: Option<Arc<Metrics>>,
}

impl OrderProcessor {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        remote: Arc<dyn RemoteStatusService>,
        config: ProcessorConfig,
    ) -> Self {
        Self {
            repository,
            remote,
            exporter: CsvExporter::new(config.export),
            rules: config.rules,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Process every order for `user_id`.
    ///
    /// Returns false when the fetch fails, the user has no orders or an
    /// order hits an unexpected failure; true once every order has been
    /// visited (whatever its final status).
    pub async fn process_orders(&self, user_id: i64) -> bool {
        match self.run_batch(user_id).await {
            Ok(Some(summary)) => {
                tracing::info!(
                    user_id = user_id,
                    orders = summary.outcomes.len(),
                    "Order batch completed"
                );
                true
            }
            Ok(None) => {
                tracing::info!(user_id = user_id, "No orders to process");
                false
            }
            Err(e) => {
                tracing::error!(user_id = user_id, error = %e, "Order batch aborted");
                false
            }
        }
    }

    /// Typed form of `process_orders`, reporting each order's outcome.
    ///
    /// `Ok(None)` means the user had no orders. An `Err` from an order
    /// stops the loop; later orders are neither processed nor persisted.
    pub async fn run_batch(&self, user_id: i64) -> Result<Option<BatchSummary>, BatchError> {
        tracing::info!(user_id = user_id, "Processing orders");

        let orders = match self.repository.get_orders_by_user(user_id).await {
            Ok(orders) => orders,
            Err(e) => {
                self.record_batch("fetch_failed");
                return Err(BatchError::Fetch(e));
            }
        };

        if orders.is_empty() {
            self.record_batch("empty");
            return Ok(None);
        }

        let mut summary = BatchSummary {
            user_id,
            outcomes: Vec::with_capacity(orders.len()),
        };

        for mut order in orders {
            match self.process_order(&mut order, user_id).await {
                Ok(outcome) => summary.outcomes.push(outcome),
                Err(e) => {
                    self.record_batch("aborted");
                    return Err(e);
                }
            }
        }

        self.record_batch("completed");
        Ok(Some(summary))
    }

    async fn process_order(
        &self,
        order: &mut Order,
        user_id: i64,
    ) -> Result<OrderOutcome, BatchError> {
        let started = Instant::now();

        let export_path = match &order.order_type {
            OrderType::A => self.export_order(order, user_id).await,
            OrderType::B => {
                self.verify_order(order).await?;
                None
            }
            OrderType::C => {
                order.set_status(self.rules.completion_status(order));
                None
            }
            OrderType::Unrecognized(raw) => {
                tracing::warn!(order_id = order.id, order_type = %raw, "Unknown order type");
                order.set_status(OrderStatus::UnknownType);
                None
            }
        };

        order.set_priority(self.rules.priority_for(order));
        self.persist_status(order).await;

        tracing::debug!(
            user_id = user_id,
            order_id = order.id,
            order_type = %order.order_type,
            status = %order.status,
            priority = %order.priority,
            "Order processed"
        );

        if let Some(metrics) = &self.metrics {
            metrics.record_order(
                order.order_type.as_str(),
                order.status.as_str(),
                started.elapsed().as_secs_f64(),
            );
        }

        Ok(OrderOutcome {
            order_id: order.id,
            order_type: order.order_type.clone(),
            status: order.status,
            priority: order.priority,
            export_path,
        })
    }

    /// Type A. The exported row shows the order before priority assignment.
    async fn export_order(&self, order: &mut Order, user_id: i64) -> Option<PathBuf> {
        let high_value = self.rules.is_high_value(order);

        match self.exporter.export(user_id, order, high_value).await {
            Ok(path) => {
                order.set_status(OrderStatus::Exported);
                Some(path)
            }
            Err(e) => {
                tracing::warn!(order_id = order.id, error = %e, "Order export failed");
                order.set_status(OrderStatus::ExportFailed);
                None
            }
        }
    }

    /// Type B. Remote-call failures are contained; a response that cannot
    /// be evaluated aborts the batch.
    async fn verify_order(&self, order: &mut Order) -> Result<(), BatchError> {
        match self.remote.call_api(order.id).await {
            Ok(response) => {
                let status = self
                    .rules
                    .verification_status(order, &response)
                    .map_err(|source| BatchError::Unexpected { order_id: order.id, source })?;
                order.set_status(status);
            }
            Err(e) => {
                tracing::warn!(order_id = order.id, error = %e, "Remote status call failed");
                order.set_status(OrderStatus::ApiFailure);
            }
        }
        Ok(())
    }

    /// A persistence failure overrides whatever status the type stage set.
    async fn persist_status(&self, order: &mut Order) {
        match self
            .repository
            .update_order_status(order.id, order.status, order.priority)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(order_id = order.id, "Repository reported no row updated");
            }
            Err(e) => {
                tracing::warn!(order_id = order.id, error = %e, "Order status update failed");
                order.set_status(OrderStatus::DbError);
            }
        }
    }

    fn record_batch(&self, outcome: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_batch(outcome);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

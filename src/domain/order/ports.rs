use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::aggregate::Order;
use super::errors::{RemoteCallError, RepositoryError};
use super::value_objects::{OrderStatus, Priority};

/// Persistence capability for orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn get_orders_by_user(&self, user_id: i64) -> Result<Vec<Order>, RepositoryError>;

    async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
        priority: Priority,
    ) -> Result<bool, RepositoryError>;
}

/// Remote verification capability, consulted for type B orders
#[async_trait]
pub trait RemoteStatusService: Send + Sync {
    async fn call_api(&self, order_id: i64) -> Result<RemoteStatusResponse, RemoteCallError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteStatusResponse {
    pub status: String,
    #[serde(default)]
    pub data: Option<f64>,
}

impl RemoteStatusResponse {
    pub const SUCCESS: &'static str = "success";

    pub fn new(status: impl Into<String>, data: Option<f64>) -> Self {
        Self { status: status.into(), data }
    }

    pub fn success(data: f64) -> Self {
        Self::new(Self::SUCCESS, Some(data))
    }

    pub fn is_success(&self) -> bool {
        self.status == Self::SUCCESS
    }
}

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::order::{
    Order, OrderRepository, OrderStatus, Priority, RemoteCallError, RemoteStatusResponse,
    RemoteStatusService, RepositoryError,
};

// ============================================================================
// In-Memory Collaborators
// ============================================================================
//
// Process-local implementations of the repository and remote service,
// used by the demo binary and by tests. Both support failure injection.
//
// ============================================================================

/// A persisted status update, as received by the repository
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub order_id: i64,
    pub status: OrderStatus,
    pub priority: Priority,
}

#[derive(Default)]
struct RepositoryState {
    orders: HashMap<i64, Vec<Order>>,
    updates: Vec<StatusUpdate>,
    fail_fetch: bool,
    fail_updates: HashSet<i64>,
    fail_all_updates: bool,
}

#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    state: Arc<Mutex<RepositoryState>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_orders(&self, user_id: i64, orders: Vec<Order>) {
        let mut state = self.state.lock().await;
        state.orders.entry(user_id).or_default().extend(orders);
    }

    /// Make every `get_orders_by_user` call fail
    pub async fn fail_fetch(&self) {
        self.state.lock().await.fail_fetch = true;
    }

    /// Make `update_order_status` fail for one order id
    pub async fn fail_update_for(&self, order_id: i64) {
        self.state.lock().await.fail_updates.insert(order_id);
    }

    /// Make every `update_order_status` call fail
    pub async fn fail_all_updates(&self) {
        self.state.lock().await.fail_all_updates = true;
    }

    /// Every update received so far, in call order
    pub async fn updates(&self) -> Vec<StatusUpdate> {
        self.state.lock().await.updates.clone()
    }

    /// Latest update received for `order_id`
    pub async fn last_update(&self, order_id: i64) -> Option<StatusUpdate> {
        self.state
            .lock()
            .await
            .updates
            .iter()
            .rev()
            .find(|u| u.order_id == order_id)
            .cloned()
    }

    pub async fn user_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.state.lock().await.orders.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn get_orders_by_user(&self, user_id: i64) -> Result<Vec<Order>, RepositoryError> {
        let state = self.state.lock().await;
        if state.fail_fetch {
            return Err(RepositoryError::Fetch {
                user_id,
                reason: "injected fetch failure".to_string(),
            });
        }
        Ok(state.orders.get(&user_id).cloned().unwrap_or_default())
    }

    async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
        priority: Priority,
    ) -> Result<bool, RepositoryError> {
        let mut state = self.state.lock().await;
        if state.fail_all_updates || state.fail_updates.contains(&order_id) {
            return Err(RepositoryError::Update {
                order_id,
                reason: "injected update failure".to_string(),
            });
        }

        state.updates.push(StatusUpdate { order_id, status, priority });

        // Mirror the update onto the stored order so later fetches see it
        let mut found = false;
        for order in state.orders.values_mut().flatten().filter(|o| o.id == order_id) {
            order.status = status;
            order.priority = priority;
            found = true;
        }
        Ok(found)
    }
}

#[derive(Debug, Clone)]
enum CannedReply {
    Respond(RemoteStatusResponse),
    Fail,
}

/// Remote status service answering from a fixed table.
#[derive(Clone)]
pub struct StaticRemoteStatusService {
    replies: Arc<Mutex<HashMap<i64, CannedReply>>>,
    default_reply: RemoteStatusResponse,
}

impl StaticRemoteStatusService {
    pub fn new(default_reply: RemoteStatusResponse) -> Self {
        Self {
            replies: Arc::new(Mutex::new(HashMap::new())),
            default_reply,
        }
    }

    pub async fn respond(&self, order_id: i64, response: RemoteStatusResponse) {
        self.replies
            .lock()
            .await
            .insert(order_id, CannedReply::Respond(response));
    }

    pub async fn fail(&self, order_id: i64) {
        self.replies.lock().await.insert(order_id, CannedReply::Fail);
    }
}

impl Default for StaticRemoteStatusService {
    fn default() -> Self {
        Self::new(RemoteStatusResponse::success(50.0))
    }
}

#[async_trait]
impl RemoteStatusService for StaticRemoteStatusService {
    async fn call_api(&self, order_id: i64) -> Result<RemoteStatusResponse, RemoteCallError> {
        match self.replies.lock().await.get(&order_id) {
            Some(CannedReply::Respond(response)) => Ok(response.clone()),
            Some(CannedReply::Fail) => Err(RemoteCallError::Transport {
                order_id,
                reason: "injected remote failure".to_string(),
            }),
            None => Ok(self.default_reply.clone()),
        }
    }
}

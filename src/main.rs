use anyhow::Context;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use order_processor::memory::{InMemoryOrderRepository, StaticRemoteStatusService};
use order_processor::metrics::Metrics;
use order_processor::{Order, OrderProcessor, ProcessorConfig, RemoteStatusResponse};

/// One entry of the seed file: a user's orders plus canned remote replies.
#[derive(Debug, Deserialize)]
struct SeedUser {
    user_id: i64,
    orders: Vec<SeedOrder>,
    #[serde(default)]
    remote: Vec<SeedReply>,
}

/// Seeded orders always start fresh; any status or priority in the file
/// is ignored.
#[derive(Debug, Deserialize)]
struct SeedOrder {
    id: i64,
    #[serde(rename = "type")]
    order_type: String,
    amount: Decimal,
    flag: bool,
}

impl From<SeedOrder> for Order {
    fn from(seed: SeedOrder) -> Self {
        Order::new(seed.id, seed.order_type, seed.amount, seed.flag)
    }
}

#[derive(Debug, Deserialize)]
struct SeedReply {
    order_id: i64,
    status: String,
    data: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_processor=debug")),
        )
        .init();

    let config = ProcessorConfig::load().context("loading configuration")?;
    tracing::info!(
        export_dir = %config.export.directory.display(),
        "Starting order processor demo"
    );

    let seed = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading seed file {}", path))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing seed file {}", path))?
        }
        None => sample_seed(),
    };

    let repository = InMemoryOrderRepository::new();
    let remote = StaticRemoteStatusService::default();
    for user in seed {
        for reply in user.remote {
            remote
                .respond(reply.order_id, RemoteStatusResponse::new(reply.status, reply.data))
                .await;
        }
        let orders = user.orders.into_iter().map(Order::from).collect();
        repository.insert_orders(user.user_id, orders).await;
    }

    let metrics = Arc::new(Metrics::new()?);
    let processor = OrderProcessor::new(
        Arc::new(repository.clone()),
        Arc::new(remote),
        config,
    )
    .with_metrics(metrics.clone());

    for user_id in repository.user_ids().await {
        let ok = processor.process_orders(user_id).await;
        tracing::info!(user_id = user_id, success = ok, "Batch finished");
    }

    for update in repository.updates().await {
        tracing::info!(
            order_id = update.order_id,
            status = %update.status,
            priority = %update.priority,
            "Persisted order"
        );
    }

    println!("{}", metrics.render()?);
    Ok(())
}

fn sample_seed() -> Vec<SeedUser> {
    vec![SeedUser {
        user_id: 1,
        orders: vec![
            seed_order(1, "A", 120, false),
            seed_order(2, "A", 320, true),
            seed_order(3, "B", 80, false),
            seed_order(4, "B", 180, false),
            seed_order(5, "C", 40, true),
            seed_order(6, "X", 10, false),
        ],
        remote: vec![
            SeedReply { order_id: 3, status: "success".to_string(), data: Some(75.0) },
            SeedReply { order_id: 4, status: "success".to_string(), data: Some(75.0) },
        ],
    }]
}

fn seed_order(id: i64, order_type: &str, amount: i64, flag: bool) -> SeedOrder {
    SeedOrder {
        id,
        order_type: order_type.to_string(),
        amount: Decimal::from(amount),
        flag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_processor::{OrderStatus, OrderType, Priority};

    #[test]
    fn test_seed_ignores_processing_state() {
        let json = r#"[{
            "user_id": 4,
            "orders": [
                {"id": 1, "type": "B", "amount": 75, "flag": false, "status": "shipped", "priority": "urgent"}
            ],
            "remote": [{"order_id": 1, "status": "success", "data": 60.0}]
        }]"#;
        let seed: Vec<SeedUser> = serde_json::from_str(json).unwrap();
        assert_eq!(seed[0].remote.len(), 1);

        let mut user = seed.into_iter().next().unwrap();
        let order = Order::from(user.orders.remove(0));
        assert_eq!(order.order_type, OrderType::B);
        assert_eq!(order.amount, Decimal::from(75));
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.priority, Priority::Low);
    }
}

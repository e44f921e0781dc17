use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

// ============================================================================
// Metrics Module - Prometheus metrics for order processing
// ============================================================================
//
// Provides metrics for:
// - Orders processed, by type and terminal status
// - Batch outcomes (completed, fetch_failed, empty)
// - Per-order pipeline latency
//
// No HTTP exposition; hosts read the registry or call `render`.
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub orders_processed: IntCounterVec,
    pub batches: IntCounterVec,
    pub order_processing_duration: HistogramVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_processed = IntCounterVec::new(
            Opts::new("orders_processed_total", "Total orders processed by terminal status"),
            &["order_type", "status"],
        )?;
        registry.register(Box::new(orders_processed.clone()))?;

        let batches = IntCounterVec::new(
            Opts::new("order_batches_total", "Total order batches by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(batches.clone()))?;

        let order_processing_duration = HistogramVec::new(
            HistogramOpts::new("order_processing_duration_seconds", "Per-order pipeline duration")
                .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
            &["order_type"],
        )?;
        registry.register(Box::new(order_processing_duration.clone()))?;

        Ok(Self {
            registry,
            orders_processed,
            batches,
            order_processing_duration,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record one finished order
    pub fn record_order(&self, order_type: &str, status: &str, duration_secs: f64) {
        self.orders_processed.with_label_values(&[order_type, status]).inc();
        self.order_processing_duration
            .with_label_values(&[order_type])
            .observe(duration_secs);
    }

    /// Helper to record a batch outcome
    pub fn record_batch(&self, outcome: &str) {
        self.batches.with_label_values(&[outcome]).inc();
    }

    /// Prometheus text exposition of every registered metric
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

use once_cell::sync::Lazy;
use opentelemetry::global;
use opentelemetry::metrics::{Counter, Histogram, Meter};

pub static DISPATCHER_METRICS: Lazy<DispatcherMetrics> = Lazy::new(DispatcherMetrics::register);

pub struct DispatcherMetrics {
    pub successful_offer_operations: Counter<u64>,
    pub failed_offer_operations: Counter<u64>,
    pub offers_escalated: Counter<u64>,
    pub admin_alerts_raised: Counter<u64>,
    pub notification_failures: Counter<u64>,
    pub sweep_response_time: Histogram<f64>,
    pub db_calls_response_time: Histogram<f64>,
}

impl DispatcherMetrics {
    pub fn register() -> Self {
        let meter: Meter = global::meter("dispatcher.opentelemetry");

        let successful_offer_operations = meter
            .u64_counter("successful_offer_operations")
            .with_description("Count of successful offer operations over time")
            .with_unit("offers")
            .init();

        let failed_offer_operations = meter
            .u64_counter("failed_offer_operations")
            .with_description("Count of failed offer operations over time")
            .with_unit("offers")
            .init();

        let offers_escalated = meter
            .u64_counter("offers_escalated")
            .with_description("Count of offers escalated to the next ladder attempt")
            .with_unit("offers")
            .init();

        let admin_alerts_raised = meter
            .u64_counter("admin_alerts_raised")
            .with_description("Count of administrator alerts raised on ladder exhaustion")
            .with_unit("alerts")
            .init();

        let notification_failures = meter
            .u64_counter("notification_failures")
            .with_description("Count of best-effort notification deliveries that failed")
            .with_unit("messages")
            .init();

        let sweep_response_time = meter
            .f64_histogram("sweep_response_time")
            .with_description("Wall-clock duration of one escalation sweep tick")
            .with_unit("s")
            .init();

        let db_calls_response_time = meter
            .f64_histogram("db_calls_response_time")
            .with_description("Response time of database calls")
            .with_unit("s")
            .init();

        Self {
            successful_offer_operations,
            failed_offer_operations,
            offers_escalated,
            admin_alerts_raised,
            notification_failures,
            sweep_response_time,
            db_calls_response_time,
        }
    }
}

// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling core logic from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// A lazily-initialized static reference to the global `MetricsSink` implementation.
pub static SINK: OnceCell<&'static dyn MetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns a static reference to the configured survey metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn survey_metrics() -> &'static dyn SurveyMetricsSink {
    match SINK.get() {
        Some(sink) => sink.as_survey(),
        None => &NOP_SINK,
    }
}

/// Returns a static reference to the configured error metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    match SINK.get() {
        Some(sink) => sink.as_error(),
        None => &NOP_SINK,
    }
}

/// Returns a static reference to the configured service metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn service_metrics() -> &'static dyn ServiceMetricsSink {
    match SINK.get() {
        Some(sink) => sink.as_service(),
        None => &NOP_SINK,
    }
}

// --- Trait Definitions ---

/// A sink for metrics related to surveys, staking and rewards.
pub trait SurveyMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter for created surveys.
    fn inc_surveys_created(&self);
    /// Increments the counter for accepted votes, labeled by recency-bonus eligibility.
    fn inc_votes_cast(&self, recency_bonus: bool);
    /// Increments the counter for closed surveys, labeled by close trigger.
    fn inc_surveys_closed(&self, trigger: &'static str);
    /// Increments the counter for reward ledger credits.
    fn inc_rewards_credited(&self, count: u64);
    /// Increments the counter for withdrawals, labeled by outcome ("delivered", "forfeited").
    fn inc_rewards_withdrawn(&self, outcome: &'static str);
    /// Increments the counter for outbound transfers rejected by the recipient, labeled by kind.
    fn inc_transfers_rejected(&self, kind: &'static str);
    /// Sets the gauge for the total collateral held, in whole units.
    fn set_custody_units(&self, units: f64);
}
impl SurveyMetricsSink for NopSink {
    fn inc_surveys_created(&self) {}
    fn inc_votes_cast(&self, _recency_bonus: bool) {}
    fn inc_surveys_closed(&self, _trigger: &'static str) {}
    fn inc_rewards_credited(&self, _count: u64) {}
    fn inc_rewards_withdrawn(&self, _outcome: &'static str) {}
    fn inc_transfers_rejected(&self, _kind: &'static str) {}
    fn set_custody_units(&self, _units: f64) {}
}

/// A sink for recording structured error metrics.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its kind and variant.
    fn inc_error(&self, kind: &'static str, variant: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _variant: &'static str) {}
}

/// A sink for service-level metrics related to the generic dispatch mechanism.
pub trait ServiceMetricsSink: Send + Sync + std::fmt::Debug {
    /// Observes the latency of a dispatched `handle_service_call`, labeled by service and method.
    fn observe_service_dispatch_latency(&self, service_id: &str, method: &str, duration_secs: f64);
    /// Increments a counter for errors returned from `handle_service_call`, labeled by reason.
    fn inc_dispatch_error(&self, service_id: &str, method: &str, reason: &'static str);
}
impl ServiceMetricsSink for NopSink {
    fn observe_service_dispatch_latency(
        &self,
        _service_id: &str,
        _method: &str,
        _duration_secs: f64,
    ) {
    }
    fn inc_dispatch_error(&self, _service_id: &str, _method: &str, _reason: &'static str) {}
}

/// A unified sink that implements all domain-specific traits, providing a single
/// point of implementation for metrics backends like Prometheus.
pub trait MetricsSink: SurveyMetricsSink + ErrorMetricsSink + ServiceMetricsSink {
    /// Views this sink as a `SurveyMetricsSink`.
    fn as_survey(&self) -> &dyn SurveyMetricsSink;
    /// Views this sink as an `ErrorMetricsSink`.
    fn as_error(&self) -> &dyn ErrorMetricsSink;
    /// Views this sink as a `ServiceMetricsSink`.
    fn as_service(&self) -> &dyn ServiceMetricsSink;
}

// Blanket implementation to allow any type that implements all sub-traits
// to be used as a `MetricsSink`.
impl<T> MetricsSink for T
where
    T: SurveyMetricsSink + ErrorMetricsSink + ServiceMetricsSink,
{
    fn as_survey(&self) -> &dyn SurveyMetricsSink {
        self
    }
    fn as_error(&self) -> &dyn ErrorMetricsSink {
        self
    }
    fn as_service(&self) -> &dyn ServiceMetricsSink {
        self
    }
}

// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_gauge, register_histogram_vec, register_int_counter,
    register_int_counter_vec, Gauge, HistogramVec, IntCounter, IntCounterVec,
};

// --- Metric Statics ---
// The collectors are initialized exactly once by the `install` function.

static SURVEYS_CREATED_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static VOTES_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static SURVEYS_CLOSED_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static REWARDS_CREDITED_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static REWARDS_WITHDRAWN_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static TRANSFERS_REJECTED_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static CUSTODY_UNITS: OnceCell<Gauge> = OnceCell::new();

static ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static SVC_DISPATCH_LATENCY_SECONDS: OnceCell<HistogramVec> = OnceCell::new();
static SVC_DISPATCH_ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();

/// The Prometheus-backed `MetricsSink`.
#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

/// Helper macro to reduce boilerplate for using a metric held in a OnceCell.
/// Observations made before `install()` are dropped.
macro_rules! with_metric {
    ($metric:ident, |$m:ident| $body:expr) => {
        if let Some($m) = $metric.get() {
            $body;
        }
    };
}

impl SurveyMetricsSink for PrometheusSink {
    fn inc_surveys_created(&self) {
        with_metric!(SURVEYS_CREATED_TOTAL, |m| m.inc());
    }
    fn inc_votes_cast(&self, recency_bonus: bool) {
        let label = if recency_bonus { "bonus" } else { "plain" };
        with_metric!(VOTES_TOTAL, |m| m.with_label_values(&[label]).inc());
    }
    fn inc_surveys_closed(&self, trigger: &'static str) {
        with_metric!(SURVEYS_CLOSED_TOTAL, |m| m.with_label_values(&[trigger]).inc());
    }
    fn inc_rewards_credited(&self, count: u64) {
        with_metric!(REWARDS_CREDITED_TOTAL, |m| m.inc_by(count));
    }
    fn inc_rewards_withdrawn(&self, outcome: &'static str) {
        with_metric!(REWARDS_WITHDRAWN_TOTAL, |m| m.with_label_values(&[outcome]).inc());
    }
    fn inc_transfers_rejected(&self, kind: &'static str) {
        with_metric!(TRANSFERS_REJECTED_TOTAL, |m| m.with_label_values(&[kind]).inc());
    }
    fn set_custody_units(&self, units: f64) {
        with_metric!(CUSTODY_UNITS, |m| m.set(units));
    }
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, variant: &'static str) {
        with_metric!(ERRORS_TOTAL, |m| m.with_label_values(&[kind, variant]).inc());
    }
}

impl ServiceMetricsSink for PrometheusSink {
    fn observe_service_dispatch_latency(&self, service_id: &str, method: &str, duration_secs: f64) {
        with_metric!(SVC_DISPATCH_LATENCY_SECONDS, |m| m
            .with_label_values(&[service_id, method])
            .observe(duration_secs));
    }
    fn inc_dispatch_error(&self, service_id: &str, method: &str, reason: &'static str) {
        with_metric!(SVC_DISPATCH_ERRORS_TOTAL, |m| m
            .with_label_values(&[service_id, method, reason])
            .inc());
    }
}

fn set_once<T>(cell: &OnceCell<T>, value: T) -> Result<(), prometheus::Error> {
    cell.set(value).map_err(|_| prometheus::Error::AlreadyReg)
}

/// Registers all collectors with the default Prometheus registry and installs the
/// sink as the global `SINK`. Fails with `AlreadyReg` if called twice.
pub fn install() -> Result<&'static dyn MetricsSink, prometheus::Error> {
    set_once(
        &SURVEYS_CREATED_TOTAL,
        register_int_counter!("canvass_surveys_created_total", "Total surveys created.")?,
    )?;
    set_once(
        &VOTES_TOTAL,
        register_int_counter_vec!(
            "canvass_votes_total",
            "Total accepted votes, by recency-bonus eligibility.",
            &["kind"]
        )?,
    )?;
    set_once(
        &SURVEYS_CLOSED_TOTAL,
        register_int_counter_vec!(
            "canvass_surveys_closed_total",
            "Total surveys closed, by trigger.",
            &["trigger"]
        )?,
    )?;
    set_once(
        &REWARDS_CREDITED_TOTAL,
        register_int_counter!(
            "canvass_rewards_credited_total",
            "Total reward ledger credits written at survey close."
        )?,
    )?;
    set_once(
        &REWARDS_WITHDRAWN_TOTAL,
        register_int_counter_vec!(
            "canvass_rewards_withdrawn_total",
            "Total reward withdrawals, by outcome.",
            &["outcome"]
        )?,
    )?;
    set_once(
        &TRANSFERS_REJECTED_TOTAL,
        register_int_counter_vec!(
            "canvass_transfers_rejected_total",
            "Total outbound transfers rejected by the recipient.",
            &["kind"]
        )?,
    )?;
    set_once(
        &CUSTODY_UNITS,
        register_gauge!(
            "canvass_custody_units",
            "Total collateral held by the platform, in whole units."
        )?,
    )?;
    set_once(
        &ERRORS_TOTAL,
        register_int_counter_vec!(
            "canvass_errors_total",
            "Total number of errors, categorized by type and variant.",
            &["kind", "variant"]
        )?,
    )?;
    set_once(
        &SVC_DISPATCH_LATENCY_SECONDS,
        register_histogram_vec!(
            "canvass_service_dispatch_latency_seconds",
            "Latency of dispatched service calls.",
            &["service_id", "method"],
            exponential_buckets(0.0001, 2.0, 16)?
        )?,
    )?;
    set_once(
        &SVC_DISPATCH_ERRORS_TOTAL,
        register_int_counter_vec!(
            "canvass_service_dispatch_errors_total",
            "Total errors returned from service dispatch calls.",
            &["service_id", "method", "reason"]
        )?,
    )?;

    static PROMETHEUS_SINK: PrometheusSink = PrometheusSink;
    // A sink installed earlier (e.g. by a test) stays in place.
    let _ = SINK.set(&PROMETHEUS_SINK);
    Ok(&PROMETHEUS_SINK)
}

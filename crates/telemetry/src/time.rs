// Path: crates/telemetry/src/time.rs
use crate::sinks::ServiceMetricsSink;
use std::time::Instant;

/// Observes the dispatch latency of one service call when dropped.
pub struct Timer<'a> {
    sink: &'a dyn ServiceMetricsSink,
    service_id: &'a str,
    method: &'a str,
    start: Instant,
}

impl<'a> Timer<'a> {
    /// Starts timing a call to `method` on `service_id`.
    pub fn new(sink: &'a dyn ServiceMetricsSink, service_id: &'a str, method: &'a str) -> Self {
        Self {
            sink,
            service_id,
            method,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        self.sink.observe_service_dispatch_latency(
            self.service_id,
            self.method,
            self.start.elapsed().as_secs_f64(),
        );
    }
}

use std::sync::Mutex;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static HANDLE: Mutex<Option<PrometheusHandle>> = Mutex::new(None);

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload. Safe to call more than once; later
/// calls return the handle installed by the first.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let mut slot = HANDLE
        .lock()
        .map_err(|_| anyhow::anyhow!("metrics handle lock poisoned"))?;
    if let Some(handle) = slot.as_ref() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {e}"))?;

    // Pre-register counters so they appear even before the first increment.
    counter!("upstream_requests_total").absolute(0);
    counter!("upstream_failures_total").absolute(0);
    counter!("chat_questions_total").absolute(0);
    counter!("wallet_lookups_total").absolute(0);

    // Histogram is lazily created on first record; force creation.
    histogram!("upstream_latency_seconds").record(0.0);

    *slot = Some(handle.clone());
    Ok(handle)
}

/// Record one upstream call: count, latency, and failure when `ok` is false.
pub fn record_upstream(source: &'static str, started: Instant, ok: bool) {
    counter!("upstream_requests_total", "source" => source).increment(1);
    histogram!("upstream_latency_seconds", "source" => source)
        .record(started.elapsed().as_secs_f64());
    if !ok {
        counter!("upstream_failures_total", "source" => source).increment(1);
    }
}

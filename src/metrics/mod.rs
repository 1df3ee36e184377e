use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::utils::error::{Error, Result};

static PROM_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the global Prometheus recorder and describe the service metrics.
///
/// Call once at start-up, before any metric is emitted. Later calls are no-ops.
pub fn init() -> Result<()> {
    if PROM_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| Error::Other(format!("metrics recorder: {}", e)))?;
    let _ = PROM_HANDLE.set(handle);

    describe_histogram!("gdelt_fetch_ms", Unit::Milliseconds, "GDELT DOC request latency");
    describe_counter!("fx_analyses_total", "Pair analyses completed, by decision");
    Ok(())
}

/// Prometheus exposition text, or `None` if `init` was never called.
pub fn render() -> Option<String> {
    PROM_HANDLE.get().map(PrometheusHandle::render)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init().unwrap();
        init().unwrap();
        metrics::counter!("fx_analyses_total", 1, "decision" => "NEUTRAL");
        let text = render().unwrap();
        assert!(text.contains("fx_analyses_total"));
    }
}

// Structured events around an analytics computation. The analyzer itself stays silent.
use crate::analyzer::AnalyticsReport;
use crate::model::StorageError;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber. `RUST_LOG` wins over the configured level.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn computing(form_id: &str) {
    debug!(form_id, "computing analytics");
}

pub fn report_ready(form_id: &str, report: &AnalyticsReport, elapsed: Duration) {
    info!(
        form_id,
        total_responses = report.total_responses,
        average_rating = ?report.average_rating,
        completion_rate = report.completion_rate,
        elapsed_ms = elapsed.as_millis() as u64,
        "analytics ready"
    );
}

/// A missing form is an expected outcome, not a failure.
pub fn form_missing(form_id: &str) {
    info!(form_id, "form not found, nothing to analyze");
}

pub fn store_failed(form_id: &str, err: &StorageError) {
    error!(form_id, error = %err, "failed to read from store");
}

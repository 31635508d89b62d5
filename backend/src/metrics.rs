//! Prometheus metrics
//!
//! Counters are recorded through the `metrics` facade. Without an installed
//! recorder (tests, embedded use) they are no-ops.

use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub const SIGNUPS_TOTAL: &str = "taskboard_signups_total";
pub const LOGINS_TOTAL: &str = "taskboard_logins_total";
pub const TOKEN_REJECTIONS_TOTAL: &str = "taskboard_token_rejections_total";
pub const TASKS_CREATED_TOTAL: &str = "taskboard_tasks_created_total";

/// Install the global Prometheus recorder
///
/// Only one recorder can exist per process; call once from `main`.
pub fn install_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics recorder: {}", e))?;

    metrics::describe_counter!(SIGNUPS_TOTAL, "Signup attempts by outcome");
    metrics::describe_counter!(LOGINS_TOTAL, "Login attempts by outcome");
    metrics::describe_counter!(
        TOKEN_REJECTIONS_TOTAL,
        "Requests rejected for a missing or invalid session"
    );
    metrics::describe_counter!(TASKS_CREATED_TOTAL, "Tasks created");

    Ok(handle)
}

#[inline]
pub fn record_signup(outcome: &'static str) {
    metrics::counter!(SIGNUPS_TOTAL, "outcome" => outcome).increment(1);
}

#[inline]
pub fn record_login(outcome: &'static str) {
    metrics::counter!(LOGINS_TOTAL, "outcome" => outcome).increment(1);
}

#[inline]
pub fn record_token_rejection() {
    metrics::counter!(TOKEN_REJECTIONS_TOTAL).increment(1);
}

#[inline]
pub fn record_task_created() {
    metrics::counter!(TASKS_CREATED_TOTAL).increment(1);
}

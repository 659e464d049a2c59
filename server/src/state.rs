use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::config::{
    air_upstream_url, static_dir, upstream_connect_timeout, upstream_http_timeout,
};

#[derive(Clone)]
pub struct AppState {
    pub http_client: reqwest::Client,
    /// Base URL for air-quality lookups. None if AIR_UPSTREAM_URL is not set.
    pub air_upstream: Option<Arc<str>>,
    pub static_dir: PathBuf,
    pub observability: Arc<ObservabilityCounters>,
}

#[derive(Debug, Default)]
pub struct ObservabilityCounters {
    air_requests_total: AtomicU64,
    air_rejected_total: AtomicU64,
    air_upstream_errors_total: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservabilitySnapshot {
    pub air_requests_total: u64,
    pub air_rejected_total: u64,
    pub air_upstream_errors_total: u64,
}

impl ObservabilityCounters {
    pub fn snapshot(&self) -> ObservabilitySnapshot {
        ObservabilitySnapshot {
            air_requests_total: self.air_requests_total.load(Ordering::Relaxed),
            air_rejected_total: self.air_rejected_total.load(Ordering::Relaxed),
            air_upstream_errors_total: self.air_upstream_errors_total.load(Ordering::Relaxed),
        }
    }

    pub fn record_air_request(&self) {
        self.air_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_air_rejected(&self) {
        self.air_rejected_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_air_upstream_error(&self) {
        self.air_upstream_errors_total
            .fetch_add(1, Ordering::Relaxed);
    }
}

impl AppState {
    /// State configured from the process environment.
    pub fn from_env() -> Self {
        Self::new(air_upstream_url(), static_dir())
    }

    pub fn new(air_upstream: Option<String>, static_dir: PathBuf) -> Self {
        let request_timeout = upstream_http_timeout();
        let connect_timeout = upstream_connect_timeout();
        let http_client = reqwest::Client::builder()
            .user_agent("cleansky/0.1")
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .or_else(|e| {
                warn!(
                    error = %e,
                    "failed to build configured HTTP client, retrying without custom user-agent"
                );
                reqwest::Client::builder()
                    .timeout(request_timeout)
                    .connect_timeout(connect_timeout)
                    .build()
            })
            .unwrap_or_else(|e| {
                panic!("failed to build timeout-configured HTTP client: {e}");
            });
        Self {
            http_client,
            air_upstream: air_upstream.map(Arc::from),
            static_dir,
            observability: Arc::new(ObservabilityCounters::default()),
        }
    }
}

use metrics::Counter;
use metrics_derive::Metrics;

/// The metrics for the [`super::RangeLogFetcher`].
#[derive(Metrics, Clone)]
#[metrics(scope = "log_fetcher")]
pub struct FetcherMetrics {
    /// A counter on the single range queries rejected by the provider.
    pub optimistic_failures: Counter,
    /// A counter on the windows queried by the batched fallback.
    pub windows: Counter,
    /// A counter on the logs returned.
    pub logs: Counter,
}

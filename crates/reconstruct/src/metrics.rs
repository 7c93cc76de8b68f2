use metrics::Counter;
use metrics_derive::Metrics;

/// The metrics for the reconstructions.
#[derive(Metrics, Clone)]
#[metrics(scope = "reconstruct")]
pub struct ReconstructMetrics {
    /// A counter on the candidate transactions fetched.
    pub candidate_transactions: Counter,
    /// A counter on the transactions or logs which could not be decoded.
    pub decode_failures: Counter,
}

//! Resilient block range log fetching for Orbit chain history.

mod error;
pub use error::{FetchError, FetchResult};

mod metrics;
pub use metrics::FetcherMetrics;

mod provider;
pub use provider::HistoryProvider;

mod query;
pub use query::{EventFilter, LogQuery};

#[cfg(any(test, feature = "test-utils"))]
/// Common test helpers
pub mod test_utils;

use alloy_primitives::{Address, BlockNumber};
use alloy_rpc_types_eth::Log;
use orbit_primitives::BlockRange;
use std::num::NonZeroU64;

/// The default amount of blocks queried per window once the provider rejected the full range.
pub const DEFAULT_BATCH_SIZE: NonZeroU64 = NonZeroU64::new(9_999).expect("non zero batch size");

/// The options of a [`RangeLogFetcher::fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// The amount of blocks per window of the batched fallback.
    pub batch_size: NonZeroU64,
    /// Return as soon as a window of the batched fallback holds logs. The returned logs are then
    /// those of the most recent non-empty window.
    pub stop_when_found: bool,
}

impl FetchOptions {
    /// Sets the batch size.
    pub const fn with_batch_size(mut self, batch_size: NonZeroU64) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets whether to stop at the first non-empty window.
    pub const fn with_stop_when_found(mut self, stop_when_found: bool) -> Self {
        self.stop_when_found = stop_when_found;
        self
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { batch_size: DEFAULT_BATCH_SIZE, stop_when_found: false }
    }
}

/// Fetches logs over block ranges, trying the whole range in a single query first and falling
/// back to sequential windows walking backwards from the end of the range when the provider
/// rejects it.
#[derive(Debug)]
pub struct RangeLogFetcher<P> {
    /// The execution node provider.
    provider: P,
    /// The earliest block that can hold relevant logs on the chain.
    earliest_block: BlockNumber,
    /// The metrics for the fetcher.
    metrics: FetcherMetrics,
}

impl<P: HistoryProvider> RangeLogFetcher<P> {
    /// Returns a new [`RangeLogFetcher`]. Ranges without an explicit start begin at
    /// `earliest_block`.
    pub fn new(provider: P, earliest_block: BlockNumber) -> Self {
        Self { provider, earliest_block, metrics: FetcherMetrics::default() }
    }

    /// Returns the underlying provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolves a range from optional bounds, defaulting to the earliest block and the latest
    /// block of the chain. A start past the end is an error.
    pub async fn resolve_range(
        &self,
        from: Option<BlockNumber>,
        to: Option<BlockNumber>,
    ) -> FetchResult<BlockRange> {
        let to = match to {
            Some(to) => to,
            None => self.provider.block_number().await?,
        };
        let from = from.unwrap_or(self.earliest_block);
        Ok(BlockRange::new(from, to)?)
    }

    /// Fetches the logs of `events` emitted by `addresses` in `range`, in chronological order.
    ///
    /// Returns the same logs whether the single query succeeds or the batched fallback runs,
    /// unless [`FetchOptions::stop_when_found`] is set. A failed window aborts the fetch.
    #[tracing::instrument(
        target = "orbit::fetcher",
        skip_all,
        fields(%range, batch_size = options.batch_size.get(), stop_when_found = options.stop_when_found)
    )]
    pub async fn fetch(
        &self,
        addresses: &[Address],
        events: &EventFilter,
        range: BlockRange,
        options: FetchOptions,
    ) -> FetchResult<Vec<Log>> {
        let query = LogQuery::new(addresses.to_vec(), events.clone(), range);

        match self.provider.logs(&query).await {
            Ok(logs) => {
                tracing::trace!(target: "orbit::fetcher", count = logs.len(), "fetched logs in a single query");
                self.metrics.logs.increment(logs.len() as u64);
                return Ok(logs);
            }
            Err(err) => {
                tracing::debug!(target: "orbit::fetcher", ?err, "single query rejected, falling back to batched queries");
                self.metrics.optimistic_failures.increment(1);
            }
        }

        // windows are scanned newest first, store them to restore the chronological order.
        let mut windows = Vec::new();
        for window in range.windows_rev(options.batch_size) {
            tracing::trace!(target: "orbit::fetcher", %window, "fetching window");
            let logs = self
                .provider
                .logs(&query.with_range(window))
                .await
                .map_err(|error| FetchError::Window { range: window, error })?;
            self.metrics.windows.increment(1);

            let found = !logs.is_empty();
            windows.push(logs);

            if options.stop_when_found && found {
                tracing::trace!(target: "orbit::fetcher", %window, "found logs, stopping");
                break;
            }
        }

        let logs: Vec<_> = windows.into_iter().rev().flatten().collect();
        self.metrics.logs.increment(logs.len() as u64);

        Ok(logs)
    }
}

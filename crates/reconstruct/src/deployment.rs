use alloy_primitives::{Address, TxHash};
use orbit_abi::logs::RollupInitialized;
use orbit_log_fetcher::{EventFilter, FetchOptions, HistoryProvider, RangeLogFetcher};
use orbit_primitives::{BlockRange, OrderingKey};

/// The transaction that deployed a rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    /// The hash of the deployment transaction.
    pub transaction_hash: TxHash,
    /// The position of the `RollupInitialized` log.
    pub key: OrderingKey,
}

/// Looks up the deployment transaction of the `rollup` in `range`.
///
/// The lookup is soft: a provider failure is logged and reported as `None`, the caller then
/// falls back to scanning the whole range.
#[tracing::instrument(target = "orbit::reconstruct", skip_all, fields(%rollup, %range))]
pub async fn find_deployment<P: HistoryProvider>(
    fetcher: &RangeLogFetcher<P>,
    rollup: Address,
    range: BlockRange,
    options: FetchOptions,
) -> Option<Deployment> {
    let events = EventFilter::event::<RollupInitialized>();
    let logs = match fetcher
        .fetch(&[rollup], &events, range, options.with_stop_when_found(true))
        .await
    {
        Ok(logs) => logs,
        Err(err) => {
            tracing::warn!(target: "orbit::reconstruct", ?err, "failed to look up deployment, scanning from range start");
            return None;
        }
    };

    let deployment = logs.iter().find_map(|log| {
        let transaction_hash = log.transaction_hash?;
        Some(Deployment { transaction_hash, key: OrderingKey::from_log(log)? })
    });

    match deployment {
        Some(deployment) => {
            tracing::debug!(target: "orbit::reconstruct", hash = %deployment.transaction_hash, key = %deployment.key, "found deployment");
        }
        None => {
            tracing::warn!(target: "orbit::reconstruct", "no deployment found, scanning from range start");
        }
    }

    deployment
}

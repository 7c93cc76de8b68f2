use alloy_json_rpc::RpcError;
use alloy_transport::TransportErrorKind;
use orbit_primitives::{BlockRange, BlockRangeError};

/// A [`Result`] that uses [`FetchError`] as the error type.
pub type FetchResult<T> = Result<T, FetchError>;

/// An error that occurred while fetching logs.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// A Provider error at the RPC level.
    #[error("execution provider rpc error: {0:?}")]
    ProviderRpc(#[from] RpcError<TransportErrorKind>),
    /// The requested range is invalid.
    #[error("invalid range: {0}")]
    Range(#[from] BlockRangeError),
    /// A window of the batched fallback failed. Windows are not retried.
    #[error("failed to fetch logs for window {range}: {error:?}")]
    Window {
        /// The failed window.
        range: BlockRange,
        /// The provider error.
        #[source]
        error: RpcError<TransportErrorKind>,
    },
}

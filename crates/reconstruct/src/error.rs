use alloy_json_rpc::RpcError;
use alloy_primitives::B256;
use alloy_transport::TransportErrorKind;
use orbit_log_fetcher::FetchError;

/// A [`Result`] that uses [`ReconstructError`] as the error type.
pub type ReconstructResult<T> = Result<T, ReconstructError>;

/// A fatal error aborting a reconstruction. Undecodable history is not an error, it only flags
/// the result as incomplete.
#[derive(Debug, thiserror::Error)]
pub enum ReconstructError {
    /// Fetching the logs failed.
    #[error("log fetch error: {0}")]
    Fetch(#[from] FetchError),
    /// A Provider error at the RPC level.
    #[error("execution provider rpc error: {0:?}")]
    ProviderRpc(#[from] RpcError<TransportErrorKind>),
    /// The provider does not know a transaction pointed at by a log.
    #[error("unknown transaction {0}")]
    MissingTransaction(B256),
    /// A log is missing a field required to order it.
    #[error("missing {0} for log")]
    MissingLogField(&'static str),
}

//! Events used to locate role changes in chain history.
#![allow(missing_docs)]

use alloy_primitives::Log;
use alloy_sol_types::{sol, SolEvent};

sol! {
    /// Emitted by the rollup and the sequencer inbox whenever an owner function is called. The id
    /// identifies the function, see [`crate::OwnerFunction`].
    #[derive(Debug, PartialEq, Eq)]
    event OwnerFunctionCalled(uint256 indexed id);

    /// Emitted by the rollup once, in its deployment transaction.
    #[derive(Debug, PartialEq, Eq)]
    event RollupInitialized(bytes32 machineHash, uint256 chainId);

    /// Emitted by the sequencer inbox when a data availability keyset is registered.
    #[derive(Debug, PartialEq, Eq)]
    event SetValidKeyset(bytes32 indexed keysetHash, bytes keysetBytes);

    /// Emitted by the sequencer inbox when a data availability keyset is invalidated.
    #[derive(Debug, PartialEq, Eq)]
    event InvalidateKeyset(bytes32 indexed keysetHash);
}

/// Tries to decode the provided log into the type T.
pub fn try_decode_log<T: SolEvent>(log: &Log) -> Option<Log<T>> {
    T::decode_log(log).ok()
}

//! Chronological replay of operations into a current state.

use crate::ReconstructMetrics;

use alloy_primitives::{Address, Bytes, B256};
use orbit_calldata::Decoded;
use orbit_primitives::{Operation, OperationKind, OrderedSet, ReconstructionResult};
use std::collections::BTreeMap;

/// A state built by applying operations one after the other.
pub trait ReplayState: Default {
    /// The state handed out once the replay is done.
    type Output;

    /// Applies the operation. Operations the state does not track are ignored.
    fn apply(&mut self, operation: &OperationKind);

    /// Returns the final state.
    fn finish(self) -> Self::Output;
}

/// The members of a role, in the order they were (last) added.
#[derive(Debug, Clone, Default)]
pub struct Membership {
    members: OrderedSet<Address>,
}

impl ReplayState for Membership {
    type Output = Vec<Address>;

    fn apply(&mut self, operation: &OperationKind) {
        if let Some(added) = operation.added() {
            self.members.insert(*added);
        } else if let Some(removed) = operation.removed() {
            self.members.remove(removed);
        }
    }

    fn finish(self) -> Self::Output {
        self.members.into_vec()
    }
}

/// The valid keysets, by hash.
#[derive(Debug, Clone, Default)]
pub struct Keysets {
    keysets: BTreeMap<B256, Bytes>,
}

impl ReplayState for Keysets {
    type Output = BTreeMap<B256, Bytes>;

    fn apply(&mut self, operation: &OperationKind) {
        match operation {
            OperationKind::SetKeyset { hash, bytes } => {
                self.keysets.insert(*hash, bytes.clone());
            }
            OperationKind::InvalidateKeyset(hash) => {
                self.keysets.remove(hash);
            }
            _ => {}
        }
    }

    fn finish(self) -> Self::Output {
        self.keysets
    }
}

/// Replays decoded transactions in order into a [`ReplayState`], tracking whether any part of
/// the history failed to decode.
#[derive(Debug)]
pub struct ReplayEngine<S> {
    state: S,
    is_complete: bool,
    metrics: ReconstructMetrics,
}

impl<S: ReplayState> Default for ReplayEngine<S> {
    fn default() -> Self {
        Self { state: S::default(), is_complete: true, metrics: ReconstructMetrics::default() }
    }
}

impl<S: ReplayState> ReplayEngine<S> {
    /// Returns an engine over an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a single operation.
    pub fn apply(&mut self, operation: &Operation) {
        tracing::trace!(target: "orbit::reconstruct", kind = %operation.kind, key = %operation.key, "applying operation");
        self.state.apply(&operation.kind);
    }

    /// Applies the operations of a decoded transaction. A decode failure is skipped and flags the
    /// result as incomplete.
    pub fn apply_decoded(&mut self, decoded: Decoded) {
        match decoded {
            Ok(operations) => operations.iter().for_each(|operation| self.apply(operation)),
            Err(failure) => {
                tracing::warn!(target: "orbit::reconstruct", %failure, "skipping undecodable transaction");
                self.metrics.decode_failures.increment(1);
                self.is_complete = false;
            }
        }
    }

    /// Returns the final state along with the completeness flag.
    pub fn finish(self) -> ReconstructionResult<S::Output> {
        let mut result = ReconstructionResult::new(self.state.finish());
        if !self.is_complete {
            result.mark_incomplete();
        }
        result
    }

    /// Replays the `seed` transactions followed by the `toggles` transactions. Both must already
    /// be in chronological order.
    pub fn reconstruct(
        seed: impl IntoIterator<Item = Decoded>,
        toggles: impl IntoIterator<Item = Decoded>,
    ) -> ReconstructionResult<S::Output> {
        let mut engine = Self::new();
        seed.into_iter().chain(toggles).for_each(|decoded| engine.apply_decoded(decoded));
        engine.finish()
    }
}

use alloy_primitives::{B256, U256};

/// Owner functions whose calls are marked by an `OwnerFunctionCalled` event, along with the id
/// carried by the event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum OwnerFunction {
    /// `SequencerInbox.setMaxTimeVariation`.
    SetMaxTimeVariation = 0,
    /// `SequencerInbox.setIsBatchPoster`.
    SetIsBatchPoster = 1,
    /// `SequencerInbox.setValidKeyset`.
    SetValidKeyset = 2,
    /// `SequencerInbox.invalidateKeysetHash`.
    InvalidateKeysetHash = 3,
    /// `SequencerInbox.setIsSequencer`.
    SetIsSequencer = 4,
    /// `SequencerInbox.setBatchPosterManager`.
    SetBatchPosterManager = 5,
    /// `RollupAdminLogic.setValidator`.
    SetValidator = 6,
}

impl OwnerFunction {
    /// Returns the numeric id of the function.
    pub const fn id(self) -> u64 {
        self as u64
    }

    /// Returns the id as the indexed topic of an `OwnerFunctionCalled` event.
    pub fn topic(self) -> B256 {
        B256::from(U256::from(self.id()).to_be_bytes::<32>())
    }
}

//! The selector tables of the role reconstructions.

use orbit_abi::calls::{
    rollup_creator_v1, rollup_creator_v2, setIsBatchPosterCall, setValidatorCall,
};
use orbit_calldata::{zip_toggles, SelectorTable};
use orbit_primitives::OperationKind;

/// The selector tables used by a [`crate::Reconstructor`].
#[derive(Debug)]
pub struct SelectorTables {
    /// Decodes validator changes, on the rollup.
    pub validators: SelectorTable,
    /// Decodes batch poster changes, on the sequencer inbox.
    pub batch_posters: SelectorTable,
}

impl Default for SelectorTables {
    fn default() -> Self {
        Self { validators: validator_table(), batch_posters: batch_poster_table() }
    }
}

/// Returns the table decoding `setValidator` calls and the initial validators of both rollup
/// creator versions.
pub fn validator_table() -> SelectorTable {
    SelectorTable::new()
        .with_terminal::<setValidatorCall, _>(|call| {
            zip_toggles(
                call.validators,
                call.values,
                OperationKind::AddValidator,
                OperationKind::RemoveValidator,
            )
        })
        .with_terminal::<rollup_creator_v1::createRollupCall, _>(|call| {
            Ok(call.deployParams.validators.into_iter().map(OperationKind::AddValidator).collect())
        })
        .with_terminal::<rollup_creator_v2::createRollupCall, _>(|call| {
            Ok(call.deployParams.validators.into_iter().map(OperationKind::AddValidator).collect())
        })
        .with_delegation_calls()
}

/// Returns the table decoding `setIsBatchPoster` calls and the initial batch posters of both
/// rollup creator versions.
pub fn batch_poster_table() -> SelectorTable {
    SelectorTable::new()
        .with_terminal::<setIsBatchPosterCall, _>(|call| {
            Ok(vec![if call.isBatchPoster {
                OperationKind::AddBatchPoster(call.addr)
            } else {
                OperationKind::RemoveBatchPoster(call.addr)
            }])
        })
        // v1.1 takes a single batch poster, only set when non zero.
        .with_terminal::<rollup_creator_v1::createRollupCall, _>(|call| {
            Ok(Some(call.deployParams.batchPoster)
                .filter(|poster| !poster.is_zero())
                .map(OperationKind::AddBatchPoster)
                .into_iter()
                .collect())
        })
        .with_terminal::<rollup_creator_v2::createRollupCall, _>(|call| {
            Ok(call
                .deployParams
                .batchPosters
                .into_iter()
                .map(OperationKind::AddBatchPoster)
                .collect())
        })
        .with_delegation_calls()
}

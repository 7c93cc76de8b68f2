use crate::{DecodeError, DecodeFailure, SelectorEntry, SelectorTable};

use alloy_primitives::Selector;
use orbit_primitives::{Operation, OperationKind, OrderedTransaction};

/// The outcome of decoding one transaction.
pub type Decoded = Result<Vec<Operation>, DecodeFailure>;

/// Decodes the calldata into operations, unwrapping delegation calls until a terminal call is
/// met. Fails if a selector along the way is not in the table.
pub fn decode(calldata: &[u8], table: &SelectorTable) -> Result<Vec<OperationKind>, DecodeError> {
    decode_at_depth(calldata, table, 0)
}

fn decode_at_depth(
    calldata: &[u8],
    table: &SelectorTable,
    depth: usize,
) -> Result<Vec<OperationKind>, DecodeError> {
    let selector =
        calldata.get(..4).map(Selector::from_slice).ok_or(DecodeError::MissingSelector)?;

    match table.get(&selector) {
        Some(SelectorEntry::Terminal(decoder)) => decoder(calldata),
        Some(SelectorEntry::Wrapper(unwrapper)) => {
            let inner = unwrapper(calldata)?;
            tracing::trace!(target: "orbit::calldata", %selector, depth, "unwrapping delegation call");
            decode_at_depth(&inner, table, depth + 1)
        }
        None => Err(DecodeError::UnknownSelector(selector)),
    }
}

/// Decodes the input of the transaction into operations carrying the transaction provenance.
pub fn decode_transaction(transaction: &OrderedTransaction, table: &SelectorTable) -> Decoded {
    let kinds = decode(&transaction.input, table)
        .map_err(|error| DecodeFailure::new(transaction.hash, error))?;

    Ok(kinds
        .into_iter()
        .map(|kind| Operation::new(kind, transaction.hash, transaction.key))
        .collect())
}

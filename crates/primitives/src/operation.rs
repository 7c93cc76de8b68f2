use crate::OrderingKey;

use alloy_primitives::{Address, Bytes, TxHash, B256};

/// A state changing operation recovered from chain history.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum OperationKind {
    /// A validator was allowed.
    #[display("AddValidator({_0})")]
    AddValidator(Address),
    /// A validator was disallowed.
    #[display("RemoveValidator({_0})")]
    RemoveValidator(Address),
    /// A batch poster was allowed.
    #[display("AddBatchPoster({_0})")]
    AddBatchPoster(Address),
    /// A batch poster was disallowed.
    #[display("RemoveBatchPoster({_0})")]
    RemoveBatchPoster(Address),
    /// A keyset was registered as valid.
    #[display("SetKeyset({hash})")]
    SetKeyset {
        /// The hash of the keyset.
        hash: B256,
        /// The encoded keyset.
        bytes: Bytes,
    },
    /// A keyset was invalidated.
    #[display("InvalidateKeyset({_0})")]
    InvalidateKeyset(B256),
}

impl OperationKind {
    /// Returns the identity added by the operation, if it is an addition to a role.
    pub const fn added(&self) -> Option<&Address> {
        match self {
            Self::AddValidator(address) | Self::AddBatchPoster(address) => Some(address),
            _ => None,
        }
    }

    /// Returns the identity removed by the operation, if it is a removal from a role.
    pub const fn removed(&self) -> Option<&Address> {
        match self {
            Self::RemoveValidator(address) | Self::RemoveBatchPoster(address) => Some(address),
            _ => None,
        }
    }
}

/// An [`OperationKind`] along with the transaction it was recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// The operation.
    pub kind: OperationKind,
    /// The hash of the transaction that carried the operation.
    pub transaction_hash: TxHash,
    /// The position of the transaction on chain.
    pub key: OrderingKey,
}

impl Operation {
    /// Returns a new instance of [`Operation`].
    pub const fn new(kind: OperationKind, transaction_hash: TxHash, key: OrderingKey) -> Self {
        Self { kind, transaction_hash, key }
    }
}

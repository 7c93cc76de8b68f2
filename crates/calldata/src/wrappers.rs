//! Delegation calls through which owner functions are commonly invoked.

use crate::{DecodeError, SelectorTable};

use alloy_primitives::Address;
use orbit_abi::calls::{execTransactionCall, executeCallCall};
use orbit_primitives::OperationKind;

impl SelectorTable {
    /// Registers the delegation calls of the upgrade executor (`executeCall`) and of multisig
    /// wallets (`execTransaction`), so that calls routed through them are unwrapped.
    pub fn with_delegation_calls(self) -> Self {
        self.with_wrapper::<executeCallCall, _>(|call| call.targetCallData)
            .with_wrapper::<execTransactionCall, _>(|call| call.data)
    }
}

/// Zips parallel `identities` and `flags` arrays into one operation per index, `add` for set
/// flags and `remove` for cleared ones. Order follows the arrays.
pub fn zip_toggles(
    identities: Vec<Address>,
    flags: Vec<bool>,
    add: fn(Address) -> OperationKind,
    remove: fn(Address) -> OperationKind,
) -> Result<Vec<OperationKind>, DecodeError> {
    if identities.len() != flags.len() {
        return Err(DecodeError::LengthMismatch {
            identities: identities.len(),
            flags: flags.len(),
        });
    }

    Ok(identities
        .into_iter()
        .zip(flags)
        .map(|(identity, flag)| if flag { add(identity) } else { remove(identity) })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_zip_in_array_order() -> eyre::Result<()> {
        let (a, b) = (Address::repeat_byte(0xa), Address::repeat_byte(0xb));
        let operations = zip_toggles(
            vec![a, b, a],
            vec![true, true, false],
            OperationKind::AddValidator,
            OperationKind::RemoveValidator,
        )?;

        assert_eq!(
            operations,
            vec![
                OperationKind::AddValidator(a),
                OperationKind::AddValidator(b),
                OperationKind::RemoveValidator(a),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_should_reject_mismatched_arrays() {
        let result = zip_toggles(
            vec![Address::ZERO],
            vec![true, false],
            OperationKind::AddValidator,
            OperationKind::RemoveValidator,
        );

        assert!(matches!(result, Err(DecodeError::LengthMismatch { identities: 1, flags: 2 })));
    }
}

//! Claim ledger: at-most-once consumption of attestations.

use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::Map;

use crate::attestation::ParsedAttestation;
use crate::error::ContractError;
use crate::state::{Claim, CLAIMS};

/// Record `(chain, address, sequence)` in `ledger`, failing if it is already there
pub fn claim_in<'a>(
    storage: &mut dyn Storage,
    ledger: &Map<'a, (u16, &'a [u8], u64), Claim>,
    emitter_chain: u16,
    emitter_address: &'a [u8; 32],
    sequence: u64,
    height: u64,
) -> Result<(), ContractError> {
    ledger.update(
        storage,
        (emitter_chain, emitter_address.as_slice(), sequence),
        |existing| match existing {
            Some(_) => Err(ContractError::AlreadyClaimed),
            None => Ok(Claim { height }),
        },
    )?;
    Ok(())
}

/// Consume an attestation in the claim ledger
pub fn claim(
    storage: &mut dyn Storage,
    attestation: &ParsedAttestation,
    height: u64,
) -> Result<(), ContractError> {
    claim_in(
        storage,
        &CLAIMS,
        attestation.emitter_chain,
        &attestation.emitter_address,
        attestation.sequence,
        height,
    )
}

pub fn is_claimed(
    storage: &dyn Storage,
    emitter_chain: u16,
    emitter_address: &[u8; 32],
    sequence: u64,
) -> StdResult<bool> {
    Ok(CLAIMS.has(
        storage,
        (emitter_chain, emitter_address.as_slice(), sequence),
    ))
}

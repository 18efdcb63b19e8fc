//! Query handlers for the token bridge contract.

use cosmwasm_std::{Binary, Deps, StdError, StdResult, Uint256};

use crate::address::UniversalAddress;
use crate::attestation::ParsedAttestation;
use crate::claim::is_claimed;
use crate::derive::{denom_universal_address, derive_wrapped_address};
use crate::msg::{
    ConfigResponse, DenomAddressResponse, DeriveWrappedAddressResponse, DisplayMetadataResponse,
    IsClaimedResponse, LockedBalanceResponse, LockedDenomResponse, RegisteredEmitterResponse,
    TransferInfoResponse, WrappedAssetResponse, WrappedRegistryResponse,
};
use crate::payload::{BridgeMessage, TokenBridgeMessage};
use crate::registry::registered_emitter;
use crate::state::{
    WrappedAsset, CONFIG, DISPLAY_METADATA, LOCKED_BALANCES, LOCKED_DENOMS, NATIVE_DENOMS,
    WRAPPED_ASSETS, WRAPPED_MINTS,
};

fn bytes32(value: &Binary) -> StdResult<[u8; 32]> {
    Ok(UniversalAddress::from_binary(value)?.0)
}

fn wrapped_asset_response(key: [u8; 32], asset: WrappedAsset) -> WrappedAssetResponse {
    WrappedAssetResponse {
        key: Binary::from(key.to_vec()),
        origin_chain: asset.origin_chain,
        origin_address: Binary::from(asset.origin_address.to_vec()),
        decimals: asset.decimals,
        mint: asset.mint,
        meta_sequence: asset.meta_sequence,
    }
}

// ============================================================================
// Configuration & Registry
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        core_bridge: config.core_bridge,
        chain_id: config.chain_id,
        gov_chain: config.gov_chain,
        gov_address: Binary::from(config.gov_address.to_vec()),
        wrapped_asset_code_id: config.wrapped_asset_code_id,
    })
}

pub fn query_registered_emitter(deps: Deps, chain: u16) -> StdResult<RegisteredEmitterResponse> {
    let emitter = registered_emitter(deps.storage, chain)?;
    Ok(RegisteredEmitterResponse {
        chain,
        emitter: emitter.map(|bytes| Binary::from(bytes.to_vec())),
    })
}

pub fn query_is_claimed(
    deps: Deps,
    emitter_chain: u16,
    emitter_address: Binary,
    sequence: u64,
) -> StdResult<IsClaimedResponse> {
    let emitter_address = bytes32(&emitter_address)?;
    Ok(IsClaimedResponse {
        claimed: is_claimed(deps.storage, emitter_chain, &emitter_address, sequence)?,
    })
}

// ============================================================================
// Assets
// ============================================================================

pub fn query_wrapped_registry(
    deps: Deps,
    chain: u16,
    address: Binary,
) -> StdResult<WrappedRegistryResponse> {
    let key = derive_wrapped_address(chain, &bytes32(&address)?);
    let asset = WRAPPED_ASSETS.may_load(deps.storage, &key)?;
    Ok(WrappedRegistryResponse {
        key: Binary::from(key.to_vec()),
        asset: asset.map(|asset| wrapped_asset_response(key, asset)),
    })
}

pub fn query_wrapped_asset(deps: Deps, mint: String) -> StdResult<WrappedAssetResponse> {
    let mint = deps.api.addr_validate(&mint)?;
    let key = WRAPPED_MINTS
        .may_load(deps.storage, &mint)?
        .ok_or_else(|| StdError::not_found(format!("wrapped asset {}", mint)))?;
    let asset = WRAPPED_ASSETS.load(deps.storage, &key)?;
    Ok(wrapped_asset_response(key, asset))
}

pub fn query_display_metadata(
    deps: Deps,
    chain: u16,
    address: Binary,
) -> StdResult<DisplayMetadataResponse> {
    let key = derive_wrapped_address(chain, &bytes32(&address)?);
    let metadata = DISPLAY_METADATA.load(deps.storage, &key)?;
    Ok(DisplayMetadataResponse {
        symbol: metadata.symbol,
        name: metadata.name,
        uri: metadata.uri,
    })
}

pub fn query_derive_wrapped_address(
    chain: u16,
    address: Binary,
) -> StdResult<DeriveWrappedAddressResponse> {
    let key = derive_wrapped_address(chain, &bytes32(&address)?);
    Ok(DeriveWrappedAddressResponse {
        key: Binary::from(key.to_vec()),
    })
}

pub fn query_locked_balance(deps: Deps, token: String) -> StdResult<LockedBalanceResponse> {
    let token = deps.api.addr_validate(&token)?;
    let amount = LOCKED_BALANCES
        .may_load(deps.storage, &token)?
        .unwrap_or_default();
    Ok(LockedBalanceResponse { token, amount })
}

pub fn query_locked_denom(deps: Deps, denom: String) -> StdResult<LockedDenomResponse> {
    let amount = LOCKED_DENOMS
        .may_load(deps.storage, &denom)?
        .unwrap_or_default();
    Ok(LockedDenomResponse { denom, amount })
}

pub fn query_denom_address(deps: Deps, denom: String) -> StdResult<DenomAddressResponse> {
    let address = denom_universal_address(&denom);
    let registered = NATIVE_DENOMS.may_load(deps.storage, &address)? == Some(denom.clone());
    Ok(DenomAddressResponse {
        denom,
        address: Binary::from(address.to_vec()),
        registered,
    })
}

// ============================================================================
// Attestations
// ============================================================================

/// Decode a transfer attestation body. The body is not checked against the core.
pub fn query_transfer_info(attestation: Binary) -> StdResult<TransferInfoResponse> {
    let parsed = ParsedAttestation::parse(attestation.as_slice())
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    let message = parsed
        .message()
        .map_err(|e| StdError::generic_err(e.to_string()))?;

    let emitter_address = Binary::from(parsed.emitter_address.to_vec());
    match message {
        BridgeMessage::TokenBridge(TokenBridgeMessage::Transfer(transfer)) => {
            Ok(TransferInfoResponse {
                emitter_chain: parsed.emitter_chain,
                emitter_address,
                sequence: parsed.sequence,
                amount: transfer.amount,
                token_address: Binary::from(transfer.token_address.to_vec()),
                token_chain: transfer.token_chain,
                recipient: Binary::from(transfer.recipient.to_vec()),
                recipient_chain: transfer.recipient_chain,
                fee: transfer.fee,
                sender: None,
                payload: None,
            })
        }
        BridgeMessage::TokenBridge(TokenBridgeMessage::TransferWithPayload(transfer)) => {
            Ok(TransferInfoResponse {
                emitter_chain: parsed.emitter_chain,
                emitter_address,
                sequence: parsed.sequence,
                amount: transfer.amount,
                token_address: Binary::from(transfer.token_address.to_vec()),
                token_chain: transfer.token_chain,
                recipient: Binary::from(transfer.redeemer.to_vec()),
                recipient_chain: transfer.redeemer_chain,
                fee: Uint256::zero(),
                sender: Some(Binary::from(transfer.sender.to_vec())),
                payload: Some(Binary::from(transfer.payload)),
            })
        }
        _ => Err(StdError::generic_err("attestation does not carry a transfer")),
    }
}

//! Emitter registry and asset registry.
//!
//! The emitter registry maps a foreign chain to the one token bridge emitter
//! the bridge trusts on it. Entries are created once and never change.
//!
//! The asset registry tells native assets from wrapped ones. An asset whose
//! origin is this chain is native: a cw20 addressed by its own universal
//! address, or a bank denom addressed by its denom address. Anything else is
//! wrapped and keyed by its derived wrapped key.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_string, Addr, Deps, StdResult, Storage};
use cw20::{Cw20QueryMsg, TokenInfoResponse};

use crate::address::UniversalAddress;
use crate::attestation::ParsedAttestation;
use crate::derive::{denom_universal_address, derive_wrapped_address};
use crate::error::ContractError;
use crate::hash::bytes32_to_hex;
use crate::payload::truncate_utf8;
use crate::state::{
    Config, DisplayMetadata, WrappedAsset, DENOM_DECIMALS, MAX_NAME_LEN, MAX_SYMBOL_LEN,
    NATIVE_DENOMS, REGISTERED_EMITTERS, WRAPPED_ASSETS, WRAPPED_MINTS,
};

// ============================================================================
// Emitter Registry
// ============================================================================

pub fn registered_emitter(storage: &dyn Storage, chain: u16) -> StdResult<Option<[u8; 32]>> {
    REGISTERED_EMITTERS.may_load(storage, chain)
}

/// Require the attestation to come from the registered emitter of its chain
pub fn verify_emitter(
    storage: &dyn Storage,
    attestation: &ParsedAttestation,
) -> Result<(), ContractError> {
    let chain = attestation.emitter_chain;
    match registered_emitter(storage, chain)? {
        Some(emitter) if emitter == attestation.emitter_address => Ok(()),
        _ => Err(ContractError::InvalidTokenBridgeVaa { chain }),
    }
}

/// Create the registry entry of `chain`, failing if one exists
pub fn register_emitter(
    storage: &mut dyn Storage,
    chain: u16,
    emitter: [u8; 32],
) -> Result<(), ContractError> {
    REGISTERED_EMITTERS.update(storage, chain, |existing| match existing {
        Some(_) => Err(ContractError::ChainAlreadyRegistered { chain }),
        None => Ok(emitter),
    })?;
    Ok(())
}

// ============================================================================
// Asset Registry
// ============================================================================

/// A resolved asset
#[derive(Debug, Clone, PartialEq)]
pub enum Asset {
    /// A cw20 that lives on this chain
    Native { token: Addr },
    /// A bank denom of this chain
    Bank { denom: String },
    /// A wrapped cw20 minted by the bridge
    Wrapped {
        key: [u8; 32],
        asset: WrappedAsset,
        mint: Addr,
    },
}

impl Asset {
    /// What moves for this asset: the cw20 address or the bank denom
    pub fn local_id(&self) -> &str {
        match self {
            Asset::Native { token } => token.as_str(),
            Asset::Bank { denom } => denom,
            Asset::Wrapped { mint, .. } => mint.as_str(),
        }
    }
}

/// Resolve a payload's origin chain and address to a local asset
pub fn resolve_asset(
    deps: Deps,
    config: &Config,
    origin_chain: u16,
    origin_address: &[u8; 32],
) -> Result<Asset, ContractError> {
    if origin_chain == config.chain_id {
        if let Some(denom) = NATIVE_DENOMS.may_load(deps.storage, origin_address)? {
            return Ok(Asset::Bank { denom });
        }
        let token = UniversalAddress(*origin_address).to_addr(deps.api)?;
        return Ok(Asset::Native { token });
    }

    let key = derive_wrapped_address(origin_chain, origin_address);
    let asset = WRAPPED_ASSETS
        .may_load(deps.storage, &key)?
        .ok_or(ContractError::WrappedAssetNotFound {
            chain: origin_chain,
        })?;
    let mint = asset
        .mint
        .clone()
        .ok_or(ContractError::WrappedAssetNotFound {
            chain: origin_chain,
        })?;
    Ok(Asset::Wrapped { key, asset, mint })
}

/// Classify a local cw20: wrapped when the bridge minted it, native otherwise
pub fn resolve_mint(deps: Deps, token: &Addr) -> Result<Asset, ContractError> {
    let Some(key) = WRAPPED_MINTS.may_load(deps.storage, token)? else {
        return Ok(Asset::Native {
            token: token.clone(),
        });
    };
    let asset = WRAPPED_ASSETS.load(deps.storage, &key)?;
    Ok(Asset::Wrapped {
        key,
        asset,
        mint: token.clone(),
    })
}

pub fn is_wrapped_mint(storage: &dyn Storage, token: &Addr) -> bool {
    WRAPPED_MINTS.has(storage, token)
}

/// Record a bank denom under its universal address and return the address
pub fn register_denom(storage: &mut dyn Storage, denom: &str) -> Result<[u8; 32], ContractError> {
    if denom.is_empty() {
        return Err(ContractError::InvalidDenom {
            denom: denom.to_string(),
        });
    }
    let address = denom_universal_address(denom);
    if !NATIVE_DENOMS.has(storage, &address) {
        NATIVE_DENOMS.save(storage, &address, &denom.to_string())?;
    }
    Ok(address)
}

/// Display symbol of a bank denom
pub fn denom_symbol(denom: &str) -> String {
    match denom {
        "uluna" => "LUNA".to_string(),
        _ => denom.to_uppercase(),
    }
}

/// Decimals of a native asset in base units, `None` for wrapped assets
pub fn native_decimals(deps: Deps, asset: &Asset) -> StdResult<Option<u8>> {
    match asset {
        Asset::Native { token } => Ok(Some(query_token_info(deps, token)?.decimals)),
        Asset::Bank { .. } => Ok(Some(DENOM_DECIMALS)),
        Asset::Wrapped { .. } => Ok(None),
    }
}

/// Name, symbol and decimals of a cw20
pub fn query_token_info(deps: Deps, token: &Addr) -> StdResult<TokenInfoResponse> {
    deps.querier
        .query_wasm_smart(token, &Cw20QueryMsg::TokenInfo {})
}

// ============================================================================
// Display Metadata
// ============================================================================

/// Provenance record kept in the metadata URI
#[cw_serde]
#[serde(rename_all = "camelCase")]
struct AssetUri {
    wormhole_chain_id: u16,
    canonical_address: String,
    native_decimals: u8,
}

/// Build the display record of a wrapped asset
pub fn display_metadata(
    origin_chain: u16,
    origin_address: &[u8; 32],
    native_decimals: u8,
    symbol: &str,
    name: &str,
) -> StdResult<DisplayMetadata> {
    let uri = to_json_string(&AssetUri {
        wormhole_chain_id: origin_chain,
        canonical_address: bytes32_to_hex(origin_address),
        native_decimals,
    })?;
    Ok(DisplayMetadata {
        symbol: truncate_utf8(symbol, MAX_SYMBOL_LEN).to_string(),
        name: truncate_utf8(name, MAX_NAME_LEN).to_string(),
        uri,
    })
}

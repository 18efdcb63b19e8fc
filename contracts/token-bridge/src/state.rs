//! State definitions for the token bridge contract
//!
//! Every record is keyed by the bytes that identify it on the wire, so a
//! relayer can compute any key off-chain from the attestation alone.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Guardian core contract that certifies attestations and posts messages
    pub core_bridge: Addr,
    /// Chain id of this deployment on the bridge network
    pub chain_id: u16,
    /// Chain of the governance emitter
    pub gov_chain: u16,
    /// Address of the governance emitter
    pub gov_address: [u8; 32],
    /// Code id the bridge instantiates for new wrapped assets
    pub wrapped_asset_code_id: u64,
}

/// Consumption record of an attestation
#[cw_serde]
pub struct Claim {
    /// Block height at which the attestation was applied
    pub height: u64,
}

// ============================================================================
// Asset Records
// ============================================================================

/// Local representation of a foreign asset
#[cw_serde]
pub struct WrappedAsset {
    /// Chain the underlying asset lives on
    pub origin_chain: u16,
    /// Address of the underlying asset on its origin chain
    pub origin_address: [u8; 32],
    /// Decimals of the wrapped mint, never above the wire precision
    pub decimals: u8,
    /// Wrapped cw20, set by its init hook
    pub mint: Option<Addr>,
    /// Sequence of the last AssetMeta applied to this asset
    pub meta_sequence: u64,
}

/// Display record of a wrapped asset
#[cw_serde]
pub struct DisplayMetadata {
    pub symbol: String,
    pub name: String,
    /// JSON carrying the origin chain, origin address and native decimals
    pub uri: String,
}

// ============================================================================
// Contract Info
// ============================================================================

/// Contract name for migration info
pub const CONTRACT_NAME: &str = "crates.io:token-bridge";

/// Contract version for migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decimals reported for bank denoms, which carry none on chain
pub const DENOM_DECIMALS: u8 = 6;

/// Longest display symbol kept in `DisplayMetadata`
pub const MAX_SYMBOL_LEN: usize = 10;

/// Longest display name kept in `DisplayMetadata`
pub const MAX_NAME_LEN: usize = 32;

// ============================================================================
// Storage Items
// ============================================================================

/// Contract configuration
pub const CONFIG: Item<Config> = Item::new("config");

/// Consumed attestations: (emitter chain, emitter address, sequence) -> Claim
pub const CLAIMS: Map<(u16, &[u8], u64), Claim> = Map::new("claims");

/// Token bridge emitter per foreign chain, written once by RegisterChain
pub const REGISTERED_EMITTERS: Map<u16, [u8; 32]> = Map::new("registered_emitters");

/// Emitter slot written by earlier contract versions, read only by the migration
pub const LEGACY_EMITTERS: Map<u16, [u8; 32]> = Map::new("bridge_contracts");

/// Registration attestations already used to secure a legacy emitter
pub const SECURED_EMITTERS: Map<(u16, &[u8], u64), Claim> = Map::new("secured_emitters");

/// Wrapped assets: derived wrapped key -> WrappedAsset
pub const WRAPPED_ASSETS: Map<&[u8], WrappedAsset> = Map::new("wrapped_assets");

/// Wrapped cw20 address -> derived wrapped key
pub const WRAPPED_MINTS: Map<&Addr, [u8; 32]> = Map::new("wrapped_mints");

/// Display metadata: derived wrapped key -> DisplayMetadata
pub const DISPLAY_METADATA: Map<&[u8], DisplayMetadata> = Map::new("display_metadata");

/// Native cw20 held in custody for bridged transfers: token -> amount
pub const LOCKED_BALANCES: Map<&Addr, Uint128> = Map::new("locked_balances");

/// Bank denoms seen by the bridge: universal address -> denom
pub const NATIVE_DENOMS: Map<&[u8], String> = Map::new("native_denoms");

/// Bank coins held in custody for bridged transfers: denom -> amount
pub const LOCKED_DENOMS: Map<&str, Uint128> = Map::new("locked_denoms");

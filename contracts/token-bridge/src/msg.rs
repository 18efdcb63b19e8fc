//! Message types for the token bridge contract
//!
//! Attestations are passed as raw body bytes. Every 32-byte value
//! (addresses, keys) travels as `Binary`.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128, Uint256};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Guardian core contract
    pub core_bridge: String,
    /// Chain id of this deployment
    pub chain_id: u16,
    /// Chain of the governance emitter
    pub gov_chain: u16,
    /// Governance emitter address (32 bytes)
    pub gov_address: Binary,
    /// Code id of the wrapped-asset contract
    pub wrapped_asset_code_id: u64,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Outbound
    // ========================================================================
    /// cw20 receive hook, carries a `ReceiveMsg`
    Receive(cw20::Cw20ReceiveMsg),

    /// Publish the metadata of a native cw20 so other chains can wrap it
    AttestToken { token: String, nonce: u32 },

    /// Move the attached bank coins (one denom) to another chain
    InitiateTransferDenom {
        recipient_chain: u16,
        /// Recipient on the target chain (32 bytes)
        recipient: Binary,
        /// Relayer fee, in the denom's base units
        fee: Uint128,
        nonce: u32,
    },

    /// Move the attached bank coins to a contract on another chain, with a payload for it
    InitiateTransferDenomWithPayload {
        recipient_chain: u16,
        /// Redeemer on the target chain (32 bytes)
        recipient: Binary,
        nonce: u32,
        payload: Binary,
    },

    /// Publish the metadata of a bank denom so other chains can wrap it
    AttestDenom { denom: String, nonce: u32 },

    // ========================================================================
    // Inbound Transfers
    // ========================================================================
    /// Release custodied native tokens for a Transfer attestation
    CompleteTransferNative {
        attestation: Binary,
        /// cw20 address, or bank denom, the attestation releases
        mint: String,
        /// Account credited with the tokens
        recipient_token: String,
        /// Wallet owning `recipient_token`, when it differs from the encoded recipient form
        recipient: Option<String>,
    },

    /// Mint wrapped tokens for a Transfer attestation
    CompleteTransferWrapped {
        attestation: Binary,
        mint: String,
        recipient_token: String,
        recipient: Option<String>,
    },

    /// Release custodied native tokens to the redeemer of a TransferWithPayload
    ///
    /// Authorization: the encoded redeemer only
    CompleteTransferWithPayloadNative {
        attestation: Binary,
        mint: String,
        /// Account credited with the tokens, held by the redeemer
        dst_token: String,
    },

    /// Mint wrapped tokens to the redeemer of a TransferWithPayload
    ///
    /// Authorization: the encoded redeemer only
    CompleteTransferWithPayloadWrapped {
        attestation: Binary,
        mint: String,
        dst_token: String,
    },

    // ========================================================================
    // Registry & Governance
    // ========================================================================
    /// Apply an AssetMeta or governance attestation
    SubmitAttestation { attestation: Binary },

    /// Init hook of a freshly instantiated wrapped asset
    ///
    /// Authorization: the wrapped asset created for `key`
    RegisterWrappedMint {
        /// Derived wrapped key (32 bytes)
        key: Binary,
    },

    /// Copy a legacy emitter registration into the registry, re-using the
    /// governance RegisterChain attestation that authorized it
    SecureRegisteredEmitter { attestation: Binary },
}

/// Messages carried by a cw20 `Send` to the bridge
#[cw_serde]
pub enum ReceiveMsg {
    /// Move the sent tokens to another chain
    InitiateTransfer {
        recipient_chain: u16,
        /// Recipient on the target chain (32 bytes)
        recipient: Binary,
        /// Relayer fee, in the token's native units
        fee: Uint128,
        nonce: u32,
    },

    /// Move the sent tokens to a contract on another chain, with a payload for it
    InitiateTransferWithPayload {
        recipient_chain: u16,
        /// Redeemer on the target chain (32 bytes)
        recipient: Binary,
        nonce: u32,
        payload: Binary,
    },
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Registered token bridge emitter of a chain
    #[returns(RegisteredEmitterResponse)]
    RegisteredEmitter { chain: u16 },

    #[returns(IsClaimedResponse)]
    IsClaimed {
        emitter_chain: u16,
        emitter_address: Binary,
        sequence: u64,
    },

    /// Wrapped asset of a foreign asset, looked up by origin
    #[returns(WrappedRegistryResponse)]
    WrappedRegistry { chain: u16, address: Binary },

    /// Wrapped asset record of a wrapped cw20
    #[returns(WrappedAssetResponse)]
    WrappedAsset { mint: String },

    #[returns(DisplayMetadataResponse)]
    DisplayMetadata { chain: u16, address: Binary },

    /// Derived wrapped key of a foreign asset (pure)
    #[returns(DeriveWrappedAddressResponse)]
    DeriveWrappedAddress { chain: u16, address: Binary },

    /// Decode the transfer carried by an attestation body, without applying it
    #[returns(TransferInfoResponse)]
    TransferInfo { attestation: Binary },

    /// Custodied amount of a native cw20
    #[returns(LockedBalanceResponse)]
    LockedBalance { token: String },

    /// Custodied amount of a bank denom
    #[returns(LockedDenomResponse)]
    LockedDenom { denom: String },

    /// Universal address of a bank denom, and whether the bridge has seen it
    #[returns(DenomAddressResponse)]
    DenomAddress { denom: String },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub core_bridge: Addr,
    pub chain_id: u16,
    pub gov_chain: u16,
    pub gov_address: Binary,
    pub wrapped_asset_code_id: u64,
}

#[cw_serde]
pub struct RegisteredEmitterResponse {
    pub chain: u16,
    /// `None` until RegisterChain has been applied for the chain
    pub emitter: Option<Binary>,
}

#[cw_serde]
pub struct IsClaimedResponse {
    pub claimed: bool,
}

#[cw_serde]
pub struct WrappedAssetResponse {
    /// Derived wrapped key
    pub key: Binary,
    pub origin_chain: u16,
    pub origin_address: Binary,
    pub decimals: u8,
    pub mint: Option<Addr>,
    pub meta_sequence: u64,
}

#[cw_serde]
pub struct WrappedRegistryResponse {
    pub key: Binary,
    /// `None` until an AssetMeta for the origin has been applied
    pub asset: Option<WrappedAssetResponse>,
}

#[cw_serde]
pub struct DisplayMetadataResponse {
    pub symbol: String,
    pub name: String,
    pub uri: String,
}

#[cw_serde]
pub struct DeriveWrappedAddressResponse {
    pub key: Binary,
}

#[cw_serde]
pub struct TransferInfoResponse {
    pub emitter_chain: u16,
    pub emitter_address: Binary,
    pub sequence: u64,
    /// Wire amount (8 decimals)
    pub amount: Uint256,
    pub token_address: Binary,
    pub token_chain: u16,
    /// Recipient, or redeemer for transfers with payload
    pub recipient: Binary,
    pub recipient_chain: u16,
    /// Wire fee, zero for transfers with payload
    pub fee: Uint256,
    /// Sender, transfers with payload only
    pub sender: Option<Binary>,
    pub payload: Option<Binary>,
}

#[cw_serde]
pub struct LockedBalanceResponse {
    pub token: Addr,
    pub amount: Uint128,
}

#[cw_serde]
pub struct LockedDenomResponse {
    pub denom: String,
    pub amount: Uint128,
}

#[cw_serde]
pub struct DenomAddressResponse {
    pub denom: String,
    pub address: Binary,
    /// Set once the denom has been attested or sent out
    pub registered: bool,
}

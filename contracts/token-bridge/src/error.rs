//! Error types for the token bridge contract
//!
//! Every error rejects the whole transaction. Nothing is retried by the
//! contract; relayers decide whether a rejection is worth resubmitting.

use thiserror::Error;

use cosmwasm_std::StdError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Malformed Input
    // ========================================================================

    #[error("Malformed payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("Payload type does not match this instruction")]
    InvalidTokenBridgePayload,

    #[error("Attestation has not been posted by the core contract")]
    AttestationNotPosted,

    // ========================================================================
    // Authentication
    // ========================================================================

    #[error("Invalid token bridge attestation: emitter is not registered for chain {chain}")]
    InvalidTokenBridgeVaa { chain: u16 },

    #[error("Invalid governance module")]
    InvalidGovernanceModule,

    #[error("Governance action targets chain {chain}")]
    InvalidGovernanceChain { chain: u16 },

    #[error("Unauthorized")]
    Unauthorized,

    // ========================================================================
    // Replay
    // ========================================================================

    #[error("Attestation already claimed")]
    AlreadyClaimed,

    #[error("Chain {chain} already in use")]
    ChainAlreadyRegistered { chain: u16 },

    #[error("Asset metadata is older than the registered one: sequence {sequence}, registered {registered}")]
    StaleAssetMeta { sequence: u64, registered: u64 },

    #[error("Wrapped mint already registered")]
    AssetAlreadyRegistered,

    // ========================================================================
    // Routing
    // ========================================================================

    #[error("Recipient chain {chain} is not this chain")]
    RecipientChainMismatch { chain: u16 },

    #[error("Redeemer chain {chain} is not this chain")]
    RedeemerChainMismatch { chain: u16 },

    #[error("Source and target chain are the same")]
    SameSourceAndTarget,

    #[error("Invalid foreign chain: {chain}")]
    InvalidForeignChain { chain: u16 },

    // ========================================================================
    // Asset Kind
    // ========================================================================

    #[error("Asset is a wrapped asset")]
    WrappedAsset,

    #[error("Asset is native to this chain")]
    NativeAsset,

    #[error("Wrapped asset not found for chain {chain}")]
    WrappedAssetNotFound { chain: u16 },

    #[error("Invalid denom: {denom:?}")]
    InvalidDenom { denom: String },

    // ========================================================================
    // Numeric
    // ========================================================================

    #[error("Amount overflows the native integer width")]
    AmountOverflow,

    #[error("Wire amount does not fit in 64 bits")]
    U64Overflow,

    #[error("Amount too low: nothing left after normalization")]
    AmountTooLow,

    #[error("Fee greater than sent amount")]
    FeeExceedsAmount,

    #[error("Insufficient custody balance for {token}")]
    InsufficientLiquidity { token: String },

    #[error("No funds sent")]
    NoFundsSent,

    #[error("Invalid funds: {reason}")]
    InvalidFunds { reason: String },

    // ========================================================================
    // Account Identity
    // ========================================================================

    #[error("Invalid recipient")]
    InvalidRecipient,

    #[error("Invalid mint")]
    InvalidMint,

    #[error("Caller is not the encoded redeemer")]
    InvalidProgramRedeemer,

    #[error("Recipient token account is itself a token contract")]
    NestedTokenAccount,

    #[error("Destination token account is not owned by the redeemer")]
    ConstraintTokenOwner,

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    // ========================================================================
    // Legacy Emitter Migration
    // ========================================================================

    #[error("No legacy emitter recorded for chain {chain}")]
    LegacyEmitterNotFound { chain: u16 },

    #[error("Legacy emitter does not match the registration being secured")]
    InvalidLegacyEmitter,

    #[error("Secured emitter differs from the legacy record")]
    LegacyEmitterMismatch,
}

impl ContractError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        ContractError::MalformedPayload {
            reason: reason.into(),
        }
    }
}

//! Guardian core contract interface.
//!
//! The core contract owns guardian-set management and signature checking.
//! The bridge only asks it whether an attestation body has been posted and
//! hands it outbound payloads to publish.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;

/// Execute messages the bridge sends to the core contract
#[cw_serde]
pub enum CoreExecuteMsg {
    /// Publish an outbound payload for guardian observation
    PostMessage {
        /// Raw payload bytes
        message: Binary,
        /// Caller-chosen batching nonce
        nonce: u32,
    },
}

/// Queries the bridge issues against the core contract
#[cw_serde]
#[derive(QueryResponses)]
pub enum CoreQueryMsg {
    /// Whether the attestation with this body hash carries a guardian quorum
    #[returns(PostedAttestationResponse)]
    PostedAttestation {
        /// keccak256 of the attestation body (32 bytes)
        hash: Binary,
    },
}

#[cw_serde]
pub struct PostedAttestationResponse {
    pub posted: bool,
}

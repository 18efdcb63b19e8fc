//! Attestation decoding and certification.
//!
//! # Body Layout (51-byte header + payload)
//! - Bytes 0-3:   timestamp (u32)
//! - Bytes 4-7:   nonce (u32)
//! - Bytes 8-9:   emitter chain (u16)
//! - Bytes 10-41: emitter address
//! - Bytes 42-49: sequence (u64)
//! - Byte 50:     consistency level
//! - Bytes 51..:  payload
//!
//! The body hash is `keccak256(body)`. Guardian signatures are checked by the
//! core contract; the bridge only asks whether a body with this hash has
//! been posted.

use cosmwasm_std::{Binary, Deps};

use common::{CoreQueryMsg, PostedAttestationResponse};

use crate::error::ContractError;
use crate::hash::keccak256;
use crate::payload::{BridgeMessage, Reader};
use crate::state::Config;

/// Fixed header length in front of the payload
pub const HEADER_LEN: usize = 51;

/// A decoded attestation body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAttestation {
    pub timestamp: u32,
    pub nonce: u32,
    pub emitter_chain: u16,
    pub emitter_address: [u8; 32],
    pub sequence: u64,
    pub consistency_level: u8,
    pub payload: Vec<u8>,
    /// keccak256 of the full body
    pub hash: [u8; 32],
}

impl ParsedAttestation {
    pub fn parse(body: &[u8]) -> Result<Self, ContractError> {
        if body.len() < HEADER_LEN {
            return Err(ContractError::malformed(format!(
                "attestation body is {} bytes, expected at least {}",
                body.len(),
                HEADER_LEN
            )));
        }
        let mut reader = Reader::new(body);
        Ok(ParsedAttestation {
            timestamp: reader.u32()?,
            nonce: reader.u32()?,
            emitter_chain: reader.u16()?,
            emitter_address: reader.bytes32()?,
            sequence: reader.u64()?,
            consistency_level: reader.u8()?,
            payload: reader.rest().to_vec(),
            hash: keccak256(body),
        })
    }

    /// Decode the payload this attestation carries
    pub fn message(&self) -> Result<BridgeMessage, ContractError> {
        BridgeMessage::decode(&self.payload)
    }

    /// Whether the emitter is the governance emitter
    pub fn is_governance(&self, config: &Config) -> bool {
        self.emitter_chain == config.gov_chain && self.emitter_address == config.gov_address
    }
}

/// Parse an attestation and require the core contract to have posted it
pub fn verify_attestation(
    deps: Deps,
    config: &Config,
    body: &Binary,
) -> Result<ParsedAttestation, ContractError> {
    let parsed = ParsedAttestation::parse(body.as_slice())?;

    let response: PostedAttestationResponse = deps.querier.query_wasm_smart(
        &config.core_bridge,
        &CoreQueryMsg::PostedAttestation {
            hash: Binary::from(parsed.hash.to_vec()),
        },
    )?;
    if !response.posted {
        return Err(ContractError::AttestationNotPosted);
    }

    Ok(parsed)
}

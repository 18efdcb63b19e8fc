//! Byte-exact payload codecs.
//!
//! All integers are big-endian. Token bridge payloads start with a one-byte
//! type tag. Governance payloads start with the 32-byte module identifier.
//!
//! # Transfer (type 1, 133 bytes)
//! - Byte 0:        type = 1
//! - Bytes 1-32:    amount (u256, 8 decimals)
//! - Bytes 33-64:   origin token address
//! - Bytes 65-66:   origin token chain
//! - Bytes 67-98:   recipient address
//! - Bytes 99-100:  recipient chain
//! - Bytes 101-132: relayer fee (u256, 8 decimals)
//!
//! # AssetMeta (type 2, 100 bytes)
//! - Byte 0:        type = 2
//! - Bytes 1-32:    origin token address
//! - Bytes 33-34:   origin token chain
//! - Byte 35:       native decimals
//! - Bytes 36-67:   symbol (UTF-8, zero padded)
//! - Bytes 68-99:   name (UTF-8, zero padded)
//!
//! # TransferWithPayload (type 3, 133 bytes + payload)
//! - Byte 0:        type = 3
//! - Bytes 1-32:    amount (u256, 8 decimals)
//! - Bytes 33-64:   origin token address
//! - Bytes 65-66:   origin token chain
//! - Bytes 67-98:   redeemer address
//! - Bytes 99-100:  redeemer chain
//! - Bytes 101-132: sender address
//! - Bytes 133..:   arbitrary payload
//!
//! # Governance
//! - Bytes 0-31:    module, `TokenBridge` left padded with zeros
//! - Byte 32:       action (1 = RegisterChain, 2 = UpgradeContract)
//! - Bytes 33-34:   target chain (0 = every chain)
//! - RegisterChain:   u16 foreign chain, 32-byte foreign emitter
//! - UpgradeContract: 32-byte new contract identifier (code id in the low 8 bytes)

use cosmwasm_std::Uint256;

use crate::error::ContractError;

pub const PAYLOAD_TRANSFER: u8 = 1;
pub const PAYLOAD_ASSET_META: u8 = 2;
pub const PAYLOAD_TRANSFER_WITH_PAYLOAD: u8 = 3;

pub const ACTION_REGISTER_CHAIN: u8 = 1;
pub const ACTION_UPGRADE_CONTRACT: u8 = 2;

/// Governance module identifier: `TokenBridge` left padded to 32 bytes
pub const GOVERNANCE_MODULE: [u8; 32] = {
    let name = b"TokenBridge";
    let mut module = [0u8; 32];
    let mut i = 0;
    while i < name.len() {
        module[32 - name.len() + i] = name[i];
        i += 1;
    }
    module
};

const TRANSFER_LEN: usize = 133;
const ASSET_META_LEN: usize = 100;
const GOVERNANCE_HEADER_LEN: usize = 35;

// ============================================================================
// Message Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub amount: Uint256,
    pub token_address: [u8; 32],
    pub token_chain: u16,
    pub recipient: [u8; 32],
    pub recipient_chain: u16,
    pub fee: Uint256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferWithPayload {
    pub amount: Uint256,
    pub token_address: [u8; 32],
    pub token_chain: u16,
    pub redeemer: [u8; 32],
    pub redeemer_chain: u16,
    pub sender: [u8; 32],
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetMeta {
    pub token_address: [u8; 32],
    pub token_chain: u16,
    pub decimals: u8,
    pub symbol: [u8; 32],
    pub name: [u8; 32],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenBridgeMessage {
    Transfer(Transfer),
    AssetMeta(AssetMeta),
    TransferWithPayload(TransferWithPayload),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GovernanceAction {
    RegisterChain { chain: u16, emitter: [u8; 32] },
    UpgradeContract { new_contract: [u8; 32] },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernancePacket {
    /// Target chain, 0 for every chain
    pub chain: u16,
    pub action: GovernanceAction,
}

/// Any payload the bridge understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeMessage {
    TokenBridge(TokenBridgeMessage),
    Governance(GovernancePacket),
}

// ============================================================================
// Decoding
// ============================================================================

/// Sequential big-endian reader that fails on truncation
pub(crate) struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], ContractError> {
        let end = self.offset + N;
        let slice = self.data.get(self.offset..end).ok_or_else(|| {
            ContractError::malformed(format!(
                "truncated at byte {}: need {} more, have {}",
                self.offset,
                N,
                self.data.len().saturating_sub(self.offset)
            ))
        })?;
        self.offset = end;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    pub(crate) fn u8(&mut self) -> Result<u8, ContractError> {
        Ok(self.take::<1>()?[0])
    }

    pub(crate) fn u16(&mut self) -> Result<u16, ContractError> {
        Ok(u16::from_be_bytes(self.take()?))
    }

    pub(crate) fn u32(&mut self) -> Result<u32, ContractError> {
        Ok(u32::from_be_bytes(self.take()?))
    }

    pub(crate) fn u64(&mut self) -> Result<u64, ContractError> {
        Ok(u64::from_be_bytes(self.take()?))
    }

    pub(crate) fn bytes32(&mut self) -> Result<[u8; 32], ContractError> {
        self.take()
    }

    pub(crate) fn u256(&mut self) -> Result<Uint256, ContractError> {
        Ok(Uint256::from_be_bytes(self.take()?))
    }

    /// Everything not read yet
    pub(crate) fn rest(&mut self) -> &'a [u8] {
        let rest = &self.data[self.offset.min(self.data.len())..];
        self.offset = self.data.len();
        rest
    }
}

/// Whether a payload is addressed to the token bridge governance module
pub fn is_governance_payload(payload: &[u8]) -> bool {
    payload.get(..32) == Some(GOVERNANCE_MODULE.as_slice())
}

impl BridgeMessage {
    /// Discriminate and decode a payload
    pub fn decode(payload: &[u8]) -> Result<Self, ContractError> {
        match payload.first() {
            None => Err(ContractError::malformed("empty payload")),
            // Governance modules are left padded, so they always start with zero.
            Some(0) => Ok(BridgeMessage::Governance(GovernancePacket::decode(payload)?)),
            Some(_) => Ok(BridgeMessage::TokenBridge(TokenBridgeMessage::decode(
                payload,
            )?)),
        }
    }
}

impl TokenBridgeMessage {
    pub fn decode(payload: &[u8]) -> Result<Self, ContractError> {
        let mut reader = Reader::new(payload);
        let tag = reader.u8()?;
        match tag {
            PAYLOAD_TRANSFER => {
                require_len(payload, TRANSFER_LEN, "transfer")?;
                Ok(TokenBridgeMessage::Transfer(Transfer {
                    amount: reader.u256()?,
                    token_address: reader.bytes32()?,
                    token_chain: reader.u16()?,
                    recipient: reader.bytes32()?,
                    recipient_chain: reader.u16()?,
                    fee: reader.u256()?,
                }))
            }
            PAYLOAD_ASSET_META => {
                require_len(payload, ASSET_META_LEN, "asset meta")?;
                Ok(TokenBridgeMessage::AssetMeta(AssetMeta {
                    token_address: reader.bytes32()?,
                    token_chain: reader.u16()?,
                    decimals: reader.u8()?,
                    symbol: reader.bytes32()?,
                    name: reader.bytes32()?,
                }))
            }
            PAYLOAD_TRANSFER_WITH_PAYLOAD => {
                require_len(payload, TRANSFER_LEN, "transfer with payload")?;
                Ok(TokenBridgeMessage::TransferWithPayload(TransferWithPayload {
                    amount: reader.u256()?,
                    token_address: reader.bytes32()?,
                    token_chain: reader.u16()?,
                    redeemer: reader.bytes32()?,
                    redeemer_chain: reader.u16()?,
                    sender: reader.bytes32()?,
                    payload: reader.rest().to_vec(),
                }))
            }
            other => Err(ContractError::malformed(format!(
                "unknown payload type {}",
                other
            ))),
        }
    }

    pub fn serialize(&self) -> Vec<u8> {
        match self {
            TokenBridgeMessage::Transfer(transfer) => transfer.serialize(),
            TokenBridgeMessage::AssetMeta(meta) => meta.serialize(),
            TokenBridgeMessage::TransferWithPayload(transfer) => transfer.serialize(),
        }
    }
}

impl GovernancePacket {
    pub fn decode(payload: &[u8]) -> Result<Self, ContractError> {
        require_len(payload, GOVERNANCE_HEADER_LEN, "governance header")?;
        let mut reader = Reader::new(payload);
        if reader.bytes32()? != GOVERNANCE_MODULE {
            return Err(ContractError::InvalidGovernanceModule);
        }
        let action = reader.u8()?;
        let chain = reader.u16()?;
        let action = match action {
            ACTION_REGISTER_CHAIN => GovernanceAction::RegisterChain {
                chain: reader.u16()?,
                emitter: reader.bytes32()?,
            },
            ACTION_UPGRADE_CONTRACT => GovernanceAction::UpgradeContract {
                new_contract: reader.bytes32()?,
            },
            other => {
                return Err(ContractError::malformed(format!(
                    "unknown governance action {}",
                    other
                )))
            }
        };
        Ok(GovernancePacket { chain, action })
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut out = GOVERNANCE_MODULE.to_vec();
        match &self.action {
            GovernanceAction::RegisterChain { chain, emitter } => {
                out.push(ACTION_REGISTER_CHAIN);
                out.extend_from_slice(&self.chain.to_be_bytes());
                out.extend_from_slice(&chain.to_be_bytes());
                out.extend_from_slice(emitter);
            }
            GovernanceAction::UpgradeContract { new_contract } => {
                out.push(ACTION_UPGRADE_CONTRACT);
                out.extend_from_slice(&self.chain.to_be_bytes());
                out.extend_from_slice(new_contract);
            }
        }
        out
    }
}

fn require_len(payload: &[u8], min: usize, kind: &str) -> Result<(), ContractError> {
    if payload.len() < min {
        return Err(ContractError::malformed(format!(
            "{} payload is {} bytes, expected at least {}",
            kind,
            payload.len(),
            min
        )));
    }
    Ok(())
}

// ============================================================================
// Encoding
// ============================================================================

impl Transfer {
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(TRANSFER_LEN);
        out.push(PAYLOAD_TRANSFER);
        out.extend_from_slice(&self.amount.to_be_bytes());
        out.extend_from_slice(&self.token_address);
        out.extend_from_slice(&self.token_chain.to_be_bytes());
        out.extend_from_slice(&self.recipient);
        out.extend_from_slice(&self.recipient_chain.to_be_bytes());
        out.extend_from_slice(&self.fee.to_be_bytes());
        out
    }
}

impl TransferWithPayload {
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(TRANSFER_LEN + self.payload.len());
        out.push(PAYLOAD_TRANSFER_WITH_PAYLOAD);
        out.extend_from_slice(&self.amount.to_be_bytes());
        out.extend_from_slice(&self.token_address);
        out.extend_from_slice(&self.token_chain.to_be_bytes());
        out.extend_from_slice(&self.redeemer);
        out.extend_from_slice(&self.redeemer_chain.to_be_bytes());
        out.extend_from_slice(&self.sender);
        out.extend_from_slice(&self.payload);
        out
    }
}

impl AssetMeta {
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(ASSET_META_LEN);
        out.push(PAYLOAD_ASSET_META);
        out.extend_from_slice(&self.token_address);
        out.extend_from_slice(&self.token_chain.to_be_bytes());
        out.push(self.decimals);
        out.extend_from_slice(&self.symbol);
        out.extend_from_slice(&self.name);
        out
    }
}

// ============================================================================
// Fixed-width strings
// ============================================================================

/// Longest prefix of `s` that fits in `max` bytes without splitting a character
pub fn truncate_utf8(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Right-pad a string with zeros into 32 bytes, truncating longer strings
pub fn string_to_bytes32(s: &str) -> [u8; 32] {
    let s = truncate_utf8(s, 32);
    let mut out = [0u8; 32];
    out[..s.len()].copy_from_slice(s.as_bytes());
    out
}

/// Read a zero-padded string field
pub fn bytes32_to_string(bytes: &[u8; 32]) -> String {
    let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

//! Deterministic address derivation.
//!
//! # Wrapped asset key (version 1)
//!
//! ```text
//! keccak256( "wrapped" | 0x01 | origin_chain (u16 BE) | origin_address (32) )
//! ```
//!
//! - Bytes 0-6:   ASCII `wrapped` (domain separator)
//! - Byte 7:      derivation version
//! - Bytes 8-9:   origin chain, big-endian
//! - Bytes 10-41: origin address
//!
//! The 42-byte preimage is fixed. Any implementation that agrees on the layout
//! computes the same key, which is what the wrapped asset registry is keyed by.
//!
//! # Bank denom address
//!
//! A bank denom has no account address, so its universal address is
//! `keccak256(denom)` with byte 0 replaced by `0x01`. Inbound, such an
//! address names a denom only if the denom registry already holds it.

use cosmwasm_std::Addr;

use crate::hash::keccak256;

/// Domain separator for wrapped asset keys
pub const WRAPPED_SEED: &[u8] = b"wrapped";

/// Current layout of the wrapped asset preimage
pub const DERIVATION_VERSION: u8 = 1;

/// Derive the registry key of the wrapped representation of a foreign asset
pub fn derive_wrapped_address(origin_chain: u16, origin_address: &[u8; 32]) -> [u8; 32] {
    keccak256(&wrapped_preimage(origin_chain, origin_address))
}

fn wrapped_preimage(origin_chain: u16, origin_address: &[u8; 32]) -> [u8; 42] {
    let mut data = [0u8; 42];
    data[0..7].copy_from_slice(WRAPPED_SEED);
    data[7] = DERIVATION_VERSION;
    data[8..10].copy_from_slice(&origin_chain.to_be_bytes());
    data[10..42].copy_from_slice(origin_address);
    data
}

/// Marker in byte 0 of a bank denom's universal address
pub const DENOM_MARKER: u8 = 1;

/// Universal address of a bank denom of this chain
pub fn denom_universal_address(denom: &str) -> [u8; 32] {
    let mut address = keccak256(denom.as_bytes());
    address[0] = DENOM_MARKER;
    address
}

/// The canonical token account of `wallet` for the asset `local_id`.
///
/// cw20 and bank balances are both keyed by owner, so the holding a wallet
/// has in any asset is addressed by the wallet itself.
pub fn canonical_token_account(wallet: &Addr, _local_id: &str) -> Addr {
    wallet.clone()
}

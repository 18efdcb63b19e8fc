//! Universal 32-byte address encoding for local accounts.
//!
//! Every address that travels in a payload is 32 bytes. Local addresses are
//! encoded from their canonical form:
//!
//! ```text
//! 20-byte canonical:  | 0x00 * 12 | canonical (20) |
//! 32-byte canonical:  | canonical (32)             |
//! ```
//!
//! Decoding reverses this: 12 leading zero bytes select the 20-byte form,
//! anything else is treated as a 32-byte canonical address.

use cosmwasm_std::{Addr, Api, Binary, CanonicalAddr, StdError, StdResult};

use crate::hash::bytes32_to_hex;

/// Length of the zero prefix in front of a 20-byte canonical address
const SHORT_ADDRESS_PADDING: usize = 12;

/// A 32-byte address as carried in bridge payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniversalAddress(pub [u8; 32]);

impl UniversalAddress {
    /// Encode a local address
    pub fn from_addr(api: &dyn Api, addr: &Addr) -> StdResult<Self> {
        let canonical = api.addr_canonicalize(addr.as_str())?;
        Self::from_canonical(&canonical)
    }

    /// Left-pad a canonical address to 32 bytes
    pub fn from_canonical(canonical: &CanonicalAddr) -> StdResult<Self> {
        let bytes = canonical.as_slice();
        if bytes.len() > 32 {
            return Err(StdError::generic_err(format!(
                "canonical address too long: {} bytes",
                bytes.len()
            )));
        }
        let mut result = [0u8; 32];
        result[32 - bytes.len()..].copy_from_slice(bytes);
        Ok(Self(result))
    }

    /// Parse a caller-supplied 32-byte value
    pub fn from_binary(bytes: &Binary) -> StdResult<Self> {
        Self::from_slice(bytes.as_slice())
    }

    pub fn from_slice(bytes: &[u8]) -> StdResult<Self> {
        let array: [u8; 32] = bytes.try_into().map_err(|_| {
            StdError::generic_err(format!("address must be 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(array))
    }

    /// The canonical address this value encodes
    pub fn to_canonical(&self) -> CanonicalAddr {
        if self.0[..SHORT_ADDRESS_PADDING].iter().all(|b| *b == 0) {
            CanonicalAddr::from(&self.0[SHORT_ADDRESS_PADDING..])
        } else {
            CanonicalAddr::from(&self.0[..])
        }
    }

    /// Decode into a local address
    pub fn to_addr(&self, api: &dyn Api) -> StdResult<Addr> {
        api.addr_humanize(&self.to_canonical())
    }

    pub fn to_hex(&self) -> String {
        bytes32_to_hex(&self.0)
    }
}

//! Decimal normalization between native precision and the 8-decimal wire format.
//!
//! Outbound amounts are truncated (never rounded) to 8 decimals. The discarded
//! remainder stays where it is and is not tracked. Inbound amounts are scaled
//! back up with checked arithmetic against the 64-bit native width.

use cosmwasm_std::{Uint128, Uint256};

use crate::error::ContractError;

/// Decimal places used on the wire
pub const WIRE_DECIMALS: u8 = 8;

/// `10^(decimals - 8)` for assets with more than 8 decimals, `None` otherwise.
///
/// Assets with more than 27 decimals have no representable scale; callers
/// surface that as an overflow.
fn scale(decimals: u8) -> Option<Result<u64, ContractError>> {
    if decimals <= WIRE_DECIMALS {
        return None;
    }
    Some(
        10u64
            .checked_pow((decimals - WIRE_DECIMALS) as u32)
            .ok_or(ContractError::AmountOverflow),
    )
}

/// Native amount to wire amount (truncating)
pub fn normalize_amount(amount: u64, decimals: u8) -> u64 {
    match scale(decimals) {
        None => amount,
        // Scale beyond u64: every u64 amount truncates to zero.
        Some(Err(_)) => 0,
        Some(Ok(factor)) => amount / factor,
    }
}

/// Wire amount to native amount (checked)
pub fn denormalize_amount(amount: u64, decimals: u8) -> Result<u64, ContractError> {
    match scale(decimals) {
        None => Ok(amount),
        Some(factor) => amount
            .checked_mul(factor?)
            .ok_or(ContractError::AmountOverflow),
    }
}

/// The part of `amount` that survives a round trip through the wire format
pub fn truncate_dust(amount: u64, decimals: u8) -> Result<u64, ContractError> {
    denormalize_amount(normalize_amount(amount, decimals), decimals)
}

/// A wire amount as carried in a payload, which must fit 64 bits
pub fn wire_to_u64(value: Uint256) -> Result<u64, ContractError> {
    Uint128::try_from(value)
        .ok()
        .and_then(|value| u64::try_from(value.u128()).ok())
        .ok_or(ContractError::U64Overflow)
}

/// A local cw20 amount, which must fit 64 bits to travel
pub fn native_to_u64(amount: Uint128) -> Result<u64, ContractError> {
    u64::try_from(amount.u128()).map_err(|_| ContractError::AmountOverflow)
}

/// Decimals given to a wrapped mint for an asset with `native_decimals`
pub fn wrapped_decimals(native_decimals: u8) -> u8 {
    native_decimals.min(WIRE_DECIMALS)
}

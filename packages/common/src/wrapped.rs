//! Wrapped-asset cw20 interface.
//!
//! A wrapped asset is a cw20 whose only minter is the bridge that created it.
//! Besides the standard cw20 surface it records where the underlying asset
//! lives and lets the bridge refresh its display name and symbol.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};
use cw20::{
    AllowanceResponse, BalanceResponse, Cw20Coin, Expiration, MinterResponse, TokenInfoResponse,
};

/// Callback executed by the new token at the end of its instantiation
#[cw_serde]
pub struct InitHook {
    /// Contract to call back (the bridge)
    pub contract_addr: String,
    /// Message to execute on it
    pub msg: Binary,
}

#[cw_serde]
pub struct WrappedInstantiateMsg {
    pub name: String,
    pub symbol: String,
    /// Origin chain of the underlying asset
    pub asset_chain: u16,
    /// 32-byte origin address of the underlying asset
    pub asset_address: Binary,
    pub decimals: u8,
    /// Optional initial supply (testing and redeployments only)
    pub initial_balances: Vec<Cw20Coin>,
    pub init_hook: Option<InitHook>,
}

#[cw_serde]
pub enum WrappedExecuteMsg {
    /// Move tokens to another account
    Transfer { recipient: String, amount: Uint128 },
    /// Destroy tokens held by the sender
    Burn { amount: Uint128 },
    /// Move tokens to a contract and trigger its receive hook
    Send {
        contract: String,
        amount: Uint128,
        msg: Binary,
    },
    /// Create new tokens (bridge only)
    Mint { recipient: String, amount: Uint128 },
    IncreaseAllowance {
        spender: String,
        amount: Uint128,
        expires: Option<Expiration>,
    },
    DecreaseAllowance {
        spender: String,
        amount: Uint128,
        expires: Option<Expiration>,
    },
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
    SendFrom {
        owner: String,
        contract: String,
        amount: Uint128,
        msg: Binary,
    },
    BurnFrom { owner: String, amount: Uint128 },
    /// Replace the display name and symbol (bridge only)
    UpdateMetadata { name: String, symbol: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum WrappedQueryMsg {
    /// Provenance of the wrapped asset
    #[returns(WrappedAssetInfoResponse)]
    WrappedAssetInfo {},
    #[returns(BalanceResponse)]
    Balance { address: String },
    #[returns(TokenInfoResponse)]
    TokenInfo {},
    #[returns(Option<MinterResponse>)]
    Minter {},
    #[returns(AllowanceResponse)]
    Allowance { owner: String, spender: String },
}

#[cw_serde]
pub struct WrappedAssetInfoResponse {
    /// Origin chain of the underlying asset
    pub asset_chain: u16,
    /// 32-byte origin address of the underlying asset
    pub asset_address: Binary,
    /// Bridge that created the token and is its minter
    pub bridge: Addr,
}

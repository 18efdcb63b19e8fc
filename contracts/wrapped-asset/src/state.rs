use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary};
use cw_storage_plus::Item;

pub const CONTRACT_NAME: &str = "crates.io:wrapped-asset";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where the underlying asset lives and which bridge issues this token
#[cw_serde]
pub struct WrappedAssetInfo {
    pub asset_chain: u16,
    /// 32-byte origin address
    pub asset_address: Binary,
    pub bridge: Addr,
}

pub const WRAPPED_ASSET_INFO: Item<WrappedAssetInfo> = Item::new("wrapped_asset_info");

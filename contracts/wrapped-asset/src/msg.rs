use cosmwasm_schema::cw_serde;

pub use common::wrapped::{
    InitHook, WrappedAssetInfoResponse, WrappedExecuteMsg as ExecuteMsg,
    WrappedInstantiateMsg as InstantiateMsg, WrappedQueryMsg as QueryMsg,
};

#[cw_serde]
pub struct MigrateMsg {}

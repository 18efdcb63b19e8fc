use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Base(#[from] cw20_base::ContractError),

    #[error("Unauthorized: only the bridge can perform this action")]
    Unauthorized,

    #[error("Invalid asset address: expected 32 bytes, got {got}")]
    InvalidAssetAddress { got: usize },
}

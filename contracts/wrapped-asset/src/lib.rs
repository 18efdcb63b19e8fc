//! Wrapped Asset Contract - CW20 Representation of a Foreign Asset
//!
//! Instantiated by the token bridge the first time an asset from another chain
//! is attested. The instantiating bridge becomes the sole minter, and the
//! contract records the origin chain and origin address of the asset so the
//! bridge (and anyone else) can verify what the token stands for.
//!
//! Standard cw20 behaviour is delegated to `cw20-base`.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;

//! Common - Shared Message Types for the Token Bridge Contracts
//!
//! This package holds the interfaces the contracts use to talk to each other:
//! - `guardian` - the guardian core contract that certifies attestations and
//!   accepts outbound messages
//! - `wrapped` - the wrapped-asset cw20 minted and burned by the bridge

pub mod guardian;
pub mod wrapped;

pub use crate::guardian::{CoreExecuteMsg, CoreQueryMsg, PostedAttestationResponse};
pub use crate::wrapped::{
    InitHook, WrappedAssetInfoResponse, WrappedExecuteMsg, WrappedInstantiateMsg,
    WrappedQueryMsg,
};
